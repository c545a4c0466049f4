use clap::Parser;
use reclaimscan::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
