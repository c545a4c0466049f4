//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::ScannerError;
use crate::domain::regime::{self, Regime};
use crate::domain::scan::{run_scan, ScanParams};
use crate::domain::series::{sanitize, PriceSeries};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

/// Breadth is sampled over a capped prefix of the universe to bound the
/// regime cost on large universes.
const BREADTH_SAMPLE_SIZE: usize = 100;

#[derive(Parser, Debug)]
#[command(name = "reclaimscan", about = "False-breakdown reclaim watchlist screener")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan the universe and write the ranked watchlist
    Scan {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Evaluate only the first N universe symbols
        #[arg(long)]
        symbol_limit: Option<usize>,
    },
    /// Classify and print the current market regime
    Regime {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the configured universe symbols
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Scan {
            config,
            output,
            symbol_limit,
        } => run_scan_command(&config, output.as_ref(), symbol_limit),
        Command::Regime { config } => run_regime_command(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ScannerError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Scan parameters from the `[scan]` and `[regime]` sections; every key has
/// a production default.
pub fn build_scan_params(adapter: &dyn ConfigPort) -> ScanParams {
    let defaults = ScanParams::default();
    ScanParams {
        volume_thrust_lookback: adapter.get_int(
            "scan",
            "volume_thrust_lookback",
            defaults.volume_thrust_lookback as i64,
        ) as usize,
        volume_thrust_multiplier: adapter.get_double(
            "scan",
            "volume_thrust_multiplier",
            defaults.volume_thrust_multiplier,
        ),
        five_day_thrust_ratio: adapter.get_double(
            "scan",
            "five_day_thrust_ratio",
            defaults.five_day_thrust_ratio,
        ),
        rs_lookback_days: adapter.get_int(
            "scan",
            "rs_lookback_days",
            defaults.rs_lookback_days as i64,
        ) as usize,
        reclaim_lookback_days: adapter.get_int(
            "scan",
            "reclaim_lookback_days",
            defaults.reclaim_lookback_days as i64,
        ) as usize,
        reclaim_recent_window_days: adapter.get_int(
            "scan",
            "reclaim_recent_window_days",
            defaults.reclaim_recent_window_days as i64,
        ) as usize,
        reclaim_ma_length: adapter.get_int(
            "scan",
            "reclaim_ma_length",
            defaults.reclaim_ma_length as i64,
        ) as usize,
        entry_buffer_pct: adapter.get_double("scan", "entry_buffer_pct", defaults.entry_buffer_pct),
        stop_atr_multiplier: adapter.get_double(
            "scan",
            "stop_atr_multiplier",
            defaults.stop_atr_multiplier,
        ),
        stop_min_buffer_pct: adapter.get_double(
            "scan",
            "stop_min_buffer_pct",
            defaults.stop_min_buffer_pct,
        ),
        pct_above_50dma_for_on: adapter.get_double(
            "regime",
            "pct_above_50dma_for_on",
            defaults.pct_above_50dma_for_on,
        ),
        allow_unknown_fundamentals: adapter.get_bool(
            "scan",
            "allow_unknown_fundamentals",
            defaults.allow_unknown_fundamentals,
        ),
        rsi_band_low: adapter.get_double("scan", "rsi_band_low", defaults.rsi_band_low),
        rsi_band_high: adapter.get_double("scan", "rsi_band_high", defaults.rsi_band_high),
        rsi_trend_lookback: adapter.get_int(
            "scan",
            "rsi_trend_lookback",
            defaults.rsi_trend_lookback as i64,
        ) as usize,
    }
}

#[derive(Debug)]
pub struct DataConfig {
    pub eod_dir: PathBuf,
    pub universe_csv: PathBuf,
    pub fundamentals_csv: PathBuf,
    pub index_symbol: String,
}

pub fn build_data_config(adapter: &dyn ConfigPort) -> Result<DataConfig, ScannerError> {
    let require = |key: &str| {
        adapter
            .get_string("data", key)
            .ok_or_else(|| ScannerError::ConfigMissing {
                section: "data".into(),
                key: key.into(),
            })
    };

    Ok(DataConfig {
        eod_dir: PathBuf::from(require("eod_dir")?),
        universe_csv: PathBuf::from(require("universe_csv")?),
        fundamentals_csv: PathBuf::from(require("fundamentals_csv")?),
        index_symbol: require("index_symbol")?,
    })
}

/// Fetch and sanitize one symbol; Ok(None) when the symbol has no usable
/// rows at all.
fn load_series(data_port: &dyn DataPort, symbol: &str) -> Result<Option<PriceSeries>, ScannerError> {
    let Some(table) = data_port.fetch_table(symbol)? else {
        return Ok(None);
    };
    Ok(sanitize(symbol, &table))
}

fn load_index(data_port: &dyn DataPort, symbol: &str) -> Result<PriceSeries, ScannerError> {
    load_series(data_port, symbol)?.ok_or_else(|| ScannerError::NoData {
        symbol: symbol.to_string(),
    })
}

/// Load the universe's cleaned series, dropping (with a warning) symbols
/// that are missing or unsalvageable.
fn load_universe_series(
    data_port: &dyn DataPort,
    symbols: &[String],
) -> Result<Vec<PriceSeries>, ScannerError> {
    let mut series = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        match load_series(data_port, symbol)? {
            Some(s) => series.push(s),
            None => eprintln!("warning: skipping {} (no usable data)", symbol),
        }
    }
    Ok(series)
}

fn classify_regime(
    index: &PriceSeries,
    universe: &[PriceSeries],
    params: &ScanParams,
) -> Regime {
    let sample = &universe[..universe.len().min(BREADTH_SAMPLE_SIZE)];
    regime::classify(
        index,
        sample,
        regime::DEFAULT_BREADTH_MIN_BARS,
        params.pct_above_50dma_for_on,
    )
}

fn run_scan_command(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    symbol_limit: Option<usize>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let params = build_scan_params(&adapter);
    let data_config = match build_data_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = CsvAdapter::new(
        data_config.eod_dir,
        data_config.universe_csv,
        data_config.fundamentals_csv,
    );

    let mut symbols = match data_port.load_universe() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if let Some(limit) = symbol_limit {
        symbols.truncate(limit);
    }
    eprintln!("Universe: {} symbols", symbols.len());

    let fundamentals = match data_port.load_fundamentals() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let index = match load_index(&data_port, &data_config.index_symbol) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let universe = match load_universe_series(&data_port, &symbols) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let regime = classify_regime(&index, &universe, &params);
    eprintln!("Market regime: {}", regime);

    eprintln!(
        "Scanning {} series against {}...",
        universe.len(),
        index.symbol()
    );
    let candidates = match run_scan(&universe, &index, &fundamentals, &params) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Candidates: {}", candidates.len());
    for candidate in &candidates {
        eprintln!(
            "  {}: entry {:.2}, stop {:.2}, R1 {:.2}, R2 {:.2}",
            candidate.symbol, candidate.entry, candidate.stop, candidate.target1, candidate.target2
        );
    }

    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("watchlist.csv"));

    match CsvReportAdapter::new().write_watchlist(&candidates, &output) {
        Ok(()) => {
            eprintln!("Watchlist written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_regime_command(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let params = build_scan_params(&adapter);
    let data_config = match build_data_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = CsvAdapter::new(
        data_config.eod_dir,
        data_config.universe_csv,
        data_config.fundamentals_csv,
    );

    let symbols = match data_port.load_universe() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let index = match load_index(&data_port, &data_config.index_symbol) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let sample_symbols = &symbols[..symbols.len().min(BREADTH_SAMPLE_SIZE)];
    let universe = match load_universe_series(&data_port, sample_symbols) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let regime = classify_regime(&index, &universe, &params);
    println!("{}", regime);
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_config = match build_data_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = CsvAdapter::new(
        data_config.eod_dir,
        data_config.universe_csv,
        data_config.fundamentals_csv,
    );

    let symbols = match data_port.load_universe() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols in universe");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}
