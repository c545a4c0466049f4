//! Report generation port trait.

use crate::domain::error::ScannerError;
use crate::domain::scan::Candidate;
use std::path::Path;

/// Port for writing the ranked watchlist.
pub trait ReportPort {
    fn write_watchlist(&self, candidates: &[Candidate], output: &Path)
        -> Result<(), ScannerError>;
}
