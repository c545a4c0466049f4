//! Data access port trait.

use crate::domain::error::ScannerError;
use crate::domain::fundamentals::FundamentalsTable;
use crate::domain::series::RawTable;

pub trait DataPort {
    /// Raw EOD table for a symbol, None when the symbol has no data at all.
    fn fetch_table(&self, symbol: &str) -> Result<Option<RawTable>, ScannerError>;

    /// Symbols of the configured universe, deduplicated and uppercased.
    fn load_universe(&self) -> Result<Vec<String>, ScannerError>;

    /// Fundamentals keyed by symbol; symbols absent from the table are
    /// simply unknown to the gate.
    fn load_fundamentals(&self) -> Result<FundamentalsTable, ScannerError>;
}
