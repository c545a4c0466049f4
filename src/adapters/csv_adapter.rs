//! CSV flat-file data adapter.
//!
//! EOD bars live one file per symbol under a cache directory; the universe
//! and fundamentals tables are single CSVs. All cell-level cleaning is left
//! to the domain sanitizer — this adapter only turns files into raw tables.

use crate::domain::error::ScannerError;
use crate::domain::fundamentals::{FundamentalRecord, FundamentalsTable};
use crate::domain::series::RawTable;
use crate::ports::data_port::DataPort;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub struct CsvAdapter {
    eod_dir: PathBuf,
    universe_csv: PathBuf,
    fundamentals_csv: PathBuf,
}

impl CsvAdapter {
    pub fn new(eod_dir: PathBuf, universe_csv: PathBuf, fundamentals_csv: PathBuf) -> Self {
        Self {
            eod_dir,
            universe_csv,
            fundamentals_csv,
        }
    }

    fn eod_path(&self, symbol: &str) -> PathBuf {
        self.eod_dir.join(format!("{}.csv", symbol))
    }
}

fn read_table(path: &Path) -> Result<RawTable, ScannerError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| ScannerError::Data {
            symbol: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let columns: Vec<String> = rdr
        .headers()
        .map_err(|e| ScannerError::Data {
            symbol: path.display().to_string(),
            reason: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| ScannerError::Data {
            symbol: path.display().to_string(),
            reason: e.to_string(),
        })?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawTable { columns, rows })
}

fn column_index(columns: &[String], name: &str) -> Option<usize> {
    columns
        .iter()
        .position(|c| c.trim().eq_ignore_ascii_case(name))
}

fn cell_f64(row: &[String], index: Option<usize>) -> Option<f64> {
    let raw = row.get(index?)?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl DataPort for CsvAdapter {
    fn fetch_table(&self, symbol: &str) -> Result<Option<RawTable>, ScannerError> {
        let path = self.eod_path(symbol);
        if !path.exists() {
            return Ok(None);
        }
        read_table(&path).map(Some)
    }

    fn load_universe(&self) -> Result<Vec<String>, ScannerError> {
        let table = read_table(&self.universe_csv)?;
        let symbol_idx =
            column_index(&table.columns, "symbol").ok_or_else(|| ScannerError::Data {
                symbol: self.universe_csv.display().to_string(),
                reason: "missing Symbol column".into(),
            })?;
        let series_idx = column_index(&table.columns, "series");

        let mut seen = HashSet::new();
        let mut symbols = Vec::new();
        for row in &table.rows {
            // A Series column restricts the universe to the EQ segment.
            if let Some(idx) = series_idx {
                let series = row.get(idx).map(|s| s.trim().to_uppercase());
                if series.as_deref() != Some("EQ") {
                    continue;
                }
            }
            let Some(symbol) = row.get(symbol_idx) else {
                continue;
            };
            let symbol = symbol.trim().to_uppercase();
            if symbol.is_empty() || !seen.insert(symbol.clone()) {
                continue;
            }
            symbols.push(symbol);
        }
        Ok(symbols)
    }

    fn load_fundamentals(&self) -> Result<FundamentalsTable, ScannerError> {
        let table = read_table(&self.fundamentals_csv)?;
        let symbol_idx =
            column_index(&table.columns, "symbol").ok_or_else(|| ScannerError::Data {
                symbol: self.fundamentals_csv.display().to_string(),
                reason: "missing Symbol column".into(),
            })?;
        let de_idx = column_index(&table.columns, "debt_to_equity");
        let icr_idx = column_index(&table.columns, "interest_coverage");
        let pledge_idx = column_index(&table.columns, "promoter_pledge_pct");
        let qrev_idx = column_index(&table.columns, "qoq_rev_pos_last3");
        let qeps_idx = column_index(&table.columns, "qoq_eps_pos_last3");

        let mut out = FundamentalsTable::new();
        for row in &table.rows {
            let Some(symbol) = row.get(symbol_idx) else {
                continue;
            };
            let symbol = symbol.trim().to_uppercase();
            if symbol.is_empty() {
                continue;
            }
            out.insert(
                symbol.clone(),
                FundamentalRecord {
                    symbol,
                    debt_to_equity: cell_f64(row, de_idx),
                    interest_coverage: cell_f64(row, icr_idx),
                    promoter_pledge_pct: cell_f64(row, pledge_idx),
                    qoq_rev_pos_last3: cell_f64(row, qrev_idx),
                    qoq_eps_pos_last3: cell_f64(row, qeps_idx),
                },
            );
        }
        Ok(out)
    }
}
