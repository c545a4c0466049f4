//! CSV watchlist report adapter.

use crate::domain::error::ScannerError;
use crate::domain::scan::Candidate;
use crate::ports::report_port::ReportPort;
use std::path::Path;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn tri_flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "true",
        Some(false) => "false",
        None => "unknown",
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_watchlist(
        &self,
        candidates: &[Candidate],
        output: &Path,
    ) -> Result<(), ScannerError> {
        let mut wtr = csv::Writer::from_path(output).map_err(|e| ScannerError::Report {
            reason: e.to_string(),
        })?;

        wtr.write_record([
            "Symbol",
            "Status",
            "Signal",
            "Entry",
            "Stop",
            "R1",
            "R2",
            "VolSpike",
            "RS_20D_High",
            "RSI_Rising_20_38",
            "Fund_DE_le_1_5",
            "Fund_ICR_ge_2_5",
            "Fund_Pledge_le_20",
            "Fund_QoQ_Pos_1of3",
            "Fundamentals",
        ])
        .map_err(|e| ScannerError::Report {
            reason: e.to_string(),
        })?;

        for c in candidates {
            wtr.write_record([
                c.symbol.as_str(),
                c.status(),
                c.signal(),
                &format!("{:.2}", c.entry),
                &format!("{:.2}", c.stop),
                &format!("{:.2}", c.target1),
                &format!("{:.2}", c.target2),
                flag(c.vol_spike),
                flag(c.rs_20d_high),
                flag(c.rsi_rising),
                tri_flag(c.checks.de_le_1_5),
                tri_flag(c.checks.icr_ge_2_5),
                tri_flag(c.checks.pledge_le_20),
                tri_flag(c.checks.qoq_pos_1_of_3),
                &c.fundamentals.to_string(),
            ])
            .map_err(|e| ScannerError::Report {
                reason: e.to_string(),
            })?;
        }

        wtr.flush().map_err(|e| ScannerError::Report {
            reason: e.to_string(),
        })?;
        Ok(())
    }
}
