//! Price series and the raw-table sanitizer.
//!
//! A [`PriceSeries`] upholds the invariant of unique, strictly ascending
//! dates. It is only constructed through [`sanitize`] (or the test-only
//! [`PriceSeries::from_bars`]), which normalizes an untyped tabular record
//! set the way the data adapter delivers it.

use crate::domain::bar::PriceBar;
use chrono::NaiveDate;

/// Untyped tabular record set handed over by a data adapter.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Clean, date-ordered per-symbol series.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series directly from bars, enforcing the date invariant.
    /// Intended for tests and in-memory callers that already hold clean data.
    pub fn from_bars(symbol: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }
}

fn normalize_column(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn find_column(columns: &[String], name: &str) -> Option<usize> {
    columns.iter().position(|c| normalize_column(c) == name)
}

fn parse_numeric(cell: Option<&String>) -> Option<f64> {
    let raw = cell?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_date(cell: Option<&String>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell?.trim(), "%Y-%m-%d").ok()
}

/// Normalize a raw price/volume table into a clean series.
///
/// Column names are matched case/whitespace-insensitively; `adj close`
/// substitutes for a missing `close`. OHLCV cells are coerced to numeric
/// with failures becoming undefined. Rows with an unparseable date or an
/// undefined close are dropped, the remainder deduplicated by date (first
/// occurrence kept) and sorted ascending. Returns None when nothing
/// usable is left.
pub fn sanitize(symbol: &str, table: &RawTable) -> Option<PriceSeries> {
    let date_idx = find_column(&table.columns, "date")?;
    let close_idx =
        find_column(&table.columns, "close").or_else(|| find_column(&table.columns, "adj close"))?;
    let open_idx = find_column(&table.columns, "open");
    let high_idx = find_column(&table.columns, "high");
    let low_idx = find_column(&table.columns, "low");
    let volume_idx = find_column(&table.columns, "volume");

    let mut bars: Vec<PriceBar> = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let Some(date) = parse_date(row.get(date_idx)) else {
            continue;
        };
        let Some(close) = parse_numeric(row.get(close_idx)) else {
            continue;
        };
        bars.push(PriceBar {
            date,
            open: open_idx.and_then(|i| parse_numeric(row.get(i))),
            high: high_idx.and_then(|i| parse_numeric(row.get(i))),
            low: low_idx.and_then(|i| parse_numeric(row.get(i))),
            close,
            volume: volume_idx.and_then(|i| parse_numeric(row.get(i))),
        });
    }

    // Stable sort, then keep the first row seen for each date.
    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);

    if bars.is_empty() {
        return None;
    }

    Some(PriceSeries {
        symbol: symbol.to_string(),
        bars,
    })
}
