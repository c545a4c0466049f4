//! Daily OHLCV bar representation.
//!
//! The sanitizer guarantees `close` is numeric (rows without one are dropped);
//! the remaining fields keep explicit `Option` undefined-ness so malformed
//! input never leaks a sentinel into arithmetic.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

impl PriceBar {
    /// max(high - low, |high - prev_close|, |low - prev_close|).
    ///
    /// With no previous close (first bar) the range collapses to high - low.
    /// None if high or low is undefined.
    pub fn true_range(&self, prev_close: Option<f64>) -> Option<f64> {
        let high = self.high?;
        let low = self.low?;
        let hl = high - low;
        match prev_close {
            Some(pc) => {
                let hc = (high - pc).abs();
                let lc = (low - pc).abs();
                Some(hl.max(hc).max(lc))
            }
            None => Some(hl),
        }
    }
}
