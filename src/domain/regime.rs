//! Market regime classifier.
//!
//! Combines index trend (last close vs 200-bar SMA) with breadth (% of a
//! symbol sample above their 50-bar SMA) into a four-state label. The
//! three-state ON/CAUTION/OFF variant is implemented: CAUTION when exactly
//! one of the two conditions holds.

use crate::domain::indicator::sma;
use crate::domain::series::PriceSeries;
use std::fmt;

pub const INDEX_TREND_LENGTH: usize = 200;
pub const BREADTH_MA_LENGTH: usize = 50;
pub const DEFAULT_BREADTH_MIN_BARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    On,
    Off,
    Caution,
    Unknown,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Regime::On => "ON",
            Regime::Off => "OFF",
            Regime::Caution => "CAUTION",
            Regime::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

/// Classify the market regime from the index series and a breadth sample.
///
/// Symbols shorter than `min_bars` (or without a defined 50-bar SMA) are
/// excluded from both numerator and denominator of the breadth percentage.
pub fn classify(
    index: &PriceSeries,
    breadth_sample: &[PriceSeries],
    min_bars: usize,
    pct_above_50dma_for_on: f64,
) -> Regime {
    if index.len() < INDEX_TREND_LENGTH {
        return Regime::Unknown;
    }

    let index_above = match (index.last(), sma(index, INDEX_TREND_LENGTH).last_value()) {
        (Some(bar), Some(ma)) => bar.close > ma,
        _ => false,
    };

    let mut total = 0usize;
    let mut above = 0usize;
    for series in breadth_sample {
        if series.len() < min_bars {
            continue;
        }
        let (Some(bar), Some(ma)) = (series.last(), sma(series, BREADTH_MA_LENGTH).last_value())
        else {
            continue;
        };
        total += 1;
        if bar.close > ma {
            above += 1;
        }
    }

    let pct_above = if total > 0 {
        above as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    let breadth_ok = pct_above >= pct_above_50dma_for_on;

    match (index_above, breadth_ok) {
        (true, true) => Regime::On,
        (false, false) => Regime::Off,
        _ => Regime::Caution,
    }
}
