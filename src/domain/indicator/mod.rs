//! Technical indicator implementations.
//!
//! Every indicator is a pure function over a full [`PriceSeries`] returning
//! an [`IndicatorSeries`] aligned one-to-one with its input dates. Warm-up
//! entries are `None` by construction — never zero, NaN or any other
//! sentinel that could leak into arithmetic.

pub mod rolling;
pub mod sma;
pub mod rsi;
pub mod atr;
pub mod relative_strength;

use chrono::NaiveDate;
use std::fmt;

pub use atr::atr;
pub use relative_strength::rs_ratio;
pub use rsi::rsi;
pub use sma::sma;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    Atr(usize),
    RsRatio,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|p| p.value)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.last().and_then(|p| p.value)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(length) => write!(f, "SMA({})", length),
            IndicatorType::Rsi(length) => write!(f, "RSI({})", length),
            IndicatorType::Atr(length) => write!(f, "ATR({})", length),
            IndicatorType::RsRatio => write!(f, "RS"),
        }
    }
}
