//! Rising-RSI-in-band detector.
//!
//! Triggers when the latest RSI sits inside [low, high] inclusive and is
//! rising, where "rising" is a strict comparison against the immediately
//! preceding RSI value. Earlier screener revisions disagreed on the rising
//! rule (window median, window min, 3-point monotonic run); the prior-day
//! comparison is the canonical choice here.

use crate::domain::detect::Detection;
use crate::domain::indicator::rsi;
use crate::domain::series::PriceSeries;

pub fn rising_rsi_band(
    series: &PriceSeries,
    low: f64,
    high: f64,
    rsi_length: usize,
    trend_lookback: usize,
) -> Detection {
    let out = rsi(series, rsi_length);
    let lookback = trend_lookback.max(2);
    if out.len() < lookback {
        return Detection::Insufficient;
    }

    let tail = &out.points[out.len() - lookback..];
    let Some(values) = tail.iter().map(|p| p.value).collect::<Option<Vec<f64>>>() else {
        return Detection::Insufficient;
    };

    let latest = values[values.len() - 1];
    let previous = values[values.len() - 2];
    let in_band = latest >= low && latest <= high;
    let rising = latest > previous;
    Detection::from_bool(in_band && rising)
}
