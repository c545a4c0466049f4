//! False-breakdown-then-reclaim detector.
//!
//! The support level is the higher of the recent rolling low of closes and
//! the medium-term moving average, both evaluated as of the prior bar so
//! the current bar cannot influence its own level (no lookahead).
//!
//! Breakdown: prior close under the level. Reclaim: current close back
//! above the level and above the prior high. Both must hold on the most
//! recent two bars.

use crate::domain::detect::Detection;
use crate::domain::indicator::rolling::rolling_min;
use crate::domain::indicator::sma;
use crate::domain::series::PriceSeries;

pub fn reclaim_setup(series: &PriceSeries, support_window: usize, ma_length: usize) -> Detection {
    let n = series.len();
    if support_window == 0 || ma_length == 0 || n < support_window.max(ma_length) + 1 {
        return Detection::Insufficient;
    }

    let Some(level) = level_at(series, support_window, ma_length, n - 2) else {
        return Detection::Insufficient;
    };
    let Some(prior_high) = series.bars()[n - 2].high else {
        return Detection::Insufficient;
    };

    let prior_close = series.bars()[n - 2].close;
    let close = series.bars()[n - 1].close;

    let breakdown = prior_close < level;
    let reclaim = close > level && close > prior_high;
    Detection::from_bool(breakdown && reclaim)
}

/// The level the reclaim detector compared against, with windows ending at
/// the prior bar so the breakout bar cannot inflate it. Used by the
/// selector to anchor the stop.
pub fn support_level(series: &PriceSeries, support_window: usize, ma_length: usize) -> Option<f64> {
    let n = series.len();
    if n < 2 {
        return None;
    }
    level_at(series, support_window, ma_length, n - 2)
}

fn level_at(
    series: &PriceSeries,
    support_window: usize,
    ma_length: usize,
    index: usize,
) -> Option<f64> {
    let closes: Vec<Option<f64>> = series.bars().iter().map(|b| Some(b.close)).collect();
    let low = rolling_min(&closes, support_window).get(index).copied().flatten()?;
    let ma = sma(series, ma_length).value_at(index)?;
    Some(low.max(ma))
}
