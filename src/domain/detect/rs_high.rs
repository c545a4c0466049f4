//! Relative-strength new-high detector.

use crate::domain::detect::Detection;
use crate::domain::indicator::IndicatorSeries;

/// Latest RS value at or above the rolling maximum of the trailing `window`
/// values. A tie with the rolling max counts as a new high.
pub fn rs_new_high(rs: &IndicatorSeries, window: usize) -> Detection {
    if window == 0 || rs.len() < window {
        return Detection::Insufficient;
    }

    let tail = &rs.points[rs.len() - window..];
    let Some(values) = tail.iter().map(|p| p.value).collect::<Option<Vec<f64>>>() else {
        return Detection::Insufficient;
    };

    let latest = values[values.len() - 1];
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Detection::from_bool(latest >= max)
}
