//! Volume thrust detectors.

use crate::domain::detect::Detection;
use crate::domain::series::PriceSeries;

/// Latest volume strictly greater than `multiplier` times the mean volume
/// of the preceding `lookback` bars. Boundary equality does not trigger.
pub fn volume_thrust(series: &PriceSeries, lookback: usize, multiplier: f64) -> Detection {
    let n = series.len();
    if lookback == 0 || n < lookback + 1 {
        return Detection::Insufficient;
    }

    let tail = &series.bars()[n - lookback - 1..];
    let Some(volumes) = collect_volumes(tail) else {
        return Detection::Insufficient;
    };

    let prior_mean = volumes[..lookback].iter().sum::<f64>() / lookback as f64;
    let latest = volumes[lookback];
    Detection::from_bool(latest > multiplier * prior_mean)
}

/// Short-window average volume over long-window average volume at or above
/// `ratio_min`. A zero long-window average cannot trigger.
pub fn five_day_thrust(
    series: &PriceSeries,
    short: usize,
    long: usize,
    ratio_min: f64,
) -> Detection {
    let n = series.len();
    let window = short.max(long);
    if short == 0 || long == 0 || n < window {
        return Detection::Insufficient;
    }

    let tail = &series.bars()[n - window..];
    let Some(volumes) = collect_volumes(tail) else {
        return Detection::Insufficient;
    };

    let short_avg = volumes[window - short..].iter().sum::<f64>() / short as f64;
    let long_avg = volumes[window - long..].iter().sum::<f64>() / long as f64;
    if long_avg == 0.0 {
        return Detection::Rejected;
    }
    Detection::from_bool(short_avg / long_avg >= ratio_min)
}

fn collect_volumes(bars: &[crate::domain::bar::PriceBar]) -> Option<Vec<f64>> {
    bars.iter().map(|b| b.volume).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bar::PriceBar;
    use chrono::NaiveDate;

    fn make_series(volumes: &[f64]) -> PriceSeries {
        let bars = volumes
            .iter()
            .enumerate()
            .map(|(i, &volume)| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                open: Some(10.0),
                high: Some(10.0),
                low: Some(10.0),
                close: 10.0,
                volume: Some(volume),
            })
            .collect();
        PriceSeries::from_bars("TEST", bars)
    }

    #[test]
    fn thrust_triggers_above_multiple() {
        let series = make_series(&[100.0, 100.0, 100.0, 100.0, 151.0]);
        assert_eq!(volume_thrust(&series, 4, 1.5), Detection::Triggered);
    }

    #[test]
    fn thrust_boundary_equality_is_rejected() {
        // 150 == 1.5 * mean(100,100,100,100): strict inequality only.
        let series = make_series(&[100.0, 100.0, 100.0, 100.0, 150.0]);
        assert_eq!(volume_thrust(&series, 4, 1.5), Detection::Rejected);
    }

    #[test]
    fn thrust_short_history_is_insufficient() {
        let series = make_series(&[100.0, 150.0]);
        assert_eq!(volume_thrust(&series, 4, 1.5), Detection::Insufficient);
    }

    #[test]
    fn thrust_missing_volume_is_insufficient() {
        let mut bars = make_series(&[100.0, 100.0, 100.0, 100.0, 200.0])
            .bars()
            .to_vec();
        bars[2].volume = None;
        let series = PriceSeries::from_bars("TEST", bars);
        assert_eq!(volume_thrust(&series, 4, 1.5), Detection::Insufficient);
    }

    #[test]
    fn five_day_thrust_ratio_boundary_is_inclusive() {
        // Last 5 volumes average 130, last 10 average 115 → ratio 130/115.
        let volumes = [
            100.0, 100.0, 100.0, 100.0, 100.0, 130.0, 130.0, 130.0, 130.0, 130.0,
        ];
        let series = make_series(&volumes);
        let ratio = 130.0 / 115.0;
        assert_eq!(five_day_thrust(&series, 5, 10, ratio), Detection::Triggered);
        assert_eq!(
            five_day_thrust(&series, 5, 10, ratio + 1e-9),
            Detection::Rejected
        );
    }

    #[test]
    fn five_day_thrust_zero_long_average_is_rejected() {
        let series = make_series(&[0.0; 10]);
        assert_eq!(five_day_thrust(&series, 5, 10, 1.2), Detection::Rejected);
    }

    #[test]
    fn five_day_thrust_short_history_is_insufficient() {
        let series = make_series(&[100.0; 6]);
        assert_eq!(five_day_thrust(&series, 5, 10, 1.2), Detection::Insufficient);
    }
}
