//! RSI (Relative Strength Index).
//!
//! Wilder smoothing for average gain/loss:
//! - First average: simple mean of gains/losses over the first n deltas
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss)); avg_loss == 0 reads as
//! the upper bound (100), never undefined or infinite.
//!
//! Warm-up points stay undefined. Earlier revisions of the screener
//! back-filled the leading gap from the first defined value; leave-undefined
//! is canonical here.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::series::PriceSeries;

pub fn rsi(series: &PriceSeries, length: usize) -> IndicatorSeries {
    let bars = series.bars();
    let mut points: Vec<IndicatorPoint> = bars
        .iter()
        .map(|b| IndicatorPoint {
            date: b.date,
            value: None,
        })
        .collect();

    if length == 0 || bars.len() <= length {
        return IndicatorSeries {
            indicator_type: IndicatorType::Rsi(length),
            points,
        };
    }

    let deltas: Vec<f64> = bars.windows(2).map(|w| w[1].close - w[0].close).collect();
    let gain = |d: f64| if d > 0.0 { d } else { 0.0 };
    let loss = |d: f64| if d < 0.0 { -d } else { 0.0 };

    let mut avg_gain = deltas[..length].iter().copied().map(gain).sum::<f64>() / length as f64;
    let mut avg_loss = deltas[..length].iter().copied().map(loss).sum::<f64>() / length as f64;
    points[length].value = Some(rsi_from_averages(avg_gain, avg_loss));

    for (i, &delta) in deltas.iter().enumerate().skip(length) {
        avg_gain = (avg_gain * (length - 1) as f64 + gain(delta)) / length as f64;
        avg_loss = (avg_loss * (length - 1) as f64 + loss(delta)) / length as f64;
        points[i + 1].value = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(length),
        points,
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bar::PriceBar;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn make_series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                open: Some(close),
                high: Some(close),
                low: Some(close),
                close,
                volume: Some(1000.0),
            })
            .collect();
        PriceSeries::from_bars("TEST", bars)
    }

    #[test]
    fn rsi_warmup_is_undefined() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + (i % 5) as f64).collect();
        let out = rsi(&make_series(&closes), 14);
        for i in 0..14 {
            assert_eq!(out.value_at(i), None, "point {} should be undefined", i);
        }
        assert!(out.value_at(14).is_some());
    }

    #[test]
    fn rsi_short_series_entirely_undefined() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&make_series(&closes), 14);
        assert!(out.points.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn rsi_all_gains_reads_100() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&make_series(&closes), 14);
        let last = out.last_value().unwrap();
        assert!((last - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_all_losses_reads_0() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let out = rsi(&make_series(&closes), 14);
        let last = out.last_value().unwrap();
        assert!(last.abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_no_backfill_before_warmup() {
        let closes: Vec<f64> = (0..16).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&make_series(&closes), 14);
        assert_eq!(out.value_at(0), None);
        assert_eq!(out.value_at(13), None);
    }

    #[test]
    fn rsi_uptrend_is_bullish() {
        let closes = [
            44.0, 44.25, 44.5, 43.75, 44.5, 44.25, 44.75, 45.25, 45.5, 45.25, 45.5, 46.0, 46.25,
            46.0, 46.5,
        ];
        let out = rsi(&make_series(&closes), 14);
        let last = out.last_value().unwrap();
        assert!(last > 50.0 && last < 100.0);
    }

    proptest! {
        #[test]
        fn rsi_defined_values_stay_in_bounds(
            closes in proptest::collection::vec(1.0f64..1000.0, 16..60)
        ) {
            let out = rsi(&make_series(&closes), 14);
            for point in &out.points {
                if let Some(v) = point.value {
                    prop_assert!((0.0..=100.0).contains(&v), "RSI {} out of range", v);
                }
            }
        }
    }
}
