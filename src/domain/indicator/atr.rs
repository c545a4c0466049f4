//! ATR (Average True Range): rolling mean of true range.
//!
//! True range per bar = max(high-low, |high-prev_close|, |low-prev_close|);
//! the first bar has no previous close and uses high-low. Bars with missing
//! high/low yield an undefined true range and poison any window containing
//! them.

use crate::domain::indicator::rolling::rolling_mean;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::series::PriceSeries;

pub fn atr(series: &PriceSeries, length: usize) -> IndicatorSeries {
    let bars = series.bars();
    let mut tr_values: Vec<Option<f64>> = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let prev_close = if i == 0 { None } else { Some(bars[i - 1].close) };
        tr_values.push(bar.true_range(prev_close));
    }

    let means = rolling_mean(&tr_values, length);
    IndicatorSeries {
        indicator_type: IndicatorType::Atr(length),
        points: bars
            .iter()
            .zip(means)
            .map(|(bar, value)| IndicatorPoint {
                date: bar.date,
                value,
            })
            .collect(),
    }
}
