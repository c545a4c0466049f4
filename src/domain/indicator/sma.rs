//! Simple Moving Average over closes.

use crate::domain::indicator::rolling::rolling_mean;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::series::PriceSeries;

pub fn sma(series: &PriceSeries, length: usize) -> IndicatorSeries {
    let closes: Vec<Option<f64>> = series.bars().iter().map(|b| Some(b.close)).collect();
    let means = rolling_mean(&closes, length);
    IndicatorSeries {
        indicator_type: IndicatorType::Sma(length),
        points: series
            .bars()
            .iter()
            .zip(means)
            .map(|(bar, value)| IndicatorPoint {
                date: bar.date,
                value,
            })
            .collect(),
    }
}
