//! Relative strength ratio: symbol close ÷ index close.
//!
//! Aligned by date via inner join — only dates present in both series
//! produce a point. A zero index close yields an undefined value at that
//! date rather than an infinity.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::series::PriceSeries;

pub fn rs_ratio(symbol_series: &PriceSeries, index_series: &PriceSeries) -> IndicatorSeries {
    let mut points = Vec::new();
    let sym = symbol_series.bars();
    let idx = index_series.bars();
    let (mut i, mut j) = (0, 0);

    // Both series are date-sorted, so a two-pointer merge is the join.
    while i < sym.len() && j < idx.len() {
        match sym[i].date.cmp(&idx[j].date) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                let value = if idx[j].close == 0.0 {
                    None
                } else {
                    Some(sym[i].close / idx[j].close)
                };
                points.push(IndicatorPoint {
                    date: sym[i].date,
                    value,
                });
                i += 1;
                j += 1;
            }
        }
    }

    IndicatorSeries {
        indicator_type: IndicatorType::RsRatio,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bar::PriceBar;
    use chrono::NaiveDate;

    fn make_series(symbol: &str, days_and_closes: &[(u32, f64)]) -> PriceSeries {
        let bars = days_and_closes
            .iter()
            .map(|&(day, close)| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                open: Some(close),
                high: Some(close),
                low: Some(close),
                close,
                volume: Some(1000.0),
            })
            .collect();
        PriceSeries::from_bars(symbol, bars)
    }

    #[test]
    fn rs_ratio_divides_aligned_closes() {
        let sym = make_series("ACME", &[(1, 10.0), (2, 20.0)]);
        let idx = make_series("IDX", &[(1, 100.0), (2, 200.0)]);
        let out = rs_ratio(&sym, &idx);
        assert_eq!(out.len(), 2);
        assert_eq!(out.value_at(0), Some(0.1));
        assert_eq!(out.value_at(1), Some(0.1));
    }

    #[test]
    fn rs_ratio_inner_join_skips_unmatched_dates() {
        let sym = make_series("ACME", &[(1, 10.0), (2, 20.0), (4, 40.0)]);
        let idx = make_series("IDX", &[(2, 200.0), (3, 300.0), (4, 400.0)]);
        let out = rs_ratio(&sym, &idx);
        assert_eq!(out.len(), 2);
        assert_eq!(out.points[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(out.points[1].date, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
    }

    #[test]
    fn rs_ratio_zero_index_close_is_undefined() {
        let sym = make_series("ACME", &[(1, 10.0), (2, 20.0)]);
        let idx = make_series("IDX", &[(1, 0.0), (2, 200.0)]);
        let out = rs_ratio(&sym, &idx);
        assert_eq!(out.value_at(0), None);
        assert_eq!(out.value_at(1), Some(0.1));
    }

    #[test]
    fn rs_ratio_disjoint_dates_is_empty() {
        let sym = make_series("ACME", &[(1, 10.0)]);
        let idx = make_series("IDX", &[(2, 200.0)]);
        assert!(rs_ratio(&sym, &idx).is_empty());
    }
}
