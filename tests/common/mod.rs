#![allow(dead_code)]

use chrono::NaiveDate;
use reclaimscan::domain::bar::PriceBar;
use reclaimscan::domain::fundamentals::{FundamentalRecord, FundamentalsTable};
use reclaimscan::domain::series::PriceSeries;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

pub fn make_bar(day: u64, close: f64, high: f64, volume: f64) -> PriceBar {
    PriceBar {
        date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + chrono::Days::new(day),
        open: Some(close),
        high: Some(high),
        low: Some(close.min(high) - 1.0),
        close,
        volume: Some(volume),
    }
}

/// 130-bar series that triggers every price/volume detector on the final
/// bar: sideways drift, a slide under support, then a high-volume reclaim.
pub fn setup_series(symbol: &str) -> PriceSeries {
    let mut bars = Vec::new();
    let mut day = 0u64;
    for i in 0..100 {
        let close = 120.0 - i as f64 * 0.3;
        bars.push(make_bar(day, close, close + 0.5, 100_000.0));
        day += 1;
    }
    let mut close = 90.0;
    for _ in 0..29 {
        close -= 0.8;
        bars.push(make_bar(day, close, close + 0.4, 90_000.0));
        day += 1;
    }
    bars.push(make_bar(day, close + 30.0, close + 31.0, 600_000.0));
    PriceSeries::from_bars(symbol, bars)
}

/// Flat series that never triggers anything.
pub fn quiet_series(symbol: &str, n: usize) -> PriceSeries {
    let bars = (0..n)
        .map(|i| make_bar(i as u64, 100.0, 100.5, 1000.0))
        .collect();
    PriceSeries::from_bars(symbol, bars)
}

/// Index drifting slightly down so a reclaiming symbol makes an RS high.
pub fn index_series(n: usize) -> PriceSeries {
    let bars = (0..n)
        .map(|i| make_bar(i as u64, 1000.0 - i as f64 * 0.1, 1000.0, 1_000_000.0))
        .collect();
    PriceSeries::from_bars("NIFTY500", bars)
}

pub fn passing_record(symbol: &str) -> FundamentalRecord {
    FundamentalRecord {
        symbol: symbol.to_string(),
        debt_to_equity: Some(1.2),
        interest_coverage: Some(3.0),
        promoter_pledge_pct: Some(10.0),
        qoq_rev_pos_last3: Some(1.0),
        qoq_eps_pos_last3: Some(0.0),
    }
}

pub fn fundamentals_for(symbols: &[&str]) -> FundamentalsTable {
    let mut table = HashMap::new();
    for symbol in symbols {
        table.insert(symbol.to_string(), passing_record(symbol));
    }
    table
}

/// Render a series as the EOD CSV format the data adapter reads.
pub fn series_to_csv(series: &PriceSeries) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Volume\n");
    for bar in series.bars() {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            bar.date,
            bar.open.unwrap_or(bar.close),
            bar.high.unwrap_or(bar.close),
            bar.low.unwrap_or(bar.close),
            bar.close,
            bar.volume.unwrap_or(0.0),
        )
        .unwrap();
    }
    out
}

/// Write a full on-disk fixture tree: EOD files, universe, fundamentals and
/// an INI config pointing at all of them.
pub fn write_fixture_tree(root: &Path, series: &[&PriceSeries], funded: &[&str]) {
    let eod = root.join("eod");
    fs::create_dir_all(&eod).unwrap();
    for s in series {
        fs::write(eod.join(format!("{}.csv", s.symbol())), series_to_csv(s)).unwrap();
    }

    let mut universe = String::from("Symbol,Series\n");
    for s in series {
        if s.symbol() != "NIFTY500" {
            writeln!(universe, "{},EQ", s.symbol()).unwrap();
        }
    }
    fs::write(root.join("universe.csv"), universe).unwrap();

    let mut fundamentals = String::from(
        "Symbol,debt_to_equity,interest_coverage,promoter_pledge_pct,\
         qoq_rev_pos_last3,qoq_eps_pos_last3\n",
    );
    for symbol in funded {
        writeln!(fundamentals, "{},1.2,3.0,10,1,0", symbol).unwrap();
    }
    fs::write(root.join("fundamentals.csv"), fundamentals).unwrap();

    let config = format!(
        "[data]\n\
         eod_dir = {}\n\
         universe_csv = {}\n\
         fundamentals_csv = {}\n\
         index_symbol = NIFTY500\n\
         \n\
         [scan]\n\
         rsi_band_low = 0\n\
         rsi_band_high = 95\n",
        eod.display(),
        root.join("universe.csv").display(),
        root.join("fundamentals.csv").display(),
    );
    fs::write(root.join("config.ini"), config).unwrap();
}
