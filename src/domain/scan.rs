//! Watchlist selector: per-symbol evaluation, gating, trade levels and
//! deterministic ranking.
//!
//! Evaluation is a pure map over symbols — each symbol depends only on its
//! own series, the shared index series and the shared fundamentals table.
//! The scan runs as a rayon scatter-gather: an unordered parallel map
//! followed by one explicit sort, so pool size never changes the output.

use crate::domain::detect::{
    five_day_thrust, reclaim_setup, rising_rsi_band, rs_new_high, support_level, volume_thrust,
    Detection,
};
use crate::domain::error::ScannerError;
use crate::domain::fundamentals::{
    self, FundamentalChecks, FundamentalsStatus, FundamentalsTable,
};
use crate::domain::indicator::{atr, rs_ratio, rsi};
use crate::domain::series::PriceSeries;
use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub const DEFAULT_MIN_HISTORY_BARS: usize = 60;
pub const ATR_LENGTH: usize = 14;
pub const RSI_LENGTH: usize = 14;

/// Floor for entry-stop risk so degenerate levels cannot produce
/// non-positive or absurd targets.
const RISK_EPSILON: f64 = 1e-6;

/// Scan parameters, passed by value into the selector. Defaults mirror the
/// production configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanParams {
    pub volume_thrust_lookback: usize,
    pub volume_thrust_multiplier: f64,
    pub five_day_thrust_ratio: f64,
    pub rs_lookback_days: usize,
    pub reclaim_lookback_days: usize,
    pub reclaim_recent_window_days: usize,
    pub reclaim_ma_length: usize,
    pub entry_buffer_pct: f64,
    pub stop_atr_multiplier: f64,
    pub stop_min_buffer_pct: f64,
    pub pct_above_50dma_for_on: f64,
    pub allow_unknown_fundamentals: bool,
    pub rsi_band_low: f64,
    pub rsi_band_high: f64,
    pub rsi_trend_lookback: usize,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            volume_thrust_lookback: 20,
            volume_thrust_multiplier: 1.8,
            five_day_thrust_ratio: 1.3,
            rs_lookback_days: 20,
            reclaim_lookback_days: 126,
            reclaim_recent_window_days: 10,
            reclaim_ma_length: 50,
            entry_buffer_pct: 0.1,
            stop_atr_multiplier: 1.0,
            stop_min_buffer_pct: 2.2,
            pct_above_50dma_for_on: 45.0,
            allow_unknown_fundamentals: false,
            rsi_band_low: 20.0,
            rsi_band_high: 38.0,
            rsi_trend_lookback: 10,
        }
    }
}

impl ScanParams {
    /// Minimum cleaned bars before a symbol is evaluated at all.
    pub fn min_history_bars(&self) -> usize {
        DEFAULT_MIN_HISTORY_BARS.max(self.reclaim_lookback_days)
    }
}

/// Per-symbol detector outcomes and diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalResult {
    pub symbol: String,
    pub reclaim: Detection,
    pub volume: Detection,
    pub rsi_band: Detection,
    pub rs_high: Detection,
    pub checks: FundamentalChecks,
    pub fundamentals: FundamentalsStatus,
    pub close: f64,
    pub atr_pct: Option<f64>,
    pub rsi_value: Option<f64>,
}

impl SignalResult {
    pub fn all_triggered(&self, allow_unknown: bool) -> bool {
        self.reclaim.is_triggered()
            && self.volume.is_triggered()
            && self.rsi_band.is_triggered()
            && self.rs_high.is_triggered()
            && self.fundamentals.resolve(allow_unknown) == FundamentalsStatus::Pass
    }
}

/// An accepted watchlist entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub symbol: String,
    pub close: f64,
    pub entry: f64,
    pub stop: f64,
    pub target1: f64,
    pub target2: f64,
    pub atr_pct: Option<f64>,
    pub rsi_value: Option<f64>,
    pub vol_spike: bool,
    pub rs_20d_high: bool,
    pub rsi_rising: bool,
    pub checks: FundamentalChecks,
    pub fundamentals: FundamentalsStatus,
}

impl Candidate {
    pub fn status(&self) -> &'static str {
        "WATCH"
    }

    pub fn signal(&self) -> &'static str {
        "RECLAIM"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEvaluation {
    pub signals: SignalResult,
    pub candidate: Option<Candidate>,
}

/// Evaluate one symbol against the index, the fundamentals table and the
/// scan parameters. Returns None when the series is too short to judge.
pub fn evaluate_symbol(
    series: &PriceSeries,
    index: &PriceSeries,
    fundamentals: &FundamentalsTable,
    params: &ScanParams,
) -> Option<SymbolEvaluation> {
    if series.len() < params.min_history_bars() {
        return None;
    }

    let reclaim = reclaim_setup(
        series,
        params.reclaim_recent_window_days,
        params.reclaim_ma_length,
    );

    // Either volume flavor is accepted: a one-day spike over the trailing
    // average, or a sustained 5-day-over-50-day lift.
    let spike = volume_thrust(
        series,
        params.volume_thrust_lookback,
        params.volume_thrust_multiplier,
    );
    let sustained = five_day_thrust(series, 5, 50, params.five_day_thrust_ratio);
    let volume = if spike.is_triggered() || sustained.is_triggered() {
        Detection::Triggered
    } else if spike == Detection::Insufficient && sustained == Detection::Insufficient {
        Detection::Insufficient
    } else {
        Detection::Rejected
    };

    let rsi_band = rising_rsi_band(
        series,
        params.rsi_band_low,
        params.rsi_band_high,
        RSI_LENGTH,
        params.rsi_trend_lookback,
    );

    let rs = rs_ratio(series, index);
    let rs_high = rs_new_high(&rs, params.rs_lookback_days);

    let (checks, fund_status) = fundamentals::evaluate(fundamentals.get(series.symbol()));

    let close = series.last()?.close;
    let atr_latest = atr(series, ATR_LENGTH).last_value();
    let atr_pct = atr_latest.map(|a| a / close * 100.0);
    let rsi_value = rsi(series, RSI_LENGTH).last_value();

    let signals = SignalResult {
        symbol: series.symbol().to_string(),
        reclaim,
        volume,
        rsi_band,
        rs_high,
        checks,
        fundamentals: fund_status,
        close,
        atr_pct,
        rsi_value,
    };

    let candidate = if signals.all_triggered(params.allow_unknown_fundamentals) {
        build_candidate(series, &signals, atr_latest, params)
    } else {
        None
    };

    Some(SymbolEvaluation { signals, candidate })
}

fn build_candidate(
    series: &PriceSeries,
    signals: &SignalResult,
    atr_latest: Option<f64>,
    params: &ScanParams,
) -> Option<Candidate> {
    let n = series.len();
    let prior_high = series.bars()[n - 2].high?;
    let support = support_level(
        series,
        params.reclaim_recent_window_days,
        params.reclaim_ma_length,
    )?;
    let atr_latest = atr_latest?;

    let entry = prior_high * (1.0 + params.entry_buffer_pct / 100.0);
    let stop = (support - params.stop_atr_multiplier * atr_latest)
        .min(support * (1.0 - params.stop_min_buffer_pct / 100.0));
    let risk = (entry - stop).max(RISK_EPSILON);

    Some(Candidate {
        symbol: signals.symbol.clone(),
        close: signals.close,
        entry,
        stop,
        target1: entry + risk,
        target2: entry + 2.0 * risk,
        atr_pct: signals.atr_pct,
        rsi_value: signals.rsi_value,
        vol_spike: signals.volume.is_triggered(),
        rs_20d_high: signals.rs_high.is_triggered(),
        rsi_rising: signals.rsi_band.is_triggered(),
        checks: signals.checks,
        fundamentals: signals
            .fundamentals
            .resolve(params.allow_unknown_fundamentals),
    })
}

/// Canonical ranking: RS new high first, then lower ATR% of close, then
/// symbol name for full determinism.
pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.rs_20d_high
            .cmp(&a.rs_20d_high)
            .then_with(|| match (a.atr_pct, b.atr_pct) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
}

/// Minimum index bars needed for relative strength to ever be computable.
pub fn index_minimum_bars(params: &ScanParams) -> usize {
    params.rs_lookback_days
}

/// Scan the universe and return the ranked candidate list.
///
/// A fault in one symbol's evaluation drops that symbol and the run
/// continues; the run as a whole fails only on an unusable index series.
pub fn run_scan(
    universe: &[PriceSeries],
    index: &PriceSeries,
    fundamentals: &FundamentalsTable,
    params: &ScanParams,
) -> Result<Vec<Candidate>, ScannerError> {
    let minimum = index_minimum_bars(params);
    if index.len() < minimum {
        return Err(ScannerError::IndexUnusable {
            symbol: index.symbol().to_string(),
            bars: index.len(),
            minimum,
        });
    }

    Ok(collect_candidates(universe, |series| {
        evaluate_symbol(series, index, fundamentals, params).and_then(|eval| eval.candidate)
    }))
}

/// Parallel map over the universe with per-symbol panic isolation, then one
/// explicit sort so pool size never changes the output.
fn collect_candidates<F>(universe: &[PriceSeries], evaluate: F) -> Vec<Candidate>
where
    F: Fn(&PriceSeries) -> Option<Candidate> + Sync,
{
    let mut candidates: Vec<Candidate> = universe
        .par_iter()
        .filter_map(|series| catch_unwind(AssertUnwindSafe(|| evaluate(series))).ok().flatten())
        .collect();

    sort_candidates(&mut candidates);
    candidates
}
