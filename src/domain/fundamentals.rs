//! Fundamentals quality gate.
//!
//! Threshold checks over a per-symbol fundamentals record, independent of
//! price data. Each check is tri-state: a missing input leaves the check
//! unknown rather than failing it, and only an explicit miss can FAIL the
//! record.

use std::collections::HashMap;
use std::fmt;

pub const MAX_DEBT_TO_EQUITY: f64 = 1.5;
pub const MIN_INTEREST_COVERAGE: f64 = 2.5;
pub const MAX_PROMOTER_PLEDGE_PCT: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalRecord {
    pub symbol: String,
    pub debt_to_equity: Option<f64>,
    pub interest_coverage: Option<f64>,
    pub promoter_pledge_pct: Option<f64>,
    pub qoq_rev_pos_last3: Option<f64>,
    pub qoq_eps_pos_last3: Option<f64>,
}

pub type FundamentalsTable = HashMap<String, FundamentalRecord>;

/// Individual check outcomes; None means the inputs could not decide.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FundamentalChecks {
    pub de_le_1_5: Option<bool>,
    pub icr_ge_2_5: Option<bool>,
    pub pledge_le_20: Option<bool>,
    pub qoq_pos_1_of_3: Option<bool>,
}

impl FundamentalChecks {
    fn all(&self) -> [Option<bool>; 4] {
        [
            self.de_le_1_5,
            self.icr_ge_2_5,
            self.pledge_le_20,
            self.qoq_pos_1_of_3,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundamentalsStatus {
    Pass,
    Fail,
    Unknown,
}

impl FundamentalsStatus {
    /// Collapse UNKNOWN per the allow-unknown policy.
    pub fn resolve(self, allow_unknown: bool) -> FundamentalsStatus {
        match self {
            FundamentalsStatus::Unknown => {
                if allow_unknown {
                    FundamentalsStatus::Pass
                } else {
                    FundamentalsStatus::Fail
                }
            }
            other => other,
        }
    }
}

impl fmt::Display for FundamentalsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FundamentalsStatus::Pass => "PASS",
            FundamentalsStatus::Fail => "FAIL",
            FundamentalsStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

/// Evaluate the four threshold checks. An absent record leaves every check
/// unknown.
pub fn evaluate(record: Option<&FundamentalRecord>) -> (FundamentalChecks, FundamentalsStatus) {
    let checks = match record {
        Some(rec) => FundamentalChecks {
            de_le_1_5: rec.debt_to_equity.map(|v| v <= MAX_DEBT_TO_EQUITY),
            icr_ge_2_5: rec.interest_coverage.map(|v| v >= MIN_INTEREST_COVERAGE),
            pledge_le_20: rec
                .promoter_pledge_pct
                .map(|v| v <= MAX_PROMOTER_PLEDGE_PCT),
            qoq_pos_1_of_3: qoq_check(rec.qoq_rev_pos_last3, rec.qoq_eps_pos_last3),
        },
        None => FundamentalChecks::default(),
    };

    let outcomes = checks.all();
    let status = if outcomes.contains(&Some(false)) {
        FundamentalsStatus::Fail
    } else if outcomes.iter().all(|c| *c == Some(true)) {
        FundamentalsStatus::Pass
    } else {
        FundamentalsStatus::Unknown
    };

    (checks, status)
}

/// Positive quarter-over-quarter revenue or EPS in at least one of the last
/// three quarters. A known hit decides true; the check is only an explicit
/// false when both counts are known and below one.
fn qoq_check(rev: Option<f64>, eps: Option<f64>) -> Option<bool> {
    match (rev, eps) {
        _ if rev.is_some_and(|v| v >= 1.0) || eps.is_some_and(|v| v >= 1.0) => Some(true),
        (Some(_), Some(_)) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        de: Option<f64>,
        icr: Option<f64>,
        pledge: Option<f64>,
        qrev: Option<f64>,
        qeps: Option<f64>,
    ) -> FundamentalRecord {
        FundamentalRecord {
            symbol: "ACME".into(),
            debt_to_equity: de,
            interest_coverage: icr,
            promoter_pledge_pct: pledge,
            qoq_rev_pos_last3: qrev,
            qoq_eps_pos_last3: qeps,
        }
    }

    #[test]
    fn clean_record_passes() {
        let rec = record(Some(1.2), Some(3.0), Some(10.0), Some(1.0), Some(0.0));
        let (checks, status) = evaluate(Some(&rec));
        assert_eq!(status, FundamentalsStatus::Pass);
        assert_eq!(checks.de_le_1_5, Some(true));
        assert_eq!(checks.qoq_pos_1_of_3, Some(true));
    }

    #[test]
    fn high_pledge_fails() {
        let rec = record(Some(1.2), Some(3.0), Some(25.0), Some(1.0), Some(0.0));
        let (checks, status) = evaluate(Some(&rec));
        assert_eq!(status, FundamentalsStatus::Fail);
        assert_eq!(checks.pledge_le_20, Some(false));
    }

    #[test]
    fn missing_field_is_unknown_not_fail() {
        let rec = record(None, Some(3.0), Some(10.0), Some(1.0), Some(0.0));
        let (checks, status) = evaluate(Some(&rec));
        assert_eq!(checks.de_le_1_5, None);
        assert_eq!(status, FundamentalsStatus::Unknown);
    }

    #[test]
    fn explicit_miss_beats_unknown() {
        // One unknown, one explicit false: FAIL wins.
        let rec = record(None, Some(1.0), Some(10.0), Some(1.0), Some(0.0));
        let (_, status) = evaluate(Some(&rec));
        assert_eq!(status, FundamentalsStatus::Fail);
    }

    #[test]
    fn absent_record_is_fully_unknown() {
        let (checks, status) = evaluate(None);
        assert_eq!(checks, FundamentalChecks::default());
        assert_eq!(status, FundamentalsStatus::Unknown);
    }

    #[test]
    fn qoq_unknown_when_one_side_missing_and_no_hit() {
        let rec = record(Some(1.2), Some(3.0), Some(10.0), Some(0.0), None);
        let (checks, _) = evaluate(Some(&rec));
        assert_eq!(checks.qoq_pos_1_of_3, None);
    }

    #[test]
    fn qoq_false_when_both_known_and_below_one() {
        let rec = record(Some(1.2), Some(3.0), Some(10.0), Some(0.0), Some(0.0));
        let (checks, status) = evaluate(Some(&rec));
        assert_eq!(checks.qoq_pos_1_of_3, Some(false));
        assert_eq!(status, FundamentalsStatus::Fail);
    }

    #[test]
    fn boundary_values_pass() {
        let rec = record(Some(1.5), Some(2.5), Some(20.0), Some(1.0), None);
        let (_, status) = evaluate(Some(&rec));
        assert_eq!(status, FundamentalsStatus::Pass);
    }

    #[test]
    fn unknown_resolves_per_policy() {
        assert_eq!(
            FundamentalsStatus::Unknown.resolve(true),
            FundamentalsStatus::Pass
        );
        assert_eq!(
            FundamentalsStatus::Unknown.resolve(false),
            FundamentalsStatus::Fail
        );
        assert_eq!(
            FundamentalsStatus::Pass.resolve(false),
            FundamentalsStatus::Pass
        );
        assert_eq!(
            FundamentalsStatus::Fail.resolve(true),
            FundamentalsStatus::Fail
        );
    }
}
