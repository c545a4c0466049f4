//! Pattern and momentum detectors built on the indicator library.
//!
//! Detectors never raise: short or dirty history collapses to a
//! non-triggering outcome, but [`Detection`] keeps "not enough clean data"
//! distinguishable from "rule evaluated and failed" for diagnostics.

pub mod reclaim;
pub mod volume;
pub mod rsi_band;
pub mod rs_high;

pub use reclaim::{reclaim_setup, support_level};
pub use rs_high::rs_new_high;
pub use rsi_band::rising_rsi_band;
pub use volume::{five_day_thrust, volume_thrust};

/// Tri-state detector outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Rule evaluated and holds.
    Triggered,
    /// Rule evaluated and does not hold.
    Rejected,
    /// Too little (or too dirty) history to evaluate the rule.
    Insufficient,
}

impl Detection {
    pub fn is_triggered(self) -> bool {
        self == Detection::Triggered
    }

    pub fn from_bool(triggered: bool) -> Self {
        if triggered {
            Detection::Triggered
        } else {
            Detection::Rejected
        }
    }
}
