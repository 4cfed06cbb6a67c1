//! The lore-time unit shared by every core component.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single day of lore time. Day 0 is the timeline origin; all durations
/// are integer days. Negative values never appear once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemporalDay(pub i64);

impl TemporalDay {
    /// Constructs a `TemporalDay`, rejecting negative values.
    pub fn new(day: i64) -> Result<Self, crate::Error> {
        if day < 0 {
            return Err(crate::Error::InvalidArgument(format!(
                "astro_day must be >= 0, got {day}"
            )));
        }
        Ok(Self(day))
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TemporalDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot granularity, as requested by a run's caller. Distinct from the
/// free-form `granularity` string stored on a [`crate::Snapshot`] — this is
/// the restricted set the simulation engine itself accepts (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Year,
    Decade,
    Century,
}

impl Granularity {
    /// Snapshot cadence in days, matching the source system's
    /// `_calculate_snapshot_interval` constants.
    pub fn interval_days(self) -> i64 {
        match self {
            Granularity::Year => 365,
            Granularity::Decade => 3_652,
            Granularity::Century => 36_525,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Year => "year",
            Granularity::Decade => "decade",
            Granularity::Century => "century",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
