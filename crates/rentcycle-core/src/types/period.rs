//! Inclusive date intervals.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;
use crate::error::{RentError, RentResult};

/// An inclusive `[start, end]` date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    /// First day covered.
    pub start: Date,
    /// Last day covered.
    pub end: Date,
}

impl Period {
    /// Creates a period, rejecting an end before the start.
    ///
    /// # Errors
    ///
    /// Returns `RentError::InvalidInput` if `end < start`.
    pub fn new(start: Date, end: Date) -> RentResult<Self> {
        if end < start {
            return Err(RentError::invalid_input(
                "period",
                format!("end {end} is before start {start}"),
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of days in the period, both ends included.
    #[must_use]
    pub fn days(&self) -> i64 {
        self.start.days_between(&self.end) + 1
    }

    /// Returns true if the two intervals share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Period) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Returns true if `date` falls inside the period.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days shared with `other` (0 when disjoint).
    #[must_use]
    pub fn overlap_days(&self, other: &Period) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        start.days_between(&end) + 1
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
