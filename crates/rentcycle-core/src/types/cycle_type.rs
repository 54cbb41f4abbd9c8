//! Billing cycle convention.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RentError;

/// Per-property billing convention.
///
/// Changing the convention after billing periods exist invalidates earlier
/// period boundaries; the engine always uses the convention it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentCycleType {
    /// 1st to last day of each calendar month.
    #[default]
    Calendar,
    /// Day D to day D-1 of the following month.
    Midmonth,
}

impl RentCycleType {
    /// Returns true for the calendar-month convention.
    #[must_use]
    pub fn is_calendar(&self) -> bool {
        matches!(self, RentCycleType::Calendar)
    }

    /// Wire name of the convention.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RentCycleType::Calendar => "CALENDAR",
            RentCycleType::Midmonth => "MIDMONTH",
        }
    }
}

impl fmt::Display for RentCycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentCycleType {
    type Err = RentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CALENDAR" => Ok(RentCycleType::Calendar),
            "MIDMONTH" | "MID_MONTH" => Ok(RentCycleType::Midmonth),
            other => Err(RentError::invalid_input(
                "rent_cycle_type",
                format!("unknown cycle type '{other}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("calendar".parse::<RentCycleType>().unwrap(), RentCycleType::Calendar);
        assert_eq!("MIDMONTH".parse::<RentCycleType>().unwrap(), RentCycleType::Midmonth);
        assert!("weekly".parse::<RentCycleType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&RentCycleType::Midmonth).unwrap();
        assert_eq!(json, "\"MIDMONTH\"");
        let parsed: RentCycleType = serde_json::from_str("\"CALENDAR\"").unwrap();
        assert_eq!(parsed, RentCycleType::Calendar);
    }
}
