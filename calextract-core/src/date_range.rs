//! Single-day range for selecting events.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::error::{CalExtractError, CalExtractResult};
use crate::event::Zone;

/// Closed interval from local midnight to one second before the next local
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// The whole of `date` in `zone`.
    pub fn day(date: NaiveDate, zone: &Zone) -> Self {
        let start = zone.midnight(date);
        let next = date.succ_opt().unwrap_or(date);
        let end = zone.midnight(next) - TimeDelta::seconds(1);

        DateRange { start, end }
    }

    /// The day containing `now` in `zone`.
    pub fn today(zone: &Zone, now: DateTime<Utc>) -> Self {
        Self::day(zone.localize(&now).date_naive(), zone)
    }

    /// Parse YYYY-MM-DD as a whole day in `zone`
    pub fn parse_day(s: &str, zone: &Zone) -> CalExtractResult<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            CalExtractError::Argument(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
        })?;
        Ok(Self::day(date, zone))
    }
}
