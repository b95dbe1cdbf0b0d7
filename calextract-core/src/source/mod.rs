//! Calendar sources.
//!
//! A source is the authorization-gated store events are read from. The binary
//! asks for access once, then lists one day of events.

mod caldir;
mod parse;

pub use caldir::CaldirSource;
pub use parse::parse_events;

use crate::date_range::DateRange;
use crate::error::CalExtractResult;
use crate::event::Event;

pub trait CalendarSource {
    /// Ask for read access. Fails with `AccessDenied` or `AccessRestricted`.
    fn request_access(&self) -> CalExtractResult<()>;

    /// Names of the calendars this source can see.
    fn calendars(&self) -> CalExtractResult<Vec<String>>;

    /// Events overlapping `range` in the calendars selected by `filter`,
    /// ordered by start time.
    fn list_events(&self, range: &DateRange, filter: &CalendarFilter) -> CalExtractResult<Vec<Event>>;
}

/// Which calendars to search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CalendarFilter {
    #[default]
    All,
    Named(Vec<String>),
}

impl CalendarFilter {
    /// Parse a comma-separated list of calendar names (e.g. "Work,Family").
    /// Empty input or "All" selects every calendar.
    pub fn parse(value: &str) -> Self {
        Self::from_names(value.split(',').map(str::to_string))
    }

    pub fn from_names<I: IntoIterator<Item = String>>(names: I) -> Self {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        if names.is_empty() || names.iter().any(|n| n == "All") {
            CalendarFilter::All
        } else {
            CalendarFilter::Named(names)
        }
    }

    pub fn matches(&self, calendar_name: &str) -> bool {
        match self {
            CalendarFilter::All => true,
            CalendarFilter::Named(names) => names.iter().any(|n| n == calendar_name),
        }
    }
}
