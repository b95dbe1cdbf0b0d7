//! Event export encoders.
//!
//! Each encoder turns an ordered slice of events into one output document.
//! Encoders are pure: everything time-dependent comes in through
//! [`ExportContext`].

mod ics;
mod json;
mod text;

pub use ics::IcsEncoder;
pub use json::JsonEncoder;
pub use text::TextEncoder;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

use crate::error::CalExtractResult;
use crate::event::{Event, Zone};

/// `TZID` label used when the system zone name can't be detected.
pub const LEGACY_TZID: &str = "Australia/Adelaide";

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    Ics,
    Text,
    #[default]
    Json,
}

impl Format {
    /// Parse a format name. Unrecognized names fall back to JSON.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "ics" => Format::Ics,
            "text" => Format::Text,
            "json" => Format::Json,
            other => {
                tracing::warn!(format = other, "Unrecognized export format, using json");
                Format::Json
            }
        }
    }

    pub fn encoder(self) -> &'static dyn Encoder {
        match self {
            Format::Ics => &IcsEncoder,
            Format::Text => &TextEncoder,
            Format::Json => &JsonEncoder,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Format::Ics => "ics",
            Format::Text => "text",
            Format::Json => "json",
        };
        write!(f, "{}", name)
    }
}

/// How the ICS `DTEND` of an all-day event is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllDayEnd {
    /// The day after the export clock, whatever day the event is on
    #[default]
    ExportClock,
    /// The day after the event's own start date
    EventStart,
}

/// Everything time-dependent an encoder needs.
#[derive(Debug, Clone)]
pub struct ExportContext {
    /// Export clock
    pub now: DateTime<Utc>,
    /// Zone for local layouts
    pub zone: Zone,
    /// Label written as the ICS `TZID` parameter
    pub tzid: String,
    pub all_day_end: AllDayEnd,
}

impl ExportContext {
    pub fn new(now: DateTime<Utc>, zone: Zone, tzid: impl Into<String>) -> Self {
        ExportContext {
            now,
            zone,
            tzid: tzid.into(),
            all_day_end: AllDayEnd::default(),
        }
    }

    pub fn with_all_day_end(mut self, all_day_end: AllDayEnd) -> Self {
        self.all_day_end = all_day_end;
        self
    }
}

pub trait Encoder {
    fn encode(&self, events: &[Event], ctx: &ExportContext) -> CalExtractResult<String>;
}

/// Encode `events` with the encoder for `format`.
pub fn encode(format: Format, events: &[Event], ctx: &ExportContext) -> CalExtractResult<String> {
    tracing::debug!(%format, count = events.len(), "Encoding events");
    format.encoder().encode(events, ctx)
}
