use calextract_core::date_range::DateRange;
use calextract_core::export::{ExportContext, Format, encode};
use calextract_core::source::{CalendarFilter, CalendarSource};
use calextract_core::{CalExtractResult, Event};

use crate::output::Destination;

/// Collect one day of events from `source` and export them.
///
/// Access is requested exactly once, before any events are read.
pub fn run(
    source: &dyn CalendarSource,
    range: &DateRange,
    filter: &CalendarFilter,
    format: Format,
    ctx: &ExportContext,
    destination: &Destination,
) -> CalExtractResult<()> {
    source.request_access()?;

    let events = source.list_events(range, filter)?;
    tracing::info!(count = events.len(), %format, "Exporting events");
    for event in &events {
        tracing::trace!(id = %event.id, "{}", event);
    }

    export(&events, format, ctx, destination)
}

/// Encode `events` and hand the document to `destination`.
///
/// A failed write is reported but does not fail the export.
pub fn export(
    events: &[Event],
    format: Format,
    ctx: &ExportContext,
    destination: &Destination,
) -> CalExtractResult<()> {
    let output = encode(format, events, ctx)?;

    if let Err(e) = destination.write(&output) {
        tracing::error!(error = %e, "Export was not written");
        eprintln!("{}", e);
    }

    Ok(())
}
