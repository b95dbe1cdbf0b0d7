//! Directory-backed calendar store.
//!
//! Layout follows caldir: every subdirectory of the root is a calendar named
//! after the directory, holding one `.ics` file per event.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{CalendarFilter, CalendarSource, parse_events};
use crate::date_range::DateRange;
use crate::error::{CalExtractError, CalExtractResult};
use crate::event::{Event, Zone};

pub struct CaldirSource {
    root: PathBuf,
    zone: Zone,
}

impl CaldirSource {
    pub fn new(root: impl Into<PathBuf>, zone: Zone) -> Self {
        CaldirSource {
            root: root.into(),
            zone,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read every event in one calendar directory. Unparseable files are
    /// skipped with a warning.
    fn read_calendar(&self, name: &str) -> CalExtractResult<Vec<Event>> {
        let dir = self.root.join(name);

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "ics"))
            .collect();
        paths.sort();

        let mut events = Vec::new();
        for path in paths {
            let parsed = std::fs::read_to_string(&path)
                .map_err(CalExtractError::from)
                .and_then(|content| parse_events(&content, name, &self.zone));

            match parsed {
                Ok(mut parsed) => events.append(&mut parsed),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable event file"),
            }
        }

        tracing::debug!(calendar = name, count = events.len(), "Read calendar");
        Ok(events)
    }
}

impl CalendarSource for CaldirSource {
    fn request_access(&self) -> CalExtractResult<()> {
        match std::fs::read_dir(&self.root) {
            Ok(_) => {
                tracing::info!(root = %self.root.display(), "Calendar access granted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CalExtractError::AccessDenied(format!(
                "calendar directory {} does not exist",
                self.root.display()
            ))),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(CalExtractError::AccessRestricted(
                format!("calendar directory {} is not readable", self.root.display()),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn calendars(&self) -> CalExtractResult<Vec<String>> {
        let mut names: Vec<String> = std::fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter_map(|path| path.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .filter(|name| !name.starts_with('.'))
            .collect();

        names.sort();
        Ok(names)
    }

    fn list_events(&self, range: &DateRange, filter: &CalendarFilter) -> CalExtractResult<Vec<Event>> {
        let calendars = self.calendars()?;

        if let CalendarFilter::Named(names) = filter {
            for missing in names.iter().filter(|n| !calendars.contains(n)) {
                tracing::warn!(calendar = %missing, "Calendar not found");
            }
        }

        let mut events = Vec::new();
        for name in calendars.iter().filter(|n| filter.matches(n)) {
            events.extend(
                self.read_calendar(name)?
                    .into_iter()
                    .filter(|e| e.overlaps(range.start, range.end)),
            );
        }

        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }
}
