//! calextract configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::{CalExtractError, CalExtractResult};
use crate::event::Zone;
use crate::export::{AllDayEnd, LEGACY_TZID};

static DEFAULT_CALENDAR_DIR: &str = "~/calendar";

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

/// Configuration at ~/.config/calextract/config.toml, overridable with
/// `CALEXTRACT_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractConfig {
    /// Root of the calendar store; one subdirectory per calendar
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,

    /// Output format used when none is given on the command line
    pub format: Option<String>,

    /// Calendars searched when none are given on the command line
    #[serde(default)]
    pub calendars: Vec<String>,

    /// IANA zone for local times and the ICS TZID label
    pub timezone: Option<String>,

    #[serde(default)]
    pub all_day_end: AllDayEnd,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            calendar_dir: default_calendar_dir(),
            format: None,
            calendars: Vec::new(),
            timezone: None,
            all_day_end: AllDayEnd::default(),
        }
    }
}

impl ExtractConfig {
    pub fn config_path() -> CalExtractResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalExtractError::Config("Could not determine config directory".into()))?
            .join("calextract");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path. A missing file is not an error.
    pub fn load() -> CalExtractResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CalExtractResult<Self> {
        tracing::debug!(path = %path.display(), "Loading config");

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("CALEXTRACT")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("calendars"),
            )
            .build()
            .map_err(|e| CalExtractError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalExtractError::Config(e.to_string()))
    }

    /// Calendar store path with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        expand_path(&self.calendar_dir)
    }

    /// Zone for local layouts: the configured zone, or the system zone.
    pub fn zone(&self) -> CalExtractResult<Zone> {
        match self.timezone.as_deref() {
            Some(name) => name
                .parse::<Tz>()
                .map(Zone::Named)
                .map_err(|_| CalExtractError::Config(format!("Unknown timezone '{}'", name))),
            None => Ok(Zone::Local),
        }
    }

    /// Label for the ICS `TZID` parameter.
    pub fn tzid_label(&self) -> String {
        if let Some(ref name) = self.timezone {
            return name.clone();
        }

        match iana_time_zone::get_timezone() {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!(error = %e, "Could not detect system timezone, using {}", LEGACY_TZID);
                LEGACY_TZID.to_string()
            }
        }
    }
}

/// Expand `~` in paths to the home directory
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
