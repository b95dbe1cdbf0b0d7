//! Where exported documents go.

use std::io::Write;
use std::path::{Path, PathBuf};

use calextract_core::{CalExtractError, CalExtractResult};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl From<Option<PathBuf>> for Destination {
    fn from(path: Option<PathBuf>) -> Self {
        path.map(Destination::File).unwrap_or(Destination::Stdout)
    }
}

impl Destination {
    pub fn write(&self, contents: &str) -> CalExtractResult<()> {
        match self {
            Destination::Stdout => write_stdout(contents).map_err(|source| CalExtractError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            }),
            Destination::File(path) => {
                tracing::info!(path = %path.display(), "Writing file");
                write_atomic(path, contents).map_err(|source| CalExtractError::Write {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

fn write_stdout(contents: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(contents.as_bytes())?;
    if !contents.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}

/// Write to a temp file next to `path`, then rename it over `path`.
///
/// A file being replaced keeps its permissions.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
