use super::Config;
use crate::error::{FilesdirError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Which repository roots a run checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootSelection {
    /// A single explicitly named tree
    Directory(PathBuf),
    /// Every configured overlay
    Overlays,
    /// The configured main tree
    MainTree,
}

impl RootSelection {
    /// Validate the root-selection flags; performs no I/O
    pub fn from_flags(directory: Option<PathBuf>, overlays: bool) -> Result<Self> {
        match (directory, overlays) {
            (Some(_), true) => Err(FilesdirError::ConflictingOptions {
                first: "--directory",
                second: "--overlays",
            }),
            (Some(dir), false) => Ok(RootSelection::Directory(dir)),
            (None, true) => Ok(RootSelection::Overlays),
            (None, false) => Ok(RootSelection::MainTree),
        }
    }

    /// Concrete roots to scan
    ///
    /// An explicit directory or the main tree must exist. Overlays that are
    /// not directories are skipped with a warning.
    pub fn roots(&self, config: &Config) -> Result<Vec<PathBuf>> {
        match self {
            RootSelection::Directory(dir) => Ok(vec![existing_dir(dir)?]),
            RootSelection::MainTree => Ok(vec![existing_dir(&config.portdir)?]),
            RootSelection::Overlays => Ok(config
                .overlays
                .iter()
                .filter(|overlay| {
                    let ok = overlay.is_dir();
                    if !ok {
                        warn!("Skipping overlay {}: not a directory", overlay.display());
                    }
                    ok
                })
                .cloned()
                .collect()),
        }
    }
}

fn existing_dir(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        Ok(path.to_path_buf())
    } else {
        Err(FilesdirError::InvalidRoot {
            path: path.to_path_buf(),
        })
    }
}
