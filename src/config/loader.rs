use crate::error::{FilesdirError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What to do when a package's recipes cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the whole run at the first failing package
    #[default]
    Abort,
    /// Report the failure and continue with the next package
    Skip,
}

/// Configuration for a filesdir-check run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Main tree root, used when neither --directory nor --overlays is given
    pub portdir: PathBuf,

    /// Alternate roots checked with --overlays
    pub overlays: Vec<PathBuf>,

    /// Recipe file extension, without the leading dot
    pub recipe_suffix: String,

    /// Name of the per-package auxiliary files directory
    pub files_dir: String,

    /// Worker count: 1 is sequential, 0 uses one worker per CPU
    pub jobs: usize,

    /// Per-package failure handling
    pub on_error: ErrorPolicy,

    /// Drop whole-line `#` comments from recipes before matching
    pub strip_comments: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portdir: PathBuf::from("/var/db/repos/gentoo"),
            overlays: vec![],
            recipe_suffix: "ebuild".to_string(),
            files_dir: "files".to_string(),
            jobs: 1,
            on_error: ErrorPolicy::Abort,
            strip_comments: false,
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| config_error(path, e))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents).map_err(|e| config_error(path, e)),
            "toml" => toml::from_str(&contents).map_err(|e| config_error(path, e)),
            _ => {
                // Try TOML first, then YAML
                if let Ok(config) = toml::from_str::<Config>(&contents) {
                    Ok(config)
                } else {
                    serde_yaml::from_str(&contents).map_err(|e| config_error(path, e))
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(dir: &Path) -> Result<Self> {
        let default_names = [
            ".filesdir-check.toml",
            ".filesdir-check.yml",
            ".filesdir-check.yaml",
            "filesdir-check.toml",
        ];

        for name in &default_names {
            let path = dir.join(name);
            if path.exists() {
                debug!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Apply PORTDIR / PORTDIR_OVERLAY from the process environment
    pub fn apply_env(&mut self) {
        self.apply_vars(
            std::env::var("PORTDIR").ok().as_deref(),
            std::env::var("PORTDIR_OVERLAY").ok().as_deref(),
        );
    }

    fn apply_vars(&mut self, portdir: Option<&str>, overlays: Option<&str>) {
        if let Some(portdir) = portdir.filter(|p| !p.trim().is_empty()) {
            self.portdir = PathBuf::from(portdir.trim());
        }
        if let Some(overlays) = overlays {
            self.overlays = overlays.split_whitespace().map(PathBuf::from).collect();
        }
    }

    /// Recipe suffix including the leading dot, e.g. ".ebuild"
    pub fn recipe_extension(&self) -> String {
        format!(".{}", self.recipe_suffix.trim_start_matches('.'))
    }
}

fn config_error(path: &Path, err: impl std::fmt::Display) -> FilesdirError {
    FilesdirError::Config {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
