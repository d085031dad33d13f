//! Error taxonomy for filesdir-check
//!
//! Validation errors (scope, options, root) are raised before any scanning
//! starts. Per-package I/O errors are raised while scanning and carry the
//! root, package and recipe needed to diagnose them.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by filesdir-check
#[derive(Error, Diagnostic, Debug)]
pub enum FilesdirError {
    #[error("invalid recipe identity: {reason}")]
    #[diagnostic(code(filesdir_check::invalid_recipe_identity))]
    InvalidRecipeIdentity { reason: String },

    #[error("'{argument}' is not a valid category or package")]
    #[diagnostic(
        code(filesdir_check::invalid_scope),
        help("arguments may be a category, a category/package or a package name")
    )]
    InvalidScope { argument: String },

    #[error("conflicting options: {first} and {second}")]
    #[diagnostic(code(filesdir_check::conflicting_options))]
    ConflictingOptions {
        first: &'static str,
        second: &'static str,
    },

    #[error("'{}' is not a valid directory", .path.display())]
    #[diagnostic(code(filesdir_check::invalid_root))]
    InvalidRoot { path: PathBuf },

    #[error(
        "failed to read recipe {recipe} of {package} in {}: {source}",
        .root.display()
    )]
    #[diagnostic(code(filesdir_check::recipe_read_failure))]
    RecipeReadFailure {
        root: PathBuf,
        package: String,
        recipe: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list files of {package} in {}: {source}", .root.display())]
    #[diagnostic(code(filesdir_check::package_list_failure))]
    PackageListFailure {
        root: PathBuf,
        package: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load configuration from {}: {reason}", .path.display())]
    #[diagnostic(code(filesdir_check::config))]
    Config { path: PathBuf, reason: String },

    #[error("failed to write report: {0}")]
    #[diagnostic(code(filesdir_check::report))]
    Report(#[from] std::io::Error),

    #[error("failed to start worker pool: {0}")]
    #[diagnostic(code(filesdir_check::worker_pool))]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl FilesdirError {
    /// Whether this error belongs to a single package rather than the whole run
    pub fn is_package_failure(&self) -> bool {
        matches!(
            self,
            FilesdirError::RecipeReadFailure { .. } | FilesdirError::PackageListFailure { .. }
        )
    }
}

pub type Result<T, E = FilesdirError> = std::result::Result<T, E>;
