//! filesdir-check - locate unused FILESDIR files in ebuild repositories
//!
//! Every package in a tree laid out as `category/package/` may ship
//! auxiliary files under `files/`. A file that no recipe of its package
//! mentions is probably dead weight. This is a heuristic check, so both
//! false positives and false negatives can occur.
//!
//! # Architecture
//!
//! 1. **Index** - Enumerate categories and category/package pairs
//! 2. **Discovery** - List auxiliary files and recipes of a package
//! 3. **Normalization** - Strip quotes and expand PN/PF/PVR/PV/P in recipes
//! 4. **Matching** - Substring search of each file path in the recipes
//! 5. **Reporting** - Print unreferenced paths

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod index;
pub mod recipe;
pub mod report;

pub use analysis::{is_referenced, resolve_arguments, ScanResult, Scanner, Scope};
pub use config::{Config, ErrorPolicy, RootSelection};
pub use discovery::list_files;
pub use error::FilesdirError;
pub use index::{CategoryPackage, PackageIndex, TreeIndex};
pub use recipe::{normalize, RecipeIdentity, RecipeNormalizer};
pub use report::{ReportFormat, Reporter};
