//! Package index
//!
//! Enumerates the categories and category/package pairs known in one or
//! more repository roots. The scanner only uses it to resolve what to scan.

mod tree;

pub use tree::TreeIndex;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A `category/package` identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryPackage {
    pub category: String,
    pub package: String,
}

impl CategoryPackage {
    pub fn new(category: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            package: package.into(),
        }
    }
}

impl fmt::Display for CategoryPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.package)
    }
}

impl FromStr for CategoryPackage {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((category, package))
                if !category.is_empty() && !package.is_empty() && !package.contains('/') =>
            {
                Ok(Self::new(category, package))
            }
            _ => Err(()),
        }
    }
}

/// Source of category and package names
pub trait PackageIndex: Sync {
    /// Roots this index was built over
    fn roots(&self) -> &[PathBuf];

    /// All known categories, in index order
    fn categories(&self) -> Vec<String>;

    /// Packages of the given categories found under the given roots
    fn packages_in(&self, categories: &[String], roots: &[PathBuf]) -> Vec<CategoryPackage>;

    /// Every package of every category under every root
    fn all_packages(&self) -> Vec<CategoryPackage> {
        self.packages_in(&self.categories(), self.roots())
    }

    fn has_category(&self, category: &str) -> bool {
        self.categories().iter().any(|c| c == category)
    }

    fn contains(&self, cp: &CategoryPackage) -> bool {
        self.packages_in(std::slice::from_ref(&cp.category), self.roots())
            .contains(cp)
    }
}
