use super::{CategoryPackage, PackageIndex};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level directories of a repository that are never categories
const NON_CATEGORY_DIRS: &[&str] = &[
    "profiles",
    "metadata",
    "eclass",
    "licenses",
    "scripts",
    "distfiles",
    "packages",
];

/// Package index read straight from repository directories
#[derive(Debug, Clone)]
pub struct TreeIndex {
    roots: Vec<PathBuf>,
    categories: Vec<String>,
}

impl TreeIndex {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for root in &roots {
            for category in Self::root_categories(root) {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }

        debug!("Indexed {} categories over {} roots", categories.len(), roots.len());
        Self { roots, categories }
    }

    /// Categories of one root: `profiles/categories` if present, else its directories
    fn root_categories(root: &Path) -> Vec<String> {
        let listing = root.join("profiles").join("categories");
        match fs::read_to_string(&listing) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string)
                .collect(),
            Err(_) => {
                debug!("No {}, using directory names", listing.display());
                let mut dirs: Vec<String> = subdirectories(root)
                    .into_iter()
                    .filter(|name| !NON_CATEGORY_DIRS.contains(&name.as_str()))
                    .collect();
                dirs.sort();
                dirs
            }
        }
    }
}

impl PackageIndex for TreeIndex {
    fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    fn packages_in(&self, categories: &[String], roots: &[PathBuf]) -> Vec<CategoryPackage> {
        let mut packages = BTreeSet::new();
        for category in categories {
            for root in roots {
                for package in subdirectories(&root.join(category)) {
                    packages.insert(CategoryPackage::new(category.as_str(), package));
                }
            }
        }
        packages.into_iter().collect()
    }
}

/// Names of the non-hidden directories directly inside `dir`
fn subdirectories(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Cannot list {}: {}", dir.display(), e);
            }
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .collect()
}
