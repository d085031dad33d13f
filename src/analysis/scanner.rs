// Scan orchestration: scope resolution, per-package checks, worker pool

use super::matcher::referencing_index;
use super::scope::Scope;
use crate::config::{Config, ErrorPolicy};
use crate::discovery::{list_files, list_recipes, relative_path_string};
use crate::error::{FilesdirError, Result};
use crate::index::{CategoryPackage, PackageIndex};
use crate::recipe::RecipeNormalizer;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// Outcome of a scan
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Unreferenced files, in package order then enumeration order
    pub unused: Vec<PathBuf>,

    /// Packages that could not be checked (only with the skip policy)
    pub failures: Vec<FilesdirError>,

    /// Number of category/package pairs visited
    pub packages_checked: usize,
}

/// A recipe after normalization
struct NormalizedRecipe {
    name: String,
    text: String,
}

/// Finds auxiliary files that no recipe of their package mentions
pub struct Scanner<'a> {
    index: &'a dyn PackageIndex,
    normalizer: RecipeNormalizer,
    files_dir: String,
    jobs: usize,
    on_error: ErrorPolicy,
    progress: Option<ProgressBar>,
}

impl<'a> Scanner<'a> {
    pub fn new(index: &'a dyn PackageIndex, config: &Config) -> Self {
        Self {
            index,
            normalizer: RecipeNormalizer::new(config.recipe_extension())
                .with_strip_comments(config.strip_comments),
            files_dir: config.files_dir.clone(),
            jobs: config.jobs,
            on_error: config.on_error,
            progress: None,
        }
    }

    /// Tick `progress` once per checked package
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Expand `scope` into the category/package pairs to check under `root`
    pub fn resolve(&self, root: &Path, scope: &Scope) -> Result<Vec<CategoryPackage>> {
        let roots = [root.to_path_buf()];
        match scope {
            Scope::All => Ok(self.index.packages_in(&self.index.categories(), &roots)),
            Scope::Category(category) => {
                if !self.index.has_category(category) {
                    return Err(FilesdirError::InvalidScope {
                        argument: category.clone(),
                    });
                }
                Ok(self.index.packages_in(std::slice::from_ref(category), &roots))
            }
            Scope::Package(cp) => {
                if !self.index.contains(cp) {
                    return Err(FilesdirError::InvalidScope {
                        argument: cp.to_string(),
                    });
                }
                Ok(vec![cp.clone()])
            }
        }
    }

    /// Scan one scope of one root
    pub fn scan(&self, root: &Path, scope: &Scope) -> Result<ScanResult> {
        self.scan_all(&[root.to_path_buf()], std::slice::from_ref(scope))
    }

    /// Scan every scope of every root, roots first
    ///
    /// All scopes are resolved before any package is checked, so an invalid
    /// scope fails the run without producing results.
    pub fn scan_all(&self, roots: &[PathBuf], scopes: &[Scope]) -> Result<ScanResult> {
        let mut pairs: Vec<(&Path, CategoryPackage)> = Vec::new();
        for root in roots {
            for scope in scopes {
                let packages = self.resolve(root, scope)?;
                debug!("{} in {}: {} packages", scope, root.display(), packages.len());
                pairs.extend(packages.into_iter().map(|cp| (root.as_path(), cp)));
            }
        }

        info!("Checking {} packages", pairs.len());
        if let Some(ref pb) = self.progress {
            pb.set_length(pairs.len() as u64);
        }

        if self.jobs == 1 {
            self.merge(
                pairs
                    .iter()
                    .map(|(root, cp)| self.check_package_tracked(root, cp)),
            )
        } else {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if self.jobs > 1 {
                builder = builder.num_threads(self.jobs);
            }
            let pool = builder.build()?;
            let results: Vec<Result<Vec<PathBuf>>> = pool.install(|| {
                pairs
                    .par_iter()
                    .map(|(root, cp)| self.check_package_tracked(root, cp))
                    .collect()
            });
            self.merge(results.into_iter())
        }
    }

    /// Merge per-package results in order, applying the error policy
    fn merge(&self, results: impl Iterator<Item = Result<Vec<PathBuf>>>) -> Result<ScanResult> {
        let mut scan = ScanResult::default();
        for result in results {
            scan.packages_checked += 1;
            match result {
                Ok(unused) => scan.unused.extend(unused),
                Err(e) if self.on_error == ErrorPolicy::Skip && e.is_package_failure() => {
                    warn!("Skipping package: {}", e);
                    scan.failures.push(e);
                }
                Err(e) => {
                    if let Some(ref pb) = self.progress {
                        pb.finish_and_clear();
                    }
                    return Err(e);
                }
            }
        }

        if let Some(ref pb) = self.progress {
            pb.finish_and_clear();
        }
        info!(
            "Found {} unused files in {} packages",
            scan.unused.len(),
            scan.packages_checked
        );
        Ok(scan)
    }

    fn check_package_tracked(&self, root: &Path, cp: &CategoryPackage) -> Result<Vec<PathBuf>> {
        let result = self.check_package(root, cp);
        if let Some(ref pb) = self.progress {
            pb.inc(1);
        }
        result
    }

    /// Unreferenced files of one category/package under `root`
    pub fn check_package(&self, root: &Path, cp: &CategoryPackage) -> Result<Vec<PathBuf>> {
        let package_dir = root.join(&cp.category).join(&cp.package);
        let files_dir = package_dir.join(&self.files_dir);

        let list_failure = |source: std::io::Error| FilesdirError::PackageListFailure {
            root: root.to_path_buf(),
            package: cp.to_string(),
            source,
        };

        let files = list_files(&files_dir).map_err(list_failure)?;
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let recipe_names =
            list_recipes(&package_dir, self.normalizer.extension()).map_err(list_failure)?;

        let recipes = recipe_names
            .into_iter()
            .map(|name| self.read_recipe(root, cp, &package_dir, name))
            .collect::<Result<Vec<_>>>()?;
        let texts: Vec<&str> = recipes.iter().map(|r| r.text.as_str()).collect();

        trace!("{}: {} files, {} recipes", cp, files.len(), recipes.len());

        let unused = files
            .into_iter()
            .filter(|file| {
                let relative = relative_path_string(file);
                match referencing_index(&relative, &texts) {
                    Some(i) => {
                        trace!("{}: {} referenced by {}", cp, relative, recipes[i].name);
                        false
                    }
                    None => {
                        debug!("{}: {} is unreferenced", cp, relative);
                        true
                    }
                }
            })
            .map(|file| files_dir.join(file))
            .collect();

        Ok(unused)
    }

    fn read_recipe(
        &self,
        root: &Path,
        cp: &CategoryPackage,
        package_dir: &Path,
        name: String,
    ) -> Result<NormalizedRecipe> {
        let raw = fs::read_to_string(package_dir.join(&name)).map_err(|e| {
            FilesdirError::RecipeReadFailure {
                root: root.to_path_buf(),
                package: cp.to_string(),
                recipe: name.clone(),
                source: e,
            }
        })?;

        let text = self.normalizer.normalize(&raw, &cp.package, &name)?;
        Ok(NormalizedRecipe { name, text })
    }
}
