use crate::error::{FilesdirError, Result};
use crate::index::{CategoryPackage, PackageIndex};
use std::fmt;

/// Part of a tree selected for scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every category in the index
    All,
    /// Every package of one category
    Category(String),
    /// One category/package
    Package(CategoryPackage),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all categories"),
            Scope::Category(category) => write!(f, "{}", category),
            Scope::Package(cp) => write!(f, "{}", cp),
        }
    }
}

/// Turn command-line arguments into scopes
///
/// Each argument may be a category, a category/package, or a bare package
/// name, which expands to every category/package with that name. No
/// arguments means the whole tree.
pub fn resolve_arguments(index: &dyn PackageIndex, arguments: &[String]) -> Result<Vec<Scope>> {
    if arguments.is_empty() {
        return Ok(vec![Scope::All]);
    }

    let categories = index.categories();
    let all_packages = index.all_packages();
    let mut scopes: Vec<Scope> = Vec::new();

    for argument in arguments {
        let resolved: Vec<Scope> = if categories.iter().any(|c| c == argument) {
            vec![Scope::Category(argument.clone())]
        } else if let Some(cp) = argument
            .parse::<CategoryPackage>()
            .ok()
            .filter(|cp| all_packages.contains(cp))
        {
            vec![Scope::Package(cp)]
        } else {
            all_packages
                .iter()
                .filter(|cp| &cp.package == argument)
                .cloned()
                .map(Scope::Package)
                .collect()
        };

        if resolved.is_empty() {
            return Err(FilesdirError::InvalidScope {
                argument: argument.clone(),
            });
        }

        for scope in resolved {
            if !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }
    }

    Ok(scopes)
}
