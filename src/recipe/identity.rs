use crate::error::{FilesdirError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn revision_suffix() -> &'static Regex {
    static REVISION: OnceLock<Regex> = OnceLock::new();
    REVISION.get_or_init(|| Regex::new(r"-r[0-9]+$").expect("valid revision pattern"))
}

/// The standard variables a recipe can use to spell its own name
///
/// Derived from the owning package's base name and a recipe file name of the
/// form `<name>-<version>[-r<revision>].<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIdentity {
    /// Package base name
    pub pn: String,
    /// Recipe file name without its extension
    pub pf: String,
    /// Version including revision
    pub pvr: String,
    /// Version without revision
    pub pv: String,
    /// `PN-PV`
    pub p: String,
}

impl RecipeIdentity {
    /// Derive the identity of `file_name`, which must end in `extension` (e.g. ".ebuild")
    pub fn from_file_name(package_name: &str, file_name: &str, extension: &str) -> Result<Self> {
        if package_name.is_empty() {
            return Err(FilesdirError::InvalidRecipeIdentity {
                reason: "empty package name".to_string(),
            });
        }

        let pf = file_name
            .strip_suffix(extension)
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| FilesdirError::InvalidRecipeIdentity {
                reason: format!("'{}' does not end in '{}'", file_name, extension),
            })?;

        let pvr = pf
            .strip_prefix(package_name)
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(pf);
        let pv = revision_suffix().replace(pvr, "");
        let p = format!("{}-{}", package_name, pv);

        Ok(Self {
            pn: package_name.to_string(),
            pf: pf.to_string(),
            pvr: pvr.to_string(),
            pv: pv.into_owned(),
            p,
        })
    }

    /// Variable name and value pairs in substitution order
    pub fn variables(&self) -> [(&'static str, &str); 5] {
        [
            ("PN", self.pn.as_str()),
            ("PF", self.pf.as_str()),
            ("PVR", self.pvr.as_str()),
            ("PV", self.pv.as_str()),
            ("P", self.p.as_str()),
        ]
    }
}
