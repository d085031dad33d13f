use super::RecipeIdentity;
use crate::error::Result;

/// Produce the searchable text of a recipe
///
/// Removes every double quote, then replaces `${X}` and `$X` for each of
/// PN, PF, PVR, PV and P (in that order) with the literal value derived
/// from the recipe's identity. All replacements are plain text.
pub fn normalize(raw_text: &str, package_name: &str, recipe_file_name: &str) -> Result<String> {
    RecipeNormalizer::new(".ebuild").normalize(raw_text, package_name, recipe_file_name)
}

/// Recipe normalizer for a given recipe extension
#[derive(Debug, Clone)]
pub struct RecipeNormalizer {
    extension: String,
    strip_comments: bool,
}

impl RecipeNormalizer {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            strip_comments: false,
        }
    }

    /// Drop lines whose first non-blank character is `#` before substitution
    pub fn with_strip_comments(mut self, strip: bool) -> Self {
        self.strip_comments = strip;
        self
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn normalize(
        &self,
        raw_text: &str,
        package_name: &str,
        recipe_file_name: &str,
    ) -> Result<String> {
        let identity =
            RecipeIdentity::from_file_name(package_name, recipe_file_name, &self.extension)?;
        Ok(self.normalize_with(raw_text, &identity))
    }

    pub fn normalize_with(&self, raw_text: &str, identity: &RecipeIdentity) -> String {
        let text = if self.strip_comments {
            strip_comment_lines(raw_text)
        } else {
            raw_text.to_string()
        };

        let mut text = text.replace('"', "");
        for (name, value) in identity.variables() {
            text = text.replace(&format!("${{{}}}", name), value);
            text = text.replace(&format!("${}", name), value);
        }
        text
    }
}

fn strip_comment_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}
