//! Reference matching
//!
//! A file counts as referenced when its path relative to the files
//! directory occurs verbatim in at least one normalized recipe. This is
//! plain substring containment: `foo` matches inside `foobar`, and a file
//! in a subdirectory only matches when the subdirectory is spelled out.

/// Whether any of `normalized_texts` contains `relative_file_path`
pub fn is_referenced<S: AsRef<str>>(relative_file_path: &str, normalized_texts: &[S]) -> bool {
    referencing_index(relative_file_path, normalized_texts).is_some()
}

/// Index of the first text containing `relative_file_path`
pub fn referencing_index<S: AsRef<str>>(
    relative_file_path: &str,
    normalized_texts: &[S],
) -> Option<usize> {
    normalized_texts
        .iter()
        .position(|text| text.as_ref().contains(relative_file_path))
}
