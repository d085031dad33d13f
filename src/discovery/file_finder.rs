use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// List every non-directory entry below `root`, relative to `root`
///
/// A missing or non-directory `root` yields an empty list. Directories are
/// descended into but never reported. Symlinks are not followed, so a link
/// to a directory is reported as a leaf. Order follows the filesystem.
///
/// Any entry that cannot be read fails the whole listing.
pub fn list_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        trace!("No files directory: {}", root.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }
    Ok(files)
}

/// List the recipe file names directly inside `package_dir`
///
/// A recipe is any entry whose name ends in `extension` (e.g. ".ebuild").
/// The result is sorted by name.
pub fn list_recipes(package_dir: &Path, extension: &str) -> io::Result<Vec<String>> {
    let entries = fs::read_dir(package_dir)?.collect::<io::Result<Vec<_>>>()?;
    let mut recipes: Vec<String> = entries
        .into_iter()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.len() > extension.len() && name.ends_with(extension))
        .collect();
    recipes.sort();

    trace!("Found {} recipes in {}", recipes.len(), package_dir.display());
    Ok(recipes)
}

/// Render a relative path with `/` between components
pub fn relative_path_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
