mod file_finder;

pub use file_finder::{list_files, list_recipes, relative_path_string};
