mod matcher;
mod scanner;
mod scope;

pub use matcher::{is_referenced, referencing_index};
pub use scanner::{ScanResult, Scanner};
pub use scope::{resolve_arguments, Scope};
