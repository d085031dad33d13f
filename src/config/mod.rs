mod loader;
mod roots;

pub use loader::{Config, ErrorPolicy};
pub use roots::RootSelection;
