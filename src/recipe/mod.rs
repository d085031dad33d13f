//! Recipe identity and text normalization
//!
//! A recipe refers to its auxiliary files by name, usually through the
//! standard version variables. Normalization expands those variables so a
//! plain substring search can find the references.

mod identity;
mod normalize;

pub use identity::RecipeIdentity;
pub use normalize::{normalize, RecipeNormalizer};
