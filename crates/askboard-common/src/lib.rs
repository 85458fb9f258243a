//! askboard-common — records shared by the store, the remote client and the flows.

pub mod category;
pub mod entities;

// Re-export commonly used types
pub use category::{builtin_categories, normalise_category, Category, UNCLASSIFIED};
pub use entities::{snapshot_precision, Classification, Question, Student};
