//! Classification labels.
//!
//! An unclassified question carries `category: None`. The sentinel strings
//! below only exist on the wire and in rendered output; every label entering
//! the system goes through [`normalise_category`] so a sentinel never ends up
//! stored as if it were a real topic.

use serde::{Deserialize, Deserializer, Serialize};

/// Presentation fallback for a question without a category.
pub const UNCLASSIFIED: &str = "unclassified";

/// Sentinel the classification backend emits when its model output is unusable.
const BACKEND_UNCLASSIFIED: &str = "未分类";

/// A topic label the classifier may assign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Category {
    fn new(id: &str, name: &str, description: &str) -> Self {
        Self { id: id.to_string(), name: name.to_string(), description: description.to_string() }
    }
}

/// The question kinds the classification backend is prompted with.
pub fn builtin_categories() -> Vec<Category> {
    vec![
        Category::new("definition", "Definition", "Asks what a concept or term means"),
        Category::new("application", "Application", "Asks how a concept is used in practice"),
        Category::new("relationship", "Relationship", "Asks how two or more concepts relate"),
        Category::new("understanding", "Understanding", "Asks why a concept holds or matters"),
        Category::new("extension", "Extension", "Goes beyond the syllabus material"),
        Category::new("correction", "Correction", "Resolves a misconception or mistake"),
    ]
}

/// True when `label` is one of the "not yet classified" placeholders.
pub fn is_sentinel(label: &str) -> bool {
    let label = label.trim();
    label.eq_ignore_ascii_case(UNCLASSIFIED) || label == BACKEND_UNCLASSIFIED
}

/// Collapse sentinels and blank labels to `None`, trim everything else.
pub fn normalise_category(raw: Option<String>) -> Option<String> {
    match raw {
        Some(label) if label.trim().is_empty() || is_sentinel(&label) => None,
        Some(label) => Some(label.trim().to_string()),
        None => None,
    }
}

/// Serde hook for optional category fields.
pub fn deserialize_category<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(normalise_category(raw))
}
