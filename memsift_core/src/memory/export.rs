use serde::{Deserialize, Serialize};

use super::Category;

/// The `json` aggregate export: one sorted string array per category.
///
/// Missing arrays deserialize as empty, so hand-written files with only
/// some categories are accepted by the phrase renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonExport {
    #[serde(default)]
    pub to_bio: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub memories: Vec<String>,
}

impl JsonExport {
    #[must_use]
    pub fn category(&self, category: Category) -> &[String] {
        match category {
            Category::ToBio => &self.to_bio,
            Category::Project => &self.projects,
            Category::Generic => &self.memories,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.to_bio.len() + self.projects.len() + self.memories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn partial_document_deserializes() {
        let export: JsonExport =
            serde_json::from_str(r#"{"to_bio": ["loves hiking"]}"#).expect("valid export");
        assert_eq!(export.category(Category::ToBio), ["loves hiking".to_string()]);
        assert!(export.projects.is_empty());
        assert_eq!(export.len(), 1);
    }
}
