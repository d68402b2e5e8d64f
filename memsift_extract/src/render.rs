//! Phrase rendering: one fixed "Remember that ..." sentence per entry.

use memsift_core::{Category, JsonExport, MemoryEntry};

fn phrase(category: Category, text: &str) -> String {
    match category {
        Category::ToBio | Category::Generic => format!("Remember that {text}."),
        Category::Project => format!("Remember that I am working on {text}."),
    }
}

#[must_use]
pub fn render(entry: &MemoryEntry) -> String {
    phrase(entry.category, &entry.text)
}

/// Render a `json` aggregate export: to-bio, then projects, then memories.
#[must_use]
pub fn render_export(export: &JsonExport) -> Vec<String> {
    Category::ALL
        .into_iter()
        .flat_map(|category| {
            export
                .category(category)
                .iter()
                .map(move |text| phrase(category, text))
        })
        .collect()
}
