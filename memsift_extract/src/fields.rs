//! Key-based scraping of bio, profile and keyword fields.

use memsift_core::FieldBag;
use serde_json::{Map, Value};
use tracing::trace;

use crate::walker::NodeVisitor;

const BIO_KEYS: &[&str] = &["bio", "about", "description", "summary", "about_me"];

const PROFILE_KEYS: &[&str] = &[
    "name",
    "username",
    "email",
    "preferences",
    "settings",
    "profile",
    "user_info",
];

const KEYWORD_KEYS: &[&str] = &["keywords", "tags", "topics", "interests", "categories"];

/// Keys holding raw memory or embedding payloads.
const PAYLOAD_KEYS: &[&str] = &[
    "memories",
    "memory",
    "history",
    "conversations",
    "context",
    "vector_data",
    "embeddings",
];

fn copy_keys(node: &Map<String, Value>, keys: &[&str], into: &mut Map<String, Value>) {
    for key in keys {
        if let Some(value) = node.get(*key) {
            into.insert((*key).to_string(), value.clone());
        }
    }
}

fn keyword_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Scrape one object. Payloads are copied only when `include_payloads` is set.
#[must_use]
pub fn scrape_fields(node: &Map<String, Value>, include_payloads: bool) -> FieldBag {
    let mut bag = FieldBag::new();
    copy_keys(node, BIO_KEYS, &mut bag.bio);
    copy_keys(node, PROFILE_KEYS, &mut bag.profile);

    for key in KEYWORD_KEYS {
        match node.get(*key) {
            Some(Value::Array(items)) => bag.keywords.extend(items.iter().filter_map(keyword_string)),
            Some(Value::Object(_)) | None => {}
            Some(scalar) => bag.keywords.extend(keyword_string(scalar)),
        }
    }

    for key in PAYLOAD_KEYS {
        let Some(payload) = node.get(*key) else {
            continue;
        };
        if !include_payloads {
            trace!("Memory payload under '{key}' not copied");
            continue;
        }
        match payload {
            Value::Array(items) => bag.memory.extend(items.iter().cloned()),
            Value::Object(_) => bag.memory.push(payload.clone()),
            _ => {}
        }
    }

    bag
}

/// Accumulates [`scrape_fields`] over every visited object.
#[derive(Debug, Default)]
pub struct FieldScraper {
    include_payloads: bool,
    bag: FieldBag,
}

impl FieldScraper {
    #[must_use]
    pub fn new(include_payloads: bool) -> Self {
        Self {
            include_payloads,
            bag: FieldBag::new(),
        }
    }

    #[must_use]
    pub fn into_bag(self) -> FieldBag {
        self.bag
    }
}

impl NodeVisitor for FieldScraper {
    fn visit(&mut self, node: &Map<String, Value>, _depth: usize) {
        let scraped = scrape_fields(node, self.include_payloads);
        self.bag.merge(scraped);
    }
}
