//! Top-level shape probe for export documents.
//!
//! Probes run from the most specific signature to the least specific one.

use serde_json::Value;

/// Known layouts of an exported transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// `{"conversations": [...]}`
    WrappedConversations,
    /// `{"mapping": {"<node id>": {"message": {...}}}}`
    MappingConversation,
    /// `{"messages": [...]}`
    MessagesConversation,
    /// `[{"role": ..., "content": ...}, ...]`
    MessageList,
    /// `[{...conversation...}, ...]`
    ConversationList,
    /// Any other object; scraped opportunistically.
    Object,
    /// Any other array.
    Array,
}

impl DocumentShape {
    /// Classify a root value. Scalars have no supported shape.
    #[must_use]
    pub fn detect(root: &Value) -> Option<Self> {
        match root {
            Value::Object(map) => {
                let shape = if map.get("conversations").is_some_and(Value::is_array) {
                    Self::WrappedConversations
                } else if map.get("mapping").is_some_and(Value::is_object) {
                    Self::MappingConversation
                } else if map.get("messages").is_some_and(Value::is_array) {
                    Self::MessagesConversation
                } else {
                    Self::Object
                };
                Some(shape)
            }
            Value::Array(items) => {
                let first_object = items.iter().find_map(Value::as_object);
                let shape = match first_object {
                    Some(obj) if obj.contains_key("content") => Self::MessageList,
                    Some(_) => Self::ConversationList,
                    None => Self::Array,
                };
                Some(shape)
            }
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WrappedConversations => "wrapped conversations",
            Self::MappingConversation => "mapping conversation",
            Self::MessagesConversation => "messages conversation",
            Self::MessageList => "message list",
            Self::ConversationList => "conversation list",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

/// JSON type name of a value, for diagnostics.
#[must_use]
pub const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
