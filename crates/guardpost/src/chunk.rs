//! Retrieved-passage ingestion.
//!
//! Callers hand over chunks as plain strings or as arbitrary JSON records.
//! The shape is resolved exactly once, at construction, into one canonical
//! text string; scan code never re-inspects the original value.

use serde_json::Value;

/// How a chunk's canonical text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkShape {
    /// The chunk was already a string.
    RawText,
    /// Taken from a string `"text"` field of a JSON record.
    TextField,
    /// Taken from a string `"content"` field of a JSON record.
    ContentField,
    /// No recognized field; the whole record rendered as compact JSON.
    Opaque,
}

/// One retrieved passage, resolved to canonical text.
#[derive(Debug, Clone)]
pub struct RagChunk {
    text: String,
    shape: ChunkShape,
    original: Option<Value>,
}

impl RagChunk {
    /// Ingest a structured chunk, resolving `"text"`, then `"content"`,
    /// then falling back to the record's JSON rendering.
    pub fn from_value(value: Value) -> Self {
        if let Some(text) = value.as_str() {
            return Self {
                text: text.to_string(),
                shape: ChunkShape::RawText,
                original: Some(value),
            };
        }
        if let Some(text) = value.get("text").and_then(Value::as_str) {
            return Self {
                text: text.to_string(),
                shape: ChunkShape::TextField,
                original: Some(value),
            };
        }
        if let Some(text) = value.get("content").and_then(Value::as_str) {
            return Self {
                text: text.to_string(),
                shape: ChunkShape::ContentField,
                original: Some(value),
            };
        }
        Self {
            text: value.to_string(),
            shape: ChunkShape::Opaque,
            original: Some(value),
        }
    }

    /// Canonical text to scan.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn shape(&self) -> ChunkShape {
        self.shape
    }

    /// The original structured record, when the chunk came from JSON.
    pub fn original(&self) -> Option<&Value> {
        self.original.as_ref()
    }
}

impl From<&str> for RagChunk {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            shape: ChunkShape::RawText,
            original: None,
        }
    }
}

impl From<String> for RagChunk {
    fn from(text: String) -> Self {
        Self {
            text,
            shape: ChunkShape::RawText,
            original: None,
        }
    }
}

impl From<Value> for RagChunk {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}
