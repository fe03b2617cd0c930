//! Role-tagged chat turns and transcript flattening.

use serde::{Deserialize, Serialize};

/// Placeholder role rendered when a message carries none.
pub const UNKNOWN_ROLE: &str = "unknown";

/// One role-tagged chat turn.
///
/// Both fields are optional on the wire; a missing role renders as
/// [`UNKNOWN_ROLE`] and missing content as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            content: content.into(),
        }
    }

    /// A turn without a role.
    pub fn anonymous(content: impl Into<String>) -> Self {
        Self {
            role: None,
            content: content.into(),
        }
    }

    fn line(&self) -> String {
        format!(
            "[{}]: {}",
            self.role.as_deref().unwrap_or(UNKNOWN_ROLE),
            self.content
        )
    }
}

/// Flatten a transcript into one newline-delimited blob, each line prefixed
/// by its bracketed role, preserving original order.
///
/// Lossy by design: the safety decision is made on the flattened transcript,
/// not per turn.
pub(crate) fn flatten_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(ChatMessage::line)
        .collect::<Vec<_>>()
        .join("\n")
}
