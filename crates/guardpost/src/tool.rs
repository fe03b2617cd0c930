//! Proposed tool invocations and their probe-context rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Optional schema attached to a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolSchema {
    /// Free-text description of the tool.
    Description(String),
    /// Structured (JSON) schema.
    Structured(Value),
}

/// A tool invocation proposed by the agent, scanned before execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// What the user asked for.
    pub user_message: String,
    pub tool_name: String,
    /// Arbitrary structured arguments.
    pub tool_args: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_schema: Option<ToolSchema>,
}

impl ToolCall {
    pub fn new(
        user_message: impl Into<String>,
        tool_name: impl Into<String>,
        tool_args: Value,
    ) -> Self {
        Self {
            user_message: user_message.into(),
            tool_name: tool_name.into(),
            tool_args,
            tool_schema: None,
        }
    }

    pub fn with_schema(mut self, schema: ToolSchema) -> Self {
        self.tool_schema = Some(schema);
        self
    }

    /// Render the tool-context probe text: `Tool:` line, optional
    /// `Description:`/`Schema:` line, `Arguments:` line, newline-joined in
    /// that fixed order.
    pub(crate) fn context_text(&self) -> String {
        let mut parts = vec![format!("Tool: {}", self.tool_name)];
        match &self.tool_schema {
            Some(ToolSchema::Description(text)) => parts.push(format!("Description: {text}")),
            Some(ToolSchema::Structured(schema)) => parts.push(format!("Schema: {schema}")),
            None => {}
        }
        parts.push(format!("Arguments: {}", self.tool_args));
        parts.join("\n")
    }
}
