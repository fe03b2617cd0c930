//! # Guardpost
//!
//! Client-side prompt-injection verdict layer for LLM agents.
//!
//! ## Overview
//!
//! Guardpost sits between an agent and an external text-analysis service.
//! It owns no scoring model and no transport: it consumes a single
//! collaborator capability, [`TextAnalyzer::analyze`], and turns raw text or
//! structured artifacts into policy-driven safety verdicts:
//!
//! - **Text**: [`scan_text`] wraps one analysis call with a threshold and
//!   produces a [`ScanVerdict`].
//! - **Chat transcripts**: [`scan_messages`] flattens role-tagged turns into
//!   one blob and delegates to the text scan.
//! - **RAG chunks**: [`scan_rag_chunks`] scans a query plus each retrieved
//!   passage independently and partitions them into safe/flagged sets.
//! - **Tool calls**: [`scan_tool_call`] probes user intent and the rendered
//!   tool context separately, then maps the combined score to a
//!   [`Recommendation`].
//!
//! Scan operations never fail: vacuous input short-circuits to safe without
//! a collaborator call, collaborator faults degrade to fail-closed verdicts,
//! and a successful call missing the injection finding fails open. The
//! surrounding agent loop always receives a fully formed result.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use guardpost::{ScanGateway, ScanPolicy, ToolCall};
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway = ScanGateway::builder(Box::new(my_service_client))
//!         .with_threshold(0.5)
//!         .build();
//!
//!     let verdict = gateway.scan_text(user_input).await;
//!     println!("{verdict}"); // SAFE (score: 0.12)
//!
//!     let call = ToolCall::new(user_input, "shell", serde_json::json!({"cmd": "ls"}));
//!     let result = gateway.scan_tool_call(&call).await;
//!     println!("recommendation: {}", result.recommendation);
//! }
//! ```
//!
//! ## Implementing the collaborator
//!
//! ```rust,ignore
//! use guardpost::{AnalysisResponse, AnalyzerError, ScanType, TextAnalyzer};
//! use async_trait::async_trait;
//!
//! struct MyServiceClient { /* http client, credentials, ... */ }
//!
//! #[async_trait]
//! impl TextAnalyzer for MyServiceClient {
//!     async fn analyze(
//!         &self,
//!         text: &str,
//!         scan_type: &ScanType,
//!     ) -> Result<AnalysisResponse, AnalyzerError> {
//!         // POST to the analysis service, deserialize the response body
//!         todo!()
//!     }
//! }
//! ```

pub mod analyzer;
pub mod chunk;
pub mod error;
pub mod gateway;
pub mod message;
pub mod policy;
pub mod scan;
pub mod tool;
pub mod verdict;

#[cfg(test)]
pub(crate) mod test_support;

// Primary exports
pub use analyzer::{
    AnalysisResponse, Finding, InjectionReading, PiiEntity, ScanType, TextAnalyzer,
    PROMPT_INJECTION,
};
pub use chunk::{ChunkShape, RagChunk};
pub use error::AnalyzerError;
pub use gateway::{ScanGateway, ScanGatewayBuilder};
pub use message::ChatMessage;
pub use policy::{ScanPolicy, DEFAULT_THRESHOLD};
pub use scan::{scan_messages, scan_rag_chunks, scan_text, scan_tool_call};
pub use tool::{ToolCall, ToolSchema};
pub use verdict::{
    tags, ChunkRecord, RagScanResult, Recommendation, ScanMeta, ScanVerdict, ToolCallScanResult,
};
