//! The collaborator contract: one "analyze text" capability plus the typed
//! findings it returns.
//!
//! The decision layer consumes exactly one operation,
//! [`TextAnalyzer::analyze`], and consults exactly one finding shape
//! (`type == "score"`, `name == "prompt_injection"`). Everything else the
//! service reports passes through verbatim in
//! [`ScanVerdict::raw_analysis`](crate::ScanVerdict).

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;

/// Finding name consulted by the decision layer.
pub const PROMPT_INJECTION: &str = "prompt_injection";

/// Caller-declared classification of what is being scanned.
///
/// Threaded through to the collaborator for bookkeeping; never interpreted
/// by the decision layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScanType {
    #[default]
    #[serde(rename = "input")]
    Input,
    #[serde(rename = "output")]
    Output,
    #[serde(rename = "tool_output")]
    ToolOutput,
    /// Any other classification a caller wants recorded.
    #[serde(untagged)]
    Custom(String),
}

impl ScanType {
    pub fn as_str(&self) -> &str {
        match self {
            ScanType::Input => "input",
            ScanType::Output => "output",
            ScanType::ToolOutput => "tool_output",
            ScanType::Custom(name) => name,
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ScanType {
    fn from(name: &str) -> Self {
        match name {
            "input" => ScanType::Input,
            "output" => ScanType::Output,
            "tool_output" => ScanType::ToolOutput,
            other => ScanType::Custom(other.to_string()),
        }
    }
}

/// One PII occurrence reported by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiEntity {
    /// Entity label, e.g. `"EMAIL"` or `"PHONE"`.
    pub label: String,
    /// The matched text.
    pub text: String,
}

/// One typed finding from the analysis service.
///
/// The wire shape is an internally tagged object; unknown finding types
/// decode as [`Finding::Other`] so new service-side analyzers never break
/// the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Finding {
    /// A numeric score in `[0, 1]`, e.g. the prompt-injection confidence.
    #[serde(rename = "score")]
    Score { name: String, result: f64 },
    /// Detected PII occurrences.
    #[serde(rename = "PII")]
    Pii { result: Vec<PiiEntity> },
    /// A finding type this client does not model.
    #[serde(other)]
    Other,
}

/// Prompt-injection reading extracted from an [`AnalysisResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionReading {
    pub score: f64,
    pub tag: Option<String>,
    /// Whether the score exceeds the threshold it was read against.
    pub detected: bool,
    pub threshold: f64,
}

/// Result of one collaborator `analyze` call.
///
/// `success == false` means the service itself reported a failure (the
/// "unscannable input" case); a transport-level fault is an
/// [`AnalyzerError`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    /// Opaque correlation tag linking this call to the service-side record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Unordered findings, passed through verbatim to verdicts.
    #[serde(default)]
    pub analysis: Vec<Finding>,
    /// Service-reported error, present when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    /// Build a successful response.
    pub fn success(tag: impl Into<String>, analysis: Vec<Finding>) -> Self {
        Self {
            success: true,
            tag: Some(tag.into()),
            analysis,
            error: None,
        }
    }

    /// Build a service-reported failure.
    pub fn failure(tag: Option<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            tag,
            analysis: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// The `prompt_injection` score, if the service reported one.
    pub fn prompt_injection_score(&self) -> Option<f64> {
        self.analysis.iter().find_map(|finding| match finding {
            Finding::Score { name, result } if name == PROMPT_INJECTION => Some(*result),
            _ => None,
        })
    }

    /// Extract a prompt-injection reading against `threshold`.
    ///
    /// Returns `None` when the call failed or no injection score is present.
    pub fn injection_reading(&self, threshold: f64) -> Option<InjectionReading> {
        if !self.success {
            return None;
        }
        let score = self.prompt_injection_score()?;
        Some(InjectionReading {
            score,
            tag: self.tag.clone(),
            detected: score > threshold,
            threshold,
        })
    }

    /// Whether the service detected a prompt injection above `threshold`.
    pub fn is_prompt_injection(&self, threshold: f64) -> bool {
        self.injection_reading(threshold)
            .map(|reading| reading.detected)
            .unwrap_or(false)
    }

    /// All PII occurrences across findings, in reported order.
    pub fn pii_entities(&self) -> impl Iterator<Item = &PiiEntity> {
        self.analysis.iter().flat_map(|finding| match finding {
            Finding::Pii { result } => result.as_slice(),
            _ => &[],
        })
    }
}

/// The single low-level capability the decision layer depends on.
///
/// Implementations own transport, auth, timeouts, wire retries, and tag
/// generation. They must be safely callable from concurrent call sites.
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    /// Analyze `text` for security concerns.
    ///
    /// `Err` models a transport or client fault; `Ok` with
    /// `success == false` models a failure the service itself reported.
    async fn analyze(
        &self,
        text: &str,
        scan_type: &ScanType,
    ) -> Result<AnalysisResponse, AnalyzerError>;
}
