//! Collaborator boundary errors.

/// Errors surfaced by a [`TextAnalyzer`](crate::TextAnalyzer) implementation.
///
/// These model the "call raised" failure mode of the analysis service. They
/// never cross a scan-operation boundary: every scan converts them into a
/// fail-closed verdict tagged `"error"`.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// Transport-level failure reaching the analysis service.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a body the collaborator could not interpret.
    #[error("malformed analysis response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Any other failure inside the collaborator.
    #[error("analyzer failure: {0}")]
    Other(String),
}
