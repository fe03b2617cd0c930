//! Verdict and aggregate result types.
//!
//! Every type here is constructed exactly once per scan, fully populated,
//! and never mutated afterwards. Callers decide user-visible behavior
//! (reject, sanitize, allow-with-monitoring) entirely from these fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analyzer::{Finding, ScanType};

/// Reserved correlation tags produced by the decision layer itself.
pub mod tags {
    /// Vacuous empty-text scan; the collaborator was never called.
    pub const EMPTY_INPUT: &str = "empty_input";
    /// Vacuous empty-message-list scan; the collaborator was never called.
    pub const EMPTY_MESSAGES: &str = "empty_messages";
    /// The collaborator call itself failed (transport fault).
    pub const ERROR: &str = "error";
    /// The collaborator reported failure without supplying a tag.
    pub const UNKNOWN: &str = "unknown";
}

/// Caller-supplied passthrough context, never interpreted by the core.
pub type ScanMeta = serde_json::Map<String, serde_json::Value>;

/// Safety verdict for one scanned text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanVerdict {
    /// `score < threshold` at the time of the scan.
    pub is_safe: bool,
    /// Injection score in `[0, 1]`; 1.0 sentinel on failure, 0.0 on vacuous
    /// input.
    pub score: f64,
    /// What the caller declared it was scanning.
    pub scan_type: ScanType,
    /// Correlation tag: collaborator-supplied, or one of [`tags`].
    pub tag: String,
    /// Caller-supplied passthrough context.
    #[serde(default, skip_serializing_if = "ScanMeta::is_empty")]
    pub meta: ScanMeta,
    /// Verbatim findings from the collaborator; empty on failure or vacuous
    /// paths.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_analysis: Vec<Finding>,
}

impl ScanVerdict {
    /// Safe verdict for input that was never sent to the collaborator.
    pub(crate) fn vacuous(scan_type: ScanType, tag: &str, meta: ScanMeta) -> Self {
        Self {
            is_safe: true,
            score: 0.0,
            scan_type,
            tag: tag.to_string(),
            meta,
            raw_analysis: Vec::new(),
        }
    }

    /// Fail-closed verdict: treat the text as maximally unsafe.
    pub(crate) fn fail_closed(scan_type: ScanType, tag: impl Into<String>, meta: ScanMeta) -> Self {
        Self {
            is_safe: false,
            score: 1.0,
            scan_type,
            tag: tag.into(),
            meta,
            raw_analysis: Vec::new(),
        }
    }

    /// Verdict from a successfully scored analysis.
    pub(crate) fn scored(
        score: f64,
        threshold: f64,
        scan_type: ScanType,
        tag: String,
        meta: ScanMeta,
        raw_analysis: Vec<Finding>,
    ) -> Self {
        Self {
            is_safe: score < threshold,
            score,
            scan_type,
            tag,
            meta,
            raw_analysis,
        }
    }
}

impl fmt::Display for ScanVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_safe {
            "SAFE"
        } else {
            "INJECTION DETECTED"
        };
        write!(f, "{status} (score: {:.2})", self.score)
    }
}

/// One scanned chunk in a [`RagScanResult`] partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Canonical text that was scanned.
    pub text: String,
    /// Position in the caller's original chunk collection.
    pub index: usize,
    /// Injection score this chunk received.
    pub score: f64,
    /// The original structured chunk, when it came from JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<serde_json::Value>,
    /// `"flagged"` for chunks in the flagged partition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Aggregate result of scanning a chunk collection against one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagScanResult {
    pub query: String,
    /// Chunk count before any truncation by the chunk budget.
    pub total_chunks: usize,
    pub safe_chunks: Vec<ChunkRecord>,
    pub flagged_chunks: Vec<ChunkRecord>,
    /// Query verdict safe AND zero flagged chunks.
    pub is_safe: bool,
    /// Query verdict first, then one verdict per scanned chunk in scan
    /// order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verdict_per_chunk: Vec<ScanVerdict>,
}

impl RagScanResult {
    /// How many chunks were actually scanned
    /// (`min(total_chunks, chunk budget)`).
    pub fn scanned_chunks(&self) -> usize {
        self.safe_chunks.len() + self.flagged_chunks.len()
    }
}

/// Discrete action recommendation for a proposed tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Proceed,
    Review,
    Block,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Proceed => "proceed",
            Recommendation::Review => "review",
            Recommendation::Block => "block",
        }
    }

    /// Map a tool-call outcome to a recommendation.
    ///
    /// A fully safe call always proceeds. Otherwise the thresholds apply to
    /// the combined score rounded to one decimal. Note the deliberate,
    /// known quirk: an unsafe call with a rounded combined score below 0.50
    /// still maps to `Proceed`.
    pub(crate) fn for_tool_call(is_safe: bool, combined_score: f64) -> Self {
        if is_safe {
            return Recommendation::Proceed;
        }
        let rounded = round_to_tenth(combined_score);
        if rounded >= 0.85 {
            Recommendation::Block
        } else if rounded >= 0.50 {
            Recommendation::Review
        } else {
            Recommendation::Proceed
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate result of the two independent tool-call probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallScanResult {
    /// Conjunction of both probe verdicts.
    pub is_safe: bool,
    pub tool_name: String,
    pub user_intent_safe: bool,
    pub tool_args_safe: bool,
    /// Arithmetic mean of the two probe scores.
    pub combined_score: f64,
    pub user_message_verdict: ScanVerdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_context_verdict: Option<ScanVerdict>,
    pub recommendation: Recommendation,
}

/// Round to one decimal place, half away from zero.
pub(crate) fn round_to_tenth(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_display() {
        let safe = ScanVerdict::vacuous(ScanType::Input, tags::EMPTY_INPUT, ScanMeta::new());
        assert_eq!(safe.to_string(), "SAFE (score: 0.00)");

        let unsafe_verdict = ScanVerdict::scored(
            0.87,
            0.65,
            ScanType::Input,
            "t1".to_string(),
            ScanMeta::new(),
            Vec::new(),
        );
        assert_eq!(unsafe_verdict.to_string(), "INJECTION DETECTED (score: 0.87)");
    }

    #[test]
    fn scored_verdict_threshold_boundary_is_unsafe() {
        let verdict = ScanVerdict::scored(
            0.65,
            0.65,
            ScanType::Input,
            String::new(),
            ScanMeta::new(),
            Vec::new(),
        );
        assert!(!verdict.is_safe);

        let just_below = ScanVerdict::scored(
            0.6499,
            0.65,
            ScanType::Input,
            String::new(),
            ScanMeta::new(),
            Vec::new(),
        );
        assert!(just_below.is_safe);
    }

    #[test]
    fn recommendation_table() {
        // Fully safe always proceeds, regardless of score.
        assert_eq!(
            Recommendation::for_tool_call(true, 0.9),
            Recommendation::Proceed
        );
        assert_eq!(
            Recommendation::for_tool_call(false, 0.9),
            Recommendation::Block
        );
        assert_eq!(
            Recommendation::for_tool_call(false, 0.75),
            Recommendation::Review
        );
        assert_eq!(
            Recommendation::for_tool_call(false, 0.3),
            Recommendation::Proceed
        );
    }

    #[test]
    fn recommendation_uses_rounded_score() {
        // 0.84 rounds to 0.8: review, not block.
        assert_eq!(
            Recommendation::for_tool_call(false, 0.84),
            Recommendation::Review
        );
        // 0.87 rounds to 0.9: block.
        assert_eq!(
            Recommendation::for_tool_call(false, 0.87),
            Recommendation::Block
        );
        // 0.45 rounds to 0.5: review, not proceed.
        assert_eq!(
            Recommendation::for_tool_call(false, 0.45),
            Recommendation::Review
        );
    }

    #[test]
    fn recommendation_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Recommendation::Review).unwrap(),
            "\"review\""
        );
        assert_eq!(Recommendation::Block.to_string(), "block");
    }

    #[test]
    fn round_to_tenth_cases() {
        assert_eq!(round_to_tenth(0.75), 0.8);
        assert_eq!(round_to_tenth(0.5), 0.5);
        assert_eq!(round_to_tenth(0.44), 0.4);
        assert_eq!(round_to_tenth(1.0), 1.0);
    }
}
