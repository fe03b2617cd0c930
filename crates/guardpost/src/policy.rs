//! Scan policy configuration.

use serde::{Deserialize, Serialize};

/// Default injection-score cutoff: `score < threshold` is safe.
pub const DEFAULT_THRESHOLD: f64 = 0.65;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Policy knobs accepted by every scan operation.
///
/// Replaces the ad-hoc per-call option bags of earlier designs with an
/// explicit structure: exactly a threshold and, for RAG scans, an optional
/// chunk budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanPolicy {
    /// Score cutoff above which (inclusive) content is considered unsafe.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Upper bound on how many RAG chunks are scanned per call, taken as an
    /// order-preserving prefix. `None` scans every chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chunks_to_scan: Option<usize>,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_chunks_to_scan: None,
        }
    }
}

impl ScanPolicy {
    /// Policy with a custom threshold and no chunk budget.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Set the RAG chunk budget.
    pub fn chunk_limit(mut self, limit: usize) -> Self {
        self.max_chunks_to_scan = Some(limit);
        self
    }
}
