//! Scripted mock collaborator shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::analyzer::{AnalysisResponse, Finding, ScanType, TextAnalyzer, PROMPT_INJECTION};
use crate::error::AnalyzerError;

/// One canned collaborator behavior.
#[derive(Debug, Clone)]
pub(crate) enum MockBehavior {
    /// Successful analysis with the given prompt-injection score.
    Score(f64),
    /// Successful analysis with no prompt-injection finding.
    NoScoreFinding,
    /// Service-reported failure, optionally carrying a tag.
    Failure(Option<&'static str>),
    /// Transport fault (the `Err` path).
    TransportError,
}

impl MockBehavior {
    fn produce(&self, call_number: usize) -> Result<AnalysisResponse, AnalyzerError> {
        let tag = format!("mock-tag-{call_number}");
        match self {
            MockBehavior::Score(score) => Ok(AnalysisResponse::success(
                tag,
                vec![Finding::Score {
                    name: PROMPT_INJECTION.to_string(),
                    result: *score,
                }],
            )),
            MockBehavior::NoScoreFinding => Ok(AnalysisResponse::success(tag, vec![Finding::Other])),
            MockBehavior::Failure(tag) => Ok(AnalysisResponse::failure(
                tag.map(str::to_string),
                "mock failure",
            )),
            MockBehavior::TransportError => {
                Err(AnalyzerError::Transport("connection refused".to_string()))
            }
        }
    }
}

/// Replays a script of behaviors, then falls back to a fixed one. Records
/// every `(text, scan_type)` pair it receives.
pub(crate) struct MockAnalyzer {
    script: Mutex<VecDeque<MockBehavior>>,
    fallback: MockBehavior,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockAnalyzer {
    pub fn new(fallback: MockBehavior) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always returns the given score.
    pub fn scoring(score: f64) -> Self {
        Self::new(MockBehavior::Score(score))
    }

    /// Always reports failure without a tag.
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failure(None))
    }

    /// Always fails at the transport level.
    pub fn erroring() -> Self {
        Self::new(MockBehavior::TransportError)
    }

    /// Replays `script` in order, then falls back to `fallback`.
    pub fn scripted(script: Vec<MockBehavior>, fallback: MockBehavior) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All `(text, scan_type)` pairs received, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextAnalyzer for MockAnalyzer {
    async fn analyze(
        &self,
        text: &str,
        scan_type: &ScanType,
    ) -> Result<AnalysisResponse, AnalyzerError> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((text.to_string(), scan_type.as_str().to_string()));
            calls.len()
        };
        let behavior = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        behavior.produce(call_number)
    }
}
