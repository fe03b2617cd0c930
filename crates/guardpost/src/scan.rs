//! The four scan operations.
//!
//! Each is a pure function of its explicit inputs plus one or more
//! collaborator round trips. No operation retains state across calls, and
//! no error ever crosses an operation boundary: every path yields a fully
//! formed verdict or aggregate result.
//!
//! Failure semantics, preserved exactly and deliberately asymmetric:
//! - vacuous input: safe short-circuit, zero collaborator calls;
//! - collaborator-reported failure: fail closed (score 1.0);
//! - transport fault: fail closed, tag `"error"`;
//! - successful call missing the injection finding: fail open (score 0.0).

use serde_json::Value;

use crate::analyzer::{ScanType, TextAnalyzer};
use crate::chunk::RagChunk;
use crate::message::{flatten_transcript, ChatMessage};
use crate::policy::ScanPolicy;
use crate::tool::ToolCall;
use crate::verdict::{
    tags, ChunkRecord, RagScanResult, Recommendation, ScanMeta, ScanVerdict, ToolCallScanResult,
};

/// Scan one text for prompt injection.
///
/// Empty text short-circuits to a safe verdict without calling the
/// collaborator; vacuous input should cost neither latency nor billing.
pub async fn scan_text(
    analyzer: &dyn TextAnalyzer,
    text: &str,
    scan_type: ScanType,
    policy: &ScanPolicy,
    meta: ScanMeta,
) -> ScanVerdict {
    if text.is_empty() {
        return ScanVerdict::vacuous(scan_type, tags::EMPTY_INPUT, meta);
    }

    match analyzer.analyze(text, &scan_type).await {
        Ok(response) if !response.success => {
            tracing::warn!(
                scan_type = %scan_type,
                error = response.error.as_deref().unwrap_or("unspecified"),
                "analysis failed"
            );
            let tag = response.tag.unwrap_or_else(|| tags::UNKNOWN.to_string());
            ScanVerdict::fail_closed(scan_type, tag, meta)
        }
        Ok(response) => {
            let score = response.prompt_injection_score().unwrap_or(0.0);
            ScanVerdict::scored(
                score,
                policy.threshold,
                scan_type,
                response.tag.unwrap_or_default(),
                meta,
                response.analysis,
            )
        }
        Err(err) => {
            tracing::error!(scan_type = %scan_type, error = %err, "analysis call failed");
            ScanVerdict::fail_closed(scan_type, tags::ERROR, meta)
        }
    }
}

/// Scan an ordered chat transcript as one flattened blob.
///
/// An empty transcript short-circuits like empty text, with its own
/// sentinel tag.
pub async fn scan_messages(
    analyzer: &dyn TextAnalyzer,
    messages: &[ChatMessage],
    scan_type: ScanType,
    policy: &ScanPolicy,
    meta: ScanMeta,
) -> ScanVerdict {
    if messages.is_empty() {
        return ScanVerdict::vacuous(scan_type, tags::EMPTY_MESSAGES, meta);
    }
    let transcript = flatten_transcript(messages);
    scan_text(analyzer, &transcript, scan_type, policy, meta).await
}

/// Scan a query plus its retrieved chunks, partitioning the chunks into
/// safe and flagged sets.
///
/// Chunks beyond `policy.max_chunks_to_scan` are simply not scanned: the
/// budget is an order-preserving prefix, not a sample. Each retained chunk
/// is scanned independently; one chunk's result never affects another's
/// call.
pub async fn scan_rag_chunks(
    analyzer: &dyn TextAnalyzer,
    query: &str,
    chunks: &[RagChunk],
    policy: &ScanPolicy,
    meta: ScanMeta,
) -> RagScanResult {
    if chunks.is_empty() {
        return RagScanResult {
            query: query.to_string(),
            total_chunks: 0,
            safe_chunks: Vec::new(),
            flagged_chunks: Vec::new(),
            is_safe: true,
            verdict_per_chunk: Vec::new(),
        };
    }

    let limit = policy.max_chunks_to_scan.unwrap_or(chunks.len());
    let mut safe_chunks = Vec::new();
    let mut flagged_chunks = Vec::new();
    let mut chunk_verdicts = Vec::new();

    for (index, chunk) in chunks.iter().take(limit).enumerate() {
        let mut chunk_meta = meta.clone();
        chunk_meta.insert("chunk_index".to_string(), Value::from(index));

        let verdict = scan_text(analyzer, chunk.text(), ScanType::Input, policy, chunk_meta).await;

        let record = ChunkRecord {
            text: chunk.text().to_string(),
            index,
            score: verdict.score,
            original: chunk.original().cloned(),
            reason: None,
        };
        if verdict.is_safe {
            safe_chunks.push(record);
        } else {
            flagged_chunks.push(ChunkRecord {
                reason: Some("flagged".to_string()),
                ..record
            });
        }
        chunk_verdicts.push(verdict);
    }

    let query_verdict = scan_text(analyzer, query, ScanType::Input, policy, ScanMeta::new()).await;
    let is_safe = query_verdict.is_safe && flagged_chunks.is_empty();

    let mut verdict_per_chunk = Vec::with_capacity(chunk_verdicts.len() + 1);
    verdict_per_chunk.push(query_verdict);
    verdict_per_chunk.extend(chunk_verdicts);

    RagScanResult {
        query: query.to_string(),
        total_chunks: chunks.len(),
        safe_chunks,
        flagged_chunks,
        is_safe,
        verdict_per_chunk,
    }
}

/// Scan a proposed tool call as two independent probes: the user's intent
/// and the rendered tool context.
///
/// A collaborator outage surfaces through the probes as fail-closed
/// verdicts, so the aggregate degrades to unsafe, combined score 1.0,
/// [`Recommendation::Block`] — never a crash.
pub async fn scan_tool_call(
    analyzer: &dyn TextAnalyzer,
    call: &ToolCall,
    policy: &ScanPolicy,
    meta: ScanMeta,
) -> ToolCallScanResult {
    let context = call.context_text();

    let mut user_meta = meta.clone();
    user_meta.insert(
        "component".to_string(),
        Value::from("tool_call_user_intent"),
    );
    let user_verdict = scan_text(
        analyzer,
        &call.user_message,
        ScanType::Input,
        policy,
        user_meta,
    )
    .await;

    let mut context_meta = meta;
    context_meta.insert("component".to_string(), Value::from("tool_context"));
    context_meta.insert("tool".to_string(), Value::from(call.tool_name.clone()));
    let context_verdict = scan_text(analyzer, &context, ScanType::Input, policy, context_meta).await;

    let combined_score = (user_verdict.score + context_verdict.score) / 2.0;
    let is_safe = user_verdict.is_safe && context_verdict.is_safe;
    let recommendation = Recommendation::for_tool_call(is_safe, combined_score);

    ToolCallScanResult {
        is_safe,
        tool_name: call.tool_name.clone(),
        user_intent_safe: user_verdict.is_safe,
        tool_args_safe: context_verdict.is_safe,
        combined_score,
        user_message_verdict: user_verdict,
        tool_context_verdict: Some(context_verdict),
        recommendation,
    }
}
