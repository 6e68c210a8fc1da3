//! Report reconciliation: turn raw model text plus grounding citations
//! into a validated report record.
//!
//! Pure function of its inputs, no I/O. Only three repairs are applied:
//! a synthesized metadata block when `meta` is absent, the citation merge
//! into `meta.dataSources`, and the neutral transparency fallback. Every
//! other absent section passes through untouched; the rendering layer
//! treats missing sections as "not rendered".

use std::collections::HashSet;

use super::extract::extract_json;
use super::AnalysisError;
use crate::models::{ReportMeta, ResearchReport, TRANSPARENCY_FALLBACK};

/// Cap on `meta.dataSources` entries after the citation merge.
pub const MAX_DATA_SOURCES: usize = 10;

/// Longest snippet of offending text attached to a `MalformedJson` error.
const SNIPPET_LIMIT: usize = 400;

/// Reconcile one raw model response into a report record.
///
/// `citations` are the grounding display strings reported by the model
/// invoker; pass an empty slice when the call returned none.
pub fn reconcile_report(
    raw_text: &str,
    citations: &[String],
) -> Result<ResearchReport, AnalysisError> {
    let candidate = extract_json(raw_text).ok_or(AnalysisError::NoJsonFound)?;

    let mut report: ResearchReport = serde_json::from_str(candidate).map_err(|e| {
        tracing::warn!(error = %e, "extracted JSON candidate failed to parse");
        AnalysisError::MalformedJson {
            message: e.to_string(),
            snippet: snippet(candidate),
        }
    })?;

    let meta = report.meta.get_or_insert_with(|| {
        tracing::debug!("model omitted meta block, synthesizing default");
        ReportMeta::synthesized()
    });

    // Grounding citations, when present, are authoritative for the data
    // source list; a model-supplied list survives only when the call
    // reported no citations.
    if !citations.is_empty() {
        meta.data_sources = dedup_capped(citations, MAX_DATA_SOURCES);
    }

    if meta.transparency_score == 0 {
        meta.transparency_score = TRANSPARENCY_FALLBACK;
    }

    Ok(report)
}

/// First-seen-order deduplication, capped at `cap` entries.
fn dedup_capped(items: &[String], cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.as_str()))
        .take(cap)
        .cloned()
        .collect()
}

/// Truncate diagnostics to a char-boundary-safe prefix.
fn snippet(text: &str) -> String {
    if text.len() <= SNIPPET_LIMIT {
        return text.to_string();
    }
    let mut end = SNIPPET_LIMIT;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConsistencyStatus;

    fn no_citations() -> Vec<String> {
        Vec::new()
    }

    // ── Extraction and parse failures ───────────────────

    #[test]
    fn text_without_braces_is_no_json_found() {
        let err = reconcile_report("The model refused to answer.", &no_citations()).unwrap_err();
        assert!(matches!(err, AnalysisError::NoJsonFound));
    }

    #[test]
    fn empty_text_is_no_json_found() {
        let err = reconcile_report("", &no_citations()).unwrap_err();
        assert!(matches!(err, AnalysisError::NoJsonFound));
    }

    #[test]
    fn truncated_without_closing_brace_is_no_json_found() {
        // Fallback also fails: no `}` exists after the first `{`.
        let err = reconcile_report(r#"{"name":"Y""#, &no_citations()).unwrap_err();
        assert!(matches!(err, AnalysisError::NoJsonFound));
    }

    #[test]
    fn unparseable_candidate_is_malformed_json_with_snippet() {
        let err = reconcile_report("{not valid json}", &no_citations()).unwrap_err();
        match err {
            AnalysisError::MalformedJson { snippet, .. } => {
                assert_eq!(snippet, "{not valid json}");
            }
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn long_malformed_candidate_is_truncated_for_diagnostics() {
        let text = format!("{{\"a\": \"{}\", oops}}", "x".repeat(2000));
        let err = reconcile_report(&text, &no_citations()).unwrap_err();
        match err {
            AnalysisError::MalformedJson { snippet, .. } => {
                assert!(snippet.chars().count() <= SNIPPET_LIMIT + 1);
                assert!(snippet.ends_with('…'));
            }
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }

    // ── Metadata defaulting ─────────────────────────────

    #[test]
    fn missing_meta_is_synthesized_with_transparency_fallback() {
        let report = reconcile_report(r#"{"name":"X","ticker":"X1"}"#, &no_citations()).unwrap();
        let meta = report.meta.unwrap();
        assert_eq!(meta.version, "V3.0");
        assert!(!meta.timestamp.is_empty());
        assert_eq!(meta.transparency_score, TRANSPARENCY_FALLBACK);
        assert!(meta.consistency_checks.is_empty());
        assert!(meta.data_sources.is_empty());
    }

    #[test]
    fn populated_meta_is_left_unchanged_without_citations() {
        let text = r#"{
            "name": "X",
            "meta": {
                "version": "V3.0",
                "timestamp": "2024-06-01T00:00:00Z",
                "transparencyScore": 77,
                "consistencyChecks": [
                    {"item": "Chain vs Whitepaper", "status": "Consistent", "details": "ok"}
                ],
                "dataSources": ["model-supplied.example"]
            }
        }"#;
        let report = reconcile_report(text, &no_citations()).unwrap();
        let meta = report.meta.unwrap();
        assert_eq!(meta.transparency_score, 77);
        assert_eq!(meta.timestamp, "2024-06-01T00:00:00Z");
        assert_eq!(meta.data_sources, vec!["model-supplied.example"]);
        assert_eq!(
            meta.consistency_checks[0].status,
            Some(ConsistencyStatus::Consistent)
        );
    }

    #[test]
    fn zero_transparency_score_gets_neutral_fallback() {
        let text = r#"{"meta":{"version":"V3.0","timestamp":"t","transparencyScore":0}}"#;
        let report = reconcile_report(text, &no_citations()).unwrap();
        assert_eq!(report.meta.unwrap().transparency_score, 50);
    }

    #[test]
    fn nonzero_transparency_score_is_preserved() {
        let text = r#"{"meta":{"transparencyScore":85}}"#;
        let report = reconcile_report(text, &no_citations()).unwrap();
        assert_eq!(report.meta.unwrap().transparency_score, 85);
    }

    // ── Citation merge ──────────────────────────────────

    #[test]
    fn citations_overwrite_model_supplied_sources() {
        let text = r#"{"meta":{"dataSources":["stale.example"],"transparencyScore":60}}"#;
        let citations = vec!["CoinDesk".to_string(), "DefiLlama".to_string()];
        let report = reconcile_report(text, &citations).unwrap();
        let meta = report.meta.unwrap();
        assert_eq!(meta.data_sources, vec!["CoinDesk", "DefiLlama"]);
    }

    #[test]
    fn citations_are_deduplicated_in_first_seen_order_and_capped() {
        // 15 citations with 3 duplicated display strings.
        let mut citations: Vec<String> =
            (0..12).map(|i| format!("source-{i}")).collect();
        citations.insert(3, "source-0".into());
        citations.insert(7, "source-1".into());
        citations.push("source-2".into());
        assert_eq!(citations.len(), 15);

        let report = reconcile_report("{}", &citations).unwrap();
        let sources = report.meta.unwrap().data_sources;
        assert_eq!(sources.len(), MAX_DATA_SOURCES);
        assert_eq!(sources[0], "source-0");
        assert_eq!(sources[1], "source-1");
        // Unique entries only, first occurrence wins.
        let unique: std::collections::HashSet<_> = sources.iter().collect();
        assert_eq!(unique.len(), sources.len());
    }

    #[test]
    fn no_citations_defaults_sources_to_empty() {
        let report = reconcile_report("{}", &no_citations()).unwrap();
        assert!(report.meta.unwrap().data_sources.is_empty());
    }

    // ── Passthrough ─────────────────────────────────────

    #[test]
    fn absent_sections_stay_absent() {
        let report = reconcile_report(r#"{"name":"X"}"#, &no_citations()).unwrap();
        assert!(report.collection.is_none());
        assert!(report.stress_test.is_none());
        assert!(report.final_verdict.is_none());
    }

    #[test]
    fn present_sections_pass_through_untouched() {
        let text = r#"{
            "name": "X",
            "stressTest": {
                "survivalProb": "72%",
                "deathSpiralProb": "55%",
                "scenario": "S2",
                "criticalParam": "TVL outflow"
            },
            "finalVerdict": {"rating": "B", "advice": "观察仓"}
        }"#;
        let report = reconcile_report(text, &no_citations()).unwrap();
        let stress = report.stress_test.unwrap();
        assert!(stress.is_critical_alert());
        assert_eq!(report.final_verdict.unwrap().rating, "B");
    }

    // ── End-to-end scenarios ────────────────────────────

    #[test]
    fn markdown_wrapped_response_reconciles() {
        let raw = "Here is the result:\n```json\n{\"name\":\"X\",\"ticker\":\"X1\"}\n```";
        let report = reconcile_report(raw, &no_citations()).unwrap();
        assert_eq!(report.name, "X");
        assert_eq!(report.ticker, "X1");
        let meta = report.meta.unwrap();
        assert_eq!(meta.transparency_score, 50);
        assert!(meta.data_sources.is_empty());
    }

    #[test]
    fn reconciliation_is_idempotent_for_populated_meta() {
        let text = r#"{"meta":{"version":"V3.0","timestamp":"t","transparencyScore":90,"dataSources":["a"]}}"#;
        let first = reconcile_report(text, &no_citations()).unwrap();
        let second = reconcile_report(
            &serde_json::to_string(&first).unwrap(),
            &no_citations(),
        )
        .unwrap();
        let m1 = first.meta.unwrap();
        let m2 = second.meta.unwrap();
        assert_eq!(m1.transparency_score, m2.transparency_score);
        assert_eq!(m1.data_sources, m2.data_sources);
        assert_eq!(m1.timestamp, m2.timestamp);
    }
}
