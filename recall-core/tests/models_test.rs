use chrono::{TimeZone, Utc};
use recall_core::models::*;

fn hit(id: &str, score: f64) -> BackendResult {
    BackendResult::new(id, format!("content for {id}"), score, "vector")
}

#[test]
fn backend_result_builders_compose() {
    let result = hit("m1", 0.8)
        .with_source_file("notes/2026-01-15_retro.md")
        .with_tags(vec!["retro".to_string(), "team".to_string()])
        .with_metadata(serde_json::json!({"date": "2026-01-15"}));

    assert_eq!(result.source_file.as_deref(), Some("notes/2026-01-15_retro.md"));
    assert_eq!(result.matched_tags.len(), 2);
    assert_eq!(result.metadata["date"], "2026-01-15");
}

#[test]
fn fused_result_starts_with_raw_score_and_one_backend() {
    let fused = FusedResult::from_backend(hit("m1", 0.72));
    assert_eq!(fused.fused_score, 0.72);
    assert_eq!(fused.contributing_backends, vec!["vector"]);
    assert_eq!(fused.learning.applied_weight, 1.0);
    assert!(fused.learning.matched_learning_tags.is_empty());
}

#[test]
fn time_window_contains_is_inclusive() {
    let window = TimeWindow::new(
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 31, 0, 0, 0).unwrap(),
    );
    assert!(window.contains(window.start));
    assert!(window.contains(window.end));
    assert!(!window.contains(Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap()));
}

#[test]
fn search_options_default_to_all_unset() {
    let options = SearchOptions::default();
    assert!(options.backends.is_empty());
    assert!(options.top_k.is_none());
    assert!(options.time_range.is_none());
    assert!(!options.use_rerank);
    assert!(!options.use_wave_rag);
    assert!(!options.learning_query);
}

#[test]
fn session_resolves_tags_by_result_id() {
    let mut first = FusedResult::from_backend(
        hit("m1", 0.9).with_tags(vec!["rust".to_string(), "async".to_string()]),
    );
    first.fused_score = 1.0;
    let session = SearchSession {
        search_id: "s-1".to_string(),
        query: "rust async patterns".to_string(),
        results: vec![first, FusedResult::from_backend(hit("m2", 0.4))],
        timestamp: Utc::now(),
    };

    assert_eq!(
        session.tags_for_result("m1").unwrap(),
        vec!["rust", "async"]
    );
    assert_eq!(session.tags_for_result("m2").unwrap(), Vec::<String>::new());
    assert!(session.tags_for_result("missing").is_none());
}

#[test]
fn outcome_serializes_snake_case() {
    let json = serde_json::to_string(&SearchOutcome::RagFallback).unwrap();
    assert_eq!(json, "\"rag_fallback\"");
    let back: SearchOutcome = serde_json::from_str("\"truncated\"").unwrap();
    assert_eq!(back, SearchOutcome::Truncated);
}

#[test]
fn report_round_trips_through_json() {
    let report = SearchReport {
        outcome: SearchOutcome::Full,
        rerank_fallback: false,
        responding_backends: vec!["vector".to_string()],
        failed_backends: vec![],
        cache_hit: true,
        search_id: "s-42".to_string(),
    };
    let json = serde_json::to_string(&report).unwrap();
    let back: SearchReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.outcome, SearchOutcome::Full);
    assert!(back.cache_hit);
    assert_eq!(back.search_id, "s-42");
}
