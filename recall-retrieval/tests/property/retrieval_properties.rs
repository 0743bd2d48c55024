use proptest::prelude::*;

use recall_core::models::BackendResult;
use recall_retrieval::cache::fingerprint::search_fingerprint;
use recall_core::models::SearchQuery;
use recall_retrieval::expansion::tokenizer::extract_tags;
use recall_retrieval::search::filter_by_threshold;
use recall_retrieval::search::rrf_fusion::{dedup_key, fuse, FusionParams};

fn arb_backend() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("lexical".to_string()),
        Just("vector".to_string()),
        Just("graph".to_string()),
    ]
}

fn arb_result() -> impl Strategy<Value = BackendResult> {
    ("[a-z]{1,6}( [a-z]{1,6}){0,4}", 0.0f64..1.0, arb_backend()).prop_map(
        |(content, score, backend)| {
            BackendResult::new(
                format!("id-{}", blake3::hash(content.as_bytes()).to_hex()),
                content,
                score,
                backend,
            )
        },
    )
}

fn params(top_k: usize, normalize: bool) -> FusionParams {
    FusionParams {
        k: 60,
        top_k,
        dedup_prefix_chars: 100,
        normalize,
    }
}

fn base_query(text: &str) -> SearchQuery {
    SearchQuery {
        text: text.to_string(),
        tags: Vec::new(),
        expanded_terms: Vec::new(),
        time_window: None,
        backends: vec!["lexical".to_string()],
        top_k: 10,
        threshold: 0.3,
        use_rrf: true,
        rrf_k: 60,
        tag_boost: 0.5,
    }
}

// ── Fusion invariants ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn fused_count_never_exceeds_top_k(
        results in prop::collection::vec(arb_result(), 0..40),
        top_k in 1usize..20,
    ) {
        let fused = fuse(&results, &params(top_k, false));
        prop_assert!(fused.len() <= top_k);
    }

    #[test]
    fn fused_results_have_distinct_dedup_keys(
        results in prop::collection::vec(arb_result(), 0..40),
    ) {
        let fused = fuse(&results, &params(usize::MAX, false));
        let mut keys: Vec<String> = fused
            .iter()
            .map(|f| dedup_key(&f.result.content, 100))
            .collect();
        keys.sort();
        let before = keys.len();
        keys.dedup();
        prop_assert_eq!(before, keys.len());
    }

    #[test]
    fn fused_scores_are_sorted_descending(
        results in prop::collection::vec(arb_result(), 0..40),
    ) {
        let fused = fuse(&results, &params(usize::MAX, false));
        for pair in fused.windows(2) {
            prop_assert!(pair[0].fused_score >= pair[1].fused_score);
        }
    }

    #[test]
    fn normalized_top_score_is_one(
        results in prop::collection::vec(arb_result(), 1..40),
    ) {
        let fused = fuse(&results, &params(usize::MAX, true));
        if let Some(top) = fused.first() {
            prop_assert!((top.fused_score - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn fusion_is_deterministic(
        results in prop::collection::vec(arb_result(), 0..40),
    ) {
        let a = fuse(&results, &params(10, true));
        let b = fuse(&results, &params(10, true));
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            prop_assert_eq!(&x.result.id, &y.result.id);
            prop_assert_eq!(x.fused_score, y.fused_score);
        }
    }
}

// ── Threshold filtering ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn no_sub_threshold_score_survives_fusion(
        results in prop::collection::vec(arb_result(), 0..40),
        threshold in 0.0f64..1.0,
    ) {
        let filtered = filter_by_threshold(results, threshold);
        prop_assert!(filtered.iter().all(|r| r.raw_score >= threshold));

        let fused = fuse(&filtered, &params(usize::MAX, false));
        prop_assert!(fused.iter().all(|f| f.result.raw_score >= threshold));
    }
}

// ── Tokenizer bounds ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn tags_are_bounded_lowercase_and_unique(
        text in ".{0,200}",
        max_tags in 1usize..16,
    ) {
        let tags = extract_tags(&text, max_tags);
        prop_assert!(tags.len() <= max_tags);
        let mut seen = std::collections::HashSet::new();
        for tag in &tags {
            prop_assert_eq!(tag, &tag.to_lowercase());
            prop_assert!(seen.insert(tag.clone()), "duplicate tag {:?}", tag);
        }
    }
}

// ── Fingerprint stability ────────────────────────────────────────────────

proptest! {
    #[test]
    fn fingerprint_ignores_case_and_spacing(
        words in prop::collection::vec("[a-z]{1,8}", 1..6),
    ) {
        let plain = words.join(" ");
        let shouty = words.join("   ").to_uppercase();
        let a = search_fingerprint(&base_query(&plain), false, false);
        let b = search_fingerprint(&base_query(&format!("  {shouty} ")), false, false);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_separates_flag_variants(
        text in "[a-z]{1,12}",
    ) {
        let query = base_query(&text);
        let baseline = search_fingerprint(&query, false, false);
        prop_assert_ne!(baseline.clone(), search_fingerprint(&query, true, false));
        prop_assert_ne!(baseline, search_fingerprint(&query, false, true));
    }
}
