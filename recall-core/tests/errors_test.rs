use recall_core::errors::{RecallError, RerankError, RetrievalError};

#[test]
fn retrieval_errors_wrap_into_recall_error() {
    let err: RecallError = RetrievalError::InvalidQuery {
        reason: "query must not be blank".to_string(),
    }
    .into();
    assert_eq!(
        err.to_string(),
        "retrieval error: invalid query: query must not be blank"
    );
}

#[test]
fn rerank_errors_carry_their_budget() {
    let err: RecallError = RerankError::DeadlineExceeded { budget_ms: 10_000 }.into();
    assert!(err.to_string().contains("10000ms"));
}

#[test]
fn serde_errors_convert_automatically() {
    let parse_err = serde_json::from_str::<Vec<u64>>("not json").unwrap_err();
    let err: RecallError = parse_err.into();
    assert!(matches!(err, RecallError::Serialization(_)));
}

#[test]
fn config_error_names_the_offending_field() {
    let err = RecallError::Config {
        reason: "invalid type for `retrieval`".to_string(),
    };
    assert!(err.to_string().starts_with("config error:"));
}
