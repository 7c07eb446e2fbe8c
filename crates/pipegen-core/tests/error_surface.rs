use pipegen_core::errors::{ErrorInfo, PipegenError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("slot", "1")
        .with_context("reason", "example")
}

#[test]
fn config_error_surface() {
    let err = PipegenError::Config(sample_info("missing-chainer", "no chainer"));
    assert_eq!(err.info().code, "missing-chainer");
    assert!(err.info().context.contains_key("slot"));
}

#[test]
fn mode_error_surface() {
    let err = PipegenError::Mode(sample_info("unsupported-mode", "bayesian"));
    assert_eq!(err.info().code, "unsupported-mode");
}

#[test]
fn search_error_surface() {
    let err = PipegenError::Search(sample_info("grid-unsupported-value", "mapping"));
    assert_eq!(err.info().code, "grid-unsupported-value");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn sampler_error_surface() {
    let err = PipegenError::Sampler(sample_info("unknown-distribution", "gamma"));
    assert_eq!(err.info().code, "unknown-distribution");
}

#[test]
fn display_includes_context_and_hint() {
    let err = PipegenError::Config(
        ErrorInfo::new("invalid-slot", "bad slot")
            .with_context("slot", "2")
            .with_hint("wrap the alternative in a list"),
    );
    let rendered = err.to_string();
    assert_eq!(
        rendered,
        "config error: bad slot (code: invalid-slot) | context: [slot=2] | hint: wrap the alternative in a list"
    );
}

#[test]
fn errors_round_trip_json() {
    let err = PipegenError::Serde(sample_info("json-read", "eof"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Serde\""));
    let decoded: PipegenError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn context_is_added_without_changing_family() {
    let err = PipegenError::Sampler(ErrorInfo::new("empty-choice", "no candidates"))
        .in_context("slot", "3")
        .in_context("alternative", "0");
    assert_eq!(err.family(), "sampler");
    assert_eq!(err.info().context.get("slot").map(String::as_str), Some("3"));
    assert_eq!(
        err.to_string(),
        "sampler error: no candidates (code: empty-choice) | context: [alternative=0, slot=3]"
    );
}
