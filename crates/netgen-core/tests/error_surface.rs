use netgen_core::errors::{ErrorInfo, NetgenError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("rows", 100)
        .with_context("reason", "example")
}

#[test]
fn config_error_surface() {
    let err = NetgenError::Config(sample_info("unipartite-not-square", "rows != columns"));
    assert_eq!(err.code(), "unipartite-not-square");
    assert!(err.is_config());
    assert_eq!(err.info().context.get("rows"), Some(&"100".to_string()));
}

#[test]
fn partition_error_surface() {
    let err = NetgenError::Partition(sample_info("partition-infeasible", "too many blocks"));
    assert_eq!(err.code(), "partition-infeasible");
    assert!(!err.is_config());
}

#[test]
fn display_includes_context_and_hint() {
    let err = NetgenError::Calibration(
        ErrorInfo::new("bad-target", "target out of range")
            .with_context("target", 1.5)
            .with_hint("use a value in (0, 1]"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("calibration error: target out of range (code: bad-target)"));
    assert!(rendered.contains("target=1.5"));
    assert!(rendered.contains("hint: use a value in (0, 1]"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = NetgenError::Model(ErrorInfo::new("size-mismatch", "sizes do not sum"));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "Model");
    assert_eq!(json["detail"]["code"], "size-mismatch");
    let back: NetgenError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}
