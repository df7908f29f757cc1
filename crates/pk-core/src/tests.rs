use crate::*;

// ========== Types ==========

#[test]
fn test_kind_codes_roundtrip() {
    for kind in AnnotationKind::ALL {
        assert_eq!(AnnotationKind::from_code(kind.code()), Some(kind));
    }
    assert_eq!(AnnotationKind::from_code("XYZ"), None);
}

#[test]
fn test_parameter_kinds() {
    assert!(AnnotationKind::RuntimeVisibleParameter.is_parameter());
    assert!(AnnotationKind::RuntimeInvisibleParameter.is_parameter());
    assert!(!AnnotationKind::RuntimeVisible.is_parameter());
    assert!(!AnnotationKind::Default.is_parameter());
}

#[test]
fn test_default_has_no_descriptors() {
    assert!(!AnnotationKind::Default.has_descriptors());
    assert!(AnnotationKind::RuntimeInvisible.has_descriptors());
}

#[test]
fn test_context_labels() {
    assert_eq!(AnnotationContext::Class.to_string(), "Class");
    assert_eq!(AnnotationContext::Field.label(), "Field");
    assert_eq!(AnnotationContext::Method.label(), "Method");
}

// ========== Config ==========

#[test]
fn test_config_defaults() {
    let config = MetadataConfig::default();
    assert_eq!(config.max_nesting_depth, 64);
    assert!(config.verify_undo);
    assert!(config.log_bands);
}

#[test]
fn test_config_from_json_partial() {
    let config = MetadataConfig::from_json(r#"{"max_nesting_depth": 8}"#).unwrap();
    assert_eq!(config.max_nesting_depth, 8);
    assert!(config.verify_undo);
}

#[test]
fn test_config_from_json_invalid() {
    let err = MetadataConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, PackError::Config(_)));
}

#[test]
fn test_config_builders() {
    let config = MetadataConfig::default()
        .with_max_nesting_depth(3)
        .with_verify_undo(false)
        .with_log_bands(false);
    assert_eq!(config.max_nesting_depth, 3);
    assert!(!config.verify_undo);
    assert!(!config.log_bands);
}

// ========== Errors ==========

#[test]
fn test_error_messages() {
    let err = PackError::WrongKind { kind: AnnotationKind::Default, operation: "add_annotation" };
    assert_eq!(err.to_string(), "add_annotation is not valid for AD band groups");

    let err = PackError::UnknownTag(b'x' as i64);
    assert_eq!(err.to_string(), "Unknown value tag: 0x78");

    let err = PackError::UnknownTag(0x178);
    assert_eq!(err.to_string(), "Unknown value tag: 0x178");

    let err = PackError::ArityMismatch { tag: 'e', expected: 2, found: 1 };
    assert!(err.to_string().contains("'e'"));
}
