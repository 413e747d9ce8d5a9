use crawldash_core::{validate_submission_url, ValidationError};

#[test]
fn accepts_http_and_https_and_trims() {
    assert_eq!(
        validate_submission_url("  https://example.com/path ").unwrap(),
        "https://example.com/path"
    );
    assert!(validate_submission_url("http://localhost:8080").is_ok());
}

#[test]
fn rejects_empty_relative_and_other_schemes() {
    assert_eq!(validate_submission_url("   "), Err(ValidationError::Empty));
    assert_eq!(validate_submission_url("example.com"), Err(ValidationError::InvalidUrl));
    assert_eq!(validate_submission_url("ftp://example.com"), Err(ValidationError::InvalidUrl));
    assert_eq!(validate_submission_url("mailto:a@b.c"), Err(ValidationError::InvalidUrl));
}
