use super::*;

#[test]
fn parses_string_detail() {
    let err = ApiError::from_body(r#"{"detail":"Only .txt files are supported"}"#)
        .expect("detail body");
    assert_eq!(err.message(), "Only .txt files are supported");
    assert_eq!(err.to_string(), "Only .txt files are supported");
}

#[test]
fn structured_detail_falls_back_to_json_text() {
    let err = ApiError::from_body(r#"{"detail":[{"loc":["body","file"],"msg":"field required"}]}"#)
        .expect("validation body");
    assert!(err.message().contains("field required"));
}

#[test]
fn non_json_body_is_not_an_api_error() {
    assert!(ApiError::from_body("Internal Server Error").is_none());
}
