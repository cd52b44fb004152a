use super::*;

// =============================================================================
// endpoint_url
// =============================================================================

#[test]
fn endpoint_url_joins_base_and_path() {
    assert_eq!(endpoint_url("http://localhost:8080", LOGIN_ENDPOINT), "http://localhost:8080/api/auth/login");
}

#[test]
fn endpoint_url_tolerates_trailing_slash() {
    assert_eq!(endpoint_url("http://localhost:8080/", SESSION_ENDPOINT), "http://localhost:8080/api/auth/user");
}

// =============================================================================
// failure_message
// =============================================================================

#[test]
fn failure_message_reads_message_field() {
    assert_eq!(failure_message(r#"{"message":"Invalid credentials"}"#).as_deref(), Some("Invalid credentials"));
}

#[test]
fn failure_message_ignores_blank_message() {
    assert_eq!(failure_message(r#"{"message":"   "}"#), None);
}

#[test]
fn failure_message_ignores_non_json_body() {
    assert_eq!(failure_message("<html>Bad Gateway</html>"), None);
    assert_eq!(failure_message(""), None);
}

#[test]
fn failure_message_from_full_auth_result() {
    let body = r#"{"success":false,"message":"Invalid username or password","username":null}"#;
    assert_eq!(failure_message(body).as_deref(), Some("Invalid username or password"));
}

// =============================================================================
// parse_body
// =============================================================================

#[test]
fn parse_body_reads_session_info() {
    let info: SessionInfo = parse_body(r#"{"username":"alice","authenticated":true}"#).unwrap();
    assert!(info.authenticated);
    assert_eq!(info.username.as_deref(), Some("alice"));
}

#[test]
fn parse_body_malformed_is_parse_error() {
    let err = parse_body::<SessionInfo>("{not json").unwrap_err();
    assert!(matches!(err, BackendError::Parse(_)));
}

// =============================================================================
// BackendError
// =============================================================================

#[test]
fn server_message_only_on_response_errors() {
    let err = BackendError::Response { status: 401, message: Some("Invalid credentials".to_owned()) };
    assert_eq!(err.server_message(), Some("Invalid credentials"));
    assert_eq!(BackendError::Request("connection refused".to_owned()).server_message(), None);
    assert_eq!(BackendError::Response { status: 500, message: None }.server_message(), None);
}

#[test]
fn client_builds_from_default_config() {
    let backend = HttpBackend::new(&ClientConfig::default()).unwrap();
    assert_eq!(backend.base_url(), "http://127.0.0.1:8080");
}
