//! Integration tests for client options validation

use twitch_rest_sdk::{
    validate_client_options, ClientOptions, LogOptions, TwitchApi, TwitchError, ValidationError,
};

#[test]
fn test_valid_options_pass() {
    let options = ClientOptions::new()
        .with_client_id("uo6dggojyb8d6soh92zknwmi5ej1q2")
        .with_token("cfabdegwdoklmawdzdo98xt2fo512y");
    let result = validate_client_options(options);

    if let Err(e) = &result {
        eprintln!("Unexpected validation error: {}", e);
    }

    assert!(result.is_ok(), "Valid options should pass validation");
}

#[test]
fn test_missing_credentials_are_not_an_error() {
    let result = TwitchApi::new(ClientOptions::new());
    assert!(
        result.is_ok(),
        "Options without credentials should still construct a client"
    );
}

#[test]
fn test_constructor_rejects_malformed_token() {
    let result = TwitchApi::new(ClientOptions::new().with_token("token with spaces"));

    let error = result.unwrap_err();
    let error_message = error.to_string();

    assert!(matches!(error, TwitchError::Validation(_)));
    assert!(
        error_message.contains("token"),
        "Error should mention the token field, got: {}",
        error_message
    );
}

#[test]
fn test_update_options_validates() {
    let api = TwitchApi::new(ClientOptions::new().with_client_id("abc")).unwrap();

    let result = api.update_options(ClientOptions::new().with_log_options(LogOptions {
        level: Some("chatty".to_string()),
        scope: None,
    }));

    match result {
        Err(TwitchError::Validation(ValidationError::InvalidEnumValue { value, .. })) => {
            assert_eq!(value, "chatty");
        }
        other => panic!("expected invalid log level, got {:?}", other),
    }

    // previous options are untouched
    assert!(api.options().log_options.is_none());
    assert_eq!(api.options().client_id.as_deref(), Some("abc"));
}

#[test]
fn test_options_from_json_then_validate() {
    let options = ClientOptions::from_json(
        r#"{
            "clientId": "abc",
            "token": "oauth:cfabdegwdoklmawdzdo98xt2fo512y",
            "logOptions": { "level": "debug", "scope": "Api" }
        }"#,
    )
    .unwrap();

    let validated = validate_client_options(options).unwrap();

    assert_eq!(
        validated.token.as_deref(),
        Some("cfabdegwdoklmawdzdo98xt2fo512y")
    );
    assert_eq!(
        validated.log_options.and_then(|l| l.scope).as_deref(),
        Some("Api")
    );
}

#[test]
fn test_multiple_violations_listed() {
    let options = ClientOptions::new()
        .with_client_id("")
        .with_token("")
        .with_log_options(LogOptions {
            level: Some("nope".to_string()),
            scope: None,
        });

    let error = validate_client_options(options).unwrap_err();
    let error_message = error.to_string();

    assert!(error_message.contains("Multiple validation errors"));
    assert!(error_message.contains("client_id"));
    assert!(error_message.contains("token"));
    assert!(error_message.contains("log_options.level"));
}
