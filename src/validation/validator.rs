//! Core validation logic for client options.

use crate::twitch_api::options::ClientOptions;
use crate::validation::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Log level names accepted in `log_options.level`
pub const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

const CLIENT_ID_PATTERN: &str = "^[A-Za-z0-9]+$";
const TOKEN_PATTERN: &str = "^[A-Za-z0-9_-]+$";

/// Prefix chat clients put in front of OAuth tokens
const TOKEN_PREFIX: &str = "oauth:";

static CLIENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(CLIENT_ID_PATTERN).expect("client id pattern is a valid regex"));
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"));

/// Validate client options, returning the normalized options on success
pub fn validate(options: ClientOptions) -> Result<ClientOptions, ValidationError> {
    let mut options = options;
    let mut errors = Vec::new();

    if let Some(token) = options.token.take() {
        let token = normalize_token(&token);
        validate_credential("token", &token, &TOKEN_RE, TOKEN_PATTERN, &mut errors);
        options.token = Some(token);
    }

    if let Some(client_id) = &options.client_id {
        validate_credential(
            "client_id",
            client_id,
            &CLIENT_ID_RE,
            CLIENT_ID_PATTERN,
            &mut errors,
        );
    }

    if let Some(level) = options.log_options.as_ref().and_then(|l| l.level.as_ref()) {
        if !LOG_LEVELS.iter().any(|allowed| allowed.eq_ignore_ascii_case(level)) {
            errors.push(ValidationError::InvalidEnumValue {
                field_path: "log_options.level".to_string(),
                value: level.clone(),
                allowed: LOG_LEVELS.iter().map(|l| l.to_string()).collect(),
            });
        }
    }

    match ValidationError::from_errors(errors) {
        None => Ok(options),
        Some(error) => {
            tracing::debug!("Rejected client options: {}", error);
            Err(error)
        }
    }
}

fn normalize_token(token: &str) -> String {
    let token = token.trim();
    match token.get(..TOKEN_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(TOKEN_PREFIX) => {
            token[TOKEN_PREFIX.len()..].to_string()
        }
        _ => token.to_string(),
    }
}

fn validate_credential(
    field_path: &str,
    value: &str,
    re: &Regex,
    pattern: &str,
    errors: &mut Vec<ValidationError>,
) {
    if value.is_empty() {
        errors.push(ValidationError::EmptyField {
            field_path: field_path.to_string(),
        });
    } else if !re.is_match(value) {
        errors.push(ValidationError::PatternMismatch {
            field_path: field_path.to_string(),
            pattern: pattern.to_string(),
        });
    }
}
