use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Twitch client error type
///
/// Represents all possible errors that can occur when using the client.
#[derive(Debug)]
pub enum TwitchError {
    /// Client options were rejected by the validator
    Validation(ValidationError),
    /// API request failed; carries the transport's error unchanged
    Api(ApiError),
    /// `has_scope` was called before the client was initialized
    NotInitialized,
    /// The initialized credentials do not include the requested scope
    MissingScope(String),
    /// The authentication failure callback could not produce a new token
    TokenRefresh(String),
}

impl TwitchError {
    /// Whether this is the credentials-rejected failure class
    pub fn is_authentication(&self) -> bool {
        matches!(self, TwitchError::Api(err) if err.is_authentication())
    }

    /// Whether this is a negative `has_scope` outcome (either kind)
    pub fn is_scope_rejection(&self) -> bool {
        matches!(
            self,
            TwitchError::NotInitialized | TwitchError::MissingScope(_)
        )
    }
}

impl fmt::Display for TwitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwitchError::Validation(err) => write!(f, "Invalid options: {}", err),
            TwitchError::Api(err) => write!(f, "API error: {}", err),
            TwitchError::NotInitialized => write!(f, "Client has not been initialized"),
            TwitchError::MissingScope(scope) => write!(f, "Scope not granted: {}", scope),
            TwitchError::TokenRefresh(msg) => write!(f, "Token refresh failed: {}", msg),
        }
    }
}

impl std::error::Error for TwitchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TwitchError::Validation(err) => Some(err),
            TwitchError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for TwitchError {
    fn from(err: ApiError) -> Self {
        TwitchError::Api(err)
    }
}

impl From<ValidationError> for TwitchError {
    fn from(err: ValidationError) -> Self {
        TwitchError::Validation(err)
    }
}

/// API-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Credentials were rejected by the server (HTTP 401)
    Authentication { status: u16, message: String },
    /// Network error (connection, timeout, etc.)
    Network(String),
    /// HTTP error with status code
    Http { status: u16, message: String },
    /// Failed to parse response
    Parse(String),
    /// Request building failed
    Request(String),
}

impl ApiError {
    /// Build the error for a non-success HTTP status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == 401 {
            ApiError::Authentication { status, message }
        } else {
            ApiError::Http { status, message }
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, ApiError::Authentication { .. })
    }

    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication { status, .. } | ApiError::Http { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Authentication { status, message } => {
                write!(f, "Authentication failed (HTTP {}): {}", status, message)
            }
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Request(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timeout".to_string())
        } else if err.is_connect() {
            ApiError::Network(format!("Connection failed: {}", err))
        } else if let Some(status) = err.status() {
            ApiError::from_status(status.as_u16(), err.to_string())
        } else if err.is_builder() {
            ApiError::Request(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Client lifecycle state
///
/// Moves forward only, and only on a successful status fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum ReadyState {
    #[default]
    Uninitialized = 1,
    Initialized = 2,
}

/// Status reported by the legacy API root
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub token: TokenStatus,
}

/// Token details from the status payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub authorization: TokenAuthorization,
    #[serde(default, alias = "clientId", deserialize_with = "null_as_default")]
    pub client_id: String,
    #[serde(default, alias = "userId", deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, alias = "userName", deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(default)]
    pub valid: bool,
}

/// Scopes and timestamps of the authorization behind a token
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenAuthorization {
    #[serde(default, deserialize_with = "null_as_default")]
    pub scopes: Vec<String>,
    #[serde(default, alias = "createdAt", deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, alias = "updatedAt", deserialize_with = "null_as_default")]
    pub updated_at: String,
}

impl ApiStatus {
    pub fn scopes(&self) -> &[String] {
        &self.token.authorization.scopes
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes().iter().any(|s| s == scope)
    }
}

impl TokenAuthorization {
    /// Parsed `created_at`, if it is a valid RFC 3339 timestamp
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Parsed `updated_at`, if it is a valid RFC 3339 timestamp
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => Some(timestamp.with_timezone(&Utc)),
        Err(e) => {
            if !value.is_empty() {
                tracing::warn!("Failed to parse status timestamp '{}': {}", value, e);
            }
            None
        }
    }
}

/// The legacy API sends `null` for fields of an invalid token
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
