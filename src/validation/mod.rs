//! Validation for client options.
//!
//! Every options write in the client is routed through
//! [`validate_client_options`]. Validation normalizes as well as checks: a
//! leading `oauth:` on the token is removed before the token is matched.
//!
//! # Example
//!
//! ```
//! use twitch_rest_sdk::ClientOptions;
//! use twitch_rest_sdk::validation::validate_client_options;
//!
//! let options = ClientOptions::new()
//!     .with_client_id("abc123")
//!     .with_token("oauth:cfabdegwdoklmawdzdo98xt2fo512y");
//!
//! let validated = validate_client_options(options).unwrap();
//! assert_eq!(validated.token.as_deref(), Some("cfabdegwdoklmawdzdo98xt2fo512y"));
//! ```

pub mod error;
pub mod validator;

pub use error::ValidationError;
pub use validator::LOG_LEVELS;

use crate::twitch_api::options::ClientOptions;

/// Validate client options.
///
/// Absent credentials are valid; present ones must be non-empty and
/// well-formed. Unknown log levels are rejected.
///
/// # Errors
///
/// Returns a `ValidationError` describing every rule that failed, collected
/// into `ValidationError::Multiple` when there is more than one.
pub fn validate_client_options(options: ClientOptions) -> Result<ClientOptions, ValidationError> {
    validator::validate(options)
}
