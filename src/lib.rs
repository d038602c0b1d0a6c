//! Twitch REST SDK
//!
//! A Rust client for the Twitch HTTP API, covering both live API generations:
//! the modern Helix API and the legacy Kraken v5 API.
//!
//! This SDK provides:
//! - Endpoint routing by version tag (`"helix:streams"` vs `"streams"`)
//! - Per-version authorization headers (`Bearer` for Helix, `OAuth` for Kraken)
//! - Lazy initialization from the API status endpoint and scope checks
//! - One-shot credential refresh and retry when the server rejects a token
//! - Validated client options and a pluggable HTTP transport
//!
//! # Example
//!
//! ```no_run
//! use twitch_rest_sdk::{ClientOptions, RequestOptions, TwitchApi};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ClientOptions::new()
//!     .with_client_id("abc123")
//!     .with_token("cfabdegwdoklmawdzdo98xt2fo512y")
//!     .with_auth_failure_handler(|| async {
//!         // Exchange a refresh token for a new access token here
//!         Ok::<_, std::io::Error>("newtoken".to_string())
//!     });
//!
//! let api = TwitchApi::new(options)?;
//!
//! // Fetch token status and check scopes
//! api.initialize(None).await?;
//! if api.has_scope("user_follows_edit").is_ok() {
//!     api.post("users/follows", RequestOptions::new().with_body(json!({})))
//!         .await?;
//! }
//!
//! // Modern API
//! let streams = api
//!     .get("helix:streams", RequestOptions::new().with_search("game_id", "488552"))
//!     .await?;
//! println!("{}", streams);
//! # Ok(())
//! # }
//! ```

pub mod twitch_api;
pub mod validation;

// Re-export commonly used types and functions
pub use twitch_api::{
    auth::{AuthContext, AuthScheme, ACCEPT_HEADER_VALUE},
    client::{RequestOptions, TwitchApi},
    endpoint::{ApiRoots, ApiVersion, EndpointSpec, HELIX_URL_ROOT, KRAKEN_URL_ROOT},
    logger::{ClientLogger, RequestTimer},
    options::{AuthFailureHandler, ClientOptions, LogOptions, OptionsStore},
    transport::{ReqwestTransport, Transport, TransportFuture, TransportRequest},
    types::{ApiError, ApiStatus, ReadyState, TokenAuthorization, TokenStatus, TwitchError},
};
pub use validation::{validate_client_options, ValidationError};
