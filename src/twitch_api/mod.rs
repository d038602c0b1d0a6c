/// Twitch REST API client module
///
/// This module provides the client for the two live Twitch API generations,
/// along with endpoint routing, header composition, options handling and the
/// transport abstraction it sends requests through.
///
/// ## Request Flow
///
/// 1. The endpoint string is split into an optional version tag and a path
/// 2. The tag selects the root URL and authorization scheme (`helix` → Bearer, anything else → OAuth)
/// 3. Headers are composed from the current options and merged with caller headers
/// 4. The transport sends the request
/// 5. If the server rejects the credentials, the authentication failure
///    callback supplies a new token and the request is sent once more
pub mod auth;
pub mod client;
pub mod endpoint;
pub mod logger;
pub mod options;
pub mod transport;
pub mod types;

pub use auth::{AuthContext, AuthScheme};
pub use client::{RequestOptions, TwitchApi};
pub use endpoint::{ApiRoots, ApiVersion, EndpointSpec};
pub use options::{ClientOptions, LogOptions, OptionsStore};
pub use transport::{ReqwestTransport, Transport, TransportRequest};
pub use types::{ApiError, ApiStatus, ReadyState, TwitchError};
