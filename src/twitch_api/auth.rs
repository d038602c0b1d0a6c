//! Authorization headers for each API generation.
//!
//! The scheme follows the endpoint's [`ApiVersion`]: `Bearer` for Helix,
//! `OAuth` for Kraken. Missing credentials are left out of the header map
//! entirely.

use crate::twitch_api::endpoint::{ApiRoots, ApiVersion, EndpointSpec};
use crate::twitch_api::options::ClientOptions;
use crate::twitch_api::types::ApiError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use std::fmt;

/// Fixed `Accept` value sent with every request
pub const ACCEPT_HEADER_VALUE: &str = "application/vnd.twitchtv.v5+json";

/// Header carrying the application's client ID
pub const CLIENT_ID_HEADER: HeaderName = HeaderName::from_static("client-id");

/// Authorization scheme for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthScheme {
    Bearer,
    OAuth,
}

impl AuthScheme {
    pub fn for_version(version: ApiVersion) -> Self {
        match version {
            ApiVersion::Helix => AuthScheme::Bearer,
            ApiVersion::Kraken => AuthScheme::OAuth,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Bearer => "Bearer",
            AuthScheme::OAuth => "OAuth",
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to address and authorize one request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub scheme: AuthScheme,
    /// Full request URL
    pub base_url: String,
    pub headers: HeaderMap,
}

impl AuthContext {
    /// Compose the context for `endpoint` from the current options
    pub fn compose(
        endpoint: &EndpointSpec,
        roots: &ApiRoots,
        options: &ClientOptions,
    ) -> Result<Self, ApiError> {
        let version = endpoint.version();
        Ok(Self {
            scheme: AuthScheme::for_version(version),
            base_url: roots.url_for(endpoint),
            headers: auth_headers(version, options)?,
        })
    }

    /// Merge caller headers with the composed ones.
    ///
    /// `Client-ID` and `Authorization` from the composer always win. Caller
    /// values win for every other key, `Accept` included.
    pub fn merge_headers(&self, caller: &[(String, String)]) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        for (name, value) in caller {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::Request(format!("Invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ApiError::Request(format!("Invalid value for header '{}': {}", name, e))
            })?;
            headers.insert(name, value);
        }

        for (name, value) in self.headers.iter() {
            if *name == ACCEPT && headers.contains_key(ACCEPT) {
                continue;
            }
            headers.insert(name.clone(), value.clone());
        }

        Ok(headers)
    }
}

/// Header set for a version: `Accept`, then `Client-ID` and `Authorization`
/// when the matching credential is configured
pub fn auth_headers(version: ApiVersion, options: &ClientOptions) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER_VALUE));

    if let Some(client_id) = options.client_id.as_deref().filter(|id| !id.is_empty()) {
        let value = HeaderValue::from_str(client_id)
            .map_err(|e| ApiError::Request(format!("Invalid client ID header: {}", e)))?;
        headers.insert(CLIENT_ID_HEADER, value);
    }

    if let Some(token) = options.token.as_deref().filter(|t| !t.is_empty()) {
        let scheme = AuthScheme::for_version(version);
        let mut value = HeaderValue::from_str(&format!("{} {}", scheme, token))
            .map_err(|e| ApiError::Request(format!("Invalid authorization header: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}
