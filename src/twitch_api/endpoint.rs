//! Endpoint routing between the two live API generations.
//!
//! Callers address endpoints as `"<version>:<path>"` or a bare `"<path>"`.
//! The version tag is an optional, case-insensitive prefix; anything other
//! than [`MODERN_VERSION_TAG`] (including no tag at all) routes to the
//! legacy API.

use once_cell::sync::Lazy;
use regex::Regex;

/// Root URL of the modern (Helix) API
pub const HELIX_URL_ROOT: &str = "https://api.twitch.tv/helix";

/// Root URL of the legacy (Kraken v5) API
pub const KRAKEN_URL_ROOT: &str = "https://api.twitch.tv/kraken";

/// Version tag selecting the modern API
pub const MODERN_VERSION_TAG: &str = "helix";

/// `[<letters>:][/]<path>`, matched case-insensitively
static ENDPOINT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:([a-z]+):)?/?(.*)$").expect("endpoint pattern is a valid regex")
});

/// The two supported API generations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// Modern API, authorized with `Bearer` tokens
    Helix,
    /// Legacy API, authorized with `OAuth` tokens
    Kraken,
}

impl ApiVersion {
    /// Classify a version tag.
    ///
    /// Only a case-insensitive match of [`MODERN_VERSION_TAG`] selects Helix.
    /// Unknown tags fall back to Kraken rather than failing.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(tag) if tag.eq_ignore_ascii_case(MODERN_VERSION_TAG) => ApiVersion::Helix,
            _ => ApiVersion::Kraken,
        }
    }
}

/// A caller endpoint string split into its version tag and path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    /// Version prefix as written by the caller, if any
    pub version_tag: Option<String>,
    /// Path relative to the version root, without a leading slash
    pub path: String,
}

impl EndpointSpec {
    /// Parse an endpoint string such as `"helix:streams"` or `"users/follows"`.
    pub fn parse(endpoint: &str) -> Self {
        match ENDPOINT_PATTERN.captures(endpoint) {
            Some(captures) => Self {
                version_tag: captures.get(1).map(|m| m.as_str().to_string()),
                path: captures
                    .get(2)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            },
            // `.` does not cross newlines; keep such input as a legacy path
            None => Self {
                version_tag: None,
                path: endpoint.trim_start_matches('/').to_string(),
            },
        }
    }

    /// The API generation this endpoint targets
    pub fn version(&self) -> ApiVersion {
        ApiVersion::from_tag(self.version_tag.as_deref())
    }
}

/// Root URLs for both API generations
///
/// Defaults to the public Twitch roots; tests point both at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoots {
    pub helix: String,
    pub kraken: String,
}

impl Default for ApiRoots {
    fn default() -> Self {
        Self {
            helix: HELIX_URL_ROOT.to_string(),
            kraken: KRAKEN_URL_ROOT.to_string(),
        }
    }
}

impl ApiRoots {
    /// Create roots from explicit URLs (trailing slashes are dropped)
    pub fn new(helix: impl Into<String>, kraken: impl Into<String>) -> Self {
        Self {
            helix: helix.into().trim_end_matches('/').to_string(),
            kraken: kraken.into().trim_end_matches('/').to_string(),
        }
    }

    /// Roots laid out as `<base>/helix` and `<base>/kraken`
    pub fn from_base_url(base_url: impl AsRef<str>) -> Self {
        let base = base_url.as_ref().trim_end_matches('/');
        Self::new(format!("{}/helix", base), format!("{}/kraken", base))
    }

    /// Root URL for a version
    pub fn root(&self, version: ApiVersion) -> &str {
        match version {
            ApiVersion::Helix => &self.helix,
            ApiVersion::Kraken => &self.kraken,
        }
    }

    /// Full request URL: `<root>/<path>`
    pub fn url_for(&self, endpoint: &EndpointSpec) -> String {
        format!("{}/{}", self.root(endpoint.version()), endpoint.path)
    }
}
