use crate::twitch_api::auth::AuthContext;
use crate::twitch_api::endpoint::{ApiRoots, EndpointSpec};
use crate::twitch_api::logger::ClientLogger;
use crate::twitch_api::options::{ClientOptions, OptionsStore};
use crate::twitch_api::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::twitch_api::types::{ApiError, ApiStatus, ReadyState, TwitchError};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::Level;

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method (GET when unset)
    pub method: Option<Method>,
    /// Extra headers; `Client-ID` and `Authorization` are always replaced
    /// by the client's own values when it has them
    pub headers: Vec<(String, String)>,
    /// Query string parameters
    pub search: Vec<(String, String)>,
    /// JSON request body
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set method (builder pattern)
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header (builder pattern)
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter (builder pattern)
    pub fn with_search(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.search.push((key.into(), value.into()));
        self
    }

    /// Set JSON body (builder pattern)
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Where a request stands in the refresh-and-retry protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    RetriedAfterReauth,
}

#[derive(Debug, Default)]
struct Lifecycle {
    ready_state: ReadyState,
    status: Option<ApiStatus>,
}

/// HTTP client for the Twitch Helix and Kraken APIs
///
/// Endpoints are written as `"helix:<path>"` for the modern API or as a
/// bare `"<path>"` for the legacy one. Credentials come from the client's
/// [`ClientOptions`]; when the server rejects them and an authentication
/// failure callback is configured, the client fetches a new token and
/// retries the request once.
///
/// # Example
///
/// ```no_run
/// use twitch_rest_sdk::{ClientOptions, RequestOptions, TwitchApi};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = TwitchApi::new(
///     ClientOptions::new()
///         .with_client_id("abc123")
///         .with_token("cfabdegwdoklmawdzdo98xt2fo512y"),
/// )?;
///
/// let status = api.initialize(None).await?;
/// println!("Logged in as {}", status.token.user_name);
///
/// let streams = api
///     .get("helix:streams", RequestOptions::new().with_search("first", "10"))
///     .await?;
/// println!("{}", streams);
/// # Ok(())
/// # }
/// ```
pub struct TwitchApi {
    options: OptionsStore,
    roots: ApiRoots,
    transport: Arc<dyn Transport>,
    lifecycle: RwLock<Lifecycle>,
    /// Serializes `initialize` so concurrent first calls fetch status once
    init_lock: tokio::sync::Mutex<()>,
}

impl TwitchApi {
    /// Create a client with the default roots and reqwest transport
    ///
    /// # Errors
    ///
    /// Returns `TwitchError::Validation` if the options are malformed.
    pub fn new(options: ClientOptions) -> Result<Self, TwitchError> {
        let options = OptionsStore::new(options)?;
        tracing::debug!("Creating TwitchApi client");

        Ok(Self {
            options,
            roots: ApiRoots::default(),
            transport: Arc::new(ReqwestTransport::new()),
            lifecycle: RwLock::new(Lifecycle::default()),
            init_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Replace the transport (builder pattern)
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    /// Replace the API root URLs (builder pattern)
    pub fn with_roots(mut self, roots: ApiRoots) -> Self {
        tracing::debug!(
            "Using API roots: helix={}, kraken={}",
            roots.helix,
            roots.kraken
        );
        self.roots = roots;
        self
    }

    /// Snapshot of the current options
    pub fn options(&self) -> ClientOptions {
        self.options.get()
    }

    /// Root URLs requests are sent to
    pub fn roots(&self) -> &ApiRoots {
        &self.roots
    }

    /// Current lifecycle state (`Initialized` after a successful `initialize`)
    pub fn ready_state(&self) -> ReadyState {
        self.lifecycle().ready_state
    }

    /// Status from the last successful `initialize`, if any
    pub fn status(&self) -> Option<ApiStatus> {
        self.lifecycle().status.clone()
    }

    /// Update client options.
    ///
    /// `client_id` and `token` are kept as they are; use
    /// [`TwitchApi::initialize`] with new options to change credentials.
    pub fn update_options(&self, options: ClientOptions) -> Result<(), TwitchError> {
        self.options.update(options)?;
        Ok(())
    }

    /// Initialize the client and retrieve the API status.
    ///
    /// New options, when given, are merged into the current ones (credentials
    /// included) and the status is always fetched. Without new options an
    /// initialized client returns its cached status without a request.
    ///
    /// # Errors
    ///
    /// Validation errors for the new options, or the status request's error.
    /// The ready state is unchanged on failure.
    ///
    /// # Deadlocks
    ///
    /// Concurrent calls are serialized, and the lock is held across the
    /// status request, including an authentication failure callback it
    /// triggers. That callback must not call `initialize` on the same client;
    /// it should only return the new token.
    pub async fn initialize(
        &self,
        new_options: Option<ClientOptions>,
    ) -> Result<ApiStatus, TwitchError> {
        let _guard = self.init_lock.lock().await;

        match new_options {
            Some(update) => self.options.merge(update)?,
            None => {
                if let Some(status) = self.initialized_status() {
                    tracing::debug!("Client already initialized, skipping status request");
                    return Ok(status);
                }
            }
        }

        let response = self.get("", RequestOptions::default()).await?;
        let status: ApiStatus = serde_json::from_value(response).map_err(|e| {
            tracing::error!("Failed to parse API status: {}", e);
            ApiError::Parse(format!("Failed to parse status response: {}", e))
        })?;

        {
            let mut lifecycle = self.lifecycle.write().unwrap_or_else(PoisonError::into_inner);
            lifecycle.ready_state = ReadyState::Initialized;
            lifecycle.status = Some(status.clone());
        }

        tracing::info!(
            "Client initialized: user_name={}, valid={}, scopes={}",
            status.token.user_name,
            status.token.valid,
            status.scopes().len()
        );

        Ok(status)
    }

    /// Check that the initialized credentials include `scope`.
    ///
    /// Never touches the network. Both negative outcomes are errors:
    /// `TwitchError::NotInitialized` before a successful `initialize`, and
    /// `TwitchError::MissingScope` when the scope was not granted.
    pub fn has_scope(&self, scope: &str) -> Result<(), TwitchError> {
        let lifecycle = self.lifecycle();
        match (&lifecycle.ready_state, &lifecycle.status) {
            (ReadyState::Initialized, Some(status)) if status.has_scope(scope) => Ok(()),
            (ReadyState::Initialized, Some(_)) => Err(TwitchError::MissingScope(scope.to_string())),
            _ => Err(TwitchError::NotInitialized),
        }
    }

    /// GET endpoint
    pub async fn get(&self, endpoint: &str, options: RequestOptions) -> Result<Value, TwitchError> {
        self.request(endpoint, options).await
    }

    /// GET endpoint and deserialize the response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, TwitchError> {
        let response = self.request(endpoint, options).await?;
        serde_json::from_value(response).map_err(|e| {
            TwitchError::Api(ApiError::Parse(format!("Failed to parse response: {}", e)))
        })
    }

    /// POST endpoint
    pub async fn post(&self, endpoint: &str, options: RequestOptions) -> Result<Value, TwitchError> {
        self.request(endpoint, options.with_method(Method::POST)).await
    }

    /// PUT endpoint
    pub async fn put(&self, endpoint: &str, options: RequestOptions) -> Result<Value, TwitchError> {
        self.request(endpoint, options.with_method(Method::PUT)).await
    }

    /// Send a request, refreshing credentials and retrying once if the server
    /// rejects them.
    ///
    /// Headers are composed from the options as they are at the start of
    /// each attempt, so the retry carries the refreshed token.
    pub async fn request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Value, TwitchError> {
        let endpoint = EndpointSpec::parse(endpoint);
        let method = options.method.clone().unwrap_or(Method::GET);
        let mut attempt = Attempt::First;

        loop {
            let snapshot = self.options.get();
            let logger = ClientLogger::from_options(snapshot.log_options.as_ref());
            let context = AuthContext::compose(&endpoint, &self.roots, &snapshot)?;
            let message = format!("{} {}", method, context.base_url);

            let request = TransportRequest {
                headers: context.merge_headers(&options.headers)?,
                url: context.base_url,
                method: method.clone(),
                query: options.search.clone(),
                body: options.body.clone(),
            };

            let timer = logger.start_timer();
            let error = match self.transport.fetch(request).await {
                Ok(response) => {
                    timer.done(Level::INFO, &message);
                    return Ok(response);
                }
                Err(error) => error,
            };
            timer.done(Level::ERROR, &format!("{} failed: {}", message, error));

            if attempt == Attempt::RetriedAfterReauth || !error.is_authentication() {
                return Err(error.into());
            }

            let Some(on_authentication_failure) = snapshot.on_authentication_failure else {
                tracing::debug!("No authentication failure handler configured, not retrying");
                return Err(error.into());
            };

            let token = on_authentication_failure().await.map_err(|e| {
                tracing::error!("Authentication failure handler failed: {}", e);
                TwitchError::TokenRefresh(e.to_string())
            })?;
            self.options.refresh_token(token)?;

            logger.info("Retrying (with new credentials)");
            attempt = Attempt::RetriedAfterReauth;
        }
    }

    fn initialized_status(&self) -> Option<ApiStatus> {
        let lifecycle = self.lifecycle();
        match lifecycle.ready_state {
            ReadyState::Initialized => lifecycle.status.clone(),
            ReadyState::Uninitialized => None,
        }
    }

    fn lifecycle(&self) -> std::sync::RwLockReadGuard<'_, Lifecycle> {
        self.lifecycle.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for TwitchApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitchApi")
            .field("options", &self.options.get())
            .field("roots", &self.roots)
            .field("ready_state", &self.ready_state())
            .finish()
    }
}
