//! Client options and the store that owns them.
//!
//! Every write to the store goes through [`validate_client_options`], both at
//! construction time and on later updates. A rejected write leaves the
//! previous options in place.

use crate::validation::{validate_client_options, ValidationError};
use serde::Deserialize;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

/// Error type returned by an authentication failure callback
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Future returned by an authentication failure callback
pub type AuthFailureFuture = Pin<Box<dyn Future<Output = Result<String, BoxError>> + Send>>;

/// Callback invoked when the server rejects the current credentials.
///
/// Resolves to a fresh token that replaces the rejected one.
pub type AuthFailureHandler = Arc<dyn Fn() -> AuthFailureFuture + Send + Sync>;

/// Logging options for a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// Minimum level emitted by the client (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    pub level: Option<String>,
    /// Scope label attached to every event (defaults to `Api`)
    pub scope: Option<String>,
}

/// Client configuration
///
/// At least one of `client_id` or `token` is needed for authenticated calls,
/// but neither is required: missing credentials just produce unauthenticated
/// headers.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    #[serde(alias = "clientId")]
    pub client_id: Option<String>,
    pub token: Option<String>,
    #[serde(alias = "logOptions", alias = "log")]
    pub log_options: Option<LogOptions>,
    #[serde(skip)]
    pub on_authentication_failure: Option<AuthFailureHandler>,
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("client_id", &self.client_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("log_options", &self.log_options)
            .field(
                "on_authentication_failure",
                &self.on_authentication_failure.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from `TWITCH_CLIENT_ID`, `TWITCH_TOKEN` and `TWITCH_LOG_LEVEL`
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let log_options = var("TWITCH_LOG_LEVEL").map(|level| LogOptions {
            level: Some(level),
            scope: None,
        });

        Self {
            client_id: var("TWITCH_CLIENT_ID"),
            token: var("TWITCH_TOKEN"),
            log_options,
            on_authentication_failure: None,
        }
    }

    /// Parse options from JSON (snake_case or camelCase keys)
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set client ID (builder pattern)
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set token (builder pattern)
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set log options (builder pattern)
    pub fn with_log_options(mut self, log_options: LogOptions) -> Self {
        self.log_options = Some(log_options);
        self
    }

    /// Set the authentication failure callback (builder pattern)
    ///
    /// The returned token is stored by the client itself. The callback must
    /// not call `TwitchApi::initialize` on the client it belongs to: when the
    /// failure happens during `initialize`, that call never completes.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use twitch_rest_sdk::ClientOptions;
    ///
    /// let options = ClientOptions::new()
    ///     .with_client_id("abc")
    ///     .with_auth_failure_handler(|| async {
    ///         Ok::<_, std::io::Error>("fresh_token".to_string())
    ///     });
    /// ```
    pub fn with_auth_failure_handler<F, Fut, E>(mut self, handler: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        self.on_authentication_failure = Some(Arc::new(move || {
            let fut = handler();
            let boxed: AuthFailureFuture =
                Box::pin(async move { fut.await.map_err(Into::<BoxError>::into) });
            boxed
        }));
        self
    }

    /// Overlay every field that is set in `update` onto these options
    pub fn merged_with(&self, update: ClientOptions) -> ClientOptions {
        ClientOptions {
            client_id: update.client_id.or_else(|| self.client_id.clone()),
            token: update.token.or_else(|| self.token.clone()),
            log_options: update.log_options.or_else(|| self.log_options.clone()),
            on_authentication_failure: update
                .on_authentication_failure
                .or_else(|| self.on_authentication_failure.clone()),
        }
    }
}

/// Owner of the current client options
///
/// Readers get a snapshot; writers replace the options wholesale.
#[derive(Debug)]
pub struct OptionsStore {
    current: RwLock<ClientOptions>,
}

impl OptionsStore {
    /// Create a store from validated options
    pub fn new(options: ClientOptions) -> Result<Self, ValidationError> {
        Ok(Self {
            current: RwLock::new(validate_client_options(options)?),
        })
    }

    /// Snapshot of the current options
    pub fn get(&self) -> ClientOptions {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validate and replace the current options
    pub fn set(&self, input: ClientOptions) -> Result<(), ValidationError> {
        let validated = validate_client_options(input)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = validated;
        Ok(())
    }

    /// Merge `partial` over the current options, keeping the stored credentials.
    ///
    /// Credentials only change through [`OptionsStore::merge`] (the
    /// re-authentication path used by `initialize`) or a token refresh.
    pub fn update(&self, partial: ClientOptions) -> Result<(), ValidationError> {
        self.replace_with(|current| ClientOptions {
            client_id: current.client_id.clone(),
            token: current.token.clone(),
            ..current.merged_with(partial)
        })
    }

    /// Merge `update` over the current options, credentials included
    pub fn merge(&self, update: ClientOptions) -> Result<(), ValidationError> {
        self.replace_with(|current| current.merged_with(update))
    }

    /// Replace only the token
    pub fn refresh_token(&self, token: impl Into<String>) -> Result<(), ValidationError> {
        let token = token.into();
        self.replace_with(|current| ClientOptions {
            token: Some(token),
            ..current.clone()
        })
    }

    fn replace_with<F>(&self, build: F) -> Result<(), ValidationError>
    where
        F: FnOnce(&ClientOptions) -> ClientOptions,
    {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let validated = validate_client_options(build(&current))?;
        *current = validated;
        Ok(())
    }
}
