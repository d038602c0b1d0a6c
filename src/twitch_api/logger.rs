//! Per-client logging on top of `tracing`.
//!
//! Each client carries a scope label and a level threshold taken from its
//! [`LogOptions`]. Request timing goes through [`RequestTimer`], which emits a
//! single event with the elapsed time when the request completes.

use crate::twitch_api::options::LogOptions;
use std::str::FromStr;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::Level;

const DEFAULT_SCOPE: &str = "Api";

/// Scope label and level threshold for one client's log events
#[derive(Debug, Clone)]
pub struct ClientLogger {
    scope: String,
    level: LevelFilter,
}

impl Default for ClientLogger {
    fn default() -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_string(),
            level: LevelFilter::INFO,
        }
    }
}

impl ClientLogger {
    /// Build a logger from log options (`Api` at `info` when unset)
    pub fn from_options(options: Option<&LogOptions>) -> Self {
        let mut logger = Self::default();
        if let Some(options) = options {
            if let Some(scope) = &options.scope {
                logger.scope = scope.clone();
            }
            if let Some(level) = &options.level {
                // validated options only carry known names
                logger.level =
                    LevelFilter::from_str(&level.to_ascii_lowercase()).unwrap_or(LevelFilter::INFO);
            }
        }
        logger
    }

    /// Scope label attached to every event
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Whether events at `level` pass this logger's threshold
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /// Emit `message` at info level
    pub fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    /// Emit `message` at `level`, if enabled
    pub fn log(&self, level: Level, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let scope = self.scope.as_str();
        match level {
            Level::ERROR => tracing::error!(scope, "{}", message),
            Level::WARN => tracing::warn!(scope, "{}", message),
            Level::INFO => tracing::info!(scope, "{}", message),
            Level::DEBUG => tracing::debug!(scope, "{}", message),
            _ => tracing::trace!(scope, "{}", message),
        }
    }

    /// Start timing a request attempt
    pub fn start_timer(&self) -> RequestTimer {
        RequestTimer {
            logger: self.clone(),
            started: Instant::now(),
        }
    }
}

/// Timing scope for one request attempt
#[derive(Debug)]
pub struct RequestTimer {
    logger: ClientLogger,
    started: Instant,
}

impl RequestTimer {
    /// Close the timer, emitting `message` with the elapsed milliseconds
    pub fn done(self, level: Level, message: &str) -> u64 {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        if !self.logger.enabled(level) {
            return elapsed_ms;
        }
        let scope = self.logger.scope.as_str();
        match level {
            Level::ERROR => tracing::error!(scope, elapsed_ms, "{}", message),
            Level::WARN => tracing::warn!(scope, elapsed_ms, "{}", message),
            Level::INFO => tracing::info!(scope, elapsed_ms, "{}", message),
            Level::DEBUG => tracing::debug!(scope, elapsed_ms, "{}", message),
            _ => tracing::trace!(scope, elapsed_ms, "{}", message),
        }
        elapsed_ms
    }
}
