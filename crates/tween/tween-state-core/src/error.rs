//! Error types for the tween engine.

use serde::{Deserialize, Serialize};

use crate::ids::{ContainerId, TweenId};

/// Configuration errors raised synchronously by registration and sampling.
///
/// These are caller bugs: they are never retried and never swallowed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TweenError {
    /// `end_value` was not supplied
    #[error("Tween on '{field}' has no end value")]
    MissingEndValue { field: String },

    /// Locator returned nothing for the current state
    #[error("Locator {locator} did not resolve to a container")]
    UnresolvedLocator { locator: String },

    /// Field absent from the resolved container and no begin value given
    #[error("Field '{field}' not found in container {container}")]
    UnknownField {
        field: String,
        container: ContainerId,
    },

    /// Negative or non-finite duration
    #[error("Invalid duration for '{field}': {duration}")]
    InvalidDuration { field: String, duration: f64 },

    /// Negative or non-finite delay
    #[error("Invalid delay for '{field}': {delay}")]
    InvalidDelay { field: String, delay: f64 },

    /// Non-finite begin or end value
    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: String, value: f64 },

    /// Engine configuration could not be loaded
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl TweenError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingEndValue { .. } | Self::InvalidValue { .. } => "value",
            Self::UnresolvedLocator { .. } | Self::UnknownField { .. } => "target",
            Self::InvalidDuration { .. } | Self::InvalidDelay { .. } => "timing",
            Self::InvalidConfig { .. } => "config",
        }
    }
}

impl From<serde_json::Error> for TweenError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig {
            reason: err.to_string(),
        }
    }
}

/// An `on_end` callback that returned an error during a tick.
///
/// Failures are isolated: the remaining callbacks still run and the pruned
/// queue is still committed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("on_end for tween {tween} on '{field}' failed: {message}")]
pub struct CallbackFailure {
    pub tween: TweenId,
    pub field: String,
    pub message: String,
}
