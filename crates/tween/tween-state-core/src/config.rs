//! Engine configuration: the defaults applied when a tween is normalized.

use serde::{Deserialize, Serialize};
use tween_easing::Easing;

use crate::error::TweenError;
use crate::request::StackBehavior;

/// Defaults for options a [`TweenConfig`](crate::request::TweenConfig)
/// leaves unset. Field names follow the camelCase option names hosts
/// already use, so a JSON blob like `{"defaultDuration": 500}` loads
/// directly; missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Milliseconds.
    pub default_duration: f64,
    /// Milliseconds.
    pub default_delay: f64,
    pub default_easing: Easing,
    /// Additive is the default: overlapping tweens sum, which reads as
    /// momentum rather than a jump.
    pub default_stack_behavior: StackBehavior,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_duration: 300.0,
            default_delay: 0.0,
            default_easing: Easing::EaseInOutQuad,
            default_stack_behavior: StackBehavior::Additive,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(raw: &str) -> Result<Self, TweenError> {
        let cfg: EngineConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), TweenError> {
        if !self.default_duration.is_finite() || self.default_duration < 0.0 {
            return Err(TweenError::InvalidConfig {
                reason: format!("defaultDuration must be >= 0, got {}", self.default_duration),
            });
        }
        if !self.default_delay.is_finite() || self.default_delay < 0.0 {
            return Err(TweenError::InvalidConfig {
                reason: format!("defaultDelay must be >= 0, got {}", self.default_delay),
            });
        }
        if matches!(self.default_easing, Easing::Custom(_)) {
            log::debug!("engine configured with a custom default easing");
        }
        Ok(())
    }
}
