//! Refresh controller configuration.
//!
//! [`RefreshConfig`] gathers the tunables a host application usually wants to
//! keep in a settings file. Every field has a default, so a TOML document
//! only needs the keys it changes:
//!
//! ```toml
//! extent = 60.0
//! animation_duration_ms = 250
//! easing = "ease_in_out"
//! footer_auto_trigger_ratio = 0.8
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{RefreshError, Result};
use crate::animation::Easing;

/// Default indicator extent.
pub const DEFAULT_EXTENT: f32 = 44.0;

/// Default inset animation duration in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;

/// Auto-trigger ratio meaning "wait for the drag to end".
pub const AUTO_TRIGGER_DISABLED: f32 = 1.0;

/// Tunables shared by header and footer controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Length of the indicator region along the scroll axis.
    pub extent: f32,
    /// Duration of the inset grow/shrink animation.
    pub animation_duration_ms: u64,
    /// Easing for the inset animation.
    pub easing: Easing,
    /// Footer only: fraction of the scrollable distance at which loading
    /// starts without waiting for the drag to end. `1.0` disables it.
    pub footer_auto_trigger_ratio: f32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            extent: DEFAULT_EXTENT,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            easing: Easing::default(),
            footer_auto_trigger_ratio: AUTO_TRIGGER_DISABLED,
        }
    }
}

impl RefreshConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| RefreshError::Config(err.to_string()))
    }

    /// The animation duration as a [`Duration`].
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Check the numeric fields.
    pub fn validate(&self) -> Result<()> {
        validate_extent(self.extent)?;
        validate_auto_trigger_ratio(self.footer_auto_trigger_ratio)?;
        Ok(())
    }
}

pub(crate) fn validate_extent(extent: f32) -> Result<()> {
    if extent.is_finite() && extent > 0.0 {
        Ok(())
    } else {
        Err(RefreshError::InvalidExtent(extent))
    }
}

pub(crate) fn validate_auto_trigger_ratio(ratio: f32) -> Result<()> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(())
    } else {
        Err(RefreshError::InvalidAutoTriggerRatio(ratio))
    }
}
