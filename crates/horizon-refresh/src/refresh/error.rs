//! Error types for refresh controller construction and installation.
//!
//! Runtime operations (begin/end, scroll reactions) never fail; they degrade to
//! no-ops. Errors only surface when a controller is wired up incorrectly.

use std::fmt;

use thiserror::Error;

use super::state::Orientation;

/// The two controller slots a scroll surface offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshSlot {
    /// Before content start.
    Header,
    /// After content end.
    Footer,
}

impl fmt::Display for RefreshSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshSlot::Header => f.write_str("header"),
            RefreshSlot::Footer => f.write_str("footer"),
        }
    }
}

/// Errors raised while building or installing a refresh controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RefreshError {
    /// The indicator extent is zero, negative, or not finite.
    #[error("refresh extent must be a positive finite length, got {0}")]
    InvalidExtent(f32),

    /// The footer auto-trigger ratio is outside `0.0..=1.0`.
    #[error("footer auto-trigger ratio must be within 0.0..=1.0, got {0}")]
    InvalidAutoTriggerRatio(f32),

    /// No presenter was supplied to the builder.
    #[error("refresh controller built without a presenter")]
    MissingPresenter,

    /// A header was installed as a footer or vice versa.
    #[error("a {orientation:?} controller cannot be installed in the {slot} slot")]
    SlotMismatch {
        /// Orientation of the rejected controller.
        orientation: Orientation,
        /// Slot it was offered to.
        slot: RefreshSlot,
    },

    /// A configuration document could not be parsed.
    #[error("invalid refresh configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for RefreshError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A specialized Result type for refresh wiring.
pub type Result<T> = std::result::Result<T, RefreshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RefreshError::InvalidExtent(-1.0).to_string(),
            "refresh extent must be a positive finite length, got -1"
        );
        assert_eq!(
            RefreshError::SlotMismatch {
                orientation: Orientation::Bottom,
                slot: RefreshSlot::Header,
            }
            .to_string(),
            "a Bottom controller cannot be installed in the header slot"
        );
    }
}
