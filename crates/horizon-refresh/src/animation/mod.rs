//! Animation support for refresh insets.
//!
//! Easing functions shape how an inset grows or shrinks, and
//! [`InsetTransition`] tracks one in-flight inset change. Transitions are
//! advanced by the host scroll surface's frame clock, never by a timer of
//! their own.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_refresh::animation::{Easing, InsetTransition, TransitionStep};
//!
//! let mut grow = InsetTransition::new(0.0, 44.0, Duration::from_millis(300), Easing::EaseOut);
//! let mid = grow.advance(Duration::from_millis(150));
//! assert!(matches!(mid, TransitionStep::Running(_)));
//! assert_eq!(grow.advance(Duration::from_millis(150)), TransitionStep::Finished(44.0));
//! ```

mod easing;
mod transition;

pub use easing::{ease, lerp_eased, Easing};
pub use transition::{InsetTransition, TransitionStep};
