//! Frame-driven inset transitions.
//!
//! An [`InsetTransition`] moves one scalar (an edge inset) from a start value
//! to an end value over a fixed duration. It has no clock of its own: the
//! owner feeds it elapsed time through [`InsetTransition::advance`], which is
//! how completions stay on the thread that drives the scroll surface.

use std::time::Duration;

use super::easing::{lerp_eased, Easing};

/// Result of advancing a transition by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionStep {
    /// Still animating; carries the interpolated value for this frame.
    Running(f32),
    /// Reached the end value on this frame.
    Finished(f32),
}

impl TransitionStep {
    /// The value to apply for this frame.
    pub fn value(self) -> f32 {
        match self {
            TransitionStep::Running(v) | TransitionStep::Finished(v) => v,
        }
    }

    /// Check whether this step completed the transition.
    pub fn is_finished(self) -> bool {
        matches!(self, TransitionStep::Finished(_))
    }
}

/// A single scalar animation between two values.
#[derive(Debug, Clone)]
pub struct InsetTransition {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl InsetTransition {
    /// Create a transition from `from` to `to`.
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Linear progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    /// Advance by `dt` and return the value for this frame.
    ///
    /// Once finished, further calls keep returning `Finished(to)`.
    pub fn advance(&mut self, dt: Duration) -> TransitionStep {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);

        if self.elapsed >= self.duration {
            TransitionStep::Finished(self.to)
        } else {
            TransitionStep::Running(lerp_eased(self.easing, self.from, self.to, self.progress()))
        }
    }
}
