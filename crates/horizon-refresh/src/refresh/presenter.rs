//! The presentation capability injected into refresh controllers.

use super::state::RefreshState;

/// Renders a refresh indicator.
///
/// The controller never draws anything itself. Implementations decide what a
/// state or a pull progress looks like: a text hint, a spinner, an animated
/// image. Both methods are required; a presenter that ignores one of them
/// should say so with an empty body.
///
/// Callbacks arrive on the thread driving the scroll surface, after the
/// controller has released its internal lock, so a presenter may query the
/// controller it is attached to.
///
/// # Example
///
/// ```
/// use horizon_refresh::refresh::{RefreshPresenter, RefreshState};
///
/// struct LogPresenter;
///
/// impl RefreshPresenter for LogPresenter {
///     fn on_state_changed(&self, state: RefreshState) {
///         println!("indicator now {state}");
///     }
///
///     fn on_progress_changed(&self, progress: f32) {
///         println!("revealed {:.0}%", progress * 100.0);
///     }
/// }
/// ```
pub trait RefreshPresenter: Send + Sync {
    /// The controller moved to `state`.
    fn on_state_changed(&self, state: RefreshState);

    /// The pull progress changed. Not called while refreshing.
    fn on_progress_changed(&self, progress: f32);
}
