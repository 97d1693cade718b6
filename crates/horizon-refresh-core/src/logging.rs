//! Logging facilities for Horizon Refresh.
//!
//! Horizon Refresh uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_refresh=debug")
//!     .init();
//! ```
//!
//! State transitions are logged at `debug`; suppressed operations (guards,
//! reentry, a host surface that has gone away) at `trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_refresh_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_refresh_core::signal";
    /// Host scroll surface target.
    pub const SURFACE: &str = "horizon_refresh::surface";
    /// Refresh controller target.
    pub const REFRESH: &str = "horizon_refresh::refresh";
    /// Inset animation target.
    pub const ANIMATION: &str = "horizon_refresh::animation";
}

/// A guard for timing a block of work.
///
/// The span is entered on creation and exited when the guard is dropped.
///
/// ```
/// use horizon_refresh_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("advance_frame");
///     // ... work ...
/// }
/// ```
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "horizon_refresh::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
