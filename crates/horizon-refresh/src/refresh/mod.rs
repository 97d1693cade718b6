//! Pull-to-refresh and load-more controllers.
//!
//! A [`RefreshController`] sits on one edge of a [`ScrollSurface`](crate::ScrollSurface):
//! top/left controllers are headers that refresh content, bottom/right
//! controllers are footers that load more. Rendering is delegated to a
//! [`RefreshPresenter`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use horizon_refresh::refresh::{RefreshController, RefreshPresenter, RefreshState};
//! use horizon_refresh::{Point, ScrollSurface, Size};
//!
//! struct Hint;
//!
//! impl RefreshPresenter for Hint {
//!     fn on_state_changed(&self, _state: RefreshState) {}
//!     fn on_progress_changed(&self, _progress: f32) {}
//! }
//!
//! let surface = Arc::new(
//!     ScrollSurface::new(Size::new(320.0, 800.0)).with_content_size(Size::new(320.0, 1000.0)),
//! );
//! let header = RefreshController::header(|| println!("reloading"))
//!     .presenter(Arc::new(Hint))
//!     .build()
//!     .unwrap();
//! surface.set_header(header.clone()).unwrap();
//!
//! surface.drag_to(Point::new(0.0, -60.0));
//! surface.end_drag();
//! assert_eq!(header.state(), RefreshState::Refreshing);
//!
//! surface.advance(Duration::from_millis(300));
//! header.end_refreshing();
//! surface.advance(Duration::from_millis(300));
//! assert_eq!(header.state(), RefreshState::Idle);
//! ```

mod config;
mod controller;
mod error;
mod metrics;
mod presenter;
mod slots;
mod state;

pub use config::{RefreshConfig, AUTO_TRIGGER_DISABLED, DEFAULT_ANIMATION_DURATION_MS, DEFAULT_EXTENT};
pub use controller::{RefreshController, RefreshControllerBuilder};
pub use error::{RefreshError, RefreshSlot, Result};
pub use metrics::{clamp01, PullMetrics};
pub use presenter::RefreshPresenter;
pub use state::{Orientation, RefreshState};
