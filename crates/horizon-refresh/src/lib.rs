//! Horizon Refresh - pull-to-refresh and load-more for scrollable surfaces.
//!
//! The crate is toolkit-agnostic: the embedding toolkit reports scroll
//! geometry and drag gestures to a [`ScrollSurface`] and ticks its animation
//! clock, and [`RefreshController`](refresh::RefreshController)s installed on
//! the surface react by growing and shrinking the surface's insets.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use horizon_refresh::refresh::{RefreshController, RefreshPresenter, RefreshState};
//! use horizon_refresh::{Point, ScrollSurface, Size};
//!
//! struct Spinner;
//!
//! impl RefreshPresenter for Spinner {
//!     fn on_state_changed(&self, state: RefreshState) {
//!         println!("footer {state}");
//!     }
//!     fn on_progress_changed(&self, _progress: f32) {}
//! }
//!
//! let surface = Arc::new(
//!     ScrollSurface::new(Size::new(320.0, 800.0)).with_content_size(Size::new(320.0, 1000.0)),
//! );
//! let footer = RefreshController::footer(|| println!("loading next page"))
//!     .presenter(Arc::new(Spinner))
//!     .build()
//!     .unwrap();
//! surface.set_footer(footer.clone()).unwrap();
//!
//! surface.drag_to(Point::new(0.0, 250.0));
//! surface.end_drag();
//! surface.advance(Duration::from_millis(300));
//! assert_eq!(surface.content_inset().bottom, 44.0);
//! ```

pub mod animation;
pub mod geometry;
pub mod refresh;
pub mod surface;

pub use geometry::{Axis, Insets, Point, Rect, Size};
pub use surface::ScrollSurface;

