//! The host scroll surface.
//!
//! [`ScrollSurface`] is the scrollable container a refresh controller attaches
//! to. It records the geometry the embedding toolkit reports (offset, content
//! size, viewport size, insets, whether the user is dragging) and announces
//! every change through signals. Refresh controllers subscribe to those
//! signals instead of polling, and write back the insets and offsets their
//! animations produce.
//!
//! Offsets are stored verbatim, overscroll included: bounce physics belong to
//! the embedding toolkit, and a pull-to-refresh gesture is exactly an offset
//! outside `0..=max`.
//!
//! # Signals
//!
//! - `offset_changed(Point)`: the content offset moved
//! - `content_size_changed(Size)`: the content grew or shrank
//! - `viewport_size_changed(Size)`: the visible area was resized
//! - `inset_changed(Insets)`: the content insets changed
//! - `drag_started(())` / `drag_ended(())`: the user's drag gesture began or ended
//! - `frame_advanced(Duration)`: the animation clock ticked
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_refresh::{Point, ScrollSurface, Size};
//!
//! let surface = Arc::new(
//!     ScrollSurface::new(Size::new(320.0, 800.0)).with_content_size(Size::new(320.0, 1000.0)),
//! );
//!
//! surface.begin_drag();
//! surface.drag_to(Point::new(0.0, -30.0));
//! surface.end_drag();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use horizon_refresh_core::logging::targets;
use horizon_refresh_core::{PerfSpan, Property, Signal, ThreadAffinity};
use parking_lot::Mutex;

use crate::geometry::{Insets, Point, Size};
use crate::refresh::RefreshController;

/// A scrollable container observed by refresh controllers.
pub struct ScrollSurface {
    affinity: ThreadAffinity,

    content_offset: Property<Point>,
    content_size: Property<Size>,
    viewport_size: Property<Size>,
    content_inset: Property<Insets>,
    dragging: AtomicBool,

    /// Installed header controller.
    pub(crate) header: Mutex<Option<Arc<RefreshController>>>,
    /// Installed footer controller.
    pub(crate) footer: Mutex<Option<Arc<RefreshController>>>,

    /// Signal for content offset changes.
    pub offset_changed: Signal<Point>,
    /// Signal for content size changes.
    pub content_size_changed: Signal<Size>,
    /// Signal for viewport size changes.
    pub viewport_size_changed: Signal<Size>,
    /// Signal for content inset changes.
    pub inset_changed: Signal<Insets>,
    /// Signal emitted when a drag gesture begins.
    pub drag_started: Signal<()>,
    /// Signal emitted when a drag gesture ends.
    pub drag_ended: Signal<()>,
    /// Signal carrying the time elapsed since the previous animation frame.
    pub frame_advanced: Signal<Duration>,
}

impl ScrollSurface {
    /// Create a surface with the given viewport size and no content.
    pub fn new(viewport_size: Size) -> Self {
        Self {
            affinity: ThreadAffinity::current(),
            content_offset: Property::new(Point::ZERO),
            content_size: Property::new(Size::ZERO),
            viewport_size: Property::new(viewport_size),
            content_inset: Property::new(Insets::ZERO),
            dragging: AtomicBool::new(false),
            header: Mutex::new(None),
            footer: Mutex::new(None),
            offset_changed: Signal::new(),
            content_size_changed: Signal::new(),
            viewport_size_changed: Signal::new(),
            inset_changed: Signal::new(),
            drag_started: Signal::new(),
            drag_ended: Signal::new(),
            frame_advanced: Signal::new(),
        }
    }

    /// Set content size using builder pattern.
    pub fn with_content_size(self, size: Size) -> Self {
        self.content_size.set_silent(size);
        self
    }

    /// Set content inset using builder pattern.
    pub fn with_content_inset(self, inset: Insets) -> Self {
        self.content_inset.set_silent(inset);
        self
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Get the content offset.
    pub fn content_offset(&self) -> Point {
        self.content_offset.get()
    }

    /// Set the content offset.
    pub fn set_content_offset(&self, offset: Point) {
        self.affinity.debug_assert_same_thread();
        if self.content_offset.set(offset) {
            self.offset_changed.emit(offset);
        }
    }

    /// Get the content size.
    pub fn content_size(&self) -> Size {
        self.content_size.get()
    }

    /// Set the content size.
    pub fn set_content_size(&self, size: Size) {
        self.affinity.debug_assert_same_thread();
        if self.content_size.set(size) {
            tracing::trace!(target: targets::SURFACE, width = size.width, height = size.height, "content size changed");
            self.content_size_changed.emit(size);
        }
    }

    /// Get the viewport size.
    pub fn viewport_size(&self) -> Size {
        self.viewport_size.get()
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&self, size: Size) {
        self.affinity.debug_assert_same_thread();
        if self.viewport_size.set(size) {
            self.viewport_size_changed.emit(size);
        }
    }

    /// Get the content inset.
    pub fn content_inset(&self) -> Insets {
        self.content_inset.get()
    }

    /// Set the content inset.
    pub fn set_content_inset(&self, inset: Insets) {
        self.affinity.debug_assert_same_thread();
        if self.content_inset.set(inset) {
            self.inset_changed.emit(inset);
        }
    }

    // =========================================================================
    // Drag Gesture
    // =========================================================================

    /// Check if the user is currently dragging the content.
    pub fn is_dragging(&self) -> bool {
        self.dragging.load(Ordering::SeqCst)
    }

    /// Mark the start of a user drag.
    pub fn begin_drag(&self) {
        self.affinity.debug_assert_same_thread();
        if !self.dragging.swap(true, Ordering::SeqCst) {
            tracing::trace!(target: targets::SURFACE, "drag started");
            self.drag_started.emit(());
        }
    }

    /// Move the content to `offset` as part of a user drag.
    ///
    /// Starts a drag first if none is in progress.
    pub fn drag_to(&self, offset: Point) {
        self.begin_drag();
        self.set_content_offset(offset);
    }

    /// Mark the end of a user drag.
    pub fn end_drag(&self) {
        self.affinity.debug_assert_same_thread();
        if self.dragging.swap(false, Ordering::SeqCst) {
            tracing::trace!(target: targets::SURFACE, "drag ended");
            self.drag_ended.emit(());
        }
    }

    // =========================================================================
    // Animation Clock
    // =========================================================================

    /// Advance animations attached to this surface by `dt`.
    ///
    /// The embedding toolkit calls this once per frame. Animation completions
    /// run inside this call.
    pub fn advance(&self, dt: Duration) {
        self.affinity.debug_assert_same_thread();
        let _span = PerfSpan::new("surface_advance");
        self.frame_advanced.emit(dt);
    }
}

impl std::fmt::Debug for ScrollSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSurface")
            .field("content_offset", &self.content_offset())
            .field("content_size", &self.content_size())
            .field("viewport_size", &self.viewport_size())
            .field("content_inset", &self.content_inset())
            .field("dragging", &self.is_dragging())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(ScrollSurface: Send, Sync);
