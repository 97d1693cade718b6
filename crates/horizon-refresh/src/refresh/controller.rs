//! The refresh controller state machine.
//!
//! A [`RefreshController`] watches one edge of a [`ScrollSurface`]. While the
//! user drags, it turns the surface's offset into a pull progress and an
//! `Idle`/`Pulling` state. When the drag ends far enough out (or, for footers,
//! when the auto-trigger point is crossed) it grows the surface's inset on its
//! edge by its extent, keeping the indicator visible, and hands control to the
//! host through the completion callback. [`RefreshController::end_refreshing`]
//! shrinks the inset again.
//!
//! # Refresh cycle
//!
//! ```text
//!  Resting ──begin──▶ Revealing ──last frame──▶ Holding ──end──▶ Hiding ──last frame──▶ Resting
//!                      (inset grows)   callback fires            (inset shrinks)
//! ```
//!
//! `is_refreshing()` is true from `begin` until the hide animation's last
//! frame. Calls that do not fit the current phase are ignored, except that
//! `end_refreshing` during the reveal is remembered and applied once the
//! reveal (and its callback) has completed.
//!
//! # Locking
//!
//! The controller keeps its mutable state behind one mutex and never holds it
//! while touching the surface, the presenter, the completion callback, or its
//! own signals. Writing an inset or offset makes the surface emit, which
//! re-enters this controller; those re-entries see the updated phase and
//! return early.

use std::sync::{Arc, Weak};
use std::time::Duration;

use horizon_refresh_core::logging::targets;
use horizon_refresh_core::{ConnectionId, Property, Signal, ThreadAffinity};
use parking_lot::Mutex;

use super::config::{
    validate_auto_trigger_ratio, validate_extent, RefreshConfig, AUTO_TRIGGER_DISABLED,
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_EXTENT,
};
use super::error::{RefreshError, Result};
use super::metrics::PullMetrics;
use super::presenter::RefreshPresenter;
use super::state::{Orientation, RefreshState};
use crate::animation::{Easing, InsetTransition};
use crate::geometry::{Axis, Insets, Point, Rect, Size};
use crate::surface::ScrollSurface;

type Completion = Box<dyn Fn() + Send + Sync>;

/// Where a controller is within a refresh cycle.
#[derive(Debug)]
enum Phase {
    /// Not refreshing.
    Resting,
    /// Inset growing. `end_requested` holds the state to settle in if
    /// `end_refreshing` arrived before the reveal finished.
    Revealing {
        transition: InsetTransition,
        end_requested: Option<RefreshState>,
    },
    /// Inset grown, waiting for the host to end the refresh.
    Holding,
    /// Inset shrinking; `settle` is the state entered on the last frame.
    Hiding {
        transition: InsetTransition,
        settle: RefreshState,
    },
}

impl Phase {
    fn is_resting(&self) -> bool {
        matches!(self, Phase::Resting)
    }
}

/// Surface signal subscriptions held while attached.
#[derive(Debug, Default)]
struct Subscriptions {
    offset: Option<ConnectionId>,
    drag_ended: Option<ConnectionId>,
    frame: Option<ConnectionId>,
    content_size: Option<ConnectionId>,
}

#[derive(Debug)]
struct Inner {
    state: RefreshState,
    progress: f32,
    phase: Phase,
    /// Edge inset captured when the current refresh began.
    base_inset: f32,
    surface: Weak<ScrollSurface>,
    subscriptions: Subscriptions,
}

/// Pull-to-refresh / load-more behavior for one edge of a scroll surface.
///
/// Build one with [`RefreshController::builder`], then install it on a
/// surface with [`ScrollSurface::set_header`] or [`ScrollSurface::set_footer`]
/// (or call [`attach`](Self::attach) directly).
///
/// # Signals
///
/// - `state_changed(RefreshState)`: the state moved
/// - `progress_changed(f32)`: the pull progress moved (never while refreshing)
/// - `hidden_changed(bool)`: the indicator was shown or hidden
/// - `refresh_started(())`: the reveal finished and the completion callback ran
/// - `refresh_finished(())`: the hide animation finished
pub struct RefreshController {
    orientation: Orientation,
    extent: f32,
    animation_duration: Duration,
    easing: Easing,
    footer_auto_trigger_ratio: Property<f32>,
    affinity: ThreadAffinity,
    presenter: Arc<dyn RefreshPresenter>,
    completion: Completion,

    inner: Mutex<Inner>,
    hidden: Property<bool>,
    frame: Property<Rect>,

    /// Signal for state changes.
    pub state_changed: Signal<RefreshState>,
    /// Signal for pull progress changes.
    pub progress_changed: Signal<f32>,
    /// Signal for visibility changes.
    pub hidden_changed: Signal<bool>,
    /// Signal emitted after the completion callback of each refresh.
    pub refresh_started: Signal<()>,
    /// Signal emitted when a refresh has fully ended.
    pub refresh_finished: Signal<()>,
}

/// Builder for [`RefreshController`].
pub struct RefreshControllerBuilder {
    orientation: Orientation,
    extent: f32,
    animation_duration: Duration,
    easing: Easing,
    footer_auto_trigger_ratio: f32,
    presenter: Option<Arc<dyn RefreshPresenter>>,
    completion: Completion,
}

impl RefreshControllerBuilder {
    /// Use the extent, timing and trigger settings from `config`.
    pub fn config(mut self, config: &RefreshConfig) -> Self {
        self.extent = config.extent;
        self.animation_duration = config.animation_duration();
        self.easing = config.easing;
        self.footer_auto_trigger_ratio = config.footer_auto_trigger_ratio;
        self
    }

    /// Set the indicator extent.
    pub fn extent(mut self, extent: f32) -> Self {
        self.extent = extent;
        self
    }

    /// Set the inset animation duration.
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Set the inset animation easing.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the footer auto-trigger ratio.
    pub fn footer_auto_trigger_ratio(mut self, ratio: f32) -> Self {
        self.footer_auto_trigger_ratio = ratio;
        self
    }

    /// Set the presenter that renders the indicator.
    pub fn presenter(mut self, presenter: Arc<dyn RefreshPresenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// Validate the settings and build the controller.
    pub fn build(self) -> Result<Arc<RefreshController>> {
        validate_extent(self.extent)?;
        validate_auto_trigger_ratio(self.footer_auto_trigger_ratio)?;
        let presenter = self.presenter.ok_or(RefreshError::MissingPresenter)?;

        let controller = Arc::new(RefreshController {
            orientation: self.orientation,
            extent: self.extent,
            animation_duration: self.animation_duration,
            easing: self.easing,
            footer_auto_trigger_ratio: Property::new(self.footer_auto_trigger_ratio),
            affinity: ThreadAffinity::current(),
            presenter,
            completion: self.completion,
            inner: Mutex::new(Inner {
                state: RefreshState::Idle,
                progress: 0.0,
                phase: Phase::Resting,
                base_inset: 0.0,
                surface: Weak::new(),
                subscriptions: Subscriptions::default(),
            }),
            hidden: Property::new(true),
            frame: Property::new(Rect::ZERO),
            state_changed: Signal::new(),
            progress_changed: Signal::new(),
            hidden_changed: Signal::new(),
            refresh_started: Signal::new(),
            refresh_finished: Signal::new(),
        });

        controller.presenter.on_progress_changed(0.0);
        Ok(controller)
    }
}

impl RefreshController {
    /// Start building a controller for `orientation`.
    ///
    /// `on_refresh` runs once per refresh cycle, after the inset has grown;
    /// the host typically starts loading there and later calls
    /// [`end_refreshing`](Self::end_refreshing).
    pub fn builder<F>(orientation: Orientation, extent: f32, on_refresh: F) -> RefreshControllerBuilder
    where
        F: Fn() + Send + Sync + 'static,
    {
        RefreshControllerBuilder {
            orientation,
            extent,
            animation_duration: Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS),
            easing: Easing::default(),
            footer_auto_trigger_ratio: AUTO_TRIGGER_DISABLED,
            presenter: None,
            completion: Box::new(on_refresh),
        }
    }

    /// Start building a header controller with the default extent.
    pub fn header<F>(on_refresh: F) -> RefreshControllerBuilder
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::builder(Orientation::Top, DEFAULT_EXTENT, on_refresh)
    }

    /// Start building a footer controller with the default extent.
    pub fn footer<F>(on_refresh: F) -> RefreshControllerBuilder
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::builder(Orientation::Bottom, DEFAULT_EXTENT, on_refresh)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The edge this controller sits on.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// True for bottom/right controllers.
    pub fn is_footer(&self) -> bool {
        self.orientation.is_footer()
    }

    /// The scroll axis this controller reads.
    pub fn axis(&self) -> Axis {
        self.orientation.axis()
    }

    /// Length of the indicator region along the axis.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Duration of inset animations.
    pub fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    /// Current state.
    pub fn state(&self) -> RefreshState {
        self.inner.lock().state
    }

    /// Current pull progress in `0.0..=1.0`.
    pub fn pull_progress(&self) -> f32 {
        self.inner.lock().progress
    }

    /// True from `begin_refreshing` until the hide animation has finished.
    pub fn is_refreshing(&self) -> bool {
        !self.inner.lock().phase.is_resting()
    }

    /// True while attached to a live surface.
    pub fn is_attached(&self) -> bool {
        self.surface().is_some()
    }

    /// Whether the indicator is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    /// Where the indicator sits, in content coordinates.
    pub fn frame(&self) -> Rect {
        self.frame.get()
    }

    /// Footer auto-trigger ratio; `1.0` means disabled.
    pub fn footer_auto_trigger_ratio(&self) -> f32 {
        self.footer_auto_trigger_ratio.get()
    }

    /// Change the footer auto-trigger ratio.
    pub fn set_footer_auto_trigger_ratio(&self, ratio: f32) -> Result<()> {
        validate_auto_trigger_ratio(ratio)?;
        self.footer_auto_trigger_ratio.set(ratio);
        Ok(())
    }

    fn surface(&self) -> Option<Arc<ScrollSurface>> {
        self.inner.lock().surface.upgrade()
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    /// Start observing `surface` and place the indicator next to its content.
    ///
    /// Any previous attachment is dropped first.
    pub fn attach(self: &Arc<Self>, surface: &Arc<ScrollSurface>) {
        self.affinity.debug_assert_same_thread();
        self.detach();

        let weak = Arc::downgrade(self);
        let offset = surface.offset_changed.connect(move |&offset| {
            if let Some(controller) = weak.upgrade() {
                controller.handle_offset_changed(offset);
            }
        });

        let weak = Arc::downgrade(self);
        let drag_ended = surface.drag_ended.connect(move |_| {
            if let Some(controller) = weak.upgrade() {
                controller.handle_drag_ended();
            }
        });

        let weak = Arc::downgrade(self);
        let frame = surface.frame_advanced.connect(move |&dt| {
            if let Some(controller) = weak.upgrade() {
                controller.handle_frame(dt);
            }
        });

        let content_size = self.is_footer().then(|| {
            let weak = Arc::downgrade(self);
            surface.content_size_changed.connect(move |&size| {
                if let Some(controller) = weak.upgrade() {
                    controller.handle_content_size_changed(size);
                }
            })
        });

        {
            let mut inner = self.inner.lock();
            inner.surface = Arc::downgrade(surface);
            inner.subscriptions = Subscriptions {
                offset: Some(offset),
                drag_ended: Some(drag_ended),
                frame: Some(frame),
                content_size,
            };
        }

        self.frame.set(self.placement(surface));
        tracing::debug!(
            target: targets::REFRESH,
            orientation = ?self.orientation,
            frame = ?self.frame(),
            "refresh controller attached"
        );
    }

    /// Stop observing the surface.
    ///
    /// A refresh in progress is abandoned: the edge inset returns to its
    /// pre-refresh value immediately and no further callbacks fire. Safe to
    /// call any number of times.
    pub fn detach(&self) {
        let (surface, subscriptions, abandoned) = {
            let mut inner = self.inner.lock();
            let surface = std::mem::take(&mut inner.surface).upgrade();
            let subscriptions = std::mem::take(&mut inner.subscriptions);
            let abandoned = if inner.phase.is_resting() {
                None
            } else {
                inner.phase = Phase::Resting;
                inner.progress = 0.0;
                Some(inner.base_inset)
            };
            (surface, subscriptions, abandoned)
        };

        let Some(surface) = surface else {
            return;
        };

        if let Some(id) = subscriptions.offset {
            surface.offset_changed.disconnect(id);
        }
        if let Some(id) = subscriptions.drag_ended {
            surface.drag_ended.disconnect(id);
        }
        if let Some(id) = subscriptions.frame {
            surface.frame_advanced.disconnect(id);
        }
        if let Some(id) = subscriptions.content_size {
            surface.content_size_changed.disconnect(id);
        }

        if let Some(base) = abandoned {
            tracing::debug!(target: targets::REFRESH, "detached mid-refresh, restoring inset");
            self.apply_edge_inset(&surface, base);
            if self.is_footer() {
                self.set_hidden(true);
            }
            if self.state() == RefreshState::Refreshing {
                self.transition_to(RefreshState::Idle);
            }
        }

        tracing::debug!(target: targets::REFRESH, orientation = ?self.orientation, "refresh controller detached");
    }

    /// Initial frame: just before content start for headers, just after
    /// content end for footers, spanning the viewport on the cross axis.
    fn placement(&self, surface: &ScrollSurface) -> Rect {
        let axis = self.axis();
        let cross_length = surface.viewport_size().along(axis.cross());
        let start = if self.is_footer() {
            surface.content_size().along(axis)
        } else {
            -self.extent
        };
        Rect::from_spans(axis, start, self.extent, 0.0, cross_length)
    }

    // =========================================================================
    // Refresh Cycle
    // =========================================================================

    /// Start a refresh.
    ///
    /// Ignored while already refreshing, while a footer's content is shorter
    /// than the viewport, while a footer is in `NoMoreData`, or when detached.
    pub fn begin_refreshing(&self) {
        self.affinity.debug_assert_same_thread();
        let Some(surface) = self.surface() else {
            tracing::trace!(target: targets::REFRESH, "begin_refreshing without a surface");
            return;
        };
        if !self.check_content_extent(&surface) {
            tracing::trace!(target: targets::REFRESH, "begin_refreshing suppressed: content shorter than viewport");
            return;
        }

        let axis = self.axis();
        let base = {
            let mut inner = self.inner.lock();
            if !inner.phase.is_resting() {
                tracing::trace!(target: targets::REFRESH, "begin_refreshing ignored: already refreshing");
                return;
            }
            if self.is_footer() && inner.state == RefreshState::NoMoreData {
                tracing::trace!(target: targets::REFRESH, "begin_refreshing ignored: no more data");
                return;
            }
            let base = self.edge_inset(surface.content_inset());
            inner.base_inset = base;
            inner.progress = 1.0;
            inner.phase = Phase::Revealing {
                transition: InsetTransition::new(
                    base,
                    base + self.extent,
                    self.animation_duration,
                    self.easing,
                ),
                end_requested: None,
            };
            base
        };

        tracing::debug!(target: targets::REFRESH, orientation = ?self.orientation, "refresh began");
        self.set_hidden(false);
        self.transition_to(RefreshState::Refreshing);

        if self.orientation.is_header() {
            // Show the indicator now rather than after the inset has grown.
            let offset = surface.content_offset();
            surface.set_content_offset(offset.with_along(axis, -(base + self.extent)));
        }
    }

    /// End the current refresh and shrink the inset back.
    pub fn end_refreshing(&self) {
        self.request_end(RefreshState::Idle);
    }

    /// End the current load and enter `NoMoreData`.
    ///
    /// Footer only; on a header this is the same as
    /// [`end_refreshing`](Self::end_refreshing). When no load is in progress
    /// the footer enters `NoMoreData` directly.
    pub fn end_refreshing_with_no_more_data(&self) {
        if !self.is_footer() {
            self.end_refreshing();
            return;
        }
        if !self.is_refreshing() {
            self.transition_to(RefreshState::NoMoreData);
            return;
        }
        self.request_end(RefreshState::NoMoreData);
    }

    /// Leave `NoMoreData` so the footer can load again.
    pub fn reset_no_more_data(&self) {
        if self.state() == RefreshState::NoMoreData {
            self.transition_to(RefreshState::Idle);
        }
    }

    fn request_end(&self, settle: RefreshState) {
        self.affinity.debug_assert_same_thread();
        {
            let mut inner = self.inner.lock();
            match &mut inner.phase {
                Phase::Resting => {
                    tracing::debug!(target: targets::REFRESH, "end_refreshing without an active refresh");
                    return;
                }
                Phase::Revealing { end_requested, .. } => {
                    tracing::trace!(target: targets::REFRESH, "end_refreshing deferred until reveal completes");
                    *end_requested = Some(settle);
                    return;
                }
                Phase::Hiding { .. } => {
                    tracing::trace!(target: targets::REFRESH, "end_refreshing ignored: already ending");
                    return;
                }
                Phase::Holding => {}
            }
        }
        self.start_hiding(settle);
    }

    fn start_hiding(&self, settle: RefreshState) {
        let Some(surface) = self.surface() else {
            return;
        };
        let current = self.edge_inset(surface.content_inset());
        {
            let mut inner = self.inner.lock();
            if !matches!(inner.phase, Phase::Holding) {
                return;
            }
            inner.phase = Phase::Hiding {
                transition: InsetTransition::new(
                    current,
                    inner.base_inset,
                    self.animation_duration,
                    self.easing,
                ),
                settle,
            };
        }
        tracing::debug!(target: targets::REFRESH, orientation = ?self.orientation, "refresh ending");
    }

    /// Move to `state` and tell the presenter.
    ///
    /// Only actual changes are forwarded. Every caller is one of the
    /// controller's own transitions, so `state` always agrees with the phase.
    fn transition_to(&self, state: RefreshState) {
        let previous = {
            let mut inner = self.inner.lock();
            if inner.state == state {
                return;
            }
            std::mem::replace(&mut inner.state, state)
        };
        tracing::debug!(target: targets::REFRESH, from = %previous, to = %state, "refresh state changed");
        self.presenter.on_state_changed(state);
        self.state_changed.emit(state);
    }

    fn update_progress(&self, progress: f32) {
        {
            let mut inner = self.inner.lock();
            if !inner.phase.is_resting() || inner.progress == progress {
                return;
            }
            inner.progress = progress;
        }
        self.presenter.on_progress_changed(progress);
        self.progress_changed.emit(progress);
    }

    fn set_hidden(&self, hidden: bool) {
        if self.hidden.set(hidden) {
            self.hidden_changed.emit(hidden);
        }
    }

    // =========================================================================
    // Surface Reactions
    // =========================================================================

    fn handle_offset_changed(&self, _offset: Point) {
        let Some(surface) = self.surface() else {
            return;
        };
        if !surface.is_dragging() || self.is_refreshing() {
            return;
        }
        if !self.check_content_extent(&surface) {
            return;
        }

        let footer = self.is_footer();
        let metrics = PullMetrics::capture(&surface, self.axis(), self.extent);
        self.update_progress(metrics.progress(footer));

        match self.state() {
            RefreshState::Idle if metrics.is_past_pulling_threshold(footer) => {
                self.transition_to(RefreshState::Pulling);
            }
            RefreshState::Pulling if metrics.is_back_from_pulling_threshold(footer) => {
                self.transition_to(RefreshState::Idle);
            }
            _ => {}
        }

        self.set_hidden(false);

        if footer
            && self.state() != RefreshState::NoMoreData
            && metrics.should_auto_trigger(self.footer_auto_trigger_ratio())
        {
            tracing::debug!(target: targets::REFRESH, offset = metrics.offset, "footer auto-trigger reached");
            self.begin_refreshing();
        }
    }

    fn handle_content_size_changed(&self, size: Size) {
        let Some(surface) = self.surface() else {
            return;
        };
        if !self.check_content_extent(&surface) {
            return;
        }
        let axis = self.axis();
        let content_end = size.along(axis);
        let frame = self.frame();
        if frame.origin.along(axis) == content_end {
            return;
        }
        self.frame.set(Rect {
            origin: frame.origin.with_along(axis, content_end),
            ..frame
        });
    }

    fn handle_drag_ended(&self) {
        let ready = {
            let inner = self.inner.lock();
            inner.phase.is_resting() && inner.progress >= 1.0
        };
        if ready {
            self.begin_refreshing();
        }
    }

    fn handle_frame(&self, dt: Duration) {
        let step = {
            let mut inner = self.inner.lock();
            match &mut inner.phase {
                Phase::Revealing { transition, .. } | Phase::Hiding { transition, .. } => {
                    transition.advance(dt)
                }
                Phase::Resting | Phase::Holding => return,
            }
        };

        let Some(surface) = self.surface() else {
            return;
        };
        tracing::trace!(target: targets::ANIMATION, value = step.value(), finished = step.is_finished(), "inset frame");
        self.apply_edge_inset(&surface, step.value());

        if step.is_finished() {
            self.complete_animation();
        }
    }

    fn complete_animation(&self) {
        let finished = {
            let mut inner = self.inner.lock();
            match std::mem::replace(&mut inner.phase, Phase::Resting) {
                Phase::Revealing { end_requested, .. } => {
                    inner.phase = Phase::Holding;
                    Finished::Revealed { end_requested }
                }
                Phase::Hiding { settle, .. } => {
                    inner.progress = 0.0;
                    Finished::Hidden { settle }
                }
                other => {
                    inner.phase = other;
                    return;
                }
            }
        };

        match finished {
            Finished::Revealed { end_requested } => {
                tracing::debug!(target: targets::REFRESH, orientation = ?self.orientation, "refresh revealed");
                (self.completion)();
                self.refresh_started.emit(());
                if let Some(settle) = end_requested {
                    self.start_hiding(settle);
                }
            }
            Finished::Hidden { settle } => {
                self.presenter.on_progress_changed(0.0);
                self.progress_changed.emit(0.0);
                if self.is_footer() {
                    self.set_hidden(true);
                }
                self.transition_to(settle);
                tracing::debug!(target: targets::REFRESH, orientation = ?self.orientation, "refresh ended");
                self.refresh_finished.emit(());
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Footer guard: hides the footer and returns `false` when the content is
    /// shorter than the viewport. Headers always pass.
    fn check_content_extent(&self, surface: &ScrollSurface) -> bool {
        if !self.is_footer() {
            return true;
        }
        let metrics = PullMetrics::capture(surface, self.axis(), self.extent);
        if metrics.content_is_short() {
            self.set_hidden(true);
            false
        } else {
            true
        }
    }

    /// The inset on this controller's edge.
    fn edge_inset(&self, inset: Insets) -> f32 {
        if self.is_footer() {
            inset.trailing(self.axis())
        } else {
            inset.leading(self.axis())
        }
    }

    fn apply_edge_inset(&self, surface: &ScrollSurface, value: f32) {
        let inset = surface.content_inset();
        let updated = if self.is_footer() {
            inset.with_trailing(self.axis(), value)
        } else {
            inset.with_leading(self.axis(), value)
        };
        surface.set_content_inset(updated);
    }
}

enum Finished {
    Revealed { end_requested: Option<RefreshState> },
    Hidden { settle: RefreshState },
}

impl Drop for RefreshController {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for RefreshController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("RefreshController")
            .field("orientation", &self.orientation)
            .field("extent", &self.extent)
            .field("state", &inner.state)
            .field("progress", &inner.progress)
            .field("phase", &inner.phase)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(RefreshController: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Recorder {
        states: Mutex<Vec<RefreshState>>,
        progress: Mutex<Vec<f32>>,
    }

    impl RefreshPresenter for Recorder {
        fn on_state_changed(&self, state: RefreshState) {
            self.states.lock().push(state);
        }

        fn on_progress_changed(&self, progress: f32) {
            self.progress.lock().push(progress);
        }
    }

    const FRAME: Duration = Duration::from_millis(100);

    fn vertical_surface(content: f32) -> Arc<ScrollSurface> {
        Arc::new(
            ScrollSurface::new(Size::new(320.0, 800.0)).with_content_size(Size::new(320.0, content)),
        )
    }

    fn build(
        orientation: Orientation,
        presenter: Arc<Recorder>,
    ) -> (Arc<RefreshController>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let controller = RefreshController::builder(orientation, 44.0, move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        })
        .easing(Easing::Linear)
        .presenter(presenter)
        .build()
        .unwrap();
        (controller, calls)
    }

    fn run_animation(surface: &ScrollSurface) {
        for _ in 0..3 {
            surface.advance(FRAME);
        }
    }

    #[test]
    fn test_builder_validation() {
        let missing = RefreshController::header(|| {}).build();
        assert!(matches!(missing, Err(RefreshError::MissingPresenter)));

        let bad_extent = RefreshController::builder(Orientation::Top, -4.0, || {})
            .presenter(Arc::new(Recorder::default()))
            .build();
        assert!(matches!(bad_extent, Err(RefreshError::InvalidExtent(_))));

        let bad_ratio = RefreshController::footer(|| {})
            .footer_auto_trigger_ratio(2.0)
            .presenter(Arc::new(Recorder::default()))
            .build();
        assert!(matches!(bad_ratio, Err(RefreshError::InvalidAutoTriggerRatio(_))));
    }

    #[test]
    fn test_builder_applies_config() {
        let config = RefreshConfig {
            extent: 60.0,
            animation_duration_ms: 120,
            easing: Easing::Linear,
            footer_auto_trigger_ratio: 0.25,
        };
        let controller = RefreshController::footer(|| {})
            .config(&config)
            .presenter(Arc::new(Recorder::default()))
            .build()
            .unwrap();
        assert_eq!(controller.extent(), 60.0);
        assert_eq!(controller.animation_duration(), Duration::from_millis(120));
        assert_eq!(controller.footer_auto_trigger_ratio(), 0.25);
        assert!(controller.set_footer_auto_trigger_ratio(-1.0).is_err());
        assert_eq!(controller.footer_auto_trigger_ratio(), 0.25);
    }

    #[test]
    fn test_initial_state() {
        let presenter = Arc::new(Recorder::default());
        let (controller, _) = build(Orientation::Top, presenter.clone());
        assert_eq!(controller.state(), RefreshState::Idle);
        assert_eq!(controller.pull_progress(), 0.0);
        assert!(controller.is_hidden());
        assert!(!controller.is_refreshing());
        assert!(!controller.is_attached());
        assert_eq!(*presenter.progress.lock(), vec![0.0]);
    }

    #[test]
    fn test_attach_places_frames() {
        let surface = vertical_surface(1000.0);
        let (header, _) = build(Orientation::Top, Arc::new(Recorder::default()));
        let (footer, _) = build(Orientation::Bottom, Arc::new(Recorder::default()));
        header.attach(&surface);
        footer.attach(&surface);

        assert_eq!(header.frame(), Rect::new(0.0, -44.0, 320.0, 44.0));
        assert_eq!(footer.frame(), Rect::new(0.0, 1000.0, 320.0, 44.0));

        let wide = Arc::new(
            ScrollSurface::new(Size::new(480.0, 320.0)).with_content_size(Size::new(1500.0, 320.0)),
        );
        let (left, _) = build(Orientation::Left, Arc::new(Recorder::default()));
        let (right, _) = build(Orientation::Right, Arc::new(Recorder::default()));
        left.attach(&wide);
        right.attach(&wide);
        assert_eq!(left.frame(), Rect::new(-44.0, 0.0, 44.0, 320.0));
        assert_eq!(right.frame(), Rect::new(1500.0, 0.0, 44.0, 320.0));
    }

    #[test]
    fn test_header_pull_and_release() {
        let surface = vertical_surface(1000.0);
        let presenter = Arc::new(Recorder::default());
        let (controller, calls) = build(Orientation::Top, presenter.clone());
        controller.attach(&surface);

        surface.drag_to(Point::new(0.0, -22.0));
        assert_eq!(controller.pull_progress(), 0.5);
        assert_eq!(controller.state(), RefreshState::Idle);
        assert!(!controller.is_hidden());

        surface.drag_to(Point::new(0.0, -50.0));
        assert_eq!(controller.pull_progress(), 1.0);
        assert_eq!(controller.state(), RefreshState::Pulling);

        surface.end_drag();
        assert!(controller.is_refreshing());
        assert_eq!(controller.state(), RefreshState::Refreshing);
        assert_eq!(surface.content_offset().y, -44.0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        run_animation(&surface);
        assert_eq!(surface.content_inset().top, 44.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Further frames do nothing.
        run_animation(&surface);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        controller.end_refreshing();
        run_animation(&surface);
        assert_eq!(surface.content_inset().top, 0.0);
        assert!(!controller.is_refreshing());
        assert_eq!(controller.state(), RefreshState::Idle);
        assert_eq!(controller.pull_progress(), 0.0);

        assert_eq!(
            *presenter.states.lock(),
            vec![RefreshState::Pulling, RefreshState::Refreshing, RefreshState::Idle]
        );
        assert_eq!(presenter.progress.lock().last(), Some(&0.0));
    }

    #[test]
    fn test_pulling_returns_to_idle() {
        let surface = vertical_surface(1000.0);
        let (controller, calls) = build(Orientation::Top, Arc::new(Recorder::default()));
        controller.attach(&surface);

        surface.drag_to(Point::new(0.0, -60.0));
        assert_eq!(controller.state(), RefreshState::Pulling);
        surface.drag_to(Point::new(0.0, -20.0));
        assert_eq!(controller.state(), RefreshState::Idle);

        surface.end_drag();
        assert!(!controller.is_refreshing());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_programmatic_scroll_is_ignored() {
        let surface = vertical_surface(1000.0);
        let (controller, _) = build(Orientation::Top, Arc::new(Recorder::default()));
        controller.attach(&surface);

        surface.set_content_offset(Point::new(0.0, -80.0));
        assert_eq!(controller.pull_progress(), 0.0);
        assert_eq!(controller.state(), RefreshState::Idle);
        assert!(controller.is_hidden());
    }

    #[test]
    fn test_progress_frozen_while_refreshing() {
        let surface = vertical_surface(1000.0);
        let presenter = Arc::new(Recorder::default());
        let (controller, _) = build(Orientation::Top, presenter.clone());
        controller.attach(&surface);

        controller.begin_refreshing();
        let reported = presenter.progress.lock().len();
        surface.drag_to(Point::new(0.0, -10.0));
        surface.drag_to(Point::new(0.0, -90.0));
        assert_eq!(controller.pull_progress(), 1.0);
        assert_eq!(presenter.progress.lock().len(), reported);
    }

    #[test]
    fn test_begin_twice_applies_inset_once() {
        let surface = vertical_surface(1000.0);
        let (controller, calls) = build(Orientation::Top, Arc::new(Recorder::default()));
        controller.attach(&surface);

        controller.begin_refreshing();
        controller.begin_refreshing();
        run_animation(&surface);
        controller.begin_refreshing();
        run_animation(&surface);

        assert_eq!(surface.content_inset().top, 44.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_end_during_reveal_is_deferred() {
        let surface = vertical_surface(1000.0);
        let (controller, calls) = build(Orientation::Top, Arc::new(Recorder::default()));
        controller.attach(&surface);

        controller.begin_refreshing();
        surface.advance(FRAME);
        controller.end_refreshing();
        assert!(controller.is_refreshing());

        surface.advance(FRAME);
        surface.advance(FRAME);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(surface.content_inset().top, 44.0);

        run_animation(&surface);
        assert_eq!(surface.content_inset().top, 0.0);
        assert_eq!(controller.state(), RefreshState::Idle);
        assert!(!controller.is_refreshing());
    }

    #[test]
    fn test_end_without_begin_is_noop() {
        let surface = Arc::new(
            ScrollSurface::new(Size::new(320.0, 800.0))
                .with_content_size(Size::new(320.0, 1000.0))
                .with_content_inset(Insets::new(12.0, 0.0, 0.0, 0.0)),
        );
        let (controller, _) = build(Orientation::Top, Arc::new(Recorder::default()));
        controller.attach(&surface);

        controller.end_refreshing();
        run_animation(&surface);
        assert_eq!(surface.content_inset().top, 12.0);
        assert_eq!(controller.state(), RefreshState::Idle);
    }

    #[test]
    fn test_operations_without_surface_are_noops() {
        let presenter = Arc::new(Recorder::default());
        let (controller, calls) = build(Orientation::Top, presenter.clone());

        controller.begin_refreshing();
        controller.end_refreshing();
        controller.detach();
        assert!(!controller.is_refreshing());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(presenter.states.lock().is_empty());
    }

    #[test]
    fn test_surface_dropped() {
        let surface = vertical_surface(1000.0);
        let (controller, calls) = build(Orientation::Top, Arc::new(Recorder::default()));
        controller.attach(&surface);
        drop(surface);

        assert!(!controller.is_attached());
        controller.begin_refreshing();
        controller.detach();
        controller.detach();
        assert!(!controller.is_refreshing());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let surface = vertical_surface(1000.0);
        let (controller, _) = build(Orientation::Bottom, Arc::new(Recorder::default()));
        controller.attach(&surface);
        assert_eq!(surface.offset_changed.connection_count(), 1);
        assert_eq!(surface.content_size_changed.connection_count(), 1);

        controller.detach();
        controller.detach();

        assert_eq!(surface.offset_changed.connection_count(), 0);
        assert_eq!(surface.drag_ended.connection_count(), 0);
        assert_eq!(surface.frame_advanced.connection_count(), 0);
        assert_eq!(surface.content_size_changed.connection_count(), 0);
        assert!(!controller.is_attached());
    }

    #[test]
    fn test_reattach_does_not_duplicate_subscriptions() {
        let surface = vertical_surface(1000.0);
        let (controller, _) = build(Orientation::Top, Arc::new(Recorder::default()));
        controller.attach(&surface);
        controller.attach(&surface);
        assert_eq!(surface.offset_changed.connection_count(), 1);
        assert_eq!(surface.content_size_changed.connection_count(), 0);
    }

    #[test]
    fn test_detach_mid_refresh_restores_inset() {
        let surface = vertical_surface(1000.0);
        let (controller, calls) = build(Orientation::Top, Arc::new(Recorder::default()));
        controller.attach(&surface);

        controller.begin_refreshing();
        surface.advance(FRAME);
        assert!(surface.content_inset().top > 0.0);

        controller.detach();
        assert_eq!(surface.content_inset().top, 0.0);
        assert!(!controller.is_refreshing());
        assert_eq!(controller.state(), RefreshState::Idle);
        run_animation(&surface);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dropping_controller_disconnects() {
        let surface = vertical_surface(1000.0);
        let (controller, _) = build(Orientation::Top, Arc::new(Recorder::default()));
        controller.attach(&surface);
        drop(controller);
        assert_eq!(surface.offset_changed.connection_count(), 0);
    }

    #[test]
    fn test_transition_reports_changes_only() {
        let presenter = Arc::new(Recorder::default());
        let (controller, _) = build(Orientation::Top, presenter.clone());
        let emitted = Arc::new(AtomicUsize::new(0));
        let emitted_clone = emitted.clone();
        controller.state_changed.connect(move |_| {
            emitted_clone.fetch_add(1, Ordering::SeqCst);
        });

        controller.transition_to(RefreshState::Idle);
        controller.transition_to(RefreshState::Pulling);
        controller.transition_to(RefreshState::Pulling);

        assert_eq!(*presenter.states.lock(), vec![RefreshState::Pulling]);
        assert_eq!(emitted.load(Ordering::SeqCst), 1);
    }
}
