//! Pull geometry.
//!
//! [`PullMetrics`] is a snapshot of the scroll surface projected onto one
//! axis. Every progress, threshold and trigger computation the controller
//! makes goes through it, so the formulas live in one place and can be
//! tested without a surface.
//!
//! Offsets follow the usual scroll convention: `0` shows the content start,
//! negative values overscroll before it, and
//! `content_extent - viewport_extent` shows the content end.

use crate::geometry::Axis;
use crate::surface::ScrollSurface;

/// Clamp to `0.0..=1.0`, mapping NaN to `0.0`.
#[inline]
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Scroll metrics along a single axis plus the indicator extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullMetrics {
    /// Scroll offset.
    pub offset: f32,
    /// Length of the content.
    pub content_extent: f32,
    /// Length of the visible viewport.
    pub viewport_extent: f32,
    /// Inset before content start.
    pub leading_inset: f32,
    /// Inset after content end.
    pub trailing_inset: f32,
    /// Fixed length of the indicator region.
    pub extent: f32,
}

impl PullMetrics {
    /// Read the current metrics of `surface` along `axis`.
    pub fn capture(surface: &ScrollSurface, axis: Axis, extent: f32) -> Self {
        let inset = surface.content_inset();
        Self {
            offset: surface.content_offset().along(axis),
            content_extent: surface.content_size().along(axis),
            viewport_extent: surface.viewport_size().along(axis),
            leading_inset: inset.leading(axis),
            trailing_inset: inset.trailing(axis),
            extent,
        }
    }

    /// How far a header has been revealed.
    pub fn header_progress(&self) -> f32 {
        clamp01(-(self.offset + self.leading_inset) / self.extent)
    }

    /// How far a footer has been revealed.
    pub fn footer_progress(&self) -> f32 {
        clamp01(
            (self.offset + self.viewport_extent - self.content_extent - self.trailing_inset)
                / self.extent,
        )
    }

    /// Progress for a header or footer.
    pub fn progress(&self, footer: bool) -> f32 {
        if footer {
            self.footer_progress()
        } else {
            self.header_progress()
        }
    }

    /// A header enters `Pulling` once the offset drops below this.
    pub fn header_pulling_threshold(&self) -> f32 {
        -self.leading_inset - self.extent
    }

    /// A footer enters `Pulling` once the offset rises above this.
    pub fn footer_pulling_threshold(&self) -> f32 {
        self.content_extent - self.viewport_extent + self.extent
    }

    /// Check whether the offset is past the pulling threshold.
    pub fn is_past_pulling_threshold(&self, footer: bool) -> bool {
        if footer {
            self.offset > self.footer_pulling_threshold()
        } else {
            self.offset < self.header_pulling_threshold()
        }
    }

    /// Check whether the offset is back on the resting side of the threshold.
    ///
    /// Sitting exactly on the threshold is neither past nor back, so the
    /// current state is kept.
    pub fn is_back_from_pulling_threshold(&self, footer: bool) -> bool {
        if footer {
            self.offset < self.footer_pulling_threshold()
        } else {
            self.offset > self.header_pulling_threshold()
        }
    }

    /// Offset at which a footer with auto-trigger `ratio` starts loading.
    pub fn auto_trigger_offset(&self, ratio: f32) -> f32 {
        (self.content_extent - self.viewport_extent - self.trailing_inset - self.extent) * ratio
    }

    /// Check whether a footer auto-trigger at `ratio` should fire.
    ///
    /// Ratios outside `0.0..1.0` disable the trigger.
    pub fn should_auto_trigger(&self, ratio: f32) -> bool {
        (0.0..1.0).contains(&ratio) && self.offset >= self.auto_trigger_offset(ratio)
    }

    /// True when the content is shorter than the viewport.
    ///
    /// Footers are hidden and inert in that case.
    pub fn content_is_short(&self) -> bool {
        self.content_extent < self.viewport_extent
    }
}
