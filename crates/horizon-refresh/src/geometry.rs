//! Geometry types shared by the scroll surface and refresh controllers.
//!
//! Pull-to-refresh math always happens along a single [`Axis`]: headers and
//! footers above or below the content read vertical metrics, those to the
//! left or right read horizontal ones. The `along`/`leading`/`trailing`
//! accessors let the controller write each formula once.

/// A scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    #[default]
    Vertical,
}

impl Axis {
    /// Get the cross (perpendicular) axis.
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// The coordinate along `axis`.
    #[inline]
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Return a copy with the coordinate along `axis` replaced.
    #[inline]
    pub fn with_along(self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => Self { x: value, ..self },
            Axis::Vertical => Self { y: value, ..self },
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The length along `axis`.
    #[inline]
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Zero rectangle.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Build a rectangle from its span along `axis` and along the cross axis.
    pub fn from_spans(axis: Axis, start: f32, length: f32, cross_start: f32, cross_length: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(start, cross_start, length, cross_length),
            Axis::Vertical => Self::new(cross_start, start, cross_length, length),
        }
    }
}

/// Content padding on each edge of a scroll surface.
///
/// The refresh controller grows the leading (header) or trailing (footer)
/// inset by its extent while refreshing, which keeps the indicator on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    /// Top inset.
    pub top: f32,
    /// Left inset.
    pub left: f32,
    /// Bottom inset.
    pub bottom: f32,
    /// Right inset.
    pub right: f32,
}

impl Insets {
    /// Create new insets.
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// No insets.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create uniform insets (same value on all sides).
    pub fn uniform(inset: f32) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// The inset before content start on `axis` (top or left).
    #[inline]
    pub fn leading(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// The inset after content end on `axis` (bottom or right).
    #[inline]
    pub fn trailing(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Return a copy with the leading inset on `axis` replaced.
    pub fn with_leading(self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => Self { left: value, ..self },
            Axis::Vertical => Self { top: value, ..self },
        }
    }

    /// Return a copy with the trailing inset on `axis` replaced.
    pub fn with_trailing(self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => Self { right: value, ..self },
            Axis::Vertical => Self { bottom: value, ..self },
        }
    }
}
