//! Orientation and state types for refresh controllers.

use std::fmt;

use crate::geometry::Axis;

/// Which edge of the scroll surface a refresh controller sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Above the content; pulling down refreshes.
    Top,
    /// Left of the content; pulling right refreshes.
    Left,
    /// Below the content; pulling up loads more.
    Bottom,
    /// Right of the content; pulling left loads more.
    Right,
}

impl Orientation {
    /// Footers sit after the content end and load more data.
    #[inline]
    pub fn is_footer(self) -> bool {
        matches!(self, Orientation::Bottom | Orientation::Right)
    }

    /// Headers sit before the content start and refresh it.
    #[inline]
    pub fn is_header(self) -> bool {
        !self.is_footer()
    }

    /// The scroll axis this orientation reads.
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Orientation::Top | Orientation::Bottom => Axis::Vertical,
            Orientation::Left | Orientation::Right => Axis::Horizontal,
        }
    }
}

/// Visual state of a refresh controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefreshState {
    /// Resting; not pulled past the trigger point.
    #[default]
    Idle,
    /// Pulled past the trigger point; releasing starts a refresh.
    Pulling,
    /// A refresh or load is in progress.
    Refreshing,
    /// Footer only: nothing more to load until reset.
    NoMoreData,
}

impl fmt::Display for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RefreshState::Idle => "idle",
            RefreshState::Pulling => "pulling",
            RefreshState::Refreshing => "refreshing",
            RefreshState::NoMoreData => "no-more-data",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_roles() {
        assert!(Orientation::Top.is_header());
        assert!(Orientation::Left.is_header());
        assert!(Orientation::Bottom.is_footer());
        assert!(Orientation::Right.is_footer());
    }

    #[test]
    fn test_orientation_axis() {
        assert_eq!(Orientation::Top.axis(), Axis::Vertical);
        assert_eq!(Orientation::Bottom.axis(), Axis::Vertical);
        assert_eq!(Orientation::Left.axis(), Axis::Horizontal);
        assert_eq!(Orientation::Right.axis(), Axis::Horizontal);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(RefreshState::default(), RefreshState::Idle);
        assert_eq!(RefreshState::NoMoreData.to_string(), "no-more-data");
    }
}
