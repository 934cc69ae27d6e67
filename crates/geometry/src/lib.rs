//! Geometric primitives shared by every layout crate.
//!
//! Everything here is plain data: sizes, points, edge rectangles, start/end lines
//! and the per-axis available space a box is laid out into. Arithmetic over
//! optional values lives in [`MaybeMath`].

mod available_space;
mod maybe_math;
mod rect;
mod size;

pub use available_space::AvailableSpace;
pub use maybe_math::MaybeMath;
pub use rect::{Line, Rect};
pub use size::{Point, Size};

/// One of the two physical axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbsoluteAxis {
    /// The horizontal (x / width) axis.
    Horizontal,
    /// The vertical (y / height) axis.
    Vertical,
}

impl AbsoluteAxis {
    /// The axis perpendicular to this one.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// True for [`AbsoluteAxis::Horizontal`].
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}
