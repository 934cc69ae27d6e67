//! Four-edge values ([`Rect`]) and start/end pairs ([`Line`]).

use core::ops::Add;

use crate::{AbsoluteAxis, Size};

/// A value for each edge of a box: margins, paddings, borders, insets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<T> {
    /// Left edge.
    pub left: T,
    /// Right edge.
    pub right: T,
    /// Top edge.
    pub top: T,
    /// Bottom edge.
    pub bottom: T,
}

impl<T> Rect<T> {
    /// Apply `func` to every edge.
    #[inline]
    pub fn map<R, F: FnMut(T) -> R>(self, mut func: F) -> Rect<R> {
        Rect {
            left: func(self.left),
            right: func(self.right),
            top: func(self.top),
            bottom: func(self.bottom),
        }
    }

    /// Resolve each edge against the matching component of `size`:
    /// left/right against the width, top/bottom against the height.
    #[inline]
    pub fn zip_size<U: Copy, R, F: FnMut(T, U) -> R>(self, size: Size<U>, mut func: F) -> Rect<R> {
        Rect {
            left: func(self.left, size.width),
            right: func(self.right, size.width),
            top: func(self.top, size.height),
            bottom: func(self.bottom, size.height),
        }
    }

    /// The start and end edges along `axis`.
    #[inline]
    pub fn axis(self, axis: AbsoluteAxis) -> Line<T> {
        match axis {
            AbsoluteAxis::Horizontal => Line {
                start: self.left,
                end: self.right,
            },
            AbsoluteAxis::Vertical => Line {
                start: self.top,
                end: self.bottom,
            },
        }
    }
}

impl<T: Copy> Rect<T> {
    /// The start edge along `axis` (left or top).
    #[inline]
    pub const fn start(&self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.left,
            AbsoluteAxis::Vertical => self.top,
        }
    }

    /// The end edge along `axis` (right or bottom).
    #[inline]
    pub const fn end(&self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.right,
            AbsoluteAxis::Vertical => self.bottom,
        }
    }

    /// Overwrite the start edge along `axis`.
    #[inline]
    pub fn set_start(&mut self, axis: AbsoluteAxis, value: T) {
        match axis {
            AbsoluteAxis::Horizontal => self.left = value,
            AbsoluteAxis::Vertical => self.top = value,
        }
    }

    /// Overwrite the end edge along `axis`.
    #[inline]
    pub fn set_end(&mut self, axis: AbsoluteAxis, value: T) {
        match axis {
            AbsoluteAxis::Horizontal => self.right = value,
            AbsoluteAxis::Vertical => self.bottom = value,
        }
    }
}

impl<T: Add<Output = T> + Copy> Rect<T> {
    /// `left + right`.
    #[inline]
    pub fn horizontal_axis_sum(&self) -> T {
        self.left + self.right
    }

    /// `top + bottom`.
    #[inline]
    pub fn vertical_axis_sum(&self) -> T {
        self.top + self.bottom
    }

    /// Both axis sums as a size.
    #[inline]
    pub fn sum_axes(&self) -> Size<T> {
        Size {
            width: self.horizontal_axis_sum(),
            height: self.vertical_axis_sum(),
        }
    }

    /// The sum of the two edges along `axis`.
    #[inline]
    pub fn axis_sum(&self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.horizontal_axis_sum(),
            AbsoluteAxis::Vertical => self.vertical_axis_sum(),
        }
    }
}

impl Rect<f32> {
    /// All edges zero.
    pub const ZERO: Self = Self {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };
}

impl<T: Add<Output = T>> Add for Rect<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            left: self.left + rhs.left,
            right: self.right + rhs.right,
            top: self.top + rhs.top,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

/// A start/end pair along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line<T> {
    /// The start side.
    pub start: T,
    /// The end side.
    pub end: T,
}

impl<T> Line<T> {
    /// Apply `func` to both sides.
    #[inline]
    pub fn map<R, F: FnMut(T) -> R>(self, mut func: F) -> Line<R> {
        Line {
            start: func(self.start),
            end: func(self.end),
        }
    }
}

impl Line<bool> {
    /// Neither side set.
    pub const FALSE: Self = Self {
        start: false,
        end: false,
    };
}

impl<T: Add<Output = T> + Copy> Line<T> {
    /// `start + end`.
    #[inline]
    pub fn sum(&self) -> T {
        self.start + self.end
    }
}
