//! Two-component values: [`Size`] (width/height) and [`Point`] (x/y).

use core::ops::{Add, Sub};

use crate::AbsoluteAxis;

/// A width and a height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size<T> {
    /// Horizontal extent.
    pub width: T,
    /// Vertical extent.
    pub height: T,
}

impl<T> Size<T> {
    /// Build a size from its two components.
    #[inline]
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    /// Apply `func` to both components.
    #[inline]
    pub fn map<R, F: FnMut(T) -> R>(self, mut func: F) -> Size<R> {
        Size {
            width: func(self.width),
            height: func(self.height),
        }
    }

    /// Combine two sizes component-wise.
    #[inline]
    pub fn zip_map<U, R, F: FnMut(T, U) -> R>(self, other: Size<U>, mut func: F) -> Size<R> {
        Size {
            width: func(self.width, other.width),
            height: func(self.height, other.height),
        }
    }

    /// The component along `axis`.
    #[inline]
    pub fn get(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.width,
            AbsoluteAxis::Vertical => self.height,
        }
    }

    /// Overwrite the component along `axis`.
    #[inline]
    pub fn set(&mut self, axis: AbsoluteAxis, value: T) {
        match axis {
            AbsoluteAxis::Horizontal => self.width = value,
            AbsoluteAxis::Vertical => self.height = value,
        }
    }

    /// Return a copy with the component along `axis` replaced.
    #[inline]
    #[must_use]
    pub fn with(mut self, axis: AbsoluteAxis, value: T) -> Self {
        self.set(axis, value);
        self
    }

    /// Build a size from a value in `axis` and a value in the other axis.
    #[inline]
    pub fn from_axes(axis: AbsoluteAxis, along: T, across: T) -> Self {
        match axis {
            AbsoluteAxis::Horizontal => Self {
                width: along,
                height: across,
            },
            AbsoluteAxis::Vertical => Self {
                width: across,
                height: along,
            },
        }
    }
}

impl Size<f32> {
    /// Zero width and height.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn f32_max(self, rhs: Self) -> Self {
        Self {
            width: self.width.max(rhs.width),
            height: self.height.max(rhs.height),
        }
    }

    /// Component-wise minimum.
    #[inline]
    #[must_use]
    pub fn f32_min(self, rhs: Self) -> Self {
        Self {
            width: self.width.min(rhs.width),
            height: self.height.min(rhs.height),
        }
    }

    /// True when both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

impl Size<Option<f32>> {
    /// Neither component known.
    pub const NONE: Self = Self {
        width: None,
        height: None,
    };

    /// Per-component `Option::or`.
    #[inline]
    #[must_use]
    pub fn or(self, alt: Self) -> Self {
        Self {
            width: self.width.or(alt.width),
            height: self.height.or(alt.height),
        }
    }

    /// Per-component `Option::unwrap_or`.
    #[inline]
    pub fn unwrap_or(self, alt: Size<f32>) -> Size<f32> {
        Size {
            width: self.width.unwrap_or(alt.width),
            height: self.height.unwrap_or(alt.height),
        }
    }

    /// True when both components are known.
    #[inline]
    pub const fn both_known(self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    /// Fill in a missing component from the other one through `aspect_ratio` (width / height).
    #[inline]
    #[must_use]
    pub fn maybe_apply_aspect_ratio(self, aspect_ratio: Option<f32>) -> Self {
        match (aspect_ratio, self.width, self.height) {
            (Some(ratio), Some(width), None) => Self {
                width: Some(width),
                height: Some(width / ratio),
            },
            (Some(ratio), None, Some(height)) => Self {
                width: Some(height * ratio),
                height: Some(height),
            },
            _ => self,
        }
    }
}

impl<T: Add<Output = T>> Add for Size<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            width: self.width + rhs.width,
            height: self.height + rhs.height,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Size<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            width: self.width - rhs.width,
            height: self.height - rhs.height,
        }
    }
}

/// An x/y pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T> {
    /// Horizontal component.
    pub x: T,
    /// Vertical component.
    pub y: T,
}

impl<T> Point<T> {
    /// Apply `func` to both components.
    #[inline]
    pub fn map<R, F: FnMut(T) -> R>(self, mut func: F) -> Point<R> {
        Point {
            x: func(self.x),
            y: func(self.y),
        }
    }

    /// The component along `axis`.
    #[inline]
    pub fn get(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.x,
            AbsoluteAxis::Vertical => self.y,
        }
    }

    /// Overwrite the component along `axis`.
    #[inline]
    pub fn set(&mut self, axis: AbsoluteAxis, value: T) {
        match axis {
            AbsoluteAxis::Horizontal => self.x = value,
            AbsoluteAxis::Vertical => self.y = value,
        }
    }

    /// Swap x and y. Used where a property of one axis affects the other,
    /// like a vertical scrollbar taking horizontal space.
    #[inline]
    #[must_use]
    pub fn transpose(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

impl Point<f32> {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl Point<Option<f32>> {
    /// Neither component known.
    pub const NONE: Self = Self { x: None, y: None };
}

impl<T: Add<Output = T>> Add for Point<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if the aspect ratio does not fill the missing axis.
    fn aspect_ratio_fills_missing_axis() {
        let from_width = Size {
            width: Some(100.0),
            height: None,
        }
        .maybe_apply_aspect_ratio(Some(2.0));
        assert_eq!(from_width, Size::new(Some(100.0), Some(50.0)));

        let from_height = Size {
            width: None,
            height: Some(30.0),
        }
        .maybe_apply_aspect_ratio(Some(2.0));
        assert_eq!(from_height, Size::new(Some(60.0), Some(30.0)));

        assert_eq!(Size::NONE.maybe_apply_aspect_ratio(Some(2.0)), Size::NONE);
    }

    #[test]
    /// # Panics
    /// Panics if axis accessors read or write the wrong component.
    fn axis_accessors_follow_axis() {
        let mut size = Size::from_axes(AbsoluteAxis::Vertical, 10.0_f32, 20.0_f32);
        assert!((size.width - 20.0).abs() < f32::EPSILON);
        assert!((size.get(AbsoluteAxis::Vertical) - 10.0).abs() < f32::EPSILON);
        size.set(AbsoluteAxis::Horizontal, 5.0);
        assert!((size.width - 5.0).abs() < f32::EPSILON);
        let point = Point { x: 1.0_f32, y: 2.0_f32 }.transpose();
        assert!((point.x - 2.0).abs() < f32::EPSILON);
    }
}
