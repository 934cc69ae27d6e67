//! The space offered to a box in one axis.

/// Space available to a box in one axis.
///
/// Infinite space is spelled [`AvailableSpace::MaxContent`]: a box offered
/// unbounded room lays out at its max-content size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AvailableSpace {
    /// A finite, non-negative amount of space in pixels.
    Definite(f32),
    /// Lay out as narrow as the content allows.
    MinContent,
    /// Lay out without any constraint.
    #[default]
    MaxContent,
}

impl AvailableSpace {
    /// Zero definite space.
    pub const ZERO: Self = Self::Definite(0.0);

    /// Classify a raw float the way host bindings pass it.
    ///
    /// Finite non-negative values are definite, negative infinity means
    /// min-content and anything else (positive infinity, NaN, negative
    /// finite values) is treated as unbounded.
    #[inline]
    pub fn from_length(value: f32) -> Self {
        if value.is_finite() && value >= 0.0 {
            Self::Definite(value)
        } else if value == f32::NEG_INFINITY {
            Self::MinContent
        } else {
            Self::MaxContent
        }
    }

    /// True for [`AvailableSpace::Definite`].
    #[inline]
    pub const fn is_definite(self) -> bool {
        matches!(self, Self::Definite(_))
    }

    /// The definite amount, if any.
    #[inline]
    pub const fn into_option(self) -> Option<f32> {
        match self {
            Self::Definite(value) => Some(value),
            Self::MinContent | Self::MaxContent => None,
        }
    }

    /// The definite amount or `default`.
    #[inline]
    pub fn unwrap_or(self, default: f32) -> f32 {
        self.into_option().unwrap_or(default)
    }

    /// Replace the definite amount by `value` when `value` is known.
    #[inline]
    #[must_use]
    pub fn maybe_set(self, value: Option<f32>) -> Self {
        match value {
            Some(known) => Self::Definite(known),
            None => self,
        }
    }

    /// Transform the definite amount, leaving intrinsic constraints alone.
    #[inline]
    #[must_use]
    pub fn map_definite_value(self, func: impl FnOnce(f32) -> f32) -> Self {
        match self {
            Self::Definite(value) => Self::Definite(func(value)),
            other @ (Self::MinContent | Self::MaxContent) => other,
        }
    }

    /// The space left after `used_space` under a definite constraint.
    /// Intrinsic constraints have no free space.
    #[inline]
    pub fn compute_free_space(self, used_space: f32) -> f32 {
        match self {
            Self::Definite(available) => available - used_space,
            Self::MinContent | Self::MaxContent => 0.0,
        }
    }

    /// Equality that treats definite amounts within `f32::EPSILON` as equal.
    #[inline]
    pub fn is_roughly_equal(self, other: Self) -> bool {
        match (self, other) {
            (Self::Definite(lhs), Self::Definite(rhs)) => (lhs - rhs).abs() < f32::EPSILON,
            (Self::MinContent, Self::MinContent) | (Self::MaxContent, Self::MaxContent) => true,
            _ => false,
        }
    }
}

impl From<f32> for AvailableSpace {
    #[inline]
    fn from(value: f32) -> Self {
        Self::from_length(value)
    }
}

impl From<Option<f32>> for AvailableSpace {
    #[inline]
    fn from(value: Option<f32>) -> Self {
        value.map_or(Self::MaxContent, Self::Definite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if raw floats are not classified like host bindings expect.
    fn classifies_raw_lengths() {
        assert_eq!(AvailableSpace::from_length(120.0), AvailableSpace::Definite(120.0));
        assert_eq!(AvailableSpace::from_length(0.0), AvailableSpace::Definite(0.0));
        assert_eq!(AvailableSpace::from_length(f32::INFINITY), AvailableSpace::MaxContent);
        assert_eq!(AvailableSpace::from_length(f32::NEG_INFINITY), AvailableSpace::MinContent);
        assert_eq!(AvailableSpace::from_length(f32::NAN), AvailableSpace::MaxContent);
        assert_eq!(AvailableSpace::from_length(-4.0), AvailableSpace::MaxContent);
    }

    #[test]
    /// # Panics
    /// Panics if intrinsic constraints report free space.
    fn free_space_only_under_definite() {
        assert!((AvailableSpace::Definite(100.0).compute_free_space(30.0) - 70.0).abs() < f32::EPSILON);
        assert!(AvailableSpace::MaxContent.compute_free_space(30.0).abs() < f32::EPSILON);
        assert!(AvailableSpace::MinContent.is_roughly_equal(AvailableSpace::MinContent));
        assert!(!AvailableSpace::MinContent.is_roughly_equal(AvailableSpace::MaxContent));
    }
}
