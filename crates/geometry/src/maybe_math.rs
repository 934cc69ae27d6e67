//! Arithmetic where either side may be unknown.
//!
//! An unknown operand leaves the other side untouched, so `Some(4).maybe_max(None)`
//! is `Some(4)` and `None.maybe_add(Some(3))` stays `None`.

use crate::{AvailableSpace, Size};

/// min/max/clamp/add/sub that tolerate missing operands.
pub trait MaybeMath<In, Out> {
    /// Minimum of both sides; an unknown side is ignored.
    fn maybe_min(self, rhs: In) -> Out;
    /// Maximum of both sides; an unknown side is ignored.
    fn maybe_max(self, rhs: In) -> Out;
    /// Clamp between `min` and `max`. When `min > max` the minimum wins.
    fn maybe_clamp(self, min: In, max: In) -> Out;
    /// Sum; an unknown right-hand side is ignored.
    fn maybe_add(self, rhs: In) -> Out;
    /// Difference; an unknown right-hand side is ignored.
    fn maybe_sub(self, rhs: In) -> Out;
}

impl MaybeMath<Option<f32>, Option<f32>> for Option<f32> {
    #[inline]
    fn maybe_min(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(lhs), Some(rhs)) => Some(lhs.min(rhs)),
            (Some(lhs), None) => Some(lhs),
            (None, _) => None,
        }
    }

    #[inline]
    fn maybe_max(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(lhs), Some(rhs)) => Some(lhs.max(rhs)),
            (Some(lhs), None) => Some(lhs),
            (None, _) => None,
        }
    }

    #[inline]
    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> Option<f32> {
        self.map(|value| value.maybe_clamp(min, max))
    }

    #[inline]
    fn maybe_add(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(lhs), Some(rhs)) => Some(lhs + rhs),
            (Some(lhs), None) => Some(lhs),
            (None, _) => None,
        }
    }

    #[inline]
    fn maybe_sub(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(lhs), Some(rhs)) => Some(lhs - rhs),
            (Some(lhs), None) => Some(lhs),
            (None, _) => None,
        }
    }
}

impl MaybeMath<f32, Option<f32>> for Option<f32> {
    #[inline]
    fn maybe_min(self, rhs: f32) -> Option<f32> {
        self.map(|val| val.min(rhs))
    }

    #[inline]
    fn maybe_max(self, rhs: f32) -> Option<f32> {
        self.map(|val| val.max(rhs))
    }

    #[inline]
    fn maybe_clamp(self, min: f32, max: f32) -> Option<f32> {
        self.map(|val| val.min(max).max(min))
    }

    #[inline]
    fn maybe_add(self, rhs: f32) -> Option<f32> {
        self.map(|val| val + rhs)
    }

    #[inline]
    fn maybe_sub(self, rhs: f32) -> Option<f32> {
        self.map(|val| val - rhs)
    }
}

impl MaybeMath<Option<f32>, f32> for f32 {
    #[inline]
    fn maybe_min(self, rhs: Option<f32>) -> f32 {
        rhs.map_or(self, |other| self.min(other))
    }

    #[inline]
    fn maybe_max(self, rhs: Option<f32>) -> f32 {
        rhs.map_or(self, |other| self.max(other))
    }

    #[inline]
    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> f32 {
        self.maybe_min(max).maybe_max(min)
    }

    #[inline]
    fn maybe_add(self, rhs: Option<f32>) -> f32 {
        rhs.map_or(self, |other| self + other)
    }

    #[inline]
    fn maybe_sub(self, rhs: Option<f32>) -> f32 {
        rhs.map_or(self, |other| self - other)
    }
}

impl MaybeMath<f32, AvailableSpace> for AvailableSpace {
    #[inline]
    fn maybe_min(self, rhs: f32) -> Self {
        match self {
            Self::Definite(val) => Self::Definite(val.min(rhs)),
            Self::MinContent => Self::MinContent,
            Self::MaxContent => Self::Definite(rhs),
        }
    }

    #[inline]
    fn maybe_max(self, rhs: f32) -> Self {
        match self {
            Self::Definite(val) => Self::Definite(val.max(rhs)),
            other @ (Self::MinContent | Self::MaxContent) => other,
        }
    }

    #[inline]
    fn maybe_clamp(self, min: f32, max: f32) -> Self {
        match self {
            Self::Definite(val) => Self::Definite(val.min(max).max(min)),
            other @ (Self::MinContent | Self::MaxContent) => other,
        }
    }

    #[inline]
    fn maybe_add(self, rhs: f32) -> Self {
        self.map_definite_value(|val| val + rhs)
    }

    #[inline]
    fn maybe_sub(self, rhs: f32) -> Self {
        self.map_definite_value(|val| val - rhs)
    }
}

impl MaybeMath<Option<f32>, AvailableSpace> for AvailableSpace {
    #[inline]
    fn maybe_min(self, rhs: Option<f32>) -> Self {
        match (self, rhs) {
            (Self::Definite(val), Some(rhs)) => Self::Definite(val.min(rhs)),
            (Self::MaxContent, Some(rhs)) => Self::Definite(rhs),
            (other, _) => other,
        }
    }

    #[inline]
    fn maybe_max(self, rhs: Option<f32>) -> Self {
        match (self, rhs) {
            (Self::Definite(val), Some(rhs)) => Self::Definite(val.max(rhs)),
            (other, _) => other,
        }
    }

    #[inline]
    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> Self {
        match self {
            Self::Definite(val) => Self::Definite(val.maybe_clamp(min, max)),
            other @ (Self::MinContent | Self::MaxContent) => other,
        }
    }

    #[inline]
    fn maybe_add(self, rhs: Option<f32>) -> Self {
        match (self, rhs) {
            (Self::Definite(val), Some(rhs)) => Self::Definite(val + rhs),
            (other, _) => other,
        }
    }

    #[inline]
    fn maybe_sub(self, rhs: Option<f32>) -> Self {
        match (self, rhs) {
            (Self::Definite(val), Some(rhs)) => Self::Definite(val - rhs),
            (other, _) => other,
        }
    }
}

impl<In, Out, T: MaybeMath<In, Out>> MaybeMath<Size<In>, Size<Out>> for Size<T> {
    #[inline]
    fn maybe_min(self, rhs: Size<In>) -> Size<Out> {
        Size {
            width: self.width.maybe_min(rhs.width),
            height: self.height.maybe_min(rhs.height),
        }
    }

    #[inline]
    fn maybe_max(self, rhs: Size<In>) -> Size<Out> {
        Size {
            width: self.width.maybe_max(rhs.width),
            height: self.height.maybe_max(rhs.height),
        }
    }

    #[inline]
    fn maybe_clamp(self, min: Size<In>, max: Size<In>) -> Size<Out> {
        Size {
            width: self.width.maybe_clamp(min.width, max.width),
            height: self.height.maybe_clamp(min.height, max.height),
        }
    }

    #[inline]
    fn maybe_add(self, rhs: Size<In>) -> Size<Out> {
        Size {
            width: self.width.maybe_add(rhs.width),
            height: self.height.maybe_add(rhs.height),
        }
    }

    #[inline]
    fn maybe_sub(self, rhs: Size<In>) -> Size<Out> {
        Size {
            width: self.width.maybe_sub(rhs.width),
            height: self.height.maybe_sub(rhs.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if an unknown operand changes the known side.
    fn unknown_operands_are_ignored() {
        assert_eq!(Some(4.0_f32).maybe_max(None::<f32>), Some(4.0));
        assert_eq!(None::<f32>.maybe_add(Some(3.0_f32)), None);
        assert!((5.0_f32.maybe_min(None) - 5.0).abs() < f32::EPSILON);
        assert!((5.0_f32.maybe_sub(Some(2.0)) - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    /// # Panics
    /// Panics if a conflicting min/max pair does not resolve to the minimum.
    fn clamp_prefers_minimum() {
        let clamped = 50.0_f32.maybe_clamp(Some(80.0), Some(60.0));
        assert!((clamped - 80.0).abs() < f32::EPSILON);
        let within = 50.0_f32.maybe_clamp(Some(10.0), Some(60.0));
        assert!((within - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    /// # Panics
    /// Panics if an unbounded constraint is not narrowed by a known maximum.
    fn max_content_narrowed_by_known_min() {
        assert_eq!(
            AvailableSpace::MaxContent.maybe_min(Some(40.0)),
            AvailableSpace::Definite(40.0)
        );
        assert_eq!(
            AvailableSpace::MinContent.maybe_min(Some(40.0)),
            AvailableSpace::MinContent
        );
        assert_eq!(
            AvailableSpace::Definite(100.0).maybe_sub(10.0),
            AvailableSpace::Definite(90.0)
        );
    }
}
