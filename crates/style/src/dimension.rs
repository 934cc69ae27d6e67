//! The tagged length vocabulary used by every sizing and spacing property.

use trellis_geometry::{Rect, Size};

/// A unit tag without its magnitude.
///
/// Declaration order matches the binding-layer unit enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Unit {
    /// No value (only meaningful for `max-*`).
    None,
    /// Absolute pixels.
    Length,
    /// Fraction of the containing block.
    Percent,
    /// The min-content size.
    MinContent,
    /// The max-content size.
    MaxContent,
    /// `fit-content(<px>)`.
    FitContentPx,
    /// `fit-content(<percent>)`.
    FitContentPercent,
    /// Automatic sizing.
    Auto,
    /// Share of leftover grid space.
    Fr,
}

/// A sized value in one of the [`Unit`] vocabularies.
///
/// Percentages are stored as fractions: `Percent(0.5)` is 50%.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    /// No value.
    None,
    /// Absolute pixels.
    Length(f32),
    /// Fraction of the containing block.
    Percent(f32),
    /// The min-content size.
    MinContent,
    /// The max-content size.
    MaxContent,
    /// `fit-content` with a pixel limit.
    FitContentPx(f32),
    /// `fit-content` with a percentage limit.
    FitContentPercent(f32),
    /// Automatic sizing.
    #[default]
    Auto,
    /// Flexible grid fraction.
    Fr(f32),
}

impl Dimension {
    /// `0px`.
    pub const ZERO: Self = Self::Length(0.0);

    /// A pixel length.
    #[inline]
    pub const fn length(value: f32) -> Self {
        Self::Length(value)
    }

    /// A percentage given as a fraction.
    #[inline]
    pub const fn percent(value: f32) -> Self {
        Self::Percent(value)
    }

    /// Rebuild a dimension from a unit tag and raw magnitude.
    /// The magnitude is ignored for valueless units.
    #[inline]
    pub const fn from_unit(unit: Unit, value: f32) -> Self {
        match unit {
            Unit::None => Self::None,
            Unit::Length => Self::Length(value),
            Unit::Percent => Self::Percent(value),
            Unit::MinContent => Self::MinContent,
            Unit::MaxContent => Self::MaxContent,
            Unit::FitContentPx => Self::FitContentPx(value),
            Unit::FitContentPercent => Self::FitContentPercent(value),
            Unit::Auto => Self::Auto,
            Unit::Fr => Self::Fr(value),
        }
    }

    /// The unit tag.
    #[inline]
    pub const fn unit(self) -> Unit {
        match self {
            Self::None => Unit::None,
            Self::Length(_) => Unit::Length,
            Self::Percent(_) => Unit::Percent,
            Self::MinContent => Unit::MinContent,
            Self::MaxContent => Unit::MaxContent,
            Self::FitContentPx(_) => Unit::FitContentPx,
            Self::FitContentPercent(_) => Unit::FitContentPercent,
            Self::Auto => Unit::Auto,
            Self::Fr(_) => Unit::Fr,
        }
    }

    /// The raw magnitude, or zero for valueless units.
    #[inline]
    pub const fn value(self) -> f32 {
        match self {
            Self::Length(value)
            | Self::Percent(value)
            | Self::FitContentPx(value)
            | Self::FitContentPercent(value)
            | Self::Fr(value) => value,
            Self::None | Self::MinContent | Self::MaxContent | Self::Auto => 0.0,
        }
    }

    /// True for [`Dimension::Auto`].
    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// True for the content-based keywords (`min-content`, `max-content`, `fit-content`).
    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        matches!(
            self,
            Self::MinContent | Self::MaxContent | Self::FitContentPx(_) | Self::FitContentPercent(_)
        )
    }

    /// The `fit-content` limit resolved against `context`, if this is a fit-content value.
    #[inline]
    pub fn fit_content_limit(self, context: Option<f32>) -> Option<f32> {
        match self {
            Self::FitContentPx(limit) => Some(limit),
            Self::FitContentPercent(fraction) => context.map(|size| size * fraction),
            _ => None,
        }
    }
}

/// Resolve a value against a possibly unknown reference size.
pub trait MaybeResolve<In, Out> {
    /// Lengths resolve to themselves, percentages against `context`, anything else to unknown.
    fn maybe_resolve(self, context: In) -> Out;
}

/// Resolve a value, treating anything unresolvable as zero.
pub trait ResolveOrZero<In, Out> {
    /// Like [`MaybeResolve::maybe_resolve`] but unknown becomes `0.0`.
    fn resolve_or_zero(self, context: In) -> Out;
}

impl MaybeResolve<Option<f32>, Option<f32>> for Dimension {
    #[inline]
    fn maybe_resolve(self, context: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(length) => Some(length),
            Self::Percent(fraction) => context.map(|size| size * fraction),
            Self::None
            | Self::MinContent
            | Self::MaxContent
            | Self::FitContentPx(_)
            | Self::FitContentPercent(_)
            | Self::Auto
            | Self::Fr(_) => None,
        }
    }
}

impl MaybeResolve<f32, Option<f32>> for Dimension {
    #[inline]
    fn maybe_resolve(self, context: f32) -> Option<f32> {
        self.maybe_resolve(Some(context))
    }
}

impl ResolveOrZero<Option<f32>, f32> for Dimension {
    #[inline]
    fn resolve_or_zero(self, context: Option<f32>) -> f32 {
        self.maybe_resolve(context).unwrap_or(0.0)
    }
}

impl MaybeResolve<Size<Option<f32>>, Size<Option<f32>>> for Size<Dimension> {
    #[inline]
    fn maybe_resolve(self, context: Size<Option<f32>>) -> Size<Option<f32>> {
        self.zip_map(context, MaybeResolve::maybe_resolve)
    }
}

impl ResolveOrZero<Size<Option<f32>>, Size<f32>> for Size<Dimension> {
    #[inline]
    fn resolve_or_zero(self, context: Size<Option<f32>>) -> Size<f32> {
        self.zip_map(context, ResolveOrZero::resolve_or_zero)
    }
}

/// Box edges resolve percentages against the containing block's width on every side.
impl ResolveOrZero<Option<f32>, Rect<f32>> for Rect<Dimension> {
    #[inline]
    fn resolve_or_zero(self, context: Option<f32>) -> Rect<f32> {
        self.map(|edge| edge.resolve_or_zero(context))
    }
}

/// Insets resolve left/right against the width and top/bottom against the height.
impl MaybeResolve<Size<Option<f32>>, Rect<Option<f32>>> for Rect<Dimension> {
    #[inline]
    fn maybe_resolve(self, context: Size<Option<f32>>) -> Rect<Option<f32>> {
        self.zip_size(context, MaybeResolve::maybe_resolve)
    }
}

/// A size of two pixel lengths.
#[inline]
pub const fn length_size(width: f32, height: f32) -> Size<Dimension> {
    Size {
        width: Dimension::Length(width),
        height: Dimension::Length(height),
    }
}

/// Four equal pixel edges.
#[inline]
pub const fn uniform_edges(value: f32) -> Rect<Dimension> {
    Rect {
        left: Dimension::Length(value),
        right: Dimension::Length(value),
        top: Dimension::Length(value),
        bottom: Dimension::Length(value),
    }
}
