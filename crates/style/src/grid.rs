//! Grid placement and track definitions.

use crate::Dimension;

/// Placement of an item along one grid axis.
///
/// Lines are 1-based; negative lines count back from the last explicit line.
/// Zero means "unset" for every field. When both lines are set `span` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPlacement {
    /// Start line, or 0.
    pub start: i16,
    /// End line, or 0.
    pub end: i16,
    /// Number of tracks covered, or 0 (treated as 1).
    pub span: u16,
}

impl GridPlacement {
    /// Fully automatic placement spanning one track.
    pub const AUTO: Self = Self {
        start: 0,
        end: 0,
        span: 0,
    };

    /// Between two explicit lines.
    #[inline]
    pub const fn lines(start: i16, end: i16) -> Self {
        Self {
            start,
            end,
            span: 0,
        }
    }

    /// Starting at `start`, spanning one track.
    #[inline]
    pub const fn from_line(start: i16) -> Self {
        Self {
            start,
            end: 0,
            span: 0,
        }
    }

    /// Auto-placed, spanning `span` tracks.
    #[inline]
    pub const fn span(span: u16) -> Self {
        Self {
            start: 0,
            end: 0,
            span,
        }
    }

    /// The effective span when at most one line is set.
    #[inline]
    pub const fn effective_span(self) -> u16 {
        if self.span == 0 { 1 } else { self.span }
    }

    /// The start line, if set.
    #[inline]
    pub const fn start_line(self) -> Option<i16> {
        if self.start == 0 { None } else { Some(self.start) }
    }

    /// The end line, if set.
    #[inline]
    pub const fn end_line(self) -> Option<i16> {
        if self.end == 0 { None } else { Some(self.end) }
    }

    /// True when neither line is set, so the item is auto-placed in this axis.
    #[inline]
    pub const fn is_auto(self) -> bool {
        self.start == 0 && self.end == 0
    }
}

/// A track sizing function: `minmax(min, max)` in the [`Dimension`] vocabulary.
///
/// The min side accepts lengths, percentages, `min-content`, `max-content` and `auto`.
/// The max side additionally accepts `fr` and `fit-content`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackSize {
    /// Minimum sizing function.
    pub min: Dimension,
    /// Maximum sizing function.
    pub max: Dimension,
}

impl Default for TrackSize {
    #[inline]
    fn default() -> Self {
        Self::AUTO
    }
}

impl TrackSize {
    /// `auto`.
    pub const AUTO: Self = Self {
        min: Dimension::Auto,
        max: Dimension::Auto,
    };

    /// A fixed pixel track.
    #[inline]
    pub const fn length(value: f32) -> Self {
        Self {
            min: Dimension::Length(value),
            max: Dimension::Length(value),
        }
    }

    /// A percentage track.
    #[inline]
    pub const fn percent(value: f32) -> Self {
        Self {
            min: Dimension::Percent(value),
            max: Dimension::Percent(value),
        }
    }

    /// A flexible track, `minmax(auto, <n>fr)`.
    #[inline]
    pub const fn fr(value: f32) -> Self {
        Self {
            min: Dimension::Auto,
            max: Dimension::Fr(value),
        }
    }

    /// `min-content`.
    #[inline]
    pub const fn min_content() -> Self {
        Self {
            min: Dimension::MinContent,
            max: Dimension::MinContent,
        }
    }

    /// `max-content`.
    #[inline]
    pub const fn max_content() -> Self {
        Self {
            min: Dimension::MaxContent,
            max: Dimension::MaxContent,
        }
    }

    /// `fit-content(<px>)`.
    #[inline]
    pub const fn fit_content_px(limit: f32) -> Self {
        Self {
            min: Dimension::Auto,
            max: Dimension::FitContentPx(limit),
        }
    }

    /// `fit-content(<percent>)`.
    #[inline]
    pub const fn fit_content_percent(limit: f32) -> Self {
        Self {
            min: Dimension::Auto,
            max: Dimension::FitContentPercent(limit),
        }
    }

    /// `minmax(min, max)`.
    #[inline]
    pub const fn minmax(min: Dimension, max: Dimension) -> Self {
        Self { min, max }
    }

    /// The flex factor of the max side, or zero.
    #[inline]
    pub const fn flex_factor(self) -> f32 {
        match self.max {
            Dimension::Fr(factor) => factor,
            _ => 0.0,
        }
    }

    /// True when the max side is an `fr` value.
    #[inline]
    pub const fn is_flexible(self) -> bool {
        matches!(self.max, Dimension::Fr(_))
    }

    /// True when both sides resolve without looking at content, given a definite axis.
    #[inline]
    pub const fn is_fixed(self) -> bool {
        matches!(self.min, Dimension::Length(_) | Dimension::Percent(_))
            && matches!(self.max, Dimension::Length(_) | Dimension::Percent(_))
    }

    /// True when at least one side is a length or percentage.
    #[inline]
    pub const fn has_fixed_component(self) -> bool {
        matches!(self.min, Dimension::Length(_) | Dimension::Percent(_))
            || matches!(self.max, Dimension::Length(_) | Dimension::Percent(_))
    }
}

impl From<Dimension> for TrackSize {
    /// Expand a single sizing keyword into its `minmax()` form.
    #[inline]
    fn from(value: Dimension) -> Self {
        match value {
            Dimension::Fr(factor) => Self::fr(factor),
            Dimension::FitContentPx(limit) => Self::fit_content_px(limit),
            Dimension::FitContentPercent(limit) => Self::fit_content_percent(limit),
            Dimension::None => Self::AUTO,
            other @ (Dimension::Length(_)
            | Dimension::Percent(_)
            | Dimension::MinContent
            | Dimension::MaxContent
            | Dimension::Auto) => Self {
                min: other,
                max: other,
            },
        }
    }
}

/// How many times a `repeat()` entry repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepeatCount {
    /// A fixed count.
    Count(u16),
    /// As many as fit; empty repetitions keep their size.
    AutoFill,
    /// As many as fit; empty repetitions collapse.
    AutoFit,
}

/// One entry of a `grid-template-*` list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackEntry {
    /// A single track.
    Single(TrackSize),
    /// `repeat(count, tracks)`.
    Repeat(RepeatCount, Vec<TrackSize>),
}

impl From<TrackSize> for TrackEntry {
    #[inline]
    fn from(value: TrackSize) -> Self {
        Self::Single(value)
    }
}

impl TrackEntry {
    /// True for `repeat(auto-fill | auto-fit, ..)`.
    #[inline]
    pub const fn is_auto_repeat(&self) -> bool {
        matches!(
            self,
            Self::Repeat(RepeatCount::AutoFill | RepeatCount::AutoFit, _)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if single keywords do not expand into their minmax form.
    fn keywords_expand_to_minmax() {
        assert_eq!(TrackSize::from(Dimension::Fr(2.0)), TrackSize::fr(2.0));
        assert_eq!(TrackSize::from(Dimension::Length(10.0)), TrackSize::length(10.0));
        assert!(TrackSize::fr(1.0).is_flexible());
        assert!((TrackSize::fr(3.0).flex_factor() - 3.0).abs() < f32::EPSILON);
        assert!(TrackSize::percent(0.5).is_fixed());
        assert!(!TrackSize::AUTO.has_fixed_component());
    }

    #[test]
    /// # Panics
    /// Panics if placement helpers misreport unset fields.
    fn placement_helpers() {
        assert!(GridPlacement::AUTO.is_auto());
        assert_eq!(GridPlacement::AUTO.effective_span(), 1);
        assert_eq!(GridPlacement::lines(1, 3).end_line(), Some(3));
        assert_eq!(GridPlacement::from_line(-1).start_line(), Some(-1));
        assert_eq!(GridPlacement::span(4).effective_span(), 4);
    }
}
