//! Per-field validation of style values.
//!
//! Every property accepts a subset of the [`Unit`] vocabulary and a range of
//! magnitudes. Validation runs before a style is committed to a node.

use core::fmt;

use trellis_geometry::{Rect, Size};

use crate::{Dimension, RepeatCount, Style, TrackEntry, TrackSize, Unit};

/// The style property a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleField {
    /// `width`
    Width,
    /// `height`
    Height,
    /// `min-width`
    MinWidth,
    /// `min-height`
    MinHeight,
    /// `max-width`
    MaxWidth,
    /// `max-height`
    MaxHeight,
    /// `margin-*`
    Margin(Edge),
    /// `padding-*`
    Padding(Edge),
    /// `border-*-width`
    Border(Edge),
    /// `left/right/top/bottom`
    Inset(Edge),
    /// `column-gap`
    ColumnGap,
    /// `row-gap`
    RowGap,
    /// `flex-basis`
    FlexBasis,
    /// `flex-grow`
    FlexGrow,
    /// `flex-shrink`
    FlexShrink,
    /// `aspect-ratio`
    AspectRatio,
    /// `scrollbar-width`
    ScrollbarWidth,
    /// `grid-template-rows`
    GridTemplateRows,
    /// `grid-template-columns`
    GridTemplateColumns,
    /// `grid-auto-rows`
    GridAutoRows,
    /// `grid-auto-columns`
    GridAutoColumns,
}

/// One side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Left side.
    Left,
    /// Right side.
    Right,
    /// Top side.
    Top,
    /// Bottom side.
    Bottom,
}

impl Edge {
    const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for StyleField {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => formatter.write_str("width"),
            Self::Height => formatter.write_str("height"),
            Self::MinWidth => formatter.write_str("min-width"),
            Self::MinHeight => formatter.write_str("min-height"),
            Self::MaxWidth => formatter.write_str("max-width"),
            Self::MaxHeight => formatter.write_str("max-height"),
            Self::Margin(edge) => write!(formatter, "margin-{}", edge.name()),
            Self::Padding(edge) => write!(formatter, "padding-{}", edge.name()),
            Self::Border(edge) => write!(formatter, "border-{}-width", edge.name()),
            Self::Inset(edge) => formatter.write_str(edge.name()),
            Self::ColumnGap => formatter.write_str("column-gap"),
            Self::RowGap => formatter.write_str("row-gap"),
            Self::FlexBasis => formatter.write_str("flex-basis"),
            Self::FlexGrow => formatter.write_str("flex-grow"),
            Self::FlexShrink => formatter.write_str("flex-shrink"),
            Self::AspectRatio => formatter.write_str("aspect-ratio"),
            Self::ScrollbarWidth => formatter.write_str("scrollbar-width"),
            Self::GridTemplateRows => formatter.write_str("grid-template-rows"),
            Self::GridTemplateColumns => formatter.write_str("grid-template-columns"),
            Self::GridAutoRows => formatter.write_str("grid-auto-rows"),
            Self::GridAutoColumns => formatter.write_str("grid-auto-columns"),
        }
    }
}

/// Why a magnitude was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericProblem {
    /// Not a number.
    NaN,
    /// Positive or negative infinity.
    Infinite,
    /// Below zero where only non-negative values are allowed.
    Negative,
    /// Zero or below where only positive values are allowed.
    NonPositive,
}

impl fmt::Display for NumericProblem {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::NaN => "value is NaN",
            Self::Infinite => "value is infinite",
            Self::Negative => "value is negative",
            Self::NonPositive => "value must be positive",
        })
    }
}

/// A style value that cannot be committed.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum StyleError {
    /// The unit is not part of the field's vocabulary, e.g. `fr` on `width`.
    #[error("unit {unit:?} is not valid for {field}")]
    InvalidUnitForField {
        /// Offending property.
        field: StyleField,
        /// Rejected unit.
        unit: Unit,
    },
    /// The magnitude is NaN, infinite or out of range.
    #[error("invalid value {value} for {field}: {problem}")]
    InvalidNumericValue {
        /// Offending property.
        field: StyleField,
        /// Rejected magnitude.
        value: f32,
        /// What is wrong with it.
        problem: NumericProblem,
    },
    /// A keyword discriminant outside the enum's range.
    #[error("{value} is not a valid {enum_name} value")]
    InvalidEnumValue {
        /// Name of the keyword enum.
        enum_name: &'static str,
        /// Rejected discriminant.
        value: u8,
    },
}

/// Units accepted by `width` and `height`.
const SIZE_UNITS: &[Unit] = &[
    Unit::Length,
    Unit::Percent,
    Unit::Auto,
    Unit::MinContent,
    Unit::MaxContent,
    Unit::FitContentPx,
    Unit::FitContentPercent,
];
/// Units accepted by `min-*` and `max-*`.
const MIN_MAX_UNITS: &[Unit] = &[Unit::Length, Unit::Percent, Unit::Auto, Unit::None];
/// Units accepted by `flex-basis`.
const FLEX_BASIS_UNITS: &[Unit] = &[
    Unit::Length,
    Unit::Percent,
    Unit::Auto,
    Unit::MinContent,
    Unit::MaxContent,
];
/// Units accepted by margins and insets.
const AUTO_EDGE_UNITS: &[Unit] = &[Unit::Length, Unit::Percent, Unit::Auto];
/// Units accepted by paddings, borders and gaps.
const LENGTH_PERCENT_UNITS: &[Unit] = &[Unit::Length, Unit::Percent];
/// Units accepted by the min side of a track.
const TRACK_MIN_UNITS: &[Unit] = &[
    Unit::Length,
    Unit::Percent,
    Unit::MinContent,
    Unit::MaxContent,
    Unit::Auto,
];
/// Units accepted by the max side of a track.
const TRACK_MAX_UNITS: &[Unit] = &[
    Unit::Length,
    Unit::Percent,
    Unit::MinContent,
    Unit::MaxContent,
    Unit::Auto,
    Unit::Fr,
    Unit::FitContentPx,
    Unit::FitContentPercent,
];

/// Reject NaN and infinities, and negatives unless `allow_negative`.
///
/// # Errors
/// Returns [`StyleError::InvalidNumericValue`] describing the first problem found.
pub fn check_number(field: StyleField, value: f32, allow_negative: bool) -> Result<(), StyleError> {
    let problem = if value.is_nan() {
        Some(NumericProblem::NaN)
    } else if value.is_infinite() {
        Some(NumericProblem::Infinite)
    } else if !allow_negative && value < 0.0 {
        Some(NumericProblem::Negative)
    } else {
        None
    };
    problem.map_or(Ok(()), |problem| {
        Err(StyleError::InvalidNumericValue {
            field,
            value,
            problem,
        })
    })
}

/// Check a dimension's unit against `allowed` and its magnitude against the numeric rules.
///
/// # Errors
/// Returns the unit error first, then any numeric error.
pub fn check_dimension(
    field: StyleField,
    value: Dimension,
    allowed: &[Unit],
    allow_negative: bool,
) -> Result<(), StyleError> {
    let unit = value.unit();
    if !allowed.contains(&unit) {
        return Err(StyleError::InvalidUnitForField { field, unit });
    }
    check_number(field, value.value(), allow_negative)
}

fn check_size(
    fields: Size<StyleField>,
    value: Size<Dimension>,
    allowed: &[Unit],
) -> Result<(), StyleError> {
    check_dimension(fields.width, value.width, allowed, false)?;
    check_dimension(fields.height, value.height, allowed, false)
}

fn check_edges(
    field: fn(Edge) -> StyleField,
    value: Rect<Dimension>,
    allowed: &[Unit],
    allow_negative: bool,
) -> Result<(), StyleError> {
    check_dimension(field(Edge::Left), value.left, allowed, allow_negative)?;
    check_dimension(field(Edge::Right), value.right, allowed, allow_negative)?;
    check_dimension(field(Edge::Top), value.top, allowed, allow_negative)?;
    check_dimension(field(Edge::Bottom), value.bottom, allowed, allow_negative)
}

/// Validate one track sizing function.
///
/// # Errors
/// Rejects units outside the min/max vocabularies and negative magnitudes.
pub fn check_track(field: StyleField, track: TrackSize) -> Result<(), StyleError> {
    check_dimension(field, track.min, TRACK_MIN_UNITS, false)?;
    check_dimension(field, track.max, TRACK_MAX_UNITS, false)
}

fn check_template(field: StyleField, entries: &[TrackEntry]) -> Result<(), StyleError> {
    for entry in entries {
        match entry {
            TrackEntry::Single(track) => check_track(field, *track)?,
            TrackEntry::Repeat(count, tracks) => {
                if let RepeatCount::Count(0) = count {
                    return Err(StyleError::InvalidNumericValue {
                        field,
                        value: 0.0,
                        problem: NumericProblem::NonPositive,
                    });
                }
                if tracks.is_empty() {
                    return Err(StyleError::InvalidNumericValue {
                        field,
                        value: 0.0,
                        problem: NumericProblem::NonPositive,
                    });
                }
                for track in tracks {
                    check_track(field, *track)?;
                    // Auto repetitions need every track to have a definite size to count from.
                    if entry.is_auto_repeat() && !track.has_fixed_component() {
                        return Err(StyleError::InvalidUnitForField {
                            field,
                            unit: track.max.unit(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

impl Style {
    /// Check every field against its unit vocabulary and numeric range.
    ///
    /// # Errors
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), StyleError> {
        check_size(
            Size {
                width: StyleField::Width,
                height: StyleField::Height,
            },
            self.size,
            SIZE_UNITS,
        )?;
        check_size(
            Size {
                width: StyleField::MinWidth,
                height: StyleField::MinHeight,
            },
            self.min_size,
            MIN_MAX_UNITS,
        )?;
        check_size(
            Size {
                width: StyleField::MaxWidth,
                height: StyleField::MaxHeight,
            },
            self.max_size,
            MIN_MAX_UNITS,
        )?;
        check_edges(StyleField::Margin, self.margin, AUTO_EDGE_UNITS, true)?;
        check_edges(StyleField::Inset, self.inset, AUTO_EDGE_UNITS, true)?;
        check_edges(StyleField::Padding, self.padding, LENGTH_PERCENT_UNITS, false)?;
        check_edges(StyleField::Border, self.border, LENGTH_PERCENT_UNITS, false)?;
        check_size(
            Size {
                width: StyleField::ColumnGap,
                height: StyleField::RowGap,
            },
            self.gap,
            LENGTH_PERCENT_UNITS,
        )?;
        check_dimension(StyleField::FlexBasis, self.flex_basis, FLEX_BASIS_UNITS, false)?;
        check_number(StyleField::FlexGrow, self.flex_grow, false)?;
        check_number(StyleField::FlexShrink, self.flex_shrink, false)?;
        check_number(StyleField::ScrollbarWidth, self.scrollbar_width, false)?;
        if let Some(ratio) = self.aspect_ratio {
            check_number(StyleField::AspectRatio, ratio, false)?;
            if ratio <= 0.0 {
                return Err(StyleError::InvalidNumericValue {
                    field: StyleField::AspectRatio,
                    value: ratio,
                    problem: NumericProblem::NonPositive,
                });
            }
        }
        check_template(StyleField::GridTemplateRows, &self.grid_template_rows)?;
        check_template(StyleField::GridTemplateColumns, &self.grid_template_columns)?;
        for track in &self.grid_auto_rows {
            check_track(StyleField::GridAutoRows, *track)?;
        }
        for track in &self.grid_auto_columns {
            check_track(StyleField::GridAutoColumns, *track)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if the default style fails validation.
    fn default_style_is_valid() {
        assert_eq!(Style::default().validate(), Ok(()));
    }

    #[test]
    /// # Panics
    /// Panics if `fr` is accepted on a box dimension.
    fn rejects_fr_on_width() {
        let style = Style {
            size: Size {
                width: Dimension::Fr(1.0),
                height: Dimension::Auto,
            },
            ..Style::default()
        };
        assert_eq!(
            style.validate(),
            Err(StyleError::InvalidUnitForField {
                field: StyleField::Width,
                unit: Unit::Fr
            })
        );
    }

    #[test]
    /// # Panics
    /// Panics if non-finite or negative magnitudes pass validation.
    fn rejects_bad_numbers() {
        let nan_padding = Style {
            padding: Rect {
                left: Dimension::Length(f32::NAN),
                ..Style::DEFAULT.padding
            },
            ..Style::default()
        };
        assert!(matches!(
            nan_padding.validate(),
            Err(StyleError::InvalidNumericValue {
                field: StyleField::Padding(Edge::Left),
                problem: NumericProblem::NaN,
                ..
            })
        ));

        let negative_grow = Style {
            flex_grow: -1.0,
            ..Style::default()
        };
        assert!(matches!(
            negative_grow.validate(),
            Err(StyleError::InvalidNumericValue {
                field: StyleField::FlexGrow,
                problem: NumericProblem::Negative,
                ..
            })
        ));

        let infinite_width = Style {
            size: Size {
                width: Dimension::Length(f32::INFINITY),
                height: Dimension::Auto,
            },
            ..Style::default()
        };
        assert!(matches!(
            infinite_width.validate(),
            Err(StyleError::InvalidNumericValue {
                field: StyleField::Width,
                problem: NumericProblem::Infinite,
                ..
            })
        ));
    }

    #[test]
    /// # Panics
    /// Panics if negative margins are rejected or negative padding accepted.
    fn margins_may_be_negative() {
        let style = Style {
            margin: Rect {
                left: Dimension::Length(-10.0),
                ..Style::DEFAULT.margin
            },
            ..Style::default()
        };
        assert_eq!(style.validate(), Ok(()));

        let padded = Style {
            padding: Rect {
                top: Dimension::Length(-1.0),
                ..Style::DEFAULT.padding
            },
            ..Style::default()
        };
        assert!(matches!(
            padded.validate(),
            Err(StyleError::InvalidNumericValue {
                problem: NumericProblem::Negative,
                ..
            })
        ));
    }

    #[test]
    /// # Panics
    /// Panics if auto repetitions of intrinsic tracks or zero aspect ratios are accepted.
    fn rejects_bad_tracks_and_ratio() {
        let style = Style {
            grid_template_columns: vec![TrackEntry::Repeat(
                RepeatCount::AutoFill,
                vec![TrackSize::AUTO],
            )],
            ..Style::default()
        };
        assert!(matches!(
            style.validate(),
            Err(StyleError::InvalidUnitForField { .. })
        ));

        let fixed = Style {
            grid_template_columns: vec![TrackEntry::Repeat(
                RepeatCount::AutoFit,
                vec![TrackSize::length(40.0)],
            )],
            ..Style::default()
        };
        assert_eq!(fixed.validate(), Ok(()));

        let ratio = Style {
            aspect_ratio: Some(0.0),
            ..Style::default()
        };
        assert!(matches!(
            ratio.validate(),
            Err(StyleError::InvalidNumericValue {
                problem: NumericProblem::NonPositive,
                ..
            })
        ));
    }
}
