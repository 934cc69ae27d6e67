//! Grid track and item type definitions.
//!
//! Spec: CSS Grid Layout Module Level 2
//! <https://www.w3.org/TR/css-grid-2/>

use trellis_geometry::{AbsoluteAxis, Line, Point, Rect, Size};
use trellis_style::{AlignSelf, Dimension, Overflow, TrackSize};
use trellis_tree::NodeId;

/// Track counts of one axis, split around the explicit grid.
///
/// Lines are numbered from zero at the start of the explicit grid
/// ("origin-zero"), so implicit tracks before it sit at negative lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackCounts {
    /// Implicit tracks before the explicit grid.
    pub negative_implicit: u16,
    /// Tracks of the explicit grid.
    pub explicit: u16,
    /// Implicit tracks after the explicit grid.
    pub positive_implicit: u16,
}

impl TrackCounts {
    /// Counts of a grid made of explicit tracks only.
    #[inline]
    pub const fn from_explicit(explicit: u16) -> Self {
        Self {
            negative_implicit: 0,
            explicit,
            positive_implicit: 0,
        }
    }

    /// Total number of tracks.
    #[inline]
    pub const fn len(self) -> usize {
        self.negative_implicit as usize + self.explicit as usize + self.positive_implicit as usize
    }

    /// True when the axis has no tracks.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// First line of the implicit grid.
    #[inline]
    pub const fn implicit_start_line(self) -> i32 {
        -(self.negative_implicit as i32)
    }

    /// Last line of the implicit grid.
    #[inline]
    pub const fn implicit_end_line(self) -> i32 {
        self.explicit as i32 + self.positive_implicit as i32
    }

    /// Grow the implicit grid so `span` lies inside it.
    pub fn include(&mut self, span: Line<i32>) {
        if span.start < self.implicit_start_line() {
            self.negative_implicit = (-span.start) as u16;
        }
        if span.end > self.implicit_end_line() {
            self.positive_implicit = (span.end - i32::from(self.explicit)) as u16;
        }
    }

    /// Index into the track list of the track starting at origin-zero `line`.
    #[inline]
    pub const fn track_index(self, line: i32) -> usize {
        (line + self.negative_implicit as i32) as usize
    }

    /// Track indexes covered by the origin-zero `span`.
    #[inline]
    pub const fn track_range(self, span: Line<i32>) -> Line<usize> {
        Line {
            start: self.track_index(span.start),
            end: self.track_index(span.end),
        }
    }
}

/// Area occupied by a grid item, in origin-zero lines (end lines exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    /// Column lines.
    pub column: Line<i32>,
    /// Row lines.
    pub row: Line<i32>,
}

impl GridArea {
    /// Build an area from its extent along `axis` and across it.
    #[inline]
    pub const fn from_axes(axis: AbsoluteAxis, along: Line<i32>, across: Line<i32>) -> Self {
        match axis {
            AbsoluteAxis::Horizontal => Self {
                column: along,
                row: across,
            },
            AbsoluteAxis::Vertical => Self {
                column: across,
                row: along,
            },
        }
    }

    /// The lines along `axis`.
    #[inline]
    pub const fn get(self, axis: AbsoluteAxis) -> Line<i32> {
        match axis {
            AbsoluteAxis::Horizontal => self.column,
            AbsoluteAxis::Vertical => self.row,
        }
    }

    /// Check if this area overlaps with another area.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.row.start < other.row.end
            && self.row.end > other.row.start
            && self.column.start < other.column.end
            && self.column.end > other.column.start
    }
}

/// Replace sizing functions that cannot resolve against `axis_size` with
/// their automatic equivalent; resolvable percentages become lengths.
#[inline]
fn normalize(function: Dimension, axis_size: Option<f32>) -> Dimension {
    match function {
        Dimension::Percent(fraction) => {
            axis_size.map_or(Dimension::Auto, |size| Dimension::Length(size * fraction))
        }
        Dimension::FitContentPercent(fraction) => axis_size
            .map_or(Dimension::MaxContent, |size| {
                Dimension::FitContentPx(size * fraction)
            }),
        Dimension::None => Dimension::Auto,
        other => other,
    }
}

/// One row or column and its sizing state.
///
/// Spec: §11.4 Initialize Track Sizes
/// <https://www.w3.org/TR/css-grid-2/#algo-init>
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTrack {
    /// Track sizing function as written.
    pub sizing: TrackSize,
    /// Minimum sizing function with percentages resolved.
    pub min: Dimension,
    /// Maximum sizing function with percentages resolved.
    pub max: Dimension,
    /// An empty `auto-fit` repetition, sized to zero with its gutters.
    pub is_collapsed: bool,
    /// Base size.
    pub base_size: f32,
    /// Growth limit; infinite until content or a fixed max bounds it.
    pub growth_limit: f32,
    /// Start edge relative to the container border box, set by alignment.
    pub offset: f32,
    /// Set when an intrinsic max step raised an infinite growth limit.
    pub infinitely_growable: bool,
    /// Increase planned for the current distribution step.
    pub planned_increase: f32,
    /// Increase requested by the item currently being distributed.
    pub item_incurred_increase: f32,
}

impl GridTrack {
    /// A track sized by `sizing`.
    pub fn new(sizing: TrackSize) -> Self {
        Self {
            sizing,
            min: sizing.min,
            max: sizing.max,
            is_collapsed: false,
            base_size: 0.0,
            growth_limit: f32::INFINITY,
            offset: 0.0,
            infinitely_growable: false,
            planned_increase: 0.0,
            item_incurred_increase: 0.0,
        }
    }

    /// An empty `auto-fit` repetition.
    pub fn collapsed(sizing: TrackSize) -> Self {
        Self {
            is_collapsed: true,
            ..Self::new(sizing)
        }
    }

    /// Resolve percentages against the content-box size of the axis.
    pub fn resolve_functions(&mut self, axis_size: Option<f32>) {
        self.min = normalize(self.sizing.min, axis_size);
        self.max = normalize(self.sizing.max, axis_size);
    }

    /// True when either sizing function is a percentage.
    #[inline]
    pub const fn uses_percentage(&self) -> bool {
        matches!(self.sizing.min, Dimension::Percent(_))
            || matches!(
                self.sizing.max,
                Dimension::Percent(_) | Dimension::FitContentPercent(_)
            )
    }

    /// The fixed minimum, if the min function is a length.
    #[inline]
    pub const fn fixed_min(&self) -> Option<f32> {
        match self.min {
            Dimension::Length(value) => Some(value),
            _ => None,
        }
    }

    /// The fixed maximum, if the max function is a length.
    #[inline]
    pub const fn fixed_max(&self) -> Option<f32> {
        match self.max {
            Dimension::Length(value) => Some(value),
            _ => None,
        }
    }

    /// Min function is `auto`, `min-content` or `max-content`.
    #[inline]
    pub const fn has_intrinsic_min(&self) -> bool {
        !matches!(self.min, Dimension::Length(_))
    }

    /// Min function is `min-content` or `max-content`.
    #[inline]
    pub const fn has_content_min(&self) -> bool {
        matches!(self.min, Dimension::MinContent | Dimension::MaxContent)
    }

    /// Min function is `max-content`.
    #[inline]
    pub const fn has_max_content_min(&self) -> bool {
        matches!(self.min, Dimension::MaxContent)
    }

    /// Min function is `auto`.
    #[inline]
    pub const fn has_auto_min(&self) -> bool {
        matches!(self.min, Dimension::Auto)
    }

    /// Max function depends on content.
    #[inline]
    pub const fn has_intrinsic_max(&self) -> bool {
        matches!(
            self.max,
            Dimension::Auto
                | Dimension::MinContent
                | Dimension::MaxContent
                | Dimension::FitContentPx(_)
        )
    }

    /// Max function is `max-content`, `auto` or `fit-content`.
    #[inline]
    pub const fn has_max_content_max(&self) -> bool {
        matches!(
            self.max,
            Dimension::Auto | Dimension::MaxContent | Dimension::FitContentPx(_)
        )
    }

    /// Max function is `auto`.
    #[inline]
    pub const fn has_auto_max(&self) -> bool {
        matches!(self.max, Dimension::Auto)
    }

    /// Max function is an `fr` value.
    #[inline]
    pub const fn is_flexible(&self) -> bool {
        matches!(self.max, Dimension::Fr(_))
    }

    /// The `fr` factor, or zero.
    #[inline]
    pub const fn flex_factor(&self) -> f32 {
        match self.max {
            Dimension::Fr(factor) => factor,
            _ => 0.0,
        }
    }

    /// The `fit-content()` limit, if any.
    #[inline]
    pub const fn fit_content_limit(&self) -> Option<f32> {
        match self.max {
            Dimension::FitContentPx(limit) => Some(limit),
            _ => None,
        }
    }

    /// The growth limit, or the base size while it is still infinite.
    #[inline]
    pub fn growth_limit_or_base(&self) -> f32 {
        if self.growth_limit.is_finite() {
            self.growth_limit
        } else {
            self.base_size
        }
    }
}

/// Size contributions of an item in the axis being sized.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#min-size-contribution>
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contributions {
    /// Outer size under a min-content constraint.
    pub min_content: f32,
    /// Outer size under a max-content constraint.
    pub max_content: f32,
    /// Outer minimum size (explicit or automatic).
    pub minimum: f32,
}

/// An in-flow child placed in the grid.
#[derive(Debug, Clone)]
pub struct GridItem {
    /// The child.
    pub node: NodeId,
    /// Visit index after `order` sorting.
    pub order: u32,
    /// Placement in origin-zero lines.
    pub area: GridArea,
    /// Column track indexes covered.
    pub columns: Line<usize>,
    /// Row track indexes covered.
    pub rows: Line<usize>,
    /// Margins resolved against the container width; `None` is `auto`.
    pub margin: Rect<Option<f32>>,
    /// Block-axis self alignment.
    pub align_self: AlignSelf,
    /// Inline-axis self alignment.
    pub justify_self: AlignSelf,
    /// Overflow of the item, deciding its automatic minimum size.
    pub overflow: Point<Overflow>,
    /// Whether the item spans an `fr` track, per axis.
    pub crosses_flexible_track: Size<bool>,
    /// Whether the item spans a content-sized track, per axis.
    pub crosses_intrinsic_track: Size<bool>,
    /// Contributions in the axis currently being sized.
    pub contributions: Option<Contributions>,
}

impl GridItem {
    /// Track indexes covered along `axis`.
    #[inline]
    pub const fn tracks(&self, axis: AbsoluteAxis) -> Line<usize> {
        match axis {
            AbsoluteAxis::Horizontal => self.columns,
            AbsoluteAxis::Vertical => self.rows,
        }
    }

    /// Number of tracks spanned along `axis`.
    #[inline]
    pub const fn span(&self, axis: AbsoluteAxis) -> usize {
        let tracks = self.tracks(axis);
        tracks.end - tracks.start
    }

    /// Sum of both margins along `axis`, `auto` counting as zero.
    #[inline]
    pub fn margin_sum(&self, axis: AbsoluteAxis) -> f32 {
        let margin = self.margin.axis(axis);
        margin.start.unwrap_or(0.0) + margin.end.unwrap_or(0.0)
    }

    /// True when the item is a scroll container along `axis`.
    #[inline]
    pub fn is_scroll_container(&self, axis: AbsoluteAxis) -> bool {
        self.overflow.get(axis).is_scroll_container()
    }
}
