//! Fully resolved per-node layout style.
//!
//! A [`Style`] describes one node: its display mode, box model, sizing,
//! flex and grid properties and alignment. Styles are plain values with
//! explicit defaults; there is no cascade or inheritance.

mod dimension;
mod enums;
mod grid;
mod validate;

use trellis_geometry::{Point, Rect, Size};

pub use dimension::{
    Dimension, MaybeResolve, ResolveOrZero, Unit, length_size, uniform_edges,
};
pub use enums::{
    AlignContent, AlignItems, AlignSelf, Display, FlexDirection, FlexWrap, GridAutoFlow,
    JustifyContent, JustifyItems, JustifySelf, Overflow, Position,
};
pub use grid::{GridPlacement, RepeatCount, TrackEntry, TrackSize};
pub use validate::{
    Edge, NumericProblem, StyleError, StyleField, check_dimension, check_number, check_track,
};

/// The layout properties of one node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Style {
    /// Layout algorithm for this node's children.
    pub display: Display,
    /// In-flow or absolutely positioned.
    pub position: Position,
    /// Overflow handling per axis.
    pub overflow: Point<Overflow>,
    /// Gutter reserved for scrollbars when overflow is [`Overflow::Scroll`].
    pub scrollbar_width: f32,

    /// Border-box size.
    pub size: Size<Dimension>,
    /// Minimum border-box size.
    pub min_size: Size<Dimension>,
    /// Maximum border-box size.
    pub max_size: Size<Dimension>,
    /// Preferred width / height ratio.
    pub aspect_ratio: Option<f32>,

    /// Outer spacing; percentages resolve against the containing block width.
    pub margin: Rect<Dimension>,
    /// Inner spacing; percentages resolve against the containing block width.
    pub padding: Rect<Dimension>,
    /// Border widths; percentages resolve against the containing block width.
    pub border: Rect<Dimension>,
    /// Offsets for relative and absolute positioning.
    pub inset: Rect<Dimension>,
    /// Gutters between flex items and grid tracks (`width` is the column gap).
    pub gap: Size<Dimension>,

    /// Flex main axis and direction.
    pub flex_direction: FlexDirection,
    /// Flex line wrapping.
    pub flex_wrap: FlexWrap,
    /// Share of positive free space.
    pub flex_grow: f32,
    /// Share of negative free space, weighted by base size.
    pub flex_shrink: f32,
    /// Initial main size.
    pub flex_basis: Dimension,
    /// Visit order for flex items and grid auto-placement.
    pub order: i32,

    /// Explicit row tracks.
    pub grid_template_rows: Vec<TrackEntry>,
    /// Explicit column tracks.
    pub grid_template_columns: Vec<TrackEntry>,
    /// Sizes cycled through for implicit rows.
    pub grid_auto_rows: Vec<TrackSize>,
    /// Sizes cycled through for implicit columns.
    pub grid_auto_columns: Vec<TrackSize>,
    /// Auto-placement direction and packing.
    pub grid_auto_flow: GridAutoFlow,
    /// Row placement of this item.
    pub grid_row: GridPlacement,
    /// Column placement of this item.
    pub grid_column: GridPlacement,

    /// Default cross-axis / block-axis alignment of children.
    pub align_items: AlignItems,
    /// This item's cross-axis / block-axis alignment; `None` defers to the parent.
    pub align_self: Option<AlignSelf>,
    /// Distribution of lines or rows.
    pub align_content: AlignContent,
    /// Default inline-axis alignment of grid children.
    pub justify_items: JustifyItems,
    /// This grid item's inline-axis alignment; `None` defers to the parent.
    pub justify_self: Option<JustifySelf>,
    /// Distribution of flex items or columns.
    pub justify_content: JustifyContent,
}

impl Style {
    /// The initial value of every property.
    pub const DEFAULT: Self = Self {
        display: Display::DEFAULT,
        position: Position::DEFAULT,
        overflow: Point {
            x: Overflow::Visible,
            y: Overflow::Visible,
        },
        scrollbar_width: 0.0,
        size: Size {
            width: Dimension::Auto,
            height: Dimension::Auto,
        },
        min_size: Size {
            width: Dimension::Auto,
            height: Dimension::Auto,
        },
        max_size: Size {
            width: Dimension::None,
            height: Dimension::None,
        },
        aspect_ratio: None,
        margin: uniform_edges(0.0),
        padding: uniform_edges(0.0),
        border: uniform_edges(0.0),
        inset: Rect {
            left: Dimension::Auto,
            right: Dimension::Auto,
            top: Dimension::Auto,
            bottom: Dimension::Auto,
        },
        gap: Size {
            width: Dimension::ZERO,
            height: Dimension::ZERO,
        },
        flex_direction: FlexDirection::DEFAULT,
        flex_wrap: FlexWrap::DEFAULT,
        flex_grow: 0.0,
        flex_shrink: 1.0,
        flex_basis: Dimension::Auto,
        order: 0,
        grid_template_rows: Vec::new(),
        grid_template_columns: Vec::new(),
        grid_auto_rows: Vec::new(),
        grid_auto_columns: Vec::new(),
        grid_auto_flow: GridAutoFlow::DEFAULT,
        grid_row: GridPlacement::AUTO,
        grid_column: GridPlacement::AUTO,
        align_items: AlignItems::DEFAULT,
        align_self: None,
        align_content: AlignContent::DEFAULT,
        justify_items: JustifyItems::DEFAULT,
        justify_self: None,
        justify_content: JustifyContent::DEFAULT,
    };

    /// True when the node is out of flow.
    #[inline]
    pub const fn is_absolute(&self) -> bool {
        matches!(self.position, Position::Absolute)
    }

    /// True when the node generates no box.
    #[inline]
    pub const fn is_hidden(&self) -> bool {
        matches!(self.display, Display::None)
    }

    /// Space reserved for scrollbars: a vertical scrollbar takes width and a
    /// horizontal one takes height.
    #[inline]
    pub fn scrollbar_gutter(&self) -> Size<f32> {
        let gutter = |overflow: Overflow| {
            if overflow == Overflow::Scroll {
                self.scrollbar_width
            } else {
                0.0
            }
        };
        Size {
            width: gutter(self.overflow.y),
            height: gutter(self.overflow.x),
        }
    }

    /// The automatic minimum size implied by `overflow`, per axis.
    #[inline]
    pub fn automatic_min_size(&self) -> Size<Option<f32>> {
        Size {
            width: self.overflow.x.automatic_min_size(),
            height: self.overflow.y.automatic_min_size(),
        }
    }

    /// True when a change from `self` to `other` can alter the space offered to children.
    pub fn affects_children(&self, other: &Self) -> bool {
        self.display != other.display
            || self.position != other.position
            || self.overflow != other.overflow
            || self.scrollbar_width.to_bits() != other.scrollbar_width.to_bits()
            || self.size != other.size
            || self.min_size != other.min_size
            || self.max_size != other.max_size
            || self.aspect_ratio != other.aspect_ratio
            || self.padding != other.padding
            || self.border != other.border
            || self.inset != other.inset
            || self.gap != other.gap
            || self.flex_direction != other.flex_direction
            || self.flex_wrap != other.flex_wrap
            || self.grid_template_rows != other.grid_template_rows
            || self.grid_template_columns != other.grid_template_columns
            || self.grid_auto_rows != other.grid_auto_rows
            || self.grid_auto_columns != other.grid_auto_columns
            || self.grid_auto_flow != other.grid_auto_flow
            || self.align_items != other.align_items
            || self.justify_items != other.justify_items
            || self.align_content != other.align_content
            || self.justify_content != other.justify_content
    }
}

impl Default for Style {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
