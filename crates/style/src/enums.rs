//! Keyword properties: display, positioning, overflow, flex and alignment.

use crate::StyleError;

/// Declare a keyword enum that can be decoded from its binding-layer discriminant.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)? }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        impl $name {
            /// The value a fresh style starts with.
            pub const DEFAULT: Self = Self::$default;
        }

        impl TryFrom<u8> for $name {
            type Error = StyleError;

            #[inline]
            fn try_from(value: u8) -> Result<Self, StyleError> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(StyleError::InvalidEnumValue {
                        enum_name: stringify!($name),
                        value,
                    }),
                }
            }
        }
    };
}

keyword_enum! {
    /// Which layout algorithm lays out a node's children.
    Display {
        /// Vertical stacking.
        Block = 0,
        /// Flexbox.
        #[default]
        Flex = 1,
        /// CSS grid.
        Grid = 2,
        /// The node and its subtree take no space.
        None = 3,
    }
    default Flex
}

keyword_enum! {
    /// Whether a node participates in its parent's flow.
    Position {
        /// In flow, offset by insets after layout.
        #[default]
        Relative = 0,
        /// Out of flow, placed against the parent's padding box.
        Absolute = 1,
    }
    default Relative
}

keyword_enum! {
    /// How content overflowing a box is handled in one axis.
    Overflow {
        /// Content may spill out; contributes to the automatic minimum size.
        #[default]
        Visible = 0,
        /// Clipped without scrolling.
        Clip = 1,
        /// Clipped, scrollable programmatically.
        Hidden = 2,
        /// Clipped with a scrollbar gutter reserved.
        Scroll = 3,
    }
    default Visible
}

impl Overflow {
    /// Scroll containers have a zero automatic minimum size; visible boxes have none.
    #[inline]
    pub const fn automatic_min_size(self) -> Option<f32> {
        match self {
            Self::Visible => None,
            Self::Clip | Self::Hidden | Self::Scroll => Some(0.0),
        }
    }

    /// True for anything but [`Overflow::Visible`].
    #[inline]
    pub const fn is_scroll_container(self) -> bool {
        !matches!(self, Self::Visible)
    }
}

keyword_enum! {
    /// The main axis of a flex container and its direction.
    FlexDirection {
        /// Left to right.
        #[default]
        Row = 0,
        /// Top to bottom.
        Column = 1,
        /// Right to left.
        RowReverse = 2,
        /// Bottom to top.
        ColumnReverse = 3,
    }
    default Row
}

impl FlexDirection {
    /// True for the horizontal directions.
    #[inline]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// True for the reversed directions.
    #[inline]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

keyword_enum! {
    /// Whether flex items may wrap onto several lines.
    FlexWrap {
        /// Single line.
        #[default]
        NoWrap = 0,
        /// Lines stack in the cross direction.
        Wrap = 1,
        /// Lines stack against the cross direction.
        WrapReverse = 2,
    }
    default NoWrap
}

keyword_enum! {
    /// Auto-placement direction and packing for grid items.
    GridAutoFlow {
        /// Fill rows, advancing a cursor.
        #[default]
        Row = 0,
        /// Fill columns, advancing a cursor.
        Column = 1,
        /// Fill rows, back-filling earlier holes.
        RowDense = 2,
        /// Fill columns, back-filling earlier holes.
        ColumnDense = 3,
    }
    default Row
}

impl GridAutoFlow {
    /// True for the dense variants.
    #[inline]
    pub const fn is_dense(self) -> bool {
        matches!(self, Self::RowDense | Self::ColumnDense)
    }

    /// True when auto-placement walks along rows.
    #[inline]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowDense)
    }
}

keyword_enum! {
    /// Per-item alignment inside a line or grid area.
    AlignItems {
        /// Context-dependent; never stretches here.
        #[default]
        Normal = 0,
        /// Pack to the start edge.
        Start = 1,
        /// Pack to the end edge.
        End = 2,
        /// Pack to the flex-relative start edge.
        FlexStart = 3,
        /// Pack to the flex-relative end edge.
        FlexEnd = 4,
        /// Center.
        Center = 5,
        /// Align first baselines.
        Baseline = 6,
        /// Fill the line or area when the cross size is auto.
        Stretch = 7,
    }
    default Normal
}

keyword_enum! {
    /// Distribution of lines or tracks inside a container.
    AlignContent {
        /// Context-dependent default.
        #[default]
        Normal = 0,
        /// Pack to the start edge.
        Start = 1,
        /// Pack to the end edge.
        End = 2,
        /// Pack to the flex-relative start edge.
        FlexStart = 3,
        /// Pack to the flex-relative end edge.
        FlexEnd = 4,
        /// Center.
        Center = 5,
        /// Grow lines or auto tracks to fill.
        Stretch = 6,
        /// First and last flush, equal gaps between.
        SpaceBetween = 7,
        /// Equal gaps around, half-size at the edges.
        SpaceAround = 8,
        /// Equal gaps everywhere.
        SpaceEvenly = 9,
    }
    default Normal
}

/// Self alignment shares the item keyword set.
pub type AlignSelf = AlignItems;
/// Inline-axis item alignment shares the item keyword set.
pub type JustifyItems = AlignItems;
/// Inline-axis self alignment shares the item keyword set.
pub type JustifySelf = AlignItems;
/// Main-axis distribution shares the content keyword set.
pub type JustifyContent = AlignContent;
