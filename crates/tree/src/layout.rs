//! Inputs and outputs of a single layout call, and the stored per-node result.

use trellis_geometry::{AvailableSpace, Point, Rect, Size};

/// What a layout call must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunMode {
    /// Size the node and position all of its descendants.
    PerformLayout,
    /// Only report the node's size.
    ComputeSize,
    /// The node is `display: none`; zero it and its subtree.
    PerformHiddenLayout,
}

/// Whether the node's own size styles apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizingMode {
    /// Size from content only; the caller has already folded in any style sizes.
    ContentSize,
    /// Apply the node's `width`/`height`/`min`/`max` styles.
    InherentSize,
}

/// The axis a size request is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestedAxis {
    /// Only the width matters.
    Horizontal,
    /// Only the height matters.
    Vertical,
    /// Both matter.
    Both,
}

/// Everything a layout algorithm receives for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    /// What to produce.
    pub run_mode: RunMode,
    /// Whether style sizes apply.
    pub sizing_mode: SizingMode,
    /// Which axis the caller needs.
    pub axis: RequestedAxis,
    /// Border-box sizes fixed by the caller.
    pub known_dimensions: Size<Option<f32>>,
    /// Containing block size, for percentages.
    pub parent_size: Size<Option<f32>>,
    /// Space offered to the node's margin box.
    pub available_space: Size<AvailableSpace>,
}

impl LayoutInput {
    /// Input used to hide a subtree.
    pub const HIDDEN: Self = Self {
        run_mode: RunMode::PerformHiddenLayout,
        sizing_mode: SizingMode::InherentSize,
        axis: RequestedAxis::Both,
        known_dimensions: Size::NONE,
        parent_size: Size::NONE,
        available_space: Size {
            width: AvailableSpace::MaxContent,
            height: AvailableSpace::MaxContent,
        },
    };
}

/// What a layout algorithm reports back to its caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOutput {
    /// Border-box size.
    pub size: Size<f32>,
    /// Extent of the node's scrollable overflow.
    pub content_size: Size<f32>,
    /// First baselines measured from the border-box top/left, when known.
    pub first_baselines: Point<Option<f32>>,
}

impl LayoutOutput {
    /// Output of a hidden node.
    pub const HIDDEN: Self = Self {
        size: Size::ZERO,
        content_size: Size::ZERO,
        first_baselines: Point::NONE,
    };

    /// An output carrying only a size.
    #[inline]
    pub const fn from_outer_size(size: Size<f32>) -> Self {
        Self {
            size,
            content_size: Size::ZERO,
            first_baselines: Point::NONE,
        }
    }

    /// An output with a size and a content size.
    #[inline]
    pub const fn from_sizes(size: Size<f32>, content_size: Size<f32>) -> Self {
        Self {
            size,
            content_size,
            first_baselines: Point::NONE,
        }
    }
}

/// The final box of one node, relative to its parent's border box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Position among siblings after `order` sorting; storage order is unaffected.
    pub order: u32,
    /// Top-left corner of the border box.
    pub location: Point<f32>,
    /// Border-box size.
    pub size: Size<f32>,
    /// Scrollable overflow extent.
    pub content_size: Size<f32>,
    /// Gutters reserved for scrollbars.
    pub scrollbar_size: Size<f32>,
    /// Resolved border widths.
    pub border: Rect<f32>,
    /// Resolved paddings.
    pub padding: Rect<f32>,
    /// Resolved margins.
    pub margin: Rect<f32>,
}

impl Default for Layout {
    #[inline]
    fn default() -> Self {
        Self::with_order(0)
    }
}

impl Layout {
    /// A zero-sized layout at the origin.
    #[inline]
    pub const fn with_order(order: u32) -> Self {
        Self {
            order,
            location: Point::ZERO,
            size: Size::ZERO,
            content_size: Size::ZERO,
            scrollbar_size: Size::ZERO,
            border: Rect::ZERO,
            padding: Rect::ZERO,
            margin: Rect::ZERO,
        }
    }

    /// Width of the content box.
    #[inline]
    pub fn content_box_width(&self) -> f32 {
        self.size.width
            - self.padding.horizontal_axis_sum()
            - self.border.horizontal_axis_sum()
            - self.scrollbar_size.width
    }

    /// Height of the content box.
    #[inline]
    pub fn content_box_height(&self) -> f32 {
        self.size.height
            - self.padding.vertical_axis_sum()
            - self.border.vertical_axis_sum()
            - self.scrollbar_size.height
    }

    /// True when every coordinate is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.location.x.is_finite()
            && self.location.y.is_finite()
            && self.size.is_finite()
            && self.content_size.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if the content box does not exclude padding, border and gutter.
    fn content_box_excludes_insets() {
        let layout = Layout {
            size: Size {
                width: 100.0,
                height: 50.0,
            },
            padding: Rect {
                left: 5.0,
                right: 5.0,
                top: 2.0,
                bottom: 2.0,
            },
            border: Rect {
                left: 1.0,
                right: 1.0,
                top: 1.0,
                bottom: 1.0,
            },
            scrollbar_size: Size {
                width: 8.0,
                height: 0.0,
            },
            ..Layout::default()
        };
        assert!((layout.content_box_width() - 80.0).abs() < f32::EPSILON);
        assert!((layout.content_box_height() - 44.0).abs() < f32::EPSILON);
        assert!(layout.is_finite());
    }
}
