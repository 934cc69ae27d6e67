//! Axis resolution and ordering utilities
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#box-model>
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#propdef-order>

use trellis_geometry::{AbsoluteAxis, Rect, Size};
use trellis_style::{FlexDirection, FlexWrap};
use trellis_tree::{LayoutTree, NodeId};

/// Resolved axes for a flex container.
///
/// The algorithm works in flex-relative coordinates: offsets grow from the
/// main-start and cross-start edges. Reversed axes are mirrored back into
/// physical coordinates only when items are finally placed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FlexAxes {
    /// Physical axis the main axis runs along.
    pub main: AbsoluteAxis,
    /// Physical axis the cross axis runs along.
    pub cross: AbsoluteAxis,
    /// Main-start sits on the physical end edge (`row-reverse`, `column-reverse`).
    pub main_reversed: bool,
    /// Cross-start sits on the physical end edge (`wrap-reverse`).
    pub cross_reversed: bool,
    /// Items may wrap onto several lines.
    pub is_wrap: bool,
}

impl FlexAxes {
    /// Resolve main/cross axes and direction given flex-direction and flex-wrap.
    ///
    /// Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-direction-property>
    pub const fn resolve(direction: FlexDirection, wrap: FlexWrap) -> Self {
        let main = if direction.is_row() {
            AbsoluteAxis::Horizontal
        } else {
            AbsoluteAxis::Vertical
        };
        Self {
            main,
            cross: main.other(),
            main_reversed: direction.is_reverse(),
            cross_reversed: matches!(wrap, FlexWrap::WrapReverse),
            is_wrap: !matches!(wrap, FlexWrap::NoWrap),
        }
    }

    /// True when the main axis is horizontal.
    #[inline]
    pub const fn is_row(&self) -> bool {
        self.main.is_horizontal()
    }

    /// Main-axis component of `size`.
    #[inline]
    pub fn main<T>(&self, size: Size<T>) -> T {
        size.get(self.main)
    }

    /// Cross-axis component of `size`.
    #[inline]
    pub fn cross<T>(&self, size: Size<T>) -> T {
        size.get(self.cross)
    }

    /// Build a size from main and cross components.
    #[inline]
    pub fn size<T>(&self, main: T, cross: T) -> Size<T> {
        Size::from_axes(self.main, main, cross)
    }

    /// The edge of `rect` on the main-start side.
    #[inline]
    pub fn main_start<T: Copy>(&self, rect: Rect<T>) -> T {
        if self.main_reversed {
            rect.end(self.main)
        } else {
            rect.start(self.main)
        }
    }

    /// The edge of `rect` on the main-end side.
    #[inline]
    pub fn main_end<T: Copy>(&self, rect: Rect<T>) -> T {
        if self.main_reversed {
            rect.start(self.main)
        } else {
            rect.end(self.main)
        }
    }

    /// The edge of `rect` on the cross-start side.
    #[inline]
    pub fn cross_start<T: Copy>(&self, rect: Rect<T>) -> T {
        if self.cross_reversed {
            rect.end(self.cross)
        } else {
            rect.start(self.cross)
        }
    }

    /// The edge of `rect` on the cross-end side.
    #[inline]
    pub fn cross_end<T: Copy>(&self, rect: Rect<T>) -> T {
        if self.cross_reversed {
            rect.start(self.cross)
        } else {
            rect.end(self.cross)
        }
    }

    /// Sum of both main-axis edges of `rect`.
    #[inline]
    pub fn main_sum(&self, rect: Rect<f32>) -> f32 {
        rect.axis_sum(self.main)
    }

    /// Sum of both cross-axis edges of `rect`.
    #[inline]
    pub fn cross_sum(&self, rect: Rect<f32>) -> f32 {
        rect.axis_sum(self.cross)
    }
}

/// Children of `node` in `order`-modified document order.
///
/// Returns `(child, visit_index)` pairs; ties keep storage order.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#order-property>
pub fn sort_children_by_order(tree: &impl LayoutTree, node: NodeId) -> Vec<(NodeId, u32)> {
    let mut keyed: Vec<(i32, usize, NodeId)> = tree
        .children(node)
        .iter()
        .enumerate()
        .map(|(index, &child)| (tree.style(child).order, index, child))
        .collect();
    keyed.sort_by_key(|&(order, index, _)| (order, index));
    keyed
        .into_iter()
        .enumerate()
        .map(|(visit, (_, _, child))| (child, visit as u32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if row-reverse does not swap the main-axis edges.
    fn row_reverse_swaps_main_edges() {
        let axes = FlexAxes::resolve(FlexDirection::RowReverse, FlexWrap::NoWrap);
        let rect = Rect {
            left: 1.0_f32,
            right: 2.0,
            top: 3.0,
            bottom: 4.0,
        };
        assert!(axes.is_row());
        assert!((axes.main_start(rect) - 2.0).abs() < f32::EPSILON);
        assert!((axes.cross_start(rect) - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    /// # Panics
    /// Panics if a column container does not map main to the vertical axis.
    fn column_wrap_reverse_axes() {
        let axes = FlexAxes::resolve(FlexDirection::Column, FlexWrap::WrapReverse);
        assert_eq!(axes.main, AbsoluteAxis::Vertical);
        assert!(axes.cross_reversed && axes.is_wrap);
        let size = axes.size(10.0_f32, 20.0);
        assert!((size.height - 10.0).abs() < f32::EPSILON);
    }
}
