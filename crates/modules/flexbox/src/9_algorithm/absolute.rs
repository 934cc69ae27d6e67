//! Absolutely-positioned children of a flex container
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#abspos-items>

use trellis_geometry::{Point, Size};
use trellis_tree::{AbsoluteContainer, LayoutTree, NodeId, compute_alignment_offset, layout_absolute_child};

use super::AlgoConstants;
use super::cross_alignment::{self_alignment_offset, to_physical};

/// Lay out every absolutely positioned child and return their overflow extent.
///
/// An axis without insets takes the static position: the place the child
/// would have if it were the container's sole flex item, aligned by
/// `justify-content` and its own `align-self`.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#abspos-items>
pub fn perform_absolute_layout_on_absolute_children(
    tree: &mut impl LayoutTree,
    children: &[(NodeId, u32)],
    constants: &AlgoConstants,
) -> Size<f32> {
    let axes = constants.axes;
    let inner = constants.inner_container_size;
    let inset = constants.content_box_inset;
    let container = AbsoluteContainer {
        size: constants.container_size,
        border: constants.border,
        scrollbar_gutter: constants.scrollbar_gutter,
    };

    let mut content_size = Size::ZERO;
    for &(child, order) in children {
        let style = tree.style(child);
        if style.is_hidden() || !style.is_absolute() {
            continue;
        }
        let align_self = style.align_self.unwrap_or(constants.align_items);

        let contribution = layout_absolute_child(tree, child, order, &container, |size, margin| {
            let main_free = axes.main(inner) - axes.main(size) - axes.main_sum(margin);
            let main_offset = compute_alignment_offset(
                main_free,
                1,
                0.0,
                constants.justify_content,
                axes.main_reversed,
                true,
            ) + axes.main_start(margin);
            let cross_free = axes.cross(inner) - axes.cross(size) - axes.cross_sum(margin);
            let cross_offset =
                self_alignment_offset(align_self, cross_free, axes.cross_reversed) + axes.cross_start(margin);

            let mut location = Point::ZERO;
            location.set(
                axes.main,
                inset.start(axes.main)
                    + to_physical(main_offset, axes.main(size), axes.main(inner), axes.main_reversed),
            );
            location.set(
                axes.cross,
                inset.start(axes.cross)
                    + to_physical(cross_offset, axes.cross(size), axes.cross(inner), axes.cross_reversed),
            );
            location
        });
        content_size = content_size.f32_max(contribution);
    }
    content_size
}
