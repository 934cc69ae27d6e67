//! Snapping computed layouts to whole pixels.
//!
//! Edges are rounded in absolute coordinates and sizes are derived from the
//! rounded edges, so neighbouring boxes never gap or overlap after rounding.

use trellis_tree::{Layout, NodeId};

use crate::arena::Arena;
use crate::engine::NodeData;

/// Round every layout under `root` into the final layouts.
pub(crate) fn round_layouts(nodes: &mut Arena<NodeData>, root: NodeId) {
    let mut pending = vec![(root, 0.0_f32, 0.0_f32)];
    while let Some((node, parent_x, parent_y)) = pending.pop() {
        let Some(data) = nodes.get_mut(node) else {
            continue;
        };
        let unrounded = data.unrounded_layout;
        let cumulative_x = parent_x + unrounded.location.x;
        let cumulative_y = parent_y + unrounded.location.y;
        data.final_layout = round_one(&unrounded, cumulative_x, cumulative_y);
        pending.extend(
            data.children
                .iter()
                .map(|child| (*child, cumulative_x, cumulative_y)),
        );
    }
}

/// Copy unrounded layouts into the final layouts under `root`.
pub(crate) fn copy_unrounded_layouts(nodes: &mut Arena<NodeData>, root: NodeId) {
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        if let Some(data) = nodes.get_mut(node) {
            data.final_layout = data.unrounded_layout;
            pending.extend(data.children.iter().copied());
        }
    }
}

/// Round one layout whose border box starts at (`cumulative_x`, `cumulative_y`).
fn round_one(unrounded: &Layout, cumulative_x: f32, cumulative_y: f32) -> Layout {
    let span = |start: f32, length: f32| (start + length).round() - start.round();
    let width = unrounded.size.width;
    let height = unrounded.size.height;
    let border = unrounded.border;
    let padding = unrounded.padding;

    let mut layout = *unrounded;
    layout.location.x = unrounded.location.x.round();
    layout.location.y = unrounded.location.y.round();
    layout.size.width = span(cumulative_x, width);
    layout.size.height = span(cumulative_y, height);
    layout.scrollbar_size.width = unrounded.scrollbar_size.width.round();
    layout.scrollbar_size.height = unrounded.scrollbar_size.height.round();
    layout.content_size.width = span(cumulative_x, unrounded.content_size.width);
    layout.content_size.height = span(cumulative_y, unrounded.content_size.height);

    layout.border.left = span(cumulative_x, border.left);
    layout.border.right = span(cumulative_x + width - border.right, border.right);
    layout.border.top = span(cumulative_y, border.top);
    layout.border.bottom = span(cumulative_y + height - border.bottom, border.bottom);

    layout.padding.left = span(cumulative_x + border.left, padding.left);
    layout.padding.right = span(
        cumulative_x + width - border.right - padding.right,
        padding.right,
    );
    layout.padding.top = span(cumulative_y + border.top, padding.top);
    layout.padding.bottom = span(
        cumulative_y + height - border.bottom - padding.bottom,
        padding.bottom,
    );
    layout
}
