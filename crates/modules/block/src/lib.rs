//! Block layout: in-flow children stacked top to bottom.
//!
//! Each in-flow child takes the container's content-box width unless it has
//! a width of its own, in which case horizontal `auto` margins center it.
//! Vertical margins between siblings are added, never collapsed.

mod items;
#[cfg(test)]
mod tests;

use trellis_geometry::{AbsoluteAxis, AvailableSpace, MaybeMath as _, Point, Rect, Size};
use trellis_style::{MaybeResolve as _, ResolveOrZero as _};
use trellis_tree::{
    AbsoluteContainer, Layout, LayoutInput, LayoutOutput, LayoutTree, NodeId, RunMode, SizingMode,
    content_size_contribution, layout_absolute_child, resolve_intrinsic_size,
};

use items::{BlockItem, collect_block_items};

/// Lay out `node` as a block container.
pub fn compute_block_layout(
    tree: &mut impl LayoutTree,
    node: NodeId,
    input: LayoutInput,
) -> LayoutOutput {
    let LayoutInput {
        known_dimensions,
        parent_size,
        available_space,
        run_mode,
        sizing_mode,
        ..
    } = input;
    let style = tree.style(node);

    let aspect_ratio = style.aspect_ratio;
    let margin = style.margin.resolve_or_zero(parent_size.width);
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let padding_border_size = (padding + border).sum_axes();
    let min_size = style
        .min_size
        .maybe_resolve(parent_size)
        .maybe_apply_aspect_ratio(aspect_ratio);
    let max_size = style
        .max_size
        .maybe_resolve(parent_size)
        .maybe_apply_aspect_ratio(aspect_ratio);
    let clamped_style_size = if sizing_mode == SizingMode::InherentSize {
        style
            .size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_clamp(min_size, max_size)
    } else {
        Size::NONE
    };

    // A max below the min pins the size.
    let min_max_definite_size = min_size.zip_map(max_size, |min, max| match (min, max) {
        (Some(min), Some(max)) if max <= min => Some(min),
        _ => None,
    });
    // Blocks fill the available width.
    let available_space_based_size = Size {
        width: available_space
            .width
            .into_option()
            .maybe_sub(margin.horizontal_axis_sum()),
        height: None,
    };
    let known_dimensions = known_dimensions
        .or(min_max_definite_size)
        .or(clamped_style_size)
        .or(available_space_based_size)
        .maybe_max(padding_border_size.map(Some));

    if run_mode == RunMode::ComputeSize
        && let Size {
            width: Some(width),
            height: Some(height),
        } = known_dimensions
    {
        return LayoutOutput::from_outer_size(Size { width, height });
    }

    log::debug!(
        target: "trellis::block",
        "[BLOCK] node={node} mode={run_mode:?} known={:?}x{:?}",
        known_dimensions.width,
        known_dimensions.height
    );
    compute_inner(
        tree,
        node,
        LayoutInput {
            known_dimensions,
            ..input
        },
        min_size,
        max_size,
    )
}

/// Stack the children of `node` once its outer size is as known as it gets.
fn compute_inner(
    tree: &mut impl LayoutTree,
    node: NodeId,
    input: LayoutInput,
    min_size: Size<Option<f32>>,
    max_size: Size<Option<f32>>,
) -> LayoutOutput {
    let LayoutInput {
        known_dimensions,
        parent_size,
        available_space,
        run_mode,
        ..
    } = input;
    let style = tree.style(node);
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let gutter = style.scrollbar_gutter();
    let overflow = style.overflow;
    let content_box_inset = Rect {
        right: padding.right + border.right + gutter.width,
        bottom: padding.bottom + border.bottom + gutter.height,
        ..(padding + border)
    };
    let inset_size = content_box_inset.sum_axes();
    let padding_border_size = (padding + border).sum_axes();

    let items = collect_block_items(&*tree, node);

    let container_outer_width = known_dimensions.width.unwrap_or_else(|| {
        let available_width = available_space.width.maybe_sub(inset_size.width);
        let content_width = content_based_width(tree, &items, available_width);
        (content_width + inset_size.width)
            .maybe_clamp(min_size.width, max_size.width)
            .max(padding_border_size.width)
    });

    if run_mode == RunMode::ComputeSize
        && let Some(height) = known_dimensions.height
    {
        return LayoutOutput::from_outer_size(Size {
            width: container_outer_width,
            height,
        });
    }

    let inner_size = Size {
        width: Some((container_outer_width - inset_size.width).max(0.0)),
        height: known_dimensions
            .height
            .map(|height| (height - inset_size.height).max(0.0)),
    };
    let stack = stack_items(tree, &items, inner_size, content_box_inset, available_space.height);

    let intrinsic_outer_height = stack.end_y + content_box_inset.bottom;
    let container_outer_height = known_dimensions.height.unwrap_or_else(|| {
        intrinsic_outer_height
            .maybe_clamp(min_size.height, max_size.height)
            .max(padding_border_size.height)
    });
    let final_size = Size {
        width: container_outer_width,
        height: container_outer_height,
    };

    if run_mode == RunMode::ComputeSize {
        return LayoutOutput::from_outer_size(final_size);
    }

    let mut content_size = stack.content_size;
    let container = AbsoluteContainer {
        size: final_size,
        border,
        scrollbar_gutter: gutter,
    };
    for item in items.iter().filter(|item| item.is_absolute) {
        let static_y = stack
            .static_positions
            .iter()
            .find(|(id, _)| *id == item.node)
            .map_or(content_box_inset.top, |(_, y)| *y);
        let contribution = layout_absolute_child(
            tree,
            item.node,
            item.order,
            &container,
            |_, child_margin| Point {
                x: content_box_inset.left + child_margin.left,
                y: static_y + child_margin.top,
            },
        );
        content_size = content_size.f32_max(contribution);
    }
    for item in items.iter().filter(|item| item.is_hidden) {
        tree.hide_child(item.node);
        tree.set_unrounded_layout(item.node, &Layout::with_order(item.order));
    }

    let content_size = Size {
        width: content_size.width + padding.right,
        height: content_size.height + padding.bottom,
    };
    log::debug!(
        target: "trellis::block",
        "[BLOCK] node={node} size={}x{} content={}x{} overflow={overflow:?}",
        final_size.width,
        final_size.height,
        content_size.width,
        content_size.height
    );
    LayoutOutput {
        size: final_size,
        content_size,
        first_baselines: Point {
            x: None,
            y: stack.first_baseline,
        },
    }
}

/// Widest margin box among in-flow items under `available_width`.
fn content_based_width(
    tree: &mut impl LayoutTree,
    items: &[BlockItem],
    available_width: AvailableSpace,
) -> f32 {
    let mut widest = 0.0_f32;
    for item in items.iter().filter(|item| item.is_in_flow()) {
        let margin_sum = item
            .margin
            .map(|edge| edge.unwrap_or(0.0))
            .horizontal_axis_sum();
        let known = item.size.maybe_clamp(item.min_size, item.max_size);
        let width = known.width.unwrap_or_else(|| {
            tree.measure_child_size(
                item.node,
                known,
                Size::NONE,
                Size {
                    width: available_width.maybe_sub(margin_sum),
                    height: AvailableSpace::MaxContent,
                },
                SizingMode::InherentSize,
                AbsoluteAxis::Horizontal,
            )
        });
        widest = widest.max(width.max(item.padding_border_size.width) + margin_sum);
    }
    widest
}

/// Result of stacking the in-flow items.
struct Stack {
    /// Bottom of the last margin box, from the border-box top.
    end_y: f32,
    /// Overflow extent of the in-flow items.
    content_size: Size<f32>,
    /// Where each absolute item would have started in flow.
    static_positions: Vec<(NodeId, f32)>,
    /// Baseline of the first in-flow item.
    first_baseline: Option<f32>,
}

/// Place in-flow items one under the other.
fn stack_items(
    tree: &mut impl LayoutTree,
    items: &[BlockItem],
    inner_size: Size<Option<f32>>,
    content_box_inset: Rect<f32>,
    available_height: AvailableSpace,
) -> Stack {
    let inner_width = inner_size.width.unwrap_or(0.0);
    let mut stack = Stack {
        end_y: content_box_inset.top,
        content_size: Size::ZERO,
        static_positions: Vec::new(),
        first_baseline: None,
    };
    for item in items {
        if item.is_absolute {
            stack.static_positions.push((item.node, stack.end_y));
            continue;
        }
        if item.is_hidden {
            continue;
        }
        let percent_basis = Size {
            width: Some(inner_width),
            height: inner_size.height,
        };
        let style = tree.style(item.node);
        let margin = style.margin.maybe_resolve(Size {
            width: Some(inner_width),
            height: Some(inner_width),
        });
        let size = style
            .size
            .maybe_resolve(percent_basis)
            .maybe_apply_aspect_ratio(style.aspect_ratio);
        let min_size = style.min_size.maybe_resolve(percent_basis);
        let max_size = style.max_size.maybe_resolve(percent_basis);
        let inset = style.inset.maybe_resolve(percent_basis);
        let padding = style.padding.resolve_or_zero(Some(inner_width));
        let border = style.border.resolve_or_zero(Some(inner_width));
        let scrollbar_size = style.scrollbar_gutter();
        let overflow = style.overflow;

        let fixed_margin = margin.map(|edge| edge.unwrap_or(0.0));
        let child_available = Size {
            width: AvailableSpace::Definite((inner_width - fixed_margin.horizontal_axis_sum()).max(0.0)),
            height: available_height.map_definite_value(|height| {
                (height - content_box_inset.vertical_axis_sum()).max(0.0)
            }),
        };
        let height = size.height.maybe_clamp(min_size.height, max_size.height);
        // Sizing keywords shrink the item to its content instead of filling the line.
        let width = size
            .width
            .maybe_clamp(min_size.width, max_size.width)
            .or_else(|| {
                resolve_intrinsic_size(
                    tree,
                    item.node,
                    AbsoluteAxis::Horizontal,
                    Size { width: None, height },
                    percent_basis,
                    child_available,
                )
            })
            .unwrap_or_else(|| {
                (inner_width - fixed_margin.horizontal_axis_sum()).maybe_clamp(min_size.width, max_size.width)
            });
        let known = Size {
            width: Some(width),
            height,
        };
        let output = tree.perform_child_layout(
            item.node,
            known,
            percent_basis,
            child_available,
            SizingMode::InherentSize,
        );
        let final_size = output.size;

        // Horizontal auto margins share the leftover width.
        let free_x = (inner_width - final_size.width - fixed_margin.horizontal_axis_sum()).max(0.0);
        let resolved_margin = match (margin.left, margin.right) {
            (None, None) => Rect {
                left: free_x / 2.0,
                right: free_x / 2.0,
                ..fixed_margin
            },
            (None, Some(right)) => Rect {
                left: free_x,
                right,
                ..fixed_margin
            },
            (Some(_), _) => fixed_margin,
        };

        let relative_offset = Point {
            x: inset.left.or(inset.right.map(|right| -right)).unwrap_or(0.0),
            y: inset.top.or(inset.bottom.map(|bottom| -bottom)).unwrap_or(0.0),
        };
        let location = Point {
            x: content_box_inset.left + resolved_margin.left + relative_offset.x,
            y: stack.end_y + resolved_margin.top + relative_offset.y,
        };
        log::trace!(
            target: "trellis::block",
            "[BLOCK-ITEM] child={} location=({}, {}) size={}x{}",
            item.node,
            location.x,
            location.y,
            final_size.width,
            final_size.height
        );
        tree.set_unrounded_layout(
            item.node,
            &Layout {
                order: item.order,
                location,
                size: final_size,
                content_size: output.content_size,
                scrollbar_size,
                border,
                padding,
                margin: resolved_margin,
            },
        );
        if stack.first_baseline.is_none() {
            stack.first_baseline = output.first_baselines.y.map(|baseline| location.y + baseline);
        }
        stack.content_size = stack.content_size.f32_max(content_size_contribution(
            location,
            final_size,
            output.content_size,
            overflow,
        ));
        stack.end_y += resolved_margin.top + final_size.height + resolved_margin.bottom;
    }
    stack
}
