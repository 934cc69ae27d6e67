//! The flex layout algorithm
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#layout-algorithm>

mod absolute;
mod base_size;
mod cross_alignment;
mod cross_size;
mod flexible_lengths;
mod lines;
mod main_alignment;
#[cfg(test)]
mod tests;

use trellis_geometry::{Point, Rect, Size};
use trellis_style::{AlignContent, AlignItems, JustifyContent, MaybeResolve as _, ResolveOrZero as _, Style};
use trellis_tree::{Layout, LayoutInput, LayoutOutput, LayoutTree, NodeId, RunMode};

use crate::chapter6::{FlexItem, generate_flex_items, resolve_intrinsic_item_sizes};
use crate::chapter7::{FlexAxes, sort_children_by_order};

/// A run of items laid out along one main-axis line.
pub struct FlexLine<'items> {
    /// Items of the line, in `order`-modified document order.
    pub items: &'items mut [FlexItem],
    /// Cross size of the line.
    pub cross_size: f32,
    /// Cross-axis space placed before the line.
    pub offset_cross: f32,
}

/// Container values fixed for one run of the algorithm.
#[derive(Debug, Clone, Copy)]
pub struct AlgoConstants {
    /// Main and cross axes.
    pub axes: FlexAxes,
    /// Container minimum size.
    pub min_size: Size<Option<f32>>,
    /// Container maximum size.
    pub max_size: Size<Option<f32>>,
    /// Container margins.
    pub margin: Rect<f32>,
    /// Container borders.
    pub border: Rect<f32>,
    /// Padding plus border plus scrollbar gutters.
    pub content_box_inset: Rect<f32>,
    /// Scrollbar gutters of the container.
    pub scrollbar_gutter: Size<f32>,
    /// Resolved gaps.
    pub gap: Size<f32>,
    /// Default cross-axis alignment of items.
    pub align_items: AlignItems,
    /// Distribution of lines in the cross axis.
    pub align_content: AlignContent,
    /// Distribution of items in the main axis.
    pub justify_content: JustifyContent,
    /// Outer size, where known.
    pub node_outer_size: Size<Option<f32>>,
    /// Content-box size, where known.
    pub node_inner_size: Size<Option<f32>>,
    /// Final outer size, filled in as the algorithm determines it.
    pub container_size: Size<f32>,
    /// Final content-box size, filled in as the algorithm determines it.
    pub inner_container_size: Size<f32>,
}

/// Resolve everything about the container that does not depend on its items.
fn compute_constants(
    style: &Style,
    known_dimensions: Size<Option<f32>>,
    parent_size: Size<Option<f32>>,
) -> AlgoConstants {
    let axes = FlexAxes::resolve(style.flex_direction, style.flex_wrap);
    let aspect_ratio = style.aspect_ratio;
    let margin = style.margin.resolve_or_zero(parent_size.width);
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let scrollbar_gutter = style.scrollbar_gutter();
    let content_box_inset = Rect {
        right: padding.right + border.right + scrollbar_gutter.width,
        bottom: padding.bottom + border.bottom + scrollbar_gutter.height,
        ..(padding + border)
    };

    let node_outer_size = known_dimensions;
    let node_inner_size = node_outer_size.zip_map(content_box_inset.sum_axes(), |outer, inset| {
        outer.map(|outer| (outer - inset).max(0.0))
    });
    let gap = style.gap.resolve_or_zero(node_inner_size);

    AlgoConstants {
        axes,
        min_size: style
            .min_size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(aspect_ratio),
        max_size: style
            .max_size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(aspect_ratio),
        margin,
        border,
        content_box_inset,
        scrollbar_gutter,
        gap,
        align_items: style.align_items,
        align_content: style.align_content,
        justify_content: style.justify_content,
        node_outer_size,
        node_inner_size,
        container_size: Size::ZERO,
        inner_container_size: Size::ZERO,
    }
}

/// Sum of the gaps between `count` items.
#[inline]
pub fn sum_axis_gaps(gap: f32, count: usize) -> f32 {
    if count <= 1 {
        0.0
    } else {
        gap * (count - 1) as f32
    }
}

/// Run the algorithm once the container's own size is as known as it gets.
pub fn compute_preliminary(
    tree: &mut impl LayoutTree,
    node: NodeId,
    input: LayoutInput,
) -> LayoutOutput {
    let LayoutInput {
        known_dimensions,
        parent_size,
        available_space,
        run_mode,
        ..
    } = input;

    let style = tree.style(node);
    let mut constants = compute_constants(style, known_dimensions, parent_size);
    let axes = constants.axes;

    // 9.1. Initial Setup
    let children = sort_children_by_order(&*tree, node);
    let mut flex_items =
        generate_flex_items(&*tree, &children, constants.node_inner_size, constants.align_items);

    // 9.2. Line Length Determination
    let available_space = base_size::determine_available_space(known_dimensions, available_space, &constants);
    resolve_intrinsic_item_sizes(tree, &mut flex_items, constants.node_inner_size, available_space);
    base_size::determine_flex_base_size(tree, &constants, available_space, &mut flex_items);

    // 9.3. Main Size Determination
    let mut flex_lines = lines::collect_flex_lines(&constants, available_space, &mut flex_items);

    if let Some(inner_main_size) = axes.main(constants.node_inner_size) {
        let outer_main_size = inner_main_size + axes.main_sum(constants.content_box_inset);
        constants.inner_container_size.set(axes.main, inner_main_size);
        constants.container_size.set(axes.main, outer_main_size);
    } else {
        lines::determine_container_main_size(tree, available_space, &mut flex_lines, &mut constants);
        constants
            .node_inner_size
            .set(axes.main, Some(axes.main(constants.inner_container_size)));
        constants
            .node_outer_size
            .set(axes.main, Some(axes.main(constants.container_size)));

        // Percentage gaps resolve now that the main size is known.
        let style = tree.style(node);
        let main_gap = axes
            .main(style.gap)
            .resolve_or_zero(Some(axes.main(constants.inner_container_size)));
        constants.gap.set(axes.main, main_gap);
    }

    for line in &mut flex_lines {
        flexible_lengths::resolve_flexible_lengths(line, &constants);
    }

    // 9.4. Cross Size Determination
    for line in &mut flex_lines {
        cross_size::determine_hypothetical_cross_size(tree, line, &constants, available_space);
    }
    cross_size::calculate_children_base_lines(tree, known_dimensions, available_space, &mut flex_lines, &constants);
    cross_size::calculate_cross_size(&mut flex_lines, known_dimensions, &constants);
    cross_size::handle_align_content_stretch(&mut flex_lines, known_dimensions, &constants);
    cross_size::determine_used_cross_size(&*tree, &mut flex_lines, &constants);

    // 9.5. Main-Axis Alignment
    main_alignment::distribute_remaining_free_space(&mut flex_lines, &constants);

    // 9.6. Cross-Axis Alignment
    cross_alignment::resolve_cross_axis_auto_margins(&mut flex_lines, &constants);
    let total_line_cross_size =
        cross_size::determine_container_cross_size(&flex_lines, known_dimensions, &mut constants);

    if run_mode == RunMode::ComputeSize {
        return LayoutOutput::from_outer_size(constants.container_size);
    }

    cross_alignment::align_flex_lines_per_align_content(&mut flex_lines, &constants, total_line_cross_size);

    let placed = cross_alignment::final_layout_pass(tree, &mut flex_lines, &constants);
    let absolute_content_size = absolute::perform_absolute_layout_on_absolute_children(tree, &children, &constants);

    for &(child, order) in &children {
        if tree.style(child).is_hidden() {
            tree.hide_child(child);
            tree.set_unrounded_layout(child, &Layout::with_order(order));
        }
    }

    let content_size = placed.content_size.f32_max(absolute_content_size);
    log::debug!(
        target: "trellis::flexbox",
        "[FLEX] node={node} lines={} size={}x{} content={}x{}",
        flex_lines.len(),
        constants.container_size.width,
        constants.container_size.height,
        content_size.width,
        content_size.height
    );

    LayoutOutput {
        size: constants.container_size,
        content_size,
        first_baselines: Point {
            x: None,
            y: placed.first_baseline,
        },
    }
}
