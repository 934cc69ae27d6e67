//! Cross size determination
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#cross-sizing>

use trellis_geometry::{AvailableSpace, MaybeMath as _, Size};
use trellis_style::{AlignContent, AlignSelf, MaybeResolve as _};
use trellis_tree::{LayoutTree, SizingMode};

use super::{AlgoConstants, FlexLine, sum_axis_gaps};

/// Determine the hypothetical cross size of each item.
///
/// Each item is laid out with its used main size and the available cross space.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-cross-item>
pub fn determine_hypothetical_cross_size(
    tree: &mut impl LayoutTree,
    line: &mut FlexLine<'_>,
    constants: &AlgoConstants,
    available_space: Size<AvailableSpace>,
) {
    let axes = constants.axes;
    let container_main = AvailableSpace::Definite(axes.main(constants.inner_container_size));
    for item in line.items.iter_mut() {
        let padding_border = axes.cross_sum(item.padding) + axes.cross_sum(item.border);
        let min_cross = axes.cross(item.min_size);
        let max_cross = axes.cross(item.max_size);
        let style_cross = axes
            .cross(item.size)
            .maybe_clamp(min_cross, max_cross)
            .maybe_max(padding_border);
        let available_cross = axes
            .cross(available_space)
            .maybe_clamp(min_cross, max_cross)
            .maybe_max(padding_border);

        let inner_cross = style_cross.unwrap_or_else(|| {
            tree.measure_child_size(
                item.node,
                axes.size(Some(axes.main(item.target_size)), style_cross),
                constants.node_inner_size,
                axes.size(container_main, available_cross),
                SizingMode::ContentSize,
                axes.cross,
            )
            .maybe_clamp(min_cross, max_cross)
            .max(padding_border)
        });
        item.hypothetical_inner_size.set(axes.cross, inner_cross);
        item.hypothetical_outer_size
            .set(axes.cross, inner_cross + axes.cross_sum(item.margin));
    }
}

/// Measure the first baseline of baseline-aligned items.
///
/// Only horizontal lines with more than one baseline-aligned item need it.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#baseline-participation>
pub fn calculate_children_base_lines(
    tree: &mut impl LayoutTree,
    node_size: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    flex_lines: &mut [FlexLine<'_>],
    constants: &AlgoConstants,
) {
    if !constants.axes.is_row() {
        return;
    }
    for line in flex_lines.iter_mut() {
        let baseline_items = line
            .items
            .iter()
            .filter(|item| item.align_self == AlignSelf::Baseline)
            .count();
        if baseline_items <= 1 {
            continue;
        }
        for item in line
            .items
            .iter_mut()
            .filter(|item| item.align_self == AlignSelf::Baseline)
        {
            let output = tree.perform_child_layout(
                item.node,
                Size {
                    width: Some(item.target_size.width),
                    height: Some(item.hypothetical_inner_size.height),
                },
                constants.node_inner_size,
                Size {
                    width: AvailableSpace::Definite(constants.container_size.width),
                    height: available_space.height.maybe_set(node_size.height),
                },
                SizingMode::ContentSize,
            );
            item.baseline = output.first_baselines.y.unwrap_or(output.size.height) + item.margin.top;
        }
    }
}

/// Calculate the cross size of each flex line.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-cross-line>
pub fn calculate_cross_size(
    flex_lines: &mut [FlexLine<'_>],
    node_size: Size<Option<f32>>,
    constants: &AlgoConstants,
) {
    let axes = constants.axes;
    let cross_inset = axes.cross_sum(constants.content_box_inset);
    let min_cross = axes.cross(constants.min_size);
    let max_cross = axes.cross(constants.max_size);

    // A single-line container with a definite cross size gives its line that size.
    if !axes.is_wrap
        && let Some(node_cross) = axes.cross(node_size)
        && let Some(line) = flex_lines.first_mut()
    {
        line.cross_size = (node_cross.maybe_clamp(min_cross, max_cross) - cross_inset).max(0.0);
        return;
    }

    for line in flex_lines.iter_mut() {
        let max_baseline = line.items.iter().map(|item| item.baseline).fold(0.0_f32, f32::max);
        line.cross_size = line
            .items
            .iter()
            .map(|item| {
                let outer_cross = axes.cross(item.hypothetical_outer_size);
                if item.align_self == AlignSelf::Baseline
                    && !axes.cross_start(item.margin_is_auto)
                    && !axes.cross_end(item.margin_is_auto)
                {
                    max_baseline - item.baseline + outer_cross
                } else {
                    outer_cross
                }
            })
            .fold(0.0_f32, f32::max);
    }

    // A single line still honors the container's min and max cross size.
    if !axes.is_wrap
        && let Some(line) = flex_lines.first_mut()
    {
        line.cross_size = line
            .cross_size
            .maybe_clamp(min_cross.maybe_sub(cross_inset), max_cross.maybe_sub(cross_inset));
    }
}

/// Grow lines to fill a definite cross size when lines stretch.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-line-stretch>
pub fn handle_align_content_stretch(
    flex_lines: &mut [FlexLine<'_>],
    node_size: Size<Option<f32>>,
    constants: &AlgoConstants,
) {
    if !matches!(constants.align_content, AlignContent::Stretch | AlignContent::Normal)
        || flex_lines.is_empty()
    {
        return;
    }
    let axes = constants.axes;
    let cross_inset = axes.cross_sum(constants.content_box_inset);
    let min_cross = axes.cross(constants.min_size);
    let max_cross = axes.cross(constants.max_size);
    let container_min_inner_cross = axes
        .cross(node_size)
        .or(min_cross)
        .maybe_clamp(min_cross, max_cross)
        .maybe_sub(cross_inset)
        .maybe_max(0.0)
        .unwrap_or(0.0);

    let total_gap = sum_axis_gaps(axes.cross(constants.gap), flex_lines.len());
    let lines_total_cross: f32 = flex_lines.iter().map(|line| line.cross_size).sum::<f32>() + total_gap;
    if lines_total_cross < container_min_inner_cross {
        let addition = (container_min_inner_cross - lines_total_cross) / flex_lines.len() as f32;
        for line in flex_lines.iter_mut() {
            line.cross_size += addition;
        }
    }
}

/// Determine the used cross size of each item, stretching where asked.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-stretch>
pub fn determine_used_cross_size(
    tree: &impl LayoutTree,
    flex_lines: &mut [FlexLine<'_>],
    constants: &AlgoConstants,
) {
    let axes = constants.axes;
    for line in flex_lines.iter_mut() {
        let line_cross_size = line.cross_size;
        for item in line.items.iter_mut() {
            let style = tree.style(item.node);
            let stretches = item.align_self == AlignSelf::Stretch
                && !axes.cross_start(item.margin_is_auto)
                && !axes.cross_end(item.margin_is_auto)
                && axes.cross(style.size).is_auto();
            let cross = if stretches {
                // The max size is applied without transferring it through the aspect ratio.
                let max_size = style.max_size.maybe_resolve(constants.node_inner_size);
                let padding_border = axes.cross_sum(item.padding) + axes.cross_sum(item.border);
                (line_cross_size - axes.cross_sum(item.margin))
                    .maybe_clamp(axes.cross(item.min_size), axes.cross(max_size))
                    .max(padding_border)
            } else {
                axes.cross(item.hypothetical_inner_size)
            };
            item.target_size.set(axes.cross, cross);
            item.outer_target_size
                .set(axes.cross, cross + axes.cross_sum(item.margin));
        }
    }
}

/// Determine the container's used cross size and return the summed line cross sizes.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-cross-container>
pub fn determine_container_cross_size(
    flex_lines: &[FlexLine<'_>],
    node_size: Size<Option<f32>>,
    constants: &mut AlgoConstants,
) -> f32 {
    let axes = constants.axes;
    let total_gap = sum_axis_gaps(axes.cross(constants.gap), flex_lines.len());
    let total_line_cross_size: f32 = flex_lines.iter().map(|line| line.cross_size).sum();

    let cross_inset = axes.cross_sum(constants.content_box_inset);
    let outer_cross = axes
        .cross(node_size)
        .unwrap_or(total_line_cross_size + total_gap + cross_inset)
        .maybe_clamp(axes.cross(constants.min_size), axes.cross(constants.max_size))
        .max(cross_inset - axes.cross(constants.scrollbar_gutter));
    let inner_cross = (outer_cross - cross_inset).max(0.0);

    constants.container_size.set(axes.cross, outer_cross);
    constants.inner_container_size.set(axes.cross, inner_cross);
    total_line_cross_size
}
