//! Line collection and the container's main size
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-line-break>
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-main-container>

use trellis_geometry::{AvailableSpace, MaybeMath as _, Size};
use trellis_tree::{LayoutTree, SizingMode};

use super::base_size::{item_cross_available_space, item_known_dimensions};
use super::{AlgoConstants, FlexLine, sum_axis_gaps};
use crate::chapter6::FlexItem;

/// Collect flex items into flex lines.
///
/// Single-line containers get one line. Multi-line containers break before
/// an item whose outer hypothetical main size would overflow the available
/// main space; a line always holds at least one item.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-line-break>
pub fn collect_flex_lines<'items>(
    constants: &AlgoConstants,
    available_space: Size<AvailableSpace>,
    flex_items: &'items mut [FlexItem],
) -> Vec<FlexLine<'items>> {
    let axes = constants.axes;
    if !axes.is_wrap {
        return vec![FlexLine {
            items: flex_items,
            cross_size: 0.0,
            offset_cross: 0.0,
        }];
    }

    let main_available_space = match axes.main(constants.max_size) {
        Some(max_size) => AvailableSpace::Definite(
            axes.main(available_space)
                .into_option()
                .map_or(max_size, |available| available.min(max_size)),
        ),
        None => axes.main(available_space),
    };

    match main_available_space {
        // Nothing wraps under a max-content constraint.
        AvailableSpace::MaxContent => vec![FlexLine {
            items: flex_items,
            cross_size: 0.0,
            offset_cross: 0.0,
        }],
        // Every wrap opportunity is taken under a min-content constraint.
        AvailableSpace::MinContent => flex_items
            .chunks_mut(1)
            .map(|items| FlexLine {
                items,
                cross_size: 0.0,
                offset_cross: 0.0,
            })
            .collect(),
        AvailableSpace::Definite(main_space) => {
            let main_gap = axes.main(constants.gap);
            let mut lines = Vec::new();
            let mut remaining: &'items mut [FlexItem] = flex_items;
            while !remaining.is_empty() {
                let mut line_length = 0.0;
                let break_at = remaining
                    .iter()
                    .enumerate()
                    .find(|&(index, item)| {
                        let gap = if index == 0 { 0.0 } else { main_gap };
                        line_length += axes.main(item.hypothetical_outer_size) + gap;
                        line_length > main_space && index != 0
                    })
                    .map_or(remaining.len(), |(index, _)| index);
                let (items, rest) = core::mem::take(&mut remaining).split_at_mut(break_at);
                lines.push(FlexLine {
                    items,
                    cross_size: 0.0,
                    offset_cross: 0.0,
                });
                remaining = rest;
            }
            lines
        }
    }
}

/// Outer main-axis contribution of an item that is not flexed further.
fn clamped_basis_contribution(item: &FlexItem, constants: &AlgoConstants) -> f32 {
    let axes = constants.axes;
    let padding_border = axes.main_sum(item.padding) + axes.main_sum(item.border);
    (item.flex_basis.maybe_max(axes.main(item.min_size)) + axes.main_sum(item.margin))
        .max(padding_border)
}

/// Longest line when every item sits at its clamped flex basis.
fn longest_line(lines: &[FlexLine<'_>], constants: &AlgoConstants) -> f32 {
    let main_gap = constants.axes.main(constants.gap);
    lines
        .iter()
        .map(|line| {
            line.items
                .iter()
                .map(|item| clamped_basis_contribution(item, constants))
                .sum::<f32>()
                + sum_axis_gaps(main_gap, line.items.len())
        })
        .fold(0.0_f32, f32::max)
}

/// Determine the main size of a container whose main size is not known.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-main-container>
pub fn determine_container_main_size(
    tree: &mut impl LayoutTree,
    available_space: Size<AvailableSpace>,
    lines: &mut [FlexLine<'_>],
    constants: &mut AlgoConstants,
) {
    let axes = constants.axes;
    let main_content_box_inset = axes.main_sum(constants.content_box_inset);

    let outer_main_size = match axes.main(available_space) {
        AvailableSpace::Definite(main_space) => {
            let size = longest_line(lines, constants) + main_content_box_inset;
            // Wrapped containers fill the space they wrapped against.
            if lines.len() > 1 { size.max(main_space) } else { size }
        }
        AvailableSpace::MinContent if axes.is_wrap => {
            longest_line(lines, constants) + main_content_box_inset
        }
        AvailableSpace::MinContent | AvailableSpace::MaxContent => {
            intrinsic_main_size(tree, available_space, lines, constants) + main_content_box_inset
        }
    };

    let outer_main_size = outer_main_size
        .maybe_clamp(axes.main(constants.min_size), axes.main(constants.max_size))
        .max(main_content_box_inset - axes.main(constants.scrollbar_gutter));
    let inner_main_size = (outer_main_size - main_content_box_inset).max(0.0);
    constants.container_size.set(axes.main, outer_main_size);
    constants.inner_container_size.set(axes.main, inner_main_size);
    constants.node_inner_size.set(axes.main, Some(inner_main_size));

    log::trace!(
        target: "trellis::flexbox",
        "[FLEX-MAIN] intrinsic main size={outer_main_size} inner={inner_main_size}"
    );
}

/// The largest line sum of item min- or max-content contributions.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#intrinsic-main-sizes>
fn intrinsic_main_size(
    tree: &mut impl LayoutTree,
    available_space: Size<AvailableSpace>,
    lines: &mut [FlexLine<'_>],
    constants: &AlgoConstants,
) -> f32 {
    let axes = constants.axes;
    let main_gap = axes.main(constants.gap);
    let mut main_size = 0.0_f32;

    for line in lines.iter_mut() {
        for item in line.items.iter_mut() {
            let style_min = axes.main(item.min_size);
            let style_preferred = axes.main(item.size);
            let style_max = axes.main(item.max_size);
            let margin_sum = axes.main_sum(item.margin);

            // An inflexible item's basis caps its contribution in that direction.
            let clamping_basis = Some(item.flex_basis).maybe_max(style_preferred);
            let flex_basis_min = clamping_basis.filter(|_| item.flex_shrink == 0.0);
            let flex_basis_max = clamping_basis.filter(|_| item.flex_grow == 0.0);

            let min_main_size = style_min
                .maybe_max(flex_basis_min)
                .or(flex_basis_min)
                .unwrap_or(item.resolved_minimum_main_size)
                .max(item.resolved_minimum_main_size);
            let max_main_size = style_max
                .maybe_min(flex_basis_max)
                .or(flex_basis_max)
                .unwrap_or(f32::INFINITY);

            let content_contribution = match (min_main_size, style_preferred, max_main_size) {
                (min, Some(preferred), max) if max <= min || max <= preferred => {
                    preferred.min(max).max(min) + margin_sum
                }
                (min, _, max) if max <= min => min + margin_sum,
                _ if item.is_scroll_container() => item.flex_basis + margin_sum,
                _ => {
                    let cross_available_space = item_cross_available_space(item, available_space, constants);
                    let known = item_known_dimensions(item, cross_available_space, constants);
                    let content_main_size = tree.measure_child_size(
                        item.node,
                        known,
                        constants.node_inner_size,
                        axes.size(axes.main(available_space), cross_available_space),
                        SizingMode::InherentSize,
                        axes.main,
                    ) + margin_sum;
                    if axes.is_row() {
                        content_main_size.maybe_clamp(style_min, style_max).max(0.0)
                    } else {
                        content_main_size
                            .max(item.flex_basis)
                            .maybe_clamp(style_min, style_max)
                            .max(0.0)
                    }
                }
            };

            let diff = content_contribution - item.flex_basis;
            item.content_flex_fraction = if diff > 0.0 {
                diff / item.flex_grow.max(1.0)
            } else if diff < 0.0 {
                diff / (item.flex_shrink * item.inner_flex_basis).max(1.0)
            } else {
                0.0
            };
        }

        let line_sum: f32 = line
            .items
            .iter()
            .map(|item| {
                let fraction = item.content_flex_fraction;
                let contribution = if fraction > 0.0 {
                    item.flex_grow.max(1.0) * fraction
                } else if fraction < 0.0 {
                    (item.flex_shrink * item.inner_flex_basis).max(1.0) * fraction
                } else {
                    0.0
                };
                let size = (item.flex_basis + contribution).maybe_clamp(
                    Some(item.resolved_minimum_main_size),
                    axes.main(item.max_size),
                );
                size + axes.main_sum(item.margin)
            })
            .sum();
        main_size = main_size.max(line_sum + sum_axis_gaps(main_gap, line.items.len()));
    }
    main_size
}
