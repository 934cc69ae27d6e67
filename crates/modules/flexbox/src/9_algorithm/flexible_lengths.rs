//! Resolving flexible lengths
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths>

use trellis_geometry::MaybeMath as _;

use super::{AlgoConstants, FlexLine, sum_axis_gaps};

/// Gaps plus outer sizes: target sizes for frozen items, flex bases for the rest.
fn used_main_space(line: &FlexLine<'_>, constants: &AlgoConstants, total_gap: f32) -> f32 {
    let axes = constants.axes;
    total_gap
        + line
            .items
            .iter()
            .map(|item| {
                let size = if item.frozen {
                    axes.main(item.target_size)
                } else {
                    item.flex_basis
                };
                size + axes.main_sum(item.margin)
            })
            .sum::<f32>()
}

/// Resolve the used main size of every item on a line.
///
/// Free space is handed out in proportion to grow factors, or taken away in
/// proportion to shrink factors scaled by the inner flex basis. Items that
/// hit a min or max are frozen and the rest re-flexed until every item is
/// frozen.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths>
pub fn resolve_flexible_lengths(line: &mut FlexLine<'_>, constants: &AlgoConstants) {
    let axes = constants.axes;
    let inner_main_size = axes.main(constants.node_inner_size).unwrap_or(0.0);
    let total_main_axis_gap = sum_axis_gaps(axes.main(constants.gap), line.items.len());

    // 1. Determine the used flex factor.
    let total_hypothetical_outer_main_size: f32 = line
        .items
        .iter()
        .map(|item| axes.main(item.hypothetical_outer_size))
        .sum();
    let used_flex_factor = total_main_axis_gap + total_hypothetical_outer_main_size;
    let growing = used_flex_factor < inner_main_size;
    let shrinking = used_flex_factor > inner_main_size;
    let exactly_sized = !growing && !shrinking;

    // 2. Size inflexible items.
    for item in line.items.iter_mut() {
        let hypothetical = axes.main(item.hypothetical_inner_size);
        item.target_size.set(axes.main, hypothetical);
        item.frozen = exactly_sized
            || (growing && item.flex_grow == 0.0)
            || (shrinking && item.flex_shrink == 0.0)
            || (growing && item.flex_basis > hypothetical)
            || (shrinking && item.flex_basis < hypothetical);
        if item.frozen {
            item.outer_target_size
                .set(axes.main, hypothetical + axes.main_sum(item.margin));
        }
    }
    if exactly_sized {
        return;
    }

    // 3. Calculate initial free space.
    let initial_free_space = inner_main_size - used_main_space(line, constants, total_main_axis_gap);

    // 4. Loop.
    let mut rounds = 0_usize;
    while line.items.iter().any(|item| !item.frozen) {
        rounds += 1;

        // b. Calculate the remaining free space.
        let mut free_space = inner_main_size - used_main_space(line, constants, total_main_axis_gap);
        let (sum_flex_grow, sum_flex_shrink) = line
            .items
            .iter()
            .filter(|item| !item.frozen)
            .fold((0.0_f32, 0.0_f32), |(grow, shrink), item| {
                (grow + item.flex_grow, shrink + item.flex_shrink)
            });
        let factor_sum = if growing { sum_flex_grow } else { sum_flex_shrink };
        if factor_sum < 1.0 {
            let scaled = initial_free_space * factor_sum;
            if scaled.abs() < free_space.abs() {
                free_space = scaled;
            }
        }

        // c. Distribute free space proportional to the flex factors.
        if free_space.is_normal() {
            if growing && sum_flex_grow > 0.0 {
                for item in line.items.iter_mut().filter(|item| !item.frozen) {
                    let target = item.flex_basis + free_space * (item.flex_grow / sum_flex_grow);
                    item.target_size.set(axes.main, target);
                }
            } else if shrinking && sum_flex_shrink > 0.0 {
                let sum_scaled_shrink_factor: f32 = line
                    .items
                    .iter()
                    .filter(|item| !item.frozen)
                    .map(|item| item.inner_flex_basis * item.flex_shrink)
                    .sum();
                if sum_scaled_shrink_factor > 0.0 {
                    for item in line.items.iter_mut().filter(|item| !item.frozen) {
                        let scaled_shrink_factor = item.inner_flex_basis * item.flex_shrink;
                        let target = item.flex_basis
                            + free_space * (scaled_shrink_factor / sum_scaled_shrink_factor);
                        item.target_size.set(axes.main, target);
                    }
                }
            }
        } else {
            for item in line.items.iter_mut().filter(|item| !item.frozen) {
                item.target_size.set(axes.main, item.flex_basis);
            }
        }

        // d. Fix min/max violations.
        let mut total_violation = 0.0_f32;
        for item in line.items.iter_mut().filter(|item| !item.frozen) {
            let padding_border = axes.main_sum(item.padding) + axes.main_sum(item.border);
            let unclamped = axes.main(item.target_size);
            let clamped = unclamped
                .maybe_clamp(
                    Some(item.resolved_minimum_main_size),
                    axes.main(item.max_size),
                )
                .max(padding_border);
            item.violation = clamped - unclamped;
            item.target_size.set(axes.main, clamped);
            item.outer_target_size
                .set(axes.main, clamped + axes.main_sum(item.margin));
            total_violation += item.violation;
        }

        // e. Freeze over-flexed items.
        for item in line.items.iter_mut().filter(|item| !item.frozen) {
            item.frozen = if total_violation > 0.0 {
                item.violation > 0.0
            } else if total_violation < 0.0 {
                item.violation < 0.0
            } else {
                true
            };
        }
    }

    log::trace!(
        target: "trellis::flexbox",
        "[FLEX-LENGTHS] items={} rounds={rounds} initial_free={initial_free_space}",
        line.items.len()
    );
}
