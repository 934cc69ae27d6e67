//! Main-axis alignment
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#main-alignment>

use trellis_tree::compute_alignment_offset;

use super::{AlgoConstants, FlexLine, sum_axis_gaps};

/// Distribute any remaining free space on each line.
///
/// Positive free space goes to `auto` main-axis margins first; otherwise
/// `justify-content` spreads it. Offsets are flex-relative: they grow from
/// the main-start edge whatever the physical direction.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-main-align>
pub fn distribute_remaining_free_space(flex_lines: &mut [FlexLine<'_>], constants: &AlgoConstants) {
    let axes = constants.axes;
    let gap = axes.main(constants.gap);
    let inner_main_size = axes.main(constants.inner_container_size);

    for line in flex_lines.iter_mut() {
        let used_space = sum_axis_gaps(gap, line.items.len())
            + line
                .items
                .iter()
                .map(|item| axes.main(item.outer_target_size))
                .sum::<f32>();
        let free_space = inner_main_size - used_space;
        let auto_margin_count: usize = line
            .items
            .iter()
            .map(|item| {
                usize::from(item.margin_is_auto.start(axes.main))
                    + usize::from(item.margin_is_auto.end(axes.main))
            })
            .sum();

        if free_space > 0.0 && auto_margin_count > 0 {
            let share = free_space / auto_margin_count as f32;
            for (index, item) in line.items.iter_mut().enumerate() {
                if item.margin_is_auto.start(axes.main) {
                    item.margin.set_start(axes.main, share);
                }
                if item.margin_is_auto.end(axes.main) {
                    item.margin.set_end(axes.main, share);
                }
                item.offset_main = if index == 0 { 0.0 } else { gap };
            }
        } else {
            let item_count = line.items.len();
            for (index, item) in line.items.iter_mut().enumerate() {
                item.offset_main = compute_alignment_offset(
                    free_space,
                    item_count,
                    gap,
                    constants.justify_content,
                    axes.main_reversed,
                    index == 0,
                );
            }
        }
        log::trace!(
            target: "trellis::flexbox",
            "[FLEX-JUSTIFY] items={} free={free_space} auto_margins={auto_margin_count}",
            line.items.len()
        );
    }
}
