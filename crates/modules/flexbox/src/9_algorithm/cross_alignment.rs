//! Cross-axis alignment and final placement
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#cross-alignment>

use trellis_geometry::{AvailableSpace, Point, Size};
use trellis_style::{AlignContent, AlignSelf};
use trellis_tree::{
    Layout, LayoutTree, SizingMode, compute_alignment_offset, content_size_contribution,
};

use super::{AlgoConstants, FlexLine, sum_axis_gaps};
use crate::chapter6::FlexItem;

/// Resolve cross-axis `auto` margins, then align the remaining items.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-cross-margins>
pub fn resolve_cross_axis_auto_margins(flex_lines: &mut [FlexLine<'_>], constants: &AlgoConstants) {
    let axes = constants.axes;
    for line in flex_lines.iter_mut() {
        let line_cross_size = line.cross_size;
        let max_baseline = line.items.iter().map(|item| item.baseline).fold(0.0_f32, f32::max);

        for item in line.items.iter_mut() {
            let free_space = line_cross_size - axes.cross(item.outer_target_size);
            let start_is_auto = item.margin_is_auto.start(axes.cross);
            let end_is_auto = item.margin_is_auto.end(axes.cross);
            item.offset_cross = 0.0;
            match (start_is_auto, end_is_auto) {
                (true, true) => {
                    item.margin.set_start(axes.cross, free_space / 2.0);
                    item.margin.set_end(axes.cross, free_space / 2.0);
                }
                (true, false) => item.margin.set_start(axes.cross, free_space),
                (false, true) => item.margin.set_end(axes.cross, free_space),
                (false, false) => {
                    item.offset_cross = align_item_in_line(item, free_space, max_baseline, constants);
                }
            }
        }
    }
}

/// Flex-relative cross offset of one item inside its line.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-cross-align>
fn align_item_in_line(
    item: &FlexItem,
    free_space: f32,
    max_baseline: f32,
    constants: &AlgoConstants,
) -> f32 {
    let reversed = constants.axes.cross_reversed;
    match item.align_self {
        // Baselines only line up in horizontal lines; columns fall back to flex-start.
        AlignSelf::Baseline if constants.axes.is_row() => {
            let physical = max_baseline - item.baseline;
            if reversed { free_space - physical } else { physical }
        }
        alignment => self_alignment_offset(alignment, free_space, reversed),
    }
}

/// Flex-relative offset for a self-alignment keyword given the leftover cross space.
pub fn self_alignment_offset(alignment: AlignSelf, free_space: f32, reversed: bool) -> f32 {
    match alignment {
        AlignSelf::Normal | AlignSelf::Stretch | AlignSelf::FlexStart | AlignSelf::Baseline => 0.0,
        AlignSelf::FlexEnd => free_space,
        AlignSelf::Start => {
            if reversed {
                free_space
            } else {
                0.0
            }
        }
        AlignSelf::End => {
            if reversed {
                0.0
            } else {
                free_space
            }
        }
        AlignSelf::Center => free_space / 2.0,
    }
}

/// Align all flex lines per `align-content`.
///
/// Single-line containers ignore `align-content`.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-line-align>
pub fn align_flex_lines_per_align_content(
    flex_lines: &mut [FlexLine<'_>],
    constants: &AlgoConstants,
    total_cross_size: f32,
) {
    let axes = constants.axes;
    if !axes.is_wrap {
        return;
    }
    let line_count = flex_lines.len();
    let gap = axes.cross(constants.gap);
    let free_space =
        axes.cross(constants.inner_container_size) - total_cross_size - sum_axis_gaps(gap, line_count);
    // Stretched lines already fill the container.
    let alignment = match constants.align_content {
        AlignContent::Normal | AlignContent::Stretch => AlignContent::FlexStart,
        other => other,
    };
    for (index, line) in flex_lines.iter_mut().enumerate() {
        line.offset_cross =
            compute_alignment_offset(free_space, line_count, gap, alignment, axes.cross_reversed, index == 0);
    }
}

/// What the final pass reports back to the container.
#[derive(Debug, Clone, Copy)]
pub struct PlacedItems {
    /// Scrollable overflow of the in-flow items, padding included.
    pub content_size: Size<f32>,
    /// First baseline of the container.
    pub first_baseline: Option<f32>,
}

/// Mirror a flex-relative offset into physical coordinates.
#[inline]
pub fn to_physical(offset: f32, size: f32, inner_size: f32, reversed: bool) -> f32 {
    if reversed {
        inner_size - offset - size
    } else {
        offset
    }
}

/// Lay out every item at its final size and record its position.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-flex-container-baselines>
pub fn final_layout_pass(
    tree: &mut impl LayoutTree,
    flex_lines: &mut [FlexLine<'_>],
    constants: &AlgoConstants,
) -> PlacedItems {
    let axes = constants.axes;
    let inner = constants.inner_container_size;
    let inset = constants.content_box_inset;
    let available = constants.container_size.map(AvailableSpace::Definite);

    let mut content_size = Size::ZERO;
    let mut first_baseline = None;
    let mut baseline_from_aligned_item = false;
    let mut line_cursor = 0.0_f32;

    for (line_index, line) in flex_lines.iter_mut().enumerate() {
        line_cursor += line.offset_cross;
        let mut main_cursor = 0.0_f32;

        for item in line.items.iter_mut() {
            main_cursor += item.offset_main;
            let output = tree.perform_child_layout(
                item.node,
                item.target_size.map(Some),
                constants.node_inner_size,
                available,
                SizingMode::ContentSize,
            );
            let size = output.size;

            let main_offset = main_cursor + axes.main_start(item.margin);
            let cross_offset = line_cursor + item.offset_cross + axes.cross_start(item.margin);
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
            location.x += item
                .inset
                .left
                .or(item.inset.right.map(|right| -right))
                .unwrap_or(0.0);
            location.y += item
                .inset
                .top
                .or(item.inset.bottom.map(|bottom| -bottom))
                .unwrap_or(0.0);

            log::trace!(
                target: "trellis::flexbox",
                "[FLEX-ITEM] child={} location=({}, {}) size={}x{}",
                item.node,
                location.x,
                location.y,
                size.width,
                size.height
            );
            tree.set_unrounded_layout(
                item.node,
                &Layout {
                    order: item.order,
                    location,
                    size,
                    content_size: output.content_size,
                    scrollbar_size: item.scrollbar_size,
                    border: item.border,
                    padding: item.padding,
                    margin: item.margin,
                },
            );

            if line_index == 0 {
                let item_baseline = location.y + output.first_baselines.y.unwrap_or(size.height);
                let participates = axes.is_row() && item.align_self == AlignSelf::Baseline;
                if participates && !baseline_from_aligned_item {
                    first_baseline = Some(item_baseline);
                    baseline_from_aligned_item = true;
                } else if first_baseline.is_none() {
                    first_baseline = Some(item_baseline);
                }
            }

            content_size = content_size.f32_max(content_size_contribution(
                location,
                size,
                output.content_size,
                item.overflow,
            ));
            main_cursor += axes.main_start(item.margin) + axes.main(size) + axes.main_end(item.margin);
        }
        line_cursor += line.cross_size;
    }

    content_size.width += inset.right - constants.border.right - constants.scrollbar_gutter.width;
    content_size.height += inset.bottom - constants.border.bottom - constants.scrollbar_gutter.height;
    PlacedItems {
        content_size,
        first_baseline,
    }
}
