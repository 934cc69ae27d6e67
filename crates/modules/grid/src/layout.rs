//! Grid container layout: ties placement, track sizing and alignment together.
//!
//! Spec: <https://www.w3.org/TR/css-grid-2/#layout-algorithm>

use trellis_geometry::{AbsoluteAxis, AvailableSpace, MaybeMath as _, Point, Rect, Size};
use trellis_style::{AlignSelf, GridPlacement, MaybeResolve as _, ResolveOrZero as _};
use trellis_tree::{
    AbsoluteContainer, Layout, LayoutInput, LayoutOutput, LayoutTree, NodeId, RunMode, SizingMode,
    layout_absolute_child,
};

use crate::alignment::{align_and_position_item, align_tracks, area_extent};
use crate::explicit::{auto_repeat_count, expand_template, initialize_tracks};
use crate::placement::{definite_lines, place_grid_items};
use crate::track_sizing::{SizingContext, total_size, track_sizing_algorithm};
use crate::types::{GridItem, GridTrack, TrackCounts};

/// Baseline alignment is not supported in grid; it falls back to `start`.
#[inline]
fn without_baseline(alignment: AlignSelf) -> AlignSelf {
    if alignment == AlignSelf::Baseline {
        AlignSelf::Start
    } else {
        alignment
    }
}

/// Start offset of the area an absolutely positioned child names along
/// one axis, when it names a line of the grid.
fn static_offset(
    placement: GridPlacement,
    explicit: u16,
    tracks: &[GridTrack],
    counts: TrackCounts,
) -> Option<f32> {
    let line = definite_lines(placement, explicit)?.start;
    if line < counts.implicit_start_line() || line > counts.implicit_end_line() {
        return None;
    }
    match tracks.get(counts.track_index(line)) {
        Some(track) => Some(track.offset),
        None => tracks.last().map(|track| track.offset + track.base_size),
    }
}

/// Lay out `node` as a grid container.
///
/// Resolves the container's own size as far as its style allows, places
/// its in-flow children, sizes columns then rows, aligns the tracks and
/// finally lays out every child in its grid area. Absolutely positioned
/// children are placed against the padding box, starting from their grid
/// area when they name definite lines.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#layout-algorithm>
pub fn compute_grid_layout(
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
    let scrollbar_gutter = style.scrollbar_gutter();
    let content_box_inset = Rect {
        right: padding.right + border.right + scrollbar_gutter.width,
        bottom: padding.bottom + border.bottom + scrollbar_gutter.height,
        ..(padding + border)
    };
    let padding_border_size = (padding + border).sum_axes();
    let inset_size = content_box_inset.sum_axes();

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
    let min_max_definite_size = min_size.zip_map(max_size, |min, max| match (min, max) {
        (Some(min), Some(max)) if max <= min => Some(min),
        _ => None,
    });
    let known_dimensions = known_dimensions
        .or(min_max_definite_size.or(clamped_style_size))
        .maybe_max(padding_border_size.map(Some));

    if run_mode == RunMode::ComputeSize
        && let Size {
            width: Some(width),
            height: Some(height),
        } = known_dimensions
    {
        return LayoutOutput::from_outer_size(Size { width, height });
    }

    let to_inner = |outer: Size<Option<f32>>| {
        outer.zip_map(inset_size, |outer, inset| {
            outer.map(|outer| (outer - inset).max(0.0))
        })
    };
    let inner_size = to_inner(known_dimensions);
    let inner_min = to_inner(min_size);
    let inner_max = to_inner(max_size);
    let outer_margin = margin.sum_axes();
    let available_inner = Size {
        width: available_space
            .width
            .map_definite_value(|space| (space - outer_margin.width - inset_size.width).max(0.0))
            .maybe_set(inner_size.width),
        height: available_space
            .height
            .map_definite_value(|space| (space - outer_margin.height - inset_size.height).max(0.0))
            .maybe_set(inner_size.height),
    };
    let gap = style.gap.resolve_or_zero(inner_size);

    // 7. Explicit grid
    let column_repetitions = auto_repeat_count(
        &style.grid_template_columns,
        inner_size.width.or(inner_max.width),
        inner_min.width,
        gap.width,
    );
    let row_repetitions = auto_repeat_count(
        &style.grid_template_rows,
        inner_size.height.or(inner_max.height),
        inner_min.height,
        gap.height,
    );
    let explicit_columns = expand_template(&style.grid_template_columns, column_repetitions);
    let explicit_rows = expand_template(&style.grid_template_rows, row_repetitions);
    let auto_columns = style.grid_auto_columns.clone();
    let auto_rows = style.grid_auto_rows.clone();
    let auto_flow = style.grid_auto_flow;
    let align_items = style.align_items;
    let justify_items = style.justify_items;
    let align_content = style.align_content;
    let justify_content = style.justify_content;

    // Children in `order`-modified document order.
    let mut children = tree.child_ids(node);
    children.sort_by_key(|&child| tree.style(child).order);
    let children: Vec<(NodeId, u32)> = children
        .into_iter()
        .enumerate()
        .map(|(index, child)| (child, index as u32))
        .collect();
    let in_flow: Vec<(NodeId, u32)> = children
        .iter()
        .copied()
        .filter(|&(child, _)| {
            let child_style = tree.style(child);
            !child_style.is_hidden() && !child_style.is_absolute()
        })
        .collect();
    let in_flow_nodes: Vec<NodeId> = in_flow.iter().map(|&(child, _)| child).collect();

    // 8. Placement
    let explicit_column_count = explicit_columns.len() as u16;
    let explicit_row_count = explicit_rows.len() as u16;
    let (areas, occupancy) = place_grid_items(
        &*tree,
        &in_flow_nodes,
        explicit_column_count,
        explicit_row_count,
        auto_flow,
    );
    let column_counts = occupancy.counts(AbsoluteAxis::Horizontal);
    let row_counts = occupancy.counts(AbsoluteAxis::Vertical);
    let mut columns = initialize_tracks(&explicit_columns, &auto_columns, column_counts, |index| {
        occupancy.track_is_occupied(AbsoluteAxis::Horizontal, index)
    });
    let mut rows = initialize_tracks(&explicit_rows, &auto_rows, row_counts, |index| {
        occupancy.track_is_occupied(AbsoluteAxis::Vertical, index)
    });
    for track in &mut columns {
        track.resolve_functions(inner_size.width);
    }
    for track in &mut rows {
        track.resolve_functions(inner_size.height);
    }

    let mut items: Vec<GridItem> = in_flow
        .iter()
        .zip(&areas)
        .map(|(&(child, order), &area)| {
            let child_style = tree.style(child);
            GridItem {
                node: child,
                order,
                area,
                columns: column_counts.track_range(area.column),
                rows: row_counts.track_range(area.row),
                margin: child_style
                    .margin
                    .map(|edge| (!edge.is_auto()).then(|| edge.resolve_or_zero(inner_size.width))),
                align_self: without_baseline(child_style.align_self.unwrap_or(align_items)),
                justify_self: without_baseline(child_style.justify_self.unwrap_or(justify_items)),
                overflow: child_style.overflow,
                crosses_flexible_track: Size {
                    width: false,
                    height: false,
                },
                crosses_intrinsic_track: Size {
                    width: false,
                    height: false,
                },
                contributions: None,
            }
        })
        .collect();

    // 12. Track sizing: columns first, then rows in the resolved column widths.
    let column_ctx = SizingContext {
        axis: AbsoluteAxis::Horizontal,
        available_space: available_inner.width,
        inner_size: inner_size.width,
        min_size: inner_min.width,
        max_size: inner_max.width,
        gap: gap.width,
        other_gap: gap.height,
        content_alignment: justify_content,
    };
    let row_ctx = SizingContext {
        axis: AbsoluteAxis::Vertical,
        available_space: available_inner.height,
        inner_size: inner_size.height,
        min_size: inner_min.height,
        max_size: inner_max.height,
        gap: gap.height,
        other_gap: gap.width,
        content_alignment: align_content,
    };
    track_sizing_algorithm(tree, &column_ctx, &mut columns, &rows, false, &mut items);
    track_sizing_algorithm(tree, &row_ctx, &mut rows, &columns, true, &mut items);

    let outer_size = |known: Option<f32>, tracks: &[GridTrack], axis_gap: f32, axis: AbsoluteAxis| {
        known.unwrap_or_else(|| {
            (total_size(tracks, axis_gap) + inset_size.get(axis))
                .maybe_clamp(min_size.get(axis), max_size.get(axis))
                .max(padding_border_size.get(axis))
        })
    };
    let container_size = Size {
        width: outer_size(known_dimensions.width, &columns, gap.width, AbsoluteAxis::Horizontal),
        height: outer_size(known_dimensions.height, &rows, gap.height, AbsoluteAxis::Vertical),
    };

    if run_mode == RunMode::ComputeSize {
        return LayoutOutput::from_outer_size(container_size);
    }

    // Percentages treated as `auto` while the container was indefinite
    // resolve against its final size.
    let final_inner = (container_size - inset_size).map(|size| size.max(0.0));
    if inner_size.width.is_none() && columns.iter().any(GridTrack::uses_percentage) {
        for track in &mut columns {
            track.resolve_functions(Some(final_inner.width));
        }
        let column_ctx = SizingContext {
            available_space: AvailableSpace::Definite(final_inner.width),
            inner_size: Some(final_inner.width),
            ..column_ctx
        };
        track_sizing_algorithm(tree, &column_ctx, &mut columns, &rows, true, &mut items);
        track_sizing_algorithm(tree, &row_ctx, &mut rows, &columns, true, &mut items);
    }
    if inner_size.height.is_none() && rows.iter().any(GridTrack::uses_percentage) {
        for track in &mut rows {
            track.resolve_functions(Some(final_inner.height));
        }
        let row_ctx = SizingContext {
            available_space: AvailableSpace::Definite(final_inner.height),
            inner_size: Some(final_inner.height),
            ..row_ctx
        };
        track_sizing_algorithm(tree, &row_ctx, &mut rows, &columns, true, &mut items);
    }

    // 10. Alignment
    align_tracks(
        &mut columns,
        final_inner.width,
        content_box_inset.left,
        gap.width,
        justify_content,
    );
    align_tracks(
        &mut rows,
        final_inner.height,
        content_box_inset.top,
        gap.height,
        align_content,
    );

    let mut content_size = Size::ZERO;
    let mut first_baseline: Option<(i32, f32)> = None;
    for item in &items {
        let (x, width) = area_extent(&columns, item.columns, gap.width);
        let (y, height) = area_extent(&rows, item.rows, gap.height);
        let placed = align_and_position_item(tree, item, Point { x, y }, Size { width, height });
        content_size = content_size.f32_max(placed.content_contribution);
        if first_baseline.is_none_or(|(row, _)| item.area.row.start < row) {
            first_baseline = Some((item.area.row.start, placed.baseline));
        }
    }
    content_size.width += padding.right;
    content_size.height += padding.bottom;

    // Absolutely positioned children
    let container = AbsoluteContainer {
        size: container_size,
        border,
        scrollbar_gutter,
    };
    for &(child, order) in &children {
        let child_style = tree.style(child);
        if child_style.is_hidden() {
            tree.hide_child(child);
            tree.set_unrounded_layout(child, &Layout::with_order(order));
            continue;
        }
        if !child_style.is_absolute() {
            continue;
        }
        let static_position = Point {
            x: static_offset(
                child_style.grid_column,
                explicit_column_count,
                &columns,
                column_counts,
            )
            .unwrap_or(content_box_inset.left),
            y: static_offset(child_style.grid_row, explicit_row_count, &rows, row_counts)
                .unwrap_or(content_box_inset.top),
        };
        let contribution = layout_absolute_child(tree, child, order, &container, |_, margin| Point {
            x: static_position.x + margin.left,
            y: static_position.y + margin.top,
        });
        content_size = content_size.f32_max(contribution);
    }

    tracing::debug!(
        "compute_grid_layout: node={node} columns={} rows={} size={}x{} content={}x{}",
        columns.len(),
        rows.len(),
        container_size.width,
        container_size.height,
        content_size.width,
        content_size.height
    );

    LayoutOutput {
        size: container_size,
        content_size,
        first_baselines: Point {
            x: None,
            y: first_baseline.map(|(_, baseline)| baseline),
        },
    }
}
