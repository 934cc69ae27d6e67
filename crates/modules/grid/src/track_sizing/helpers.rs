//! Spanned sizes and item contributions.

use core::ops::Range;

use trellis_geometry::{AbsoluteAxis, AvailableSpace, Size};
use trellis_style::{AlignSelf, MaybeResolve as _};
use trellis_tree::{LayoutTree, SizingMode};

use super::SizingContext;
use crate::types::{Contributions, GridItem, GridTrack};

/// Sum of the gutters between `count` tracks.
#[inline]
pub fn sum_gaps(gap: f32, count: usize) -> f32 {
    if count <= 1 {
        0.0
    } else {
        gap * (count - 1) as f32
    }
}

/// Size of the tracks in `range` measured by `size_of`, plus the gutters
/// between them. Collapsed tracks and their gutters count as nothing.
pub fn spanned_size(
    tracks: &[GridTrack],
    range: Range<usize>,
    gap: f32,
    size_of: impl Fn(&GridTrack) -> f32,
) -> f32 {
    let mut count = 0_usize;
    let mut total = 0.0_f32;
    for track in tracks
        .get(range)
        .unwrap_or(&[])
        .iter()
        .filter(|track| !track.is_collapsed)
    {
        count += 1;
        total += size_of(track);
    }
    total + sum_gaps(gap, count)
}

/// The item's self alignment along `axis`.
#[inline]
pub const fn self_alignment(item: &GridItem, axis: AbsoluteAxis) -> AlignSelf {
    match axis {
        AbsoluteAxis::Horizontal => item.justify_self,
        AbsoluteAxis::Vertical => item.align_self,
    }
}

/// Size of the item's area across the axis being sized, when it is known.
///
/// Once the other axis is sized its base sizes give the answer; before
/// that only tracks with a fixed max function do.
fn area_size_across(
    item: &GridItem,
    ctx: &SizingContext,
    other_tracks: &[GridTrack],
    other_sized: bool,
) -> Option<f32> {
    let range = item.tracks(ctx.axis.other());
    if other_sized {
        return Some(spanned_size(
            other_tracks,
            range.start..range.end,
            ctx.other_gap,
            |track| track.base_size,
        ));
    }
    let mut count = 0_usize;
    let mut total = 0.0_f32;
    for track in other_tracks
        .get(range.start..range.end)?
        .iter()
        .filter(|track| !track.is_collapsed)
    {
        total += track.fixed_max()?;
        count += 1;
    }
    Some(total + sum_gaps(ctx.other_gap, count))
}

/// Limit on the area of an item spanning only tracks with a fixed (or
/// `fit-content`) max function.
pub fn spanned_max_limit(tracks: &[GridTrack], range: Range<usize>, gap: f32) -> Option<f32> {
    let mut count = 0_usize;
    let mut total = 0.0_f32;
    for track in tracks
        .get(range)?
        .iter()
        .filter(|track| !track.is_collapsed)
    {
        total += track.fixed_max().or_else(|| track.fit_content_limit())?;
        count += 1;
    }
    Some(total + sum_gaps(gap, count))
}

/// Measure the min-content, max-content and minimum contributions of
/// `item` along `ctx.axis`. All three include the item's margins.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#min-size-contribution>
pub fn compute_contributions(
    tree: &mut impl LayoutTree,
    item: &GridItem,
    ctx: &SizingContext,
    tracks: &[GridTrack],
    other_tracks: &[GridTrack],
    other_sized: bool,
) -> Contributions {
    let axis = ctx.axis;
    let across = axis.other();
    let area_across = area_size_across(item, ctx, other_tracks, other_sized);

    let style = tree.style(item.node);
    let margin_across = item.margin.axis(across);
    let stretches = self_alignment(item, across) == AlignSelf::Stretch
        && style.size.get(across).is_auto()
        && margin_across.start.is_some()
        && margin_across.end.is_some();
    // Item percentages resolve against the grid area, which is unknown along `axis`.
    let preferred = style.size.get(axis).maybe_resolve(None::<f32>);
    let min_size = style.min_size.get(axis).maybe_resolve(None::<f32>);

    let known_dimensions = Size::from_axes(
        axis,
        None,
        area_across
            .filter(|_| stretches)
            .map(|size| (size - item.margin_sum(across)).max(0.0)),
    );
    let parent_size = Size::from_axes(axis, None, area_across);
    let space_across = area_across.map_or(AvailableSpace::MaxContent, AvailableSpace::Definite);
    let margins = item.margin_sum(axis);

    let mut measure = |space: AvailableSpace| {
        tree.measure_child_size(
            item.node,
            known_dimensions,
            parent_size,
            Size::from_axes(axis, space, space_across),
            SizingMode::InherentSize,
            axis,
        )
    };
    let min_content = measure(AvailableSpace::MinContent);
    let max_content = measure(AvailableSpace::MaxContent).max(min_content);

    let minimum = preferred.or(min_size).unwrap_or_else(|| {
        if item.is_scroll_container(axis) {
            0.0
        } else {
            // Content-based minimum, clamped by a fixed area.
            let range = item.tracks(axis);
            spanned_max_limit(tracks, range.start..range.end, ctx.gap)
                .map_or(min_content, |limit| min_content.min((limit - margins).max(0.0)))
        }
    });

    Contributions {
        min_content: min_content + margins,
        max_content: max_content + margins,
        minimum: minimum + margins,
    }
}
