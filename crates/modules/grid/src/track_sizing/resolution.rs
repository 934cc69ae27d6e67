//! Initial track sizes and intrinsic track size resolution.
//!
//! Spec: <https://www.w3.org/TR/css-grid-2/#algo-content>

use core::ops::Range;

use trellis_geometry::AvailableSpace;
use trellis_style::Dimension;
use trellis_tree::LayoutTree;

use super::SizingContext;
use super::distribution::{SpanRequest, Target, distribute_item_space};
use super::helpers::{compute_contributions, spanned_max_limit};
use crate::types::{Contributions, GridItem, GridTrack};

/// Give every track its starting base size and growth limit.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#algo-init>
pub fn initialize_track_sizes(tracks: &mut [GridTrack]) {
    for track in tracks {
        track.infinitely_growable = false;
        track.planned_increase = 0.0;
        track.item_incurred_increase = 0.0;
        if track.is_collapsed {
            track.base_size = 0.0;
            track.growth_limit = 0.0;
            continue;
        }
        track.base_size = track.fixed_min().unwrap_or(0.0);
        track.growth_limit = if track.is_flexible() {
            f32::INFINITY
        } else {
            track
                .fixed_max()
                .map_or(f32::INFINITY, |max| max.max(track.base_size))
        };
    }
}

/// Min-content contribution limited by a fixed area, never below the minimum contribution.
fn limited_min_content(
    tracks: &[GridTrack],
    range: Range<usize>,
    gap: f32,
    contributions: Contributions,
) -> f32 {
    spanned_max_limit(tracks, range, gap).map_or(contributions.min_content, |limit| {
        contributions
            .min_content
            .min(limit)
            .max(contributions.minimum)
    })
}

/// Contribution that feeds an intrinsic minimum under the current constraint.
fn intrinsic_minimum(
    tracks: &[GridTrack],
    range: Range<usize>,
    ctx: &SizingContext,
    contributions: Contributions,
) -> f32 {
    if ctx.available_space.is_definite() {
        contributions.minimum
    } else {
        limited_min_content(tracks, range, ctx.gap, contributions)
    }
}

/// Size each content-sized track to fit the items spanning it.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#algo-content>
pub fn resolve_intrinsic_track_sizes(
    tree: &mut impl LayoutTree,
    ctx: &SizingContext,
    tracks: &mut [GridTrack],
    other_tracks: &[GridTrack],
    other_sized: bool,
    items: &mut [GridItem],
) {
    let axis = ctx.axis;
    for item in items.iter_mut() {
        item.contributions = (item.crosses_intrinsic_track.get(axis)
            || item.crosses_flexible_track.get(axis))
        .then(|| compute_contributions(tree, item, ctx, tracks, other_tracks, other_sized));
    }

    // 2. Size tracks to fit non-spanning items.
    for item in items.iter() {
        let Some(contributions) = item.contributions else {
            continue;
        };
        if item.span(axis) != 1 || item.crosses_flexible_track.get(axis) {
            continue;
        }
        let range = item.tracks(axis);
        let base_contribution = match tracks.get(range.start).map(|track| track.min) {
            Some(Dimension::MinContent) => contributions.min_content,
            Some(Dimension::MaxContent) => contributions.max_content,
            Some(Dimension::Auto) => {
                intrinsic_minimum(tracks, range.start..range.end, ctx, contributions)
            }
            _ => 0.0,
        };
        let Some(track) = tracks.get_mut(range.start) else {
            continue;
        };
        if track.is_collapsed {
            continue;
        }
        track.base_size = track.base_size.max(base_contribution);

        let growth_contribution = match track.max {
            Dimension::MinContent => Some(contributions.min_content),
            Dimension::MaxContent | Dimension::Auto => Some(contributions.max_content),
            Dimension::FitContentPx(limit) => Some(contributions.max_content.min(limit)),
            _ => None,
        };
        if let Some(growth) = growth_contribution {
            track.growth_limit = if track.growth_limit.is_infinite() {
                growth
            } else {
                track.growth_limit.max(growth)
            };
        }
    }
    for track in tracks.iter_mut() {
        if track.growth_limit.is_finite() && track.growth_limit < track.base_size {
            track.growth_limit = track.base_size;
        }
    }

    // 3. Increase sizes to accommodate spanning items, smallest spans first.
    let max_span = items.iter().map(|item| item.span(axis)).max().unwrap_or(0);
    for span in 2..=max_span {
        let group: Vec<(Range<usize>, Contributions)> = items
            .iter()
            .filter(|item| item.span(axis) == span && !item.crosses_flexible_track.get(axis))
            .filter_map(|item| {
                let range = item.tracks(axis);
                item.contributions.map(|contributions| (range.start..range.end, contributions))
            })
            .collect();
        if group.is_empty() {
            continue;
        }
        resolve_spanning_group(tracks, ctx, &group);
    }

    // 4. Items crossing flexible tracks feed the flexible tracks only.
    let flexible_group: Vec<SpanRequest> = items
        .iter()
        .filter(|item| item.crosses_flexible_track.get(axis))
        .filter_map(|item| {
            let range = item.tracks(axis);
            item.contributions.map(|contributions| SpanRequest {
                tracks: range.start..range.end,
                size: intrinsic_minimum(tracks, range.start..range.end, ctx, contributions),
            })
        })
        .collect();
    distribute_item_space(
        tracks,
        &flexible_group,
        ctx.gap,
        Target::BaseSize,
        |track| track.is_flexible() && track.has_intrinsic_min(),
        |_| true,
    );

    // 5. Tracks left without a growth limit take their base size.
    for track in tracks.iter_mut() {
        if track.growth_limit.is_infinite() {
            track.growth_limit = track.base_size;
        }
        track.infinitely_growable = false;
    }
}

/// One request per item of `group`, sized by `size`.
fn span_requests(
    group: &[(Range<usize>, Contributions)],
    size: impl Fn(Range<usize>, Contributions) -> f32,
) -> Vec<SpanRequest> {
    group
        .iter()
        .map(|(range, contributions)| SpanRequest {
            tracks: range.clone(),
            size: size(range.clone(), *contributions),
        })
        .collect()
}

/// Steps 3.1 to 3.6 for items of one span size.
fn resolve_spanning_group(
    tracks: &mut [GridTrack],
    ctx: &SizingContext,
    group: &[(Range<usize>, Contributions)],
) {
    let gap = ctx.gap;
    let under_max_content = ctx.available_space == AvailableSpace::MaxContent;

    // Intrinsic minimums.
    let intrinsic = span_requests(group, |range, contributions| {
        intrinsic_minimum(tracks, range, ctx, contributions)
    });
    distribute_item_space(
        tracks,
        &intrinsic,
        gap,
        Target::BaseSize,
        GridTrack::has_intrinsic_min,
        GridTrack::has_intrinsic_max,
    );

    // Content-based minimums.
    let content = span_requests(group, |_, contributions| contributions.min_content);
    distribute_item_space(
        tracks,
        &content,
        gap,
        Target::BaseSize,
        GridTrack::has_content_min,
        GridTrack::has_intrinsic_max,
    );

    // Max-content minimums.
    let max_content = span_requests(group, |_, contributions| contributions.max_content);
    distribute_item_space(
        tracks,
        &max_content,
        gap,
        Target::BaseSize,
        |track| track.has_max_content_min() || (track.has_auto_min() && under_max_content),
        GridTrack::has_max_content_max,
    );

    for track in tracks.iter_mut() {
        if track.growth_limit.is_finite() && track.growth_limit < track.base_size {
            track.growth_limit = track.base_size;
        }
        track.infinitely_growable = false;
    }

    // Intrinsic maximums.
    distribute_item_space(
        tracks,
        &content,
        gap,
        Target::GrowthLimit,
        GridTrack::has_intrinsic_max,
        |_| true,
    );
    // Max-content maximums.
    distribute_item_space(
        tracks,
        &max_content,
        gap,
        Target::GrowthLimit,
        GridTrack::has_max_content_max,
        |_| true,
    );
}
