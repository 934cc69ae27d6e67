//! Maximize tracks, expand flexible tracks and stretch `auto` tracks.
//!
//! Spec: <https://www.w3.org/TR/css-grid-2/#algo-grow-tracks>

use core::ops::Range;

use trellis_geometry::AvailableSpace;
use trellis_style::AlignContent;

use super::SizingContext;
use super::distribution::grow_up_to_limits;
use super::helpers::{spanned_size, sum_gaps};
use crate::types::{GridItem, GridTrack};

/// Total base size of `tracks` and their gutters.
fn used_space(tracks: &[GridTrack], gap: f32) -> f32 {
    spanned_size(tracks, 0..tracks.len(), gap, |track| track.base_size)
}

/// Indexes of the live tracks selected by `filter`.
fn live_indexes(tracks: &[GridTrack], filter: impl Fn(&GridTrack) -> bool) -> Vec<usize> {
    tracks
        .iter()
        .enumerate()
        .filter(|(_, track)| !track.is_collapsed && filter(track))
        .map(|(index, _)| index)
        .collect()
}

/// Grow base sizes toward growth limits using the free space.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#algo-grow-tracks>
pub fn maximize_tracks(tracks: &mut [GridTrack], ctx: &SizingContext) {
    match ctx.available_space {
        AvailableSpace::Definite(size) => {
            let free_space = size - used_space(tracks, ctx.gap);
            if free_space <= 0.0 {
                return;
            }
            let indexes = live_indexes(tracks, |_| true);
            for track in tracks.iter_mut() {
                track.item_incurred_increase = 0.0;
            }
            grow_up_to_limits(tracks, &indexes, free_space, |track| {
                (track.growth_limit - track.base_size).max(0.0)
            });
            for track in tracks.iter_mut() {
                track.base_size += track.item_incurred_increase;
                track.item_incurred_increase = 0.0;
            }
        }
        AvailableSpace::MaxContent => {
            for track in tracks.iter_mut().filter(|track| !track.is_collapsed) {
                if track.growth_limit.is_finite() {
                    track.base_size = track.base_size.max(track.growth_limit);
                }
            }
        }
        AvailableSpace::MinContent => {}
    }
}

/// The used size of `1fr` when `range` of `tracks` must fill `space`.
///
/// Flexible tracks whose share would fall below their base size are
/// treated as inflexible and the share is recomputed without them.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#algo-find-fr-size>
pub fn find_fr_size(tracks: &[GridTrack], range: Range<usize>, space: f32, gap: f32) -> f32 {
    let spanned = tracks.get(range).unwrap_or(&[]);
    let mut inflexible: Vec<bool> = spanned
        .iter()
        .map(|track| track.is_collapsed || !track.is_flexible())
        .collect();
    let gaps = sum_gaps(
        gap,
        spanned.iter().filter(|track| !track.is_collapsed).count(),
    );

    loop {
        let mut used = gaps;
        let mut flex_sum = 0.0_f32;
        for (track, &fixed) in spanned.iter().zip(&inflexible) {
            if track.is_collapsed {
                continue;
            }
            if fixed {
                used += track.base_size;
            } else {
                flex_sum += track.flex_factor();
            }
        }
        let fr_size = (space - used) / flex_sum.max(1.0);

        let mut changed = false;
        for (track, fixed) in spanned.iter().zip(inflexible.iter_mut()) {
            if !*fixed && track.flex_factor() * fr_size < track.base_size {
                *fixed = true;
                changed = true;
            }
        }
        if !changed {
            return fr_size;
        }
    }
}

/// Size `fr` tracks from the free space, or from their content when the
/// space is indefinite. A flexible track never shrinks below its base size,
/// so negative free space leaves flexible tracks at their base size.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#algo-flex-tracks>
pub fn expand_flexible_tracks(tracks: &mut [GridTrack], ctx: &SizingContext, items: &[GridItem]) {
    if !tracks
        .iter()
        .any(|track| track.is_flexible() && !track.is_collapsed)
    {
        return;
    }
    let gap = ctx.gap;
    let all = 0..tracks.len();

    let fr_size = match ctx.available_space {
        AvailableSpace::MinContent => 0.0,
        AvailableSpace::Definite(size) => find_fr_size(tracks, all, size, gap),
        AvailableSpace::MaxContent => {
            let mut fr_size = tracks
                .iter()
                .filter(|track| track.is_flexible() && !track.is_collapsed)
                .map(|track| {
                    let factor = track.flex_factor();
                    if factor > 1.0 {
                        track.base_size / factor
                    } else {
                        track.base_size
                    }
                })
                .fold(0.0_f32, f32::max);
            for item in items
                .iter()
                .filter(|item| item.crosses_flexible_track.get(ctx.axis))
            {
                let Some(contributions) = item.contributions else {
                    continue;
                };
                let range = item.tracks(ctx.axis);
                fr_size = fr_size.max(find_fr_size(
                    tracks,
                    range.start..range.end,
                    contributions.max_content,
                    gap,
                ));
            }

            let grid_size = spanned_size(tracks, all.clone(), gap, |track| {
                track.base_size.max(track.flex_factor() * fr_size)
            });
            if let Some(min) = ctx.min_size
                && grid_size < min
            {
                find_fr_size(tracks, all, min, gap)
            } else if let Some(max) = ctx.max_size
                && grid_size > max
            {
                find_fr_size(tracks, all, max, gap)
            } else {
                fr_size
            }
        }
    };

    for track in tracks
        .iter_mut()
        .filter(|track| track.is_flexible() && !track.is_collapsed)
    {
        track.base_size = track.base_size.max(track.flex_factor() * fr_size);
        track.growth_limit = track.growth_limit.max(track.base_size);
    }
}

/// Share positive definite free space among tracks with an `auto` max
/// function, when content alignment is `normal` or `stretch`.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#algo-stretch>
pub fn stretch_auto_tracks(tracks: &mut [GridTrack], ctx: &SizingContext) {
    if !matches!(
        ctx.content_alignment,
        AlignContent::Normal | AlignContent::Stretch
    ) {
        return;
    }
    let Some(space) = ctx.inner_size.or(ctx.min_size) else {
        return;
    };
    let free_space = space - used_space(tracks, ctx.gap);
    if free_space <= 0.0 {
        return;
    }
    let indexes = live_indexes(tracks, GridTrack::has_auto_max);
    if indexes.is_empty() {
        return;
    }
    let share = free_space / indexes.len() as f32;
    for index in indexes {
        if let Some(track) = tracks.get_mut(index) {
            track.base_size += share;
        }
    }
}

#[cfg(test)]
mod tests {
    use trellis_geometry::AbsoluteAxis;
    use trellis_style::{Dimension, TrackSize};

    use super::*;

    fn context(available_space: AvailableSpace) -> SizingContext {
        SizingContext {
            axis: AbsoluteAxis::Horizontal,
            available_space,
            inner_size: available_space.into_option(),
            min_size: None,
            max_size: None,
            gap: 0.0,
            other_gap: 0.0,
            content_alignment: AlignContent::Normal,
        }
    }

    fn sized(sizing: TrackSize, base_size: f32) -> GridTrack {
        GridTrack {
            base_size,
            growth_limit: base_size,
            ..GridTrack::new(sizing)
        }
    }

    /// Test that `fr` tracks split the leftover space by factor.
    ///
    /// # Panics
    /// Panics if the flexible tracks are sized wrongly.
    #[test]
    fn fr_tracks_share_leftover() {
        let mut tracks = [
            sized(TrackSize::length(100.0), 100.0),
            sized(TrackSize::fr(1.0), 0.0),
            sized(TrackSize::fr(3.0), 0.0),
        ];
        expand_flexible_tracks(&mut tracks, &context(AvailableSpace::Definite(500.0)), &[]);
        assert!((tracks[1].base_size - 100.0).abs() < 0.001);
        assert!((tracks[2].base_size - 300.0).abs() < 0.001);
    }

    /// Test that a flexible track larger than its share is treated as inflexible.
    ///
    /// # Panics
    /// Panics if the large track is shrunk or the other track ignores it.
    #[test]
    fn large_base_size_makes_track_inflexible() {
        let mut tracks = [
            sized(TrackSize::minmax(Dimension::Auto, Dimension::Fr(1.0)), 80.0),
            sized(TrackSize::fr(1.0), 0.0),
        ];
        expand_flexible_tracks(&mut tracks, &context(AvailableSpace::Definite(100.0)), &[]);
        assert!((tracks[0].base_size - 80.0).abs() < 0.001);
        assert!((tracks[1].base_size - 20.0).abs() < 0.001);
    }

    /// Test that negative free space never shrinks flexible tracks.
    ///
    /// # Panics
    /// Panics if a flexible track goes below its base size.
    #[test]
    fn negative_space_leaves_base_sizes() {
        let mut tracks = [
            sized(TrackSize::length(300.0), 300.0),
            sized(TrackSize::fr(1.0), 0.0),
        ];
        expand_flexible_tracks(&mut tracks, &context(AvailableSpace::Definite(100.0)), &[]);
        assert!(tracks[1].base_size.abs() < 0.001);
    }

    /// Test that maximizing stops at growth limits and stretching fills `auto` tracks.
    ///
    /// # Panics
    /// Panics if free space is handed out wrongly.
    #[test]
    fn maximize_then_stretch() {
        let mut tracks = [
            GridTrack {
                base_size: 10.0,
                growth_limit: 30.0,
                ..GridTrack::new(TrackSize::AUTO)
            },
            sized(TrackSize::length(50.0), 50.0),
        ];
        let ctx = context(AvailableSpace::Definite(100.0));
        maximize_tracks(&mut tracks, &ctx);
        assert!((tracks[0].base_size - 30.0).abs() < 0.001);
        stretch_auto_tracks(&mut tracks, &ctx);
        assert!((tracks[0].base_size - 50.0).abs() < 0.001);
        assert!((tracks[1].base_size - 50.0).abs() < 0.001);
    }
}
