//! Distributing extra space across spanned tracks.
//!
//! Spec: <https://www.w3.org/TR/css-grid-2/#extra-space>

use core::ops::Range;

use super::helpers::sum_gaps;
use crate::types::GridTrack;

/// Below this, leftover space counts as fully distributed.
const EPSILON: f32 = 0.000_1;

/// The track size a distribution step increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Increase base sizes.
    BaseSize,
    /// Increase growth limits.
    GrowthLimit,
}

impl Target {
    /// The size of `track` this step measures and increases.
    #[inline]
    fn affected_size(self, track: &GridTrack) -> f32 {
        match self {
            Self::BaseSize => track.base_size,
            Self::GrowthLimit => track.growth_limit_or_base(),
        }
    }

    /// How far one item may grow `track` before it reaches its limit.
    fn limit(self, track: &GridTrack) -> f32 {
        match self {
            Self::BaseSize if track.growth_limit.is_finite() => {
                (track.growth_limit - track.base_size).max(0.0)
            }
            Self::BaseSize => f32::INFINITY,
            Self::GrowthLimit if track.growth_limit.is_infinite() || track.infinitely_growable => {
                f32::INFINITY
            }
            Self::GrowthLimit => 0.0,
        }
    }

    /// How far one item may grow `track` past its limit.
    fn overflow_limit(self, track: &GridTrack) -> f32 {
        match (self, track.fit_content_limit()) {
            (Self::GrowthLimit, Some(limit)) => (limit - self.affected_size(track)).max(0.0),
            _ => f32::INFINITY,
        }
    }
}

/// An item's track range and the size its tracks must accommodate.
#[derive(Debug, Clone)]
pub struct SpanRequest {
    /// Track indexes spanned.
    pub tracks: Range<usize>,
    /// Contribution to fit.
    pub size: f32,
}

/// Grow `indexes` of `tracks` equally, each up to `limit`, and return the
/// space left over.
pub fn grow_up_to_limits(
    tracks: &mut [GridTrack],
    indexes: &[usize],
    mut space: f32,
    limit: impl Fn(&GridTrack) -> f32,
) -> f32 {
    loop {
        let open: Vec<usize> = indexes
            .iter()
            .copied()
            .filter(|&index| {
                tracks
                    .get(index)
                    .is_some_and(|track| track.item_incurred_increase + EPSILON < limit(track))
            })
            .collect();
        if open.is_empty() || space <= EPSILON {
            return space;
        }
        let share = space / open.len() as f32;
        for index in open {
            if let Some(track) = tracks.get_mut(index) {
                let increase = share.min(limit(track) - track.item_incurred_increase);
                track.item_incurred_increase += increase;
                space -= increase;
            }
        }
    }
}

/// Accommodate every request of one group in the `target` sizes of the
/// tracks selected by `affects`.
///
/// Each item first grows its affected tracks equally up to their limits;
/// space left after that goes to the tracks selected by `beyond_limits`
/// (or all affected tracks when none are). The largest increase any item
/// asks of a track is what the track finally receives.
pub fn distribute_item_space(
    tracks: &mut [GridTrack],
    requests: &[SpanRequest],
    gap: f32,
    target: Target,
    affects: impl Fn(&GridTrack) -> bool,
    beyond_limits: impl Fn(&GridTrack) -> bool,
) {
    for track in tracks.iter_mut() {
        track.planned_increase = 0.0;
    }

    for request in requests {
        let Some(spanned) = tracks.get_mut(request.tracks.clone()) else {
            continue;
        };
        let live = spanned.iter().filter(|track| !track.is_collapsed);
        let used = live.clone().map(|track| target.affected_size(track)).sum::<f32>()
            + sum_gaps(gap, live.count());
        let extra = request.size - used;
        if extra <= 0.0 {
            continue;
        }

        let affected: Vec<usize> = spanned
            .iter()
            .enumerate()
            .filter(|(_, track)| !track.is_collapsed && affects(track))
            .map(|(index, _)| index)
            .collect();
        if affected.is_empty() {
            continue;
        }
        for track in spanned.iter_mut() {
            track.item_incurred_increase = 0.0;
        }

        let leftover = grow_up_to_limits(spanned, &affected, extra, |track| target.limit(track));
        if leftover > EPSILON {
            let mut overflowing: Vec<usize> = affected
                .iter()
                .copied()
                .filter(|&index| spanned.get(index).is_some_and(&beyond_limits))
                .collect();
            if overflowing.is_empty() {
                overflowing.clone_from(&affected);
            }
            grow_up_to_limits(spanned, &overflowing, leftover, |track| {
                target.limit(track) + target.overflow_limit(track)
            });
        }

        for &index in &affected {
            if let Some(track) = spanned.get_mut(index) {
                track.planned_increase = track.planned_increase.max(track.item_incurred_increase);
            }
        }
    }

    for track in tracks.iter_mut() {
        if track.planned_increase <= 0.0 {
            continue;
        }
        match target {
            Target::BaseSize => track.base_size += track.planned_increase,
            Target::GrowthLimit => {
                if track.growth_limit.is_infinite() {
                    track.growth_limit = track.base_size + track.planned_increase;
                    track.infinitely_growable = true;
                } else {
                    track.growth_limit += track.planned_increase;
                }
            }
        }
        track.planned_increase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use trellis_style::TrackSize;

    use super::*;

    fn track(base_size: f32, growth_limit: f32) -> GridTrack {
        GridTrack {
            base_size,
            growth_limit,
            ..GridTrack::new(TrackSize::AUTO)
        }
    }

    /// Test that space is shared equally until a track hits its limit.
    ///
    /// # Panics
    /// Panics if the capped track grows past its growth limit.
    #[test]
    fn base_sizes_grow_up_to_growth_limits() {
        let mut tracks = [track(0.0, 10.0), track(0.0, f32::INFINITY)];
        let requests = [SpanRequest {
            tracks: 0..2,
            size: 50.0,
        }];
        distribute_item_space(&mut tracks, &requests, 0.0, Target::BaseSize, |_| true, |_| true);
        assert!((tracks[0].base_size - 10.0).abs() < 0.001);
        assert!((tracks[1].base_size - 40.0).abs() < 0.001);
    }

    /// Test that the largest request per track wins, and gaps count as used space.
    ///
    /// # Panics
    /// Panics if requests accumulate instead of taking the maximum.
    #[test]
    fn largest_request_wins() {
        let mut tracks = [track(0.0, f32::INFINITY), track(0.0, f32::INFINITY)];
        let requests = [
            SpanRequest {
                tracks: 0..2,
                size: 30.0,
            },
            SpanRequest {
                tracks: 0..2,
                size: 50.0,
            },
        ];
        distribute_item_space(&mut tracks, &requests, 10.0, Target::BaseSize, |_| true, |_| true);
        assert!((tracks[0].base_size - 20.0).abs() < 0.001);
        assert!((tracks[1].base_size - 20.0).abs() < 0.001);
    }

    /// Test that infinite growth limits become finite and are marked.
    ///
    /// # Panics
    /// Panics if the growth limit stays infinite.
    #[test]
    fn infinite_growth_limit_becomes_finite() {
        let mut tracks = [track(5.0, f32::INFINITY), track(5.0, 5.0)];
        let requests = [SpanRequest {
            tracks: 0..2,
            size: 30.0,
        }];
        distribute_item_space(
            &mut tracks,
            &requests,
            0.0,
            Target::GrowthLimit,
            |_| true,
            |_| true,
        );
        assert!((tracks[0].growth_limit - 25.0).abs() < 0.001);
        assert!(tracks[0].infinitely_growable);
        assert!((tracks[1].growth_limit - 5.0).abs() < 0.001);
    }
}
