//! Explicit grid resolution and track initialization.
//!
//! Spec: §7 Defining the Grid
//! <https://www.w3.org/TR/css-grid-2/#grid-definition>

use trellis_style::{Dimension, RepeatCount, TrackEntry, TrackSize};

use crate::types::{GridTrack, TrackCounts};

/// One explicit track before initialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplicitTrack {
    /// Its sizing function.
    pub sizing: TrackSize,
    /// Produced by `repeat(auto-fit, ..)`, so it collapses when empty.
    pub auto_fit: bool,
}

/// Size a track is assumed to take when counting auto repetitions.
///
/// The max function counts when definite, otherwise the min function;
/// content-sized tracks count as zero.
fn repetition_size(track: TrackSize, axis_size: Option<f32>) -> f32 {
    let definite = |function: Dimension| match function {
        Dimension::Length(value) => Some(value),
        Dimension::Percent(fraction) => axis_size.map(|size| size * fraction),
        _ => None,
    };
    definite(track.max).or_else(|| definite(track.min)).unwrap_or(0.0)
}

/// Number of repetitions for `repeat(auto-fill | auto-fit, ..)`.
///
/// `size` is the definite (or maximum) content-box size of the axis and
/// `min_size` its definite minimum. With neither, the pattern repeats once.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#auto-repeat>
pub fn auto_repeat_count(
    template: &[TrackEntry],
    size: Option<f32>,
    min_size: Option<f32>,
    gap: f32,
) -> u16 {
    let Some(pattern) = template.iter().find_map(|entry| match entry {
        TrackEntry::Repeat(RepeatCount::AutoFill | RepeatCount::AutoFit, tracks) => {
            Some(tracks.as_slice())
        }
        TrackEntry::Repeat(RepeatCount::Count(_), _) | TrackEntry::Single(_) => None,
    }) else {
        return 0;
    };

    let axis_size = size.or(min_size);
    let mut other_count = 0_usize;
    let mut other_size = 0.0_f32;
    for entry in template {
        match entry {
            TrackEntry::Single(track) => {
                other_count += 1;
                other_size += repetition_size(*track, axis_size);
            }
            TrackEntry::Repeat(RepeatCount::Count(count), tracks) => {
                other_count += usize::from(*count) * tracks.len();
                other_size += f32::from(*count)
                    * tracks
                        .iter()
                        .map(|track| repetition_size(*track, axis_size))
                        .sum::<f32>();
            }
            TrackEntry::Repeat(RepeatCount::AutoFill | RepeatCount::AutoFit, _) => {}
        }
    }

    let per_repetition = pattern
        .iter()
        .map(|track| repetition_size(*track, axis_size))
        .sum::<f32>()
        + pattern.len() as f32 * gap;
    if per_repetition <= 0.0 {
        return 1;
    }
    // Gaps between the tracks outside the repetition, minus the trailing one.
    let fixed_space = other_size + (other_count as f32 - 1.0) * gap;

    let count = if let Some(size) = size {
        ((size - fixed_space) / per_repetition).floor()
    } else if let Some(min_size) = min_size {
        ((min_size - fixed_space) / per_repetition).ceil()
    } else {
        1.0
    };
    count.clamp(1.0, f32::from(u16::MAX)) as u16
}

/// Expand `repeat()` entries into a flat list of explicit tracks.
pub fn expand_template(template: &[TrackEntry], auto_repetitions: u16) -> Vec<ExplicitTrack> {
    let mut tracks = Vec::new();
    for entry in template {
        match entry {
            TrackEntry::Single(sizing) => tracks.push(ExplicitTrack {
                sizing: *sizing,
                auto_fit: false,
            }),
            TrackEntry::Repeat(count, pattern) => {
                let (times, auto_fit) = match count {
                    RepeatCount::Count(times) => (*times, false),
                    RepeatCount::AutoFill => (auto_repetitions, false),
                    RepeatCount::AutoFit => (auto_repetitions, true),
                };
                for _ in 0..times {
                    tracks.extend(pattern.iter().map(|sizing| ExplicitTrack {
                        sizing: *sizing,
                        auto_fit,
                    }));
                }
            }
        }
    }
    tracks
}

/// Build the full track list of one axis: negative implicit tracks, the
/// explicit grid, then positive implicit tracks.
///
/// Implicit tracks cycle through `auto_tracks` (`auto` when empty); tracks
/// before the explicit grid cycle backwards from its start. Empty `auto-fit`
/// tracks, as reported by `is_occupied`, are collapsed.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#implicit-grids>
pub fn initialize_tracks(
    explicit: &[ExplicitTrack],
    auto_tracks: &[TrackSize],
    counts: TrackCounts,
    is_occupied: impl Fn(usize) -> bool,
) -> Vec<GridTrack> {
    let auto_track = |line: i32| -> TrackSize {
        if auto_tracks.is_empty() {
            return TrackSize::AUTO;
        }
        let len = auto_tracks.len() as i32;
        auto_tracks
            .get(line.rem_euclid(len) as usize)
            .copied()
            .unwrap_or(TrackSize::AUTO)
    };

    let mut tracks = Vec::with_capacity(counts.len());
    for line in counts.implicit_start_line()..0 {
        tracks.push(GridTrack::new(auto_track(line)));
    }
    for track in explicit {
        let index = tracks.len();
        tracks.push(if track.auto_fit && !is_occupied(index) {
            GridTrack::collapsed(track.sizing)
        } else {
            GridTrack::new(track.sizing)
        });
    }
    for line in 0..i32::from(counts.positive_implicit) {
        tracks.push(GridTrack::new(auto_track(line)));
    }
    tracing::trace!(
        "initialize_tracks: negative={} explicit={} positive={} collapsed={}",
        counts.negative_implicit,
        counts.explicit,
        counts.positive_implicit,
        tracks.iter().filter(|track| track.is_collapsed).count()
    );
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that `auto-fill` fits as many repetitions as the axis allows.
    ///
    /// # Panics
    /// Panics if the repetition count is wrong.
    #[test]
    fn auto_fill_counts_gaps() {
        let template = vec![TrackEntry::Repeat(
            RepeatCount::AutoFill,
            vec![TrackSize::length(100.0)],
        )];
        // 3 * 100 + 2 * 10 = 320 fits in 350; 4 tracks would need 430.
        assert_eq!(auto_repeat_count(&template, Some(350.0), None, 10.0), 3);
        assert_eq!(auto_repeat_count(&template, Some(50.0), None, 0.0), 1);
        assert_eq!(auto_repeat_count(&template, None, Some(250.0), 0.0), 3);
        assert_eq!(auto_repeat_count(&template, None, None, 0.0), 1);
    }

    /// Test that fixed tracks outside the repetition reduce the count.
    ///
    /// # Panics
    /// Panics if the surrounding tracks are ignored.
    #[test]
    fn fixed_neighbours_reduce_repetitions() {
        let template = vec![
            TrackEntry::Single(TrackSize::length(50.0)),
            TrackEntry::Repeat(
                RepeatCount::AutoFit,
                vec![TrackSize::minmax(Dimension::Length(100.0), Dimension::Fr(1.0))],
            ),
        ];
        assert_eq!(auto_repeat_count(&template, Some(300.0), None, 0.0), 2);
        let expanded = expand_template(&template, 2);
        assert_eq!(expanded.len(), 3);
        assert!(!expanded[0].auto_fit);
        assert!(expanded[2].auto_fit);
    }

    /// Test implicit track cycling and auto-fit collapsing.
    ///
    /// # Panics
    /// Panics if implicit tracks pick the wrong sizing function.
    #[test]
    fn implicit_tracks_cycle_auto_tracks() {
        let explicit = expand_template(
            &[TrackEntry::Repeat(
                RepeatCount::AutoFit,
                vec![TrackSize::length(10.0)],
            )],
            2,
        );
        let auto_tracks = [TrackSize::length(1.0), TrackSize::length(2.0)];
        let counts = TrackCounts {
            negative_implicit: 1,
            explicit: 2,
            positive_implicit: 3,
        };
        let tracks = initialize_tracks(&explicit, &auto_tracks, counts, |index| index == 1);

        assert_eq!(tracks.len(), 6);
        assert_eq!(tracks[0].sizing, TrackSize::length(2.0));
        assert!(!tracks[1].is_collapsed);
        assert!(tracks[2].is_collapsed);
        assert_eq!(tracks[3].sizing, TrackSize::length(1.0));
        assert_eq!(tracks[4].sizing, TrackSize::length(2.0));
        assert_eq!(tracks[5].sizing, TrackSize::length(1.0));
    }
}
