//! Track alignment and item placement within grid areas.
//!
//! Spec: §10 Alignment and Spacing
//! <https://www.w3.org/TR/css-grid-2/#alignment>

use trellis_geometry::{AbsoluteAxis, AvailableSpace, Line, MaybeMath as _, Point, Rect, Size};
use trellis_style::{AlignContent, AlignSelf, Dimension, MaybeResolve as _, ResolveOrZero as _};
use trellis_tree::{Layout, LayoutTree, SizingMode, compute_alignment_offset, content_size_contribution};

use crate::track_sizing::{spanned_size, sum_gaps};
use crate::types::{GridItem, GridTrack};

/// Set the start offset of every track along one axis.
///
/// `start` is where the content box begins inside the border box. Free
/// space is distributed by `alignment`; collapsed tracks sit at the
/// position of the next live track and take no gutter.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#grid-align>
pub fn align_tracks(
    tracks: &mut [GridTrack],
    content_box_size: f32,
    start: f32,
    gap: f32,
    alignment: AlignContent,
) {
    let live = tracks.iter().filter(|track| !track.is_collapsed).count();
    let used = tracks
        .iter()
        .filter(|track| !track.is_collapsed)
        .map(|track| track.base_size)
        .sum::<f32>()
        + sum_gaps(gap, live);
    let free_space = content_box_size - used;

    let mut position = start;
    let mut is_first = true;
    for track in tracks.iter_mut() {
        if track.is_collapsed {
            track.offset = position;
            continue;
        }
        position += compute_alignment_offset(free_space, live, gap, alignment, false, is_first);
        track.offset = position;
        position += track.base_size;
        is_first = false;
    }
}

/// Start offset and size of the area covering `range` of `tracks`.
pub fn area_extent(tracks: &[GridTrack], range: Line<usize>, gap: f32) -> (f32, f32) {
    let offset = tracks
        .iter()
        .skip(range.start)
        .take(range.end.saturating_sub(range.start))
        .find(|track| !track.is_collapsed)
        .map_or(0.0, |track| track.offset);
    let size = spanned_size(tracks, range.start..range.end, gap, |track| track.base_size);
    (offset, size)
}

/// Offset of an item inside `free_space` for its self alignment.
///
/// `normal` and `baseline` align to the start edge.
#[inline]
fn self_alignment_offset(alignment: AlignSelf, free_space: f32) -> f32 {
    match alignment {
        AlignSelf::Normal
        | AlignSelf::Start
        | AlignSelf::FlexStart
        | AlignSelf::Baseline
        | AlignSelf::Stretch => 0.0,
        AlignSelf::End | AlignSelf::FlexEnd => free_space,
        AlignSelf::Center => free_space / 2.0,
    }
}

/// What positioning one item contributes to its container.
#[derive(Debug, Clone, Copy)]
pub struct PlacedItem {
    /// Extent of the item's box and visible overflow.
    pub content_contribution: Size<f32>,
    /// First baseline relative to the container border box.
    pub baseline: f32,
}

/// Lay out `item` inside its grid area and record its final layout.
///
/// `stretch` fills the area along axes whose size is `auto` and whose
/// margins are not; otherwise the item keeps its own size and is offset by
/// `justify-self` and `align-self`. `auto` margins absorb the free space
/// first.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#grid-item-sizing>
pub fn align_and_position_item(
    tree: &mut impl LayoutTree,
    item: &GridItem,
    area_location: Point<f32>,
    area_size: Size<f32>,
) -> PlacedItem {
    let style = tree.style(item.node);
    let parent_size = area_size.map(Some);
    let aspect_ratio = style.aspect_ratio;
    let min_size = style
        .min_size
        .maybe_resolve(parent_size)
        .maybe_apply_aspect_ratio(aspect_ratio);
    let max_size = style
        .max_size
        .maybe_resolve(parent_size)
        .maybe_apply_aspect_ratio(aspect_ratio);
    let inherent_size = style.size.maybe_resolve(parent_size);
    let size_is_auto = style.size.map(Dimension::is_auto);
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let scrollbar_size = style.scrollbar_gutter();
    let inset = style.inset.maybe_resolve(parent_size);

    let alignment = Size {
        width: item.justify_self,
        height: item.align_self,
    };
    let stretched = |axis: AbsoluteAxis| {
        let margin = item.margin.axis(axis);
        (alignment.get(axis) == AlignSelf::Stretch
            && size_is_auto.get(axis)
            && margin.start.is_some()
            && margin.end.is_some())
        .then(|| (area_size.get(axis) - item.margin_sum(axis)).max(0.0))
    };
    let known_dimensions = Size {
        width: inherent_size.width.or_else(|| stretched(AbsoluteAxis::Horizontal)),
        height: inherent_size.height.or_else(|| stretched(AbsoluteAxis::Vertical)),
    }
    .maybe_apply_aspect_ratio(aspect_ratio)
    .maybe_clamp(min_size, max_size);

    let available = Size {
        width: AvailableSpace::Definite((area_size.width - item.margin_sum(AbsoluteAxis::Horizontal)).max(0.0)),
        height: AvailableSpace::Definite((area_size.height - item.margin_sum(AbsoluteAxis::Vertical)).max(0.0)),
    };
    let output = tree.perform_child_layout(
        item.node,
        known_dimensions,
        parent_size,
        available,
        SizingMode::InherentSize,
    );
    let size = output.size;

    let mut margin = Rect::<f32>::default();
    let mut location = Point::ZERO;
    for axis in [AbsoluteAxis::Horizontal, AbsoluteAxis::Vertical] {
        let declared = item.margin.axis(axis);
        let free_space = area_size.get(axis) - size.get(axis) - item.margin_sum(axis);
        let (start, end, offset) = match (declared.start, declared.end) {
            (None, None) => (free_space / 2.0, free_space / 2.0, 0.0),
            (None, Some(end)) => (free_space, end, 0.0),
            (Some(start), None) => (start, free_space, 0.0),
            (Some(start), Some(end)) => (start, end, self_alignment_offset(alignment.get(axis), free_space)),
        };
        margin.set_start(axis, start);
        margin.set_end(axis, end);
        location.set(axis, area_location.get(axis) + start + offset);
    }
    location.x += inset.left.or(inset.right.map(|right| -right)).unwrap_or(0.0);
    location.y += inset.top.or(inset.bottom.map(|bottom| -bottom)).unwrap_or(0.0);

    tracing::trace!(
        "align_and_position_item: node={} location=({}, {}) size={}x{}",
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
            scrollbar_size,
            border,
            padding,
            margin,
        },
    );

    PlacedItem {
        content_contribution: content_size_contribution(
            location,
            size,
            output.content_size,
            item.overflow,
        ),
        baseline: location.y + output.first_baselines.y.unwrap_or(size.height),
    }
}

#[cfg(test)]
mod tests {
    use trellis_style::TrackSize;

    use super::*;

    fn track(base_size: f32) -> GridTrack {
        GridTrack {
            base_size,
            ..GridTrack::new(TrackSize::length(base_size))
        }
    }

    /// Test that `center` splits the free space around the tracks.
    ///
    /// # Panics
    /// Panics if track offsets are wrong.
    #[test]
    fn center_offsets_tracks() {
        let mut tracks = [track(20.0), track(30.0)];
        align_tracks(&mut tracks, 100.0, 5.0, 10.0, AlignContent::Center);
        assert!((tracks[0].offset - 25.0).abs() < 0.001);
        assert!((tracks[1].offset - 55.0).abs() < 0.001);
    }

    /// Test that collapsed tracks take neither space nor a gutter.
    ///
    /// # Panics
    /// Panics if the collapsed track shifts its neighbour.
    #[test]
    fn collapsed_tracks_take_no_gutter() {
        let mut tracks = [track(20.0), GridTrack::collapsed(TrackSize::length(20.0)), track(30.0)];
        tracks[1].base_size = 0.0;
        align_tracks(&mut tracks, 100.0, 0.0, 10.0, AlignContent::Start);
        assert!((tracks[1].offset - 20.0).abs() < 0.001);
        assert!((tracks[2].offset - 30.0).abs() < 0.001);

        let (offset, size) = area_extent(&tracks, Line { start: 0, end: 3 }, 10.0);
        assert!(offset.abs() < 0.001);
        assert!((size - 60.0).abs() < 0.001);
    }
}
