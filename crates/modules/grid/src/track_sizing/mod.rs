//! Grid sizing algorithm, run once per axis.
//!
//! Spec: §12 Grid Sizing
//! <https://www.w3.org/TR/css-grid-2/#algo-track-sizing>

mod distribution;
mod expansion;
mod helpers;
mod resolution;

pub use helpers::{spanned_size, sum_gaps};

use trellis_geometry::{AbsoluteAxis, AvailableSpace};
use trellis_style::AlignContent;
use trellis_tree::LayoutTree;

use crate::types::{GridItem, GridTrack};

/// Container values the sizing of one axis depends on.
#[derive(Debug, Clone, Copy)]
pub struct SizingContext {
    /// Axis whose tracks are being sized.
    pub axis: AbsoluteAxis,
    /// Space the tracks may fill: the content box when definite, otherwise
    /// the constraint the container is being sized under.
    pub available_space: AvailableSpace,
    /// Definite content-box size of the container along `axis`.
    pub inner_size: Option<f32>,
    /// Content-box minimum along `axis`.
    pub min_size: Option<f32>,
    /// Content-box maximum along `axis`.
    pub max_size: Option<f32>,
    /// Gutter between tracks of `axis`.
    pub gap: f32,
    /// Gutter between tracks of the other axis.
    pub other_gap: f32,
    /// `justify-content` for columns, `align-content` for rows.
    pub content_alignment: AlignContent,
}

/// Size the tracks of `ctx.axis`.
///
/// `other_tracks` are the tracks of the other axis; `other_sized` tells
/// whether they already carry final base sizes, which then bound the space
/// items are measured in.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#algo-overview>
pub fn track_sizing_algorithm(
    tree: &mut impl LayoutTree,
    ctx: &SizingContext,
    tracks: &mut [GridTrack],
    other_tracks: &[GridTrack],
    other_sized: bool,
    items: &mut [GridItem],
) {
    let axis = ctx.axis;
    for item in items.iter_mut() {
        let range = item.tracks(axis);
        let spanned = tracks.get(range.start..range.end).unwrap_or(&[]);
        item.crosses_flexible_track
            .set(axis, spanned.iter().any(GridTrack::is_flexible));
        item.crosses_intrinsic_track.set(
            axis,
            spanned
                .iter()
                .any(|track| track.has_intrinsic_min() || track.has_intrinsic_max()),
        );
    }

    // 12.4 Initialize Track Sizes
    resolution::initialize_track_sizes(tracks);
    // 12.5 Resolve Intrinsic Track Sizes
    resolution::resolve_intrinsic_track_sizes(tree, ctx, tracks, other_tracks, other_sized, items);
    // 12.6 Maximize Tracks
    expansion::maximize_tracks(tracks, ctx);
    // 12.7 Expand Flexible Tracks
    expansion::expand_flexible_tracks(tracks, ctx, items);
    // 12.8 Stretch auto Tracks
    expansion::stretch_auto_tracks(tracks, ctx);

    tracing::trace!(
        "track_sizing_algorithm: axis={axis:?} space={:?} sizes={:?}",
        ctx.available_space,
        tracks.iter().map(|track| track.base_size).collect::<Vec<_>>()
    );
}

/// Total size of `tracks` and the gutters between them.
pub fn total_size(tracks: &[GridTrack], gap: f32) -> f32 {
    spanned_size(tracks, 0..tracks.len(), gap, |track| track.base_size)
}

