//! Per-node memo of previous layout results.
//!
//! One slot holds the last full layout; nine more hold size-only results,
//! bucketed by which dimensions were known and which axes were sized under a
//! min-content constraint. Within a bucket the newest result wins.

use trellis_geometry::{AvailableSpace, Size};

use crate::{LayoutOutput, RunMode, SizingMode};

/// Number of size-only buckets.
const MEASURE_SLOTS: usize = 9;

/// One memoised call.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CacheEntry<T> {
    /// Known dimensions of the call.
    known_dimensions: Size<Option<f32>>,
    /// Available space of the call.
    available_space: Size<AvailableSpace>,
    /// Sizing mode of the call.
    sizing_mode: SizingMode,
    /// The result.
    content: T,
}

impl<T> CacheEntry<T> {
    /// Whether this entry answers a call with the given inputs.
    ///
    /// A known dimension matches either the same known dimension or the size
    /// this entry produced. Available space only matters in axes where
    /// nothing was known.
    fn matches(
        &self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        sizing_mode: SizingMode,
        produced: Size<f32>,
    ) -> bool {
        self.sizing_mode == sizing_mode
            && (known_dimensions.width == self.known_dimensions.width
                || known_dimensions.width == Some(produced.width))
            && (known_dimensions.height == self.known_dimensions.height
                || known_dimensions.height == Some(produced.height))
            && (known_dimensions.width.is_some()
                || self
                    .available_space
                    .width
                    .is_roughly_equal(available_space.width))
            && (known_dimensions.height.is_some()
                || self
                    .available_space
                    .height
                    .is_roughly_equal(available_space.height))
    }
}

/// Cached results for one node. Cleared whenever the node is marked dirty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cache {
    /// Last [`RunMode::PerformLayout`] result.
    final_layout_entry: Option<CacheEntry<LayoutOutput>>,
    /// [`RunMode::ComputeSize`] results.
    measure_entries: [Option<CacheEntry<Size<f32>>>; MEASURE_SLOTS],
}

impl Cache {
    /// An empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            final_layout_entry: None,
            measure_entries: [None; MEASURE_SLOTS],
        }
    }

    /// Bucket for a size-only result.
    fn slot(known_dimensions: Size<Option<f32>>, available_space: Size<AvailableSpace>) -> usize {
        let width_is_min = usize::from(available_space.width == AvailableSpace::MinContent);
        let height_is_min = usize::from(available_space.height == AvailableSpace::MinContent);
        match (known_dimensions.width, known_dimensions.height) {
            (Some(_), Some(_)) => 0,
            (Some(_), None) => 1 + height_is_min,
            (None, Some(_)) => 3 + width_is_min,
            (None, None) => 5 + width_is_min * 2 + height_is_min,
        }
    }

    /// Look up a previous result for these inputs.
    pub fn get(
        &self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        run_mode: RunMode,
        sizing_mode: SizingMode,
    ) -> Option<LayoutOutput> {
        match run_mode {
            RunMode::PerformLayout => self
                .final_layout_entry
                .filter(|entry| {
                    entry.matches(
                        known_dimensions,
                        available_space,
                        sizing_mode,
                        entry.content.size,
                    )
                })
                .map(|entry| entry.content),
            RunMode::ComputeSize => self
                .measure_entries
                .iter()
                .flatten()
                .find(|entry| {
                    entry.matches(known_dimensions, available_space, sizing_mode, entry.content)
                })
                .map(|entry| LayoutOutput::from_outer_size(entry.content)),
            RunMode::PerformHiddenLayout => None,
        }
    }

    /// Remember a result.
    pub fn store(
        &mut self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        run_mode: RunMode,
        sizing_mode: SizingMode,
        output: LayoutOutput,
    ) {
        match run_mode {
            RunMode::PerformLayout => {
                self.final_layout_entry = Some(CacheEntry {
                    known_dimensions,
                    available_space,
                    sizing_mode,
                    content: output,
                });
            }
            RunMode::ComputeSize => {
                let entry = Some(CacheEntry {
                    known_dimensions,
                    available_space,
                    sizing_mode,
                    content: output.size,
                });
                if let Some(slot) = self
                    .measure_entries
                    .get_mut(Self::slot(known_dimensions, available_space))
                {
                    *slot = entry;
                }
            }
            RunMode::PerformHiddenLayout => {}
        }
    }

    /// Forget everything.
    #[inline]
    pub fn clear(&mut self) {
        self.final_layout_entry = None;
        self.measure_entries = [None; MEASURE_SLOTS];
    }

    /// True when nothing is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.final_layout_entry.is_none() && self.measure_entries.iter().all(Option::is_none)
    }
}
