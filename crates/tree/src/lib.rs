//! Shared plumbing between the engine and the layout algorithms.
//!
//! Algorithm crates never see the node arena. They recurse into children
//! through [`LayoutTree`], which the engine implements, so each algorithm is a
//! free function over `&mut impl LayoutTree` and the crates stay acyclic.

mod absolute;
mod alignment;
mod cache;
mod intrinsic;
mod layout;
mod tree;

use core::fmt;

pub use absolute::{AbsoluteContainer, layout_absolute_child};
pub use alignment::{compute_alignment_offset, content_size_contribution};
pub use cache::Cache;
pub use intrinsic::resolve_intrinsic_size;
pub use layout::{Layout, LayoutInput, LayoutOutput, RequestedAxis, RunMode, SizingMode};
pub use tree::LayoutTree;

/// Stable handle to a node: a slot index plus the generation that slot had
/// when the node was created. A handle whose generation no longer matches
/// its slot is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    /// Arena slot.
    slot: u32,
    /// Slot generation at allocation time.
    generation: u32,
}

impl NodeId {
    /// Build a handle from its parts.
    #[inline]
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// The arena slot.
    #[inline]
    pub const fn slot(self) -> u32 {
        self.slot
    }

    /// The generation the handle was issued with.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Pack into a single integer, generation in the high half.
    #[inline]
    pub const fn to_raw(self) -> u64 {
        ((self.generation as u64) << 32) | self.slot as u64
    }

    /// Inverse of [`NodeId::to_raw`].
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self {
            slot: raw as u32,
            generation: (raw >> 32) as u32,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}v{}", self.slot, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if packing a handle loses its slot or generation.
    fn raw_round_trip_keeps_generation() {
        let id = NodeId::new(7, 3);
        let restored = NodeId::from_raw(id.to_raw());
        assert_eq!(restored, id);
        assert_eq!(restored.generation(), 3);
        assert_eq!(id.to_string(), "#7v3");
    }
}
