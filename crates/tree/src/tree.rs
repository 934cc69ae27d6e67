//! The dispatcher seam between the engine and the layout algorithms.

use trellis_geometry::{AbsoluteAxis, AvailableSpace, Size};
use trellis_style::Style;

use crate::{Layout, LayoutInput, LayoutOutput, NodeId, RequestedAxis, RunMode, SizingMode};

/// A tree the layout algorithms can walk and write results into.
///
/// Implemented by the engine. Algorithms call back into
/// [`LayoutTree::compute_child_layout`] to lay out a child with whatever
/// algorithm the child's `display` selects, so the algorithms never depend on
/// each other or on the arena.
pub trait LayoutTree {
    /// Children of `node` in storage order.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// The style of `node`.
    fn style(&self, node: NodeId) -> &Style;

    /// Record the unrounded layout of `node`.
    fn set_unrounded_layout(&mut self, node: NodeId, layout: &Layout);

    /// Lay out `node` with its own algorithm, consulting its cache.
    fn compute_child_layout(&mut self, node: NodeId, input: LayoutInput) -> LayoutOutput;

    /// Number of children of `node`.
    #[inline]
    fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    /// Children of `node` as an owned list, for loops that also mutate the tree.
    #[inline]
    fn child_ids(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node).to_vec()
    }

    /// Size `node` in one axis without positioning its descendants.
    #[inline]
    fn measure_child_size(
        &mut self,
        node: NodeId,
        known_dimensions: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        sizing_mode: SizingMode,
        axis: AbsoluteAxis,
    ) -> f32 {
        let requested = match axis {
            AbsoluteAxis::Horizontal => RequestedAxis::Horizontal,
            AbsoluteAxis::Vertical => RequestedAxis::Vertical,
        };
        self.compute_child_layout(
            node,
            LayoutInput {
                run_mode: RunMode::ComputeSize,
                sizing_mode,
                axis: requested,
                known_dimensions,
                parent_size,
                available_space,
            },
        )
        .size
        .get(axis)
    }

    /// Size `node` in both axes without positioning its descendants.
    #[inline]
    fn measure_child_sizes(
        &mut self,
        node: NodeId,
        known_dimensions: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        sizing_mode: SizingMode,
    ) -> Size<f32> {
        self.compute_child_layout(
            node,
            LayoutInput {
                run_mode: RunMode::ComputeSize,
                sizing_mode,
                axis: RequestedAxis::Both,
                known_dimensions,
                parent_size,
                available_space,
            },
        )
        .size
    }

    /// Fully lay out `node` and its descendants.
    #[inline]
    fn perform_child_layout(
        &mut self,
        node: NodeId,
        known_dimensions: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        sizing_mode: SizingMode,
    ) -> LayoutOutput {
        self.compute_child_layout(
            node,
            LayoutInput {
                run_mode: RunMode::PerformLayout,
                sizing_mode,
                axis: RequestedAxis::Both,
                known_dimensions,
                parent_size,
                available_space,
            },
        )
    }

    /// Zero out `node` and its subtree.
    #[inline]
    fn hide_child(&mut self, node: NodeId) {
        self.compute_child_layout(node, LayoutInput::HIDDEN);
    }
}
