//! The dispatcher and the top-level layout pass.

use trellis_geometry::{AbsoluteAxis, AvailableSpace, MaybeMath as _, Point, Size};
use trellis_style::{Display, MaybeResolve as _, ResolveOrZero as _, Style};
use trellis_tree::{
    Layout, LayoutInput, LayoutOutput, LayoutTree, NodeId, RunMode, SizingMode, resolve_intrinsic_size,
};

use super::{LayoutEngine, NodeData};
use crate::arena::Arena;
use crate::error::LayoutError;
use crate::leaf::compute_leaf_layout;
use crate::rounding::{copy_unrounded_layouts, round_layouts};

/// Style handed out for ids that do not resolve.
static FALLBACK_STYLE: Style = Style::DEFAULT;

/// The arena as the algorithms see it.
struct LayoutView<'engine> {
    /// Node storage.
    nodes: &'engine mut Arena<NodeData>,
}

impl LayoutTree for LayoutView<'_> {
    #[inline]
    fn children(&self, node: NodeId) -> &[NodeId] {
        match self.nodes.get(node) {
            Some(data) => data.children.as_slice(),
            None => &[],
        }
    }

    #[inline]
    fn style(&self, node: NodeId) -> &Style {
        self.nodes.get(node).map_or(&FALLBACK_STYLE, |data| &data.style)
    }

    #[inline]
    fn set_unrounded_layout(&mut self, node: NodeId, layout: &Layout) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.unrounded_layout = *layout;
        }
    }

    #[inline]
    fn compute_child_layout(&mut self, node: NodeId, input: LayoutInput) -> LayoutOutput {
        compute_node_layout(self, node, input)
    }
}

/// Lay out one node with the algorithm its `display` selects.
fn compute_node_layout(view: &mut LayoutView<'_>, node: NodeId, input: LayoutInput) -> LayoutOutput {
    if input.run_mode == RunMode::PerformHiddenLayout {
        hide_subtree(view, node);
        return LayoutOutput::HIDDEN;
    }
    let Some(data) = view.nodes.get(node) else {
        return LayoutOutput::HIDDEN;
    };
    if let Some(hit) = data.cache.get(
        input.known_dimensions,
        input.available_space,
        input.run_mode,
        input.sizing_mode,
    ) {
        log::trace!(
            target: "trellis::cache",
            "[CACHE-HIT] node={node} mode={:?} size={}x{}",
            input.run_mode,
            hit.size.width,
            hit.size.height
        );
        return hit;
    }
    let display = data.style.display;
    let has_children = !data.children.is_empty();

    let resolved = resolve_intrinsic_keywords(view, node, input);
    let output = match (display, has_children) {
        (Display::None, _) => {
            hide_subtree(view, node);
            return LayoutOutput::HIDDEN;
        }
        (Display::Block, true) => trellis_block::compute_block_layout(view, node, resolved),
        (Display::Flex, true) => trellis_flexbox::compute_flexbox_layout(view, node, resolved),
        (Display::Grid, true) => trellis_grid::compute_grid_layout(view, node, resolved),
        (_, false) => match view.nodes.get_mut(node) {
            Some(data) => compute_leaf_layout(resolved, &data.style, data.measure.as_mut()),
            None => LayoutOutput::HIDDEN,
        },
    };

    if let Some(data) = view.nodes.get_mut(node) {
        data.cache.store(
            input.known_dimensions,
            input.available_space,
            input.run_mode,
            input.sizing_mode,
            output,
        );
    }
    output
}

/// Turn `min-content`, `max-content` and `fit-content` sizes into known
/// dimensions by measuring the node under that constraint.
fn resolve_intrinsic_keywords(
    view: &mut LayoutView<'_>,
    node: NodeId,
    input: LayoutInput,
) -> LayoutInput {
    if input.sizing_mode != SizingMode::InherentSize {
        return input;
    }
    let mut resolved = input;
    for axis in [AbsoluteAxis::Horizontal, AbsoluteAxis::Vertical] {
        if input.known_dimensions.get(axis).is_some() {
            continue;
        }
        if let Some(value) = resolve_intrinsic_size(
            view,
            node,
            axis,
            resolved.known_dimensions,
            input.parent_size,
            resolved.available_space,
        ) {
            resolved.known_dimensions.set(axis, Some(value));
        }
    }
    resolved
}

/// Zero out `node` and its subtree and forget their cached results.
fn hide_subtree(view: &mut LayoutView<'_>, node: NodeId) {
    let mut pending = vec![(node, None)];
    while let Some((current, order)) = pending.pop() {
        let Some(data) = view.nodes.get_mut(current) else {
            continue;
        };
        data.cache.clear();
        let order = order.unwrap_or(data.unrounded_layout.order);
        data.unrounded_layout = Layout::with_order(order);
        pending.extend(
            data.children
                .iter()
                .enumerate()
                .map(|(index, child)| (*child, Some(index as u32))),
        );
    }
}

/// Lay out the tree under `root` into `available_space`.
///
/// A definite axis sizes the root from its own styles; an unbounded axis
/// sizes it from content, so percentages beneath it stay unresolved.
fn compute_root_layout(view: &mut LayoutView<'_>, root: NodeId, available_space: Size<AvailableSpace>) {
    let parent_size = available_space.map(AvailableSpace::into_option);
    let style = view.style(root);
    let (known_dimensions, sizing_mode) = if parent_size.both_known() {
        (Size::NONE, SizingMode::InherentSize)
    } else {
        let min_size = style.min_size.maybe_resolve(parent_size);
        let max_size = style.max_size.maybe_resolve(parent_size);
        let folded = style
            .size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(style.aspect_ratio)
            .zip_map(parent_size, |size, parent| parent.and(size))
            .maybe_clamp(min_size, max_size);
        (folded, SizingMode::ContentSize)
    };

    let output = view.perform_child_layout(
        root,
        known_dimensions,
        parent_size,
        available_space,
        sizing_mode,
    );

    let style = view.style(root);
    let layout = Layout {
        order: 0,
        location: Point::ZERO,
        size: output.size,
        content_size: output.content_size,
        scrollbar_size: style.scrollbar_gutter(),
        border: style.border.resolve_or_zero(parent_size.width),
        padding: style.padding.resolve_or_zero(parent_size.width),
        margin: style.margin.resolve_or_zero(parent_size.width),
    };
    let layout = Layout {
        location: Point {
            x: layout.margin.left,
            y: layout.margin.top,
        },
        ..layout
    };
    log::debug!(
        target: "trellis::compute",
        "[ROOT] node={root} mode={sizing_mode:?} size={}x{}",
        layout.size.width,
        layout.size.height
    );
    view.set_unrounded_layout(root, &layout);
}

impl LayoutEngine {
    /// Lay out the subtree under `root` into `available_space` and store the
    /// results, readable through [`LayoutEngine::layout`].
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `root` is unknown.
    pub fn compute_layout(
        &mut self,
        root: NodeId,
        available_space: Size<AvailableSpace>,
    ) -> Result<(), LayoutError> {
        self.ensure_live(root)?;
        let span = tracing::debug_span!("compute_layout", root = %root);
        let _entered = span.enter();

        let mut view = LayoutView {
            nodes: &mut self.nodes,
        };
        compute_root_layout(&mut view, root, available_space);
        if self.config().use_rounding {
            round_layouts(&mut self.nodes, root);
        } else {
            copy_unrounded_layouts(&mut self.nodes, root);
        }
        Ok(())
    }

    /// [`LayoutEngine::compute_layout`] taking raw floats: finite values are
    /// definite, `f32::INFINITY` is unbounded and `f32::NEG_INFINITY` is min-content.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `root` is unknown.
    #[inline]
    pub fn compute_layout_with_lengths(
        &mut self,
        root: NodeId,
        width: f32,
        height: f32,
    ) -> Result<(), LayoutError> {
        self.compute_layout(
            root,
            Size {
                width: AvailableSpace::from_length(width),
                height: AvailableSpace::from_length(height),
            },
        )
    }
}
