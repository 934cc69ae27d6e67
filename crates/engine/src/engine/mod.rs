//! The node store and its public editing API.
//!
//! Every edit validates first and mutates second, so a failed call leaves
//! the tree untouched. Edits clear the cache of the touched node and of all
//! its ancestors.

mod compute;

use core::fmt;

use smallvec::SmallVec;
use trellis_geometry::{AvailableSpace, Size};
use trellis_style::Style;
use trellis_tree::{Cache, Layout, NodeId};

use crate::arena::Arena;
use crate::error::{LayoutError, ParentingError};
use crate::measure::{BoxedMeasure, MeasureFunc, MeasureRequest};

/// Engine-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutConfig {
    /// Snap final layouts to whole pixels.
    pub use_rounding: bool,
}

impl Default for LayoutConfig {
    #[inline]
    fn default() -> Self {
        Self { use_rounding: true }
    }
}

/// Everything stored for one node.
pub(crate) struct NodeData {
    /// Resolved style.
    pub(crate) style: Style,
    /// Owning parent, if attached.
    pub(crate) parent: Option<NodeId>,
    /// Children in storage order.
    pub(crate) children: SmallVec<NodeId, 4>,
    /// Content measurement for leaves.
    pub(crate) measure: Option<BoxedMeasure>,
    /// Memoised layout results.
    pub(crate) cache: Cache,
    /// Layout as computed, before rounding.
    pub(crate) unrounded_layout: Layout,
    /// Layout handed to callers.
    pub(crate) final_layout: Layout,
}

impl NodeData {
    /// A detached node with `style`.
    fn new(style: Style) -> Self {
        Self {
            style,
            parent: None,
            children: SmallVec::new(),
            measure: None,
            cache: Cache::new(),
            unrounded_layout: Layout::default(),
            final_layout: Layout::default(),
        }
    }
}

impl fmt::Debug for NodeData {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeData")
            .field("style", &self.style)
            .field("parent", &self.parent)
            .field("children", &self.children.as_slice())
            .field("has_measure", &self.measure.is_some())
            .field("final_layout", &self.final_layout)
            .finish_non_exhaustive()
    }
}

/// A tree of styled nodes and the layouts computed for them.
///
/// Nodes are addressed by generation-checked [`NodeId`]s. Each node has at
/// most one parent; cycles and silent re-parenting are refused.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    /// Node storage.
    pub(crate) nodes: Arena<NodeData>,
    /// Settings.
    config: LayoutConfig,
}

impl LayoutEngine {
    /// An empty engine with rounding enabled.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty engine with room for `capacity` nodes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            config: LayoutConfig::default(),
        }
    }

    /// An empty engine with explicit settings.
    #[inline]
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            nodes: Arena::new(),
            config,
        }
    }

    /// Current settings.
    #[inline]
    pub const fn config(&self) -> LayoutConfig {
        self.config
    }

    /// Snap final layouts to whole pixels from the next pass on.
    #[inline]
    pub fn enable_rounding(&mut self) {
        self.config.use_rounding = true;
    }

    /// Report unrounded layouts from the next pass on.
    #[inline]
    pub fn disable_rounding(&mut self) {
        self.config.use_rounding = false;
    }

    /// Number of live nodes.
    #[inline]
    pub const fn total_node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every node. All existing ids become stale.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Shared access to a node or [`LayoutError::InvalidNodeId`].
    pub(crate) fn node(&self, id: NodeId) -> Result<&NodeData, LayoutError> {
        self.nodes.get(id).ok_or(LayoutError::InvalidNodeId(id))
    }

    /// [`LayoutError::InvalidNodeId`] unless `id` names a live node.
    pub(crate) fn ensure_live(&self, id: NodeId) -> Result<(), LayoutError> {
        if self.nodes.contains(id) {
            Ok(())
        } else {
            Err(LayoutError::InvalidNodeId(id))
        }
    }

    /// Mutable access to a node or [`LayoutError::InvalidNodeId`].
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, LayoutError> {
        self.nodes.get_mut(id).ok_or(LayoutError::InvalidNodeId(id))
    }

    // ----- creation and removal -----

    /// Create a childless node.
    ///
    /// # Errors
    /// Returns [`LayoutError::Style`] if `style` fails validation.
    pub fn new_leaf(&mut self, style: Style) -> Result<NodeId, LayoutError> {
        style.validate()?;
        let id = self.nodes.allocate(NodeData::new(style));
        log::trace!(target: "trellis::tree", "[NODE-NEW] {id}");
        Ok(id)
    }

    /// Create a childless node whose content is sized by `measure`.
    ///
    /// # Errors
    /// Returns [`LayoutError::Style`] if `style` fails validation.
    pub fn new_leaf_with_measure(
        &mut self,
        style: Style,
        measure: impl MeasureFunc + Send + 'static,
    ) -> Result<NodeId, LayoutError> {
        let id = self.new_leaf(style)?;
        self.node_mut(id)?.measure = Some(Box::new(measure));
        Ok(id)
    }

    /// Create a node that adopts `children`.
    ///
    /// # Errors
    /// Fails on an invalid style, an unknown child, a child that already has a
    /// parent, or a child listed twice. Nothing is created on failure.
    pub fn new_with_children(
        &mut self,
        style: Style,
        children: &[NodeId],
    ) -> Result<NodeId, LayoutError> {
        style.validate()?;
        for (index, &child) in children.iter().enumerate() {
            let reason = if self.node(child)?.parent.is_some() {
                ParentingError::AlreadyHasParent
            } else if children.get(..index).is_some_and(|seen| seen.contains(&child)) {
                ParentingError::DuplicateChild
            } else {
                continue;
            };
            // No parent id exists yet, so the child stands in for it.
            return Err(LayoutError::InvalidParentingOperation {
                parent: child,
                child,
                reason,
            });
        }
        let mut data = NodeData::new(style);
        data.children = children.iter().copied().collect();
        let id = self.nodes.allocate(data);
        for &child in children {
            if let Some(child_data) = self.nodes.get_mut(child) {
                child_data.parent = Some(id);
            }
        }
        Ok(id)
    }

    /// Remove `id` and its whole subtree, detaching it from its parent.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `id` is unknown.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), LayoutError> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            if let Some(parent_data) = self.nodes.get_mut(parent) {
                parent_data.children.retain(|child| *child != id);
            }
            self.invalidate_upward(parent);
        }
        let mut pending = vec![id];
        let mut removed = 0_usize;
        while let Some(current) = pending.pop() {
            if let Some(data) = self.nodes.deallocate(current) {
                pending.extend(data.children.iter().copied());
                removed += 1;
            }
        }
        log::trace!(target: "trellis::tree", "[NODE-REMOVE] {id} freed={removed}");
        Ok(())
    }

    // ----- structure -----

    /// Check that `child` may be attached to `parent`.
    fn check_adoption(&self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.ensure_live(parent)?;
        let child_data = self.node(child)?;
        let refuse = |reason| {
            Err(LayoutError::InvalidParentingOperation {
                parent,
                child,
                reason,
            })
        };
        if parent == child {
            return refuse(ParentingError::SelfParent);
        }
        if self.is_ancestor(child, parent) {
            return refuse(ParentingError::ChildIsAncestor);
        }
        if child_data.parent.is_some() {
            return refuse(ParentingError::AlreadyHasParent);
        }
        Ok(())
    }

    /// True when `ancestor` is `node` or lies on the path from `node` to its root.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|data| data.parent);
        }
        false
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// # Errors
    /// Fails on an unknown id, on a cycle or if `child` already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        let count = self.child_count(parent)?;
        self.insert_child_at_index(parent, count, child)
    }

    /// Attach `child` at `index` in the child list of `parent`.
    ///
    /// # Errors
    /// Fails like [`LayoutEngine::append_child`], or with
    /// [`LayoutError::ChildIndexOutOfBounds`] when `index` is past the end.
    pub fn insert_child_at_index(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), LayoutError> {
        self.check_adoption(parent, child)?;
        let child_count = self.child_count(parent)?;
        if index > child_count {
            return Err(LayoutError::ChildIndexOutOfBounds {
                parent,
                index,
                child_count,
            });
        }
        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        self.invalidate_upward(parent);
        Ok(())
    }

    /// Detach `child` from `parent`. The child stays alive as a root.
    ///
    /// # Errors
    /// Fails on an unknown id or if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, LayoutError> {
        self.ensure_live(child)?;
        let index = self
            .children(parent)?
            .iter()
            .position(|candidate| *candidate == child)
            .ok_or(LayoutError::InvalidParentingOperation {
                parent,
                child,
                reason: ParentingError::NotAChild,
            })?;
        self.remove_child_at_index(parent, index)
    }

    /// Detach the child at `index` from `parent` and return it.
    ///
    /// # Errors
    /// Fails on an unknown parent or an index past the end.
    pub fn remove_child_at_index(
        &mut self,
        parent: NodeId,
        index: usize,
    ) -> Result<NodeId, LayoutError> {
        let child = self.child_at_index(parent, index)?;
        self.node_mut(parent)?.children.remove(index);
        if let Some(child_data) = self.nodes.get_mut(child) {
            child_data.parent = None;
        }
        self.invalidate_upward(parent);
        Ok(child)
    }

    /// Put `child` in place of the child at `index` and return the old child,
    /// which stays alive as a root.
    ///
    /// # Errors
    /// Fails like [`LayoutEngine::insert_child_at_index`].
    pub fn replace_child_at_index(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<NodeId, LayoutError> {
        let old = self.child_at_index(parent, index)?;
        if old == child {
            return Ok(old);
        }
        self.check_adoption(parent, child)?;
        if let Some(slot) = self.node_mut(parent)?.children.get_mut(index) {
            *slot = child;
        }
        if let Some(old_data) = self.nodes.get_mut(old) {
            old_data.parent = None;
        }
        self.node_mut(child)?.parent = Some(parent);
        self.invalidate_upward(parent);
        Ok(old)
    }

    /// Replace the whole child list of `parent`. Previous children that are
    /// not in `children` are detached but stay alive.
    ///
    /// # Errors
    /// Fails on an unknown id, a cycle, a duplicate, or a child owned by another parent.
    pub fn set_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<(), LayoutError> {
        self.ensure_live(parent)?;
        for (index, &child) in children.iter().enumerate() {
            let child_data = self.node(child)?;
            let reason = if child == parent {
                Some(ParentingError::SelfParent)
            } else if children.get(..index).is_some_and(|seen| seen.contains(&child)) {
                Some(ParentingError::DuplicateChild)
            } else if self.is_ancestor(child, parent) {
                Some(ParentingError::ChildIsAncestor)
            } else if child_data.parent.is_some_and(|owner| owner != parent) {
                Some(ParentingError::AlreadyHasParent)
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(LayoutError::InvalidParentingOperation {
                    parent,
                    child,
                    reason,
                });
            }
        }
        let previous: SmallVec<NodeId, 4> = self.node(parent)?.children.clone();
        for old in previous {
            if let Some(old_data) = self.nodes.get_mut(old) {
                old_data.parent = None;
            }
        }
        for &child in children {
            if let Some(child_data) = self.nodes.get_mut(child) {
                child_data.parent = Some(parent);
            }
        }
        self.node_mut(parent)?.children = children.iter().copied().collect();
        self.invalidate_upward(parent);
        Ok(())
    }

    /// Children of `parent` in storage order.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `parent` is unknown.
    #[inline]
    pub fn children(&self, parent: NodeId) -> Result<&[NodeId], LayoutError> {
        Ok(self.node(parent)?.children.as_slice())
    }

    /// The child at `index`.
    ///
    /// # Errors
    /// Fails on an unknown parent or an index past the end.
    pub fn child_at_index(&self, parent: NodeId, index: usize) -> Result<NodeId, LayoutError> {
        let children = self.children(parent)?;
        children
            .get(index)
            .copied()
            .ok_or(LayoutError::ChildIndexOutOfBounds {
                parent,
                index,
                child_count: children.len(),
            })
    }

    /// Number of children of `parent`.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `parent` is unknown.
    #[inline]
    pub fn child_count(&self, parent: NodeId) -> Result<usize, LayoutError> {
        Ok(self.children(parent)?.len())
    }

    /// The parent of `id`, if attached.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `id` is unknown.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, LayoutError> {
        Ok(self.node(id)?.parent)
    }

    // ----- style and measurement -----

    /// The style of `id`.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `id` is unknown.
    #[inline]
    pub fn style(&self, id: NodeId) -> Result<&Style, LayoutError> {
        Ok(&self.node(id)?.style)
    }

    /// Replace the style of `id` after validating it.
    ///
    /// # Errors
    /// Fails on an unknown id or an invalid style; the old style is kept.
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), LayoutError> {
        style.validate()?;
        let data = self.node_mut(id)?;
        let reaches_children = data.style.affects_children(&style);
        data.style = style;
        if reaches_children {
            let children: SmallVec<NodeId, 4> = data.children.clone();
            for child in children {
                if let Some(child_data) = self.nodes.get_mut(child) {
                    child_data.cache.clear();
                }
            }
        }
        self.invalidate_upward(id);
        Ok(())
    }

    /// Edit a copy of the style of `id` and commit it if it validates.
    ///
    /// # Errors
    /// Fails on an unknown id or if the edited style is invalid; nothing changes.
    pub fn update_style(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut Style),
    ) -> Result<(), LayoutError> {
        let mut style = self.style(id)?.clone();
        edit(&mut style);
        self.set_style(id, style)
    }

    /// Attach a measure function to `id`, replacing any previous one.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `id` is unknown.
    pub fn set_measure(
        &mut self,
        id: NodeId,
        measure: impl MeasureFunc + Send + 'static,
    ) -> Result<(), LayoutError> {
        self.node_mut(id)?.measure = Some(Box::new(measure));
        self.invalidate_upward(id);
        Ok(())
    }

    /// Drop the measure function of `id`.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `id` is unknown.
    pub fn clear_measure(&mut self, id: NodeId) -> Result<(), LayoutError> {
        self.node_mut(id)?.measure = None;
        self.invalidate_upward(id);
        Ok(())
    }

    /// True when `id` has a measure function.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `id` is unknown.
    #[inline]
    pub fn has_measure(&self, id: NodeId) -> Result<bool, LayoutError> {
        Ok(self.node(id)?.measure.is_some())
    }

    /// Call the measure function of `id` directly.
    ///
    /// # Errors
    /// Fails on an unknown id, or with [`LayoutError::MeasureContextMissing`]
    /// when the node has no measure function.
    pub fn measure_node(
        &mut self,
        id: NodeId,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
    ) -> Result<Size<f32>, LayoutError> {
        let measure = self
            .node_mut(id)?
            .measure
            .as_mut()
            .ok_or(LayoutError::MeasureContextMissing(id))?;
        Ok(measure.measure(&MeasureRequest {
            known_dimensions,
            available_space,
        }))
    }

    // ----- invalidation -----

    /// Clear cached results of `id` and its ancestors.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `id` is unknown.
    #[inline]
    pub fn mark_dirty(&mut self, id: NodeId) -> Result<(), LayoutError> {
        self.ensure_live(id)?;
        self.invalidate_upward(id);
        Ok(())
    }

    /// True when `id` has no cached results.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `id` is unknown.
    #[inline]
    pub fn is_dirty(&self, id: NodeId) -> Result<bool, LayoutError> {
        Ok(self.node(id)?.cache.is_empty())
    }

    /// Walk from `id` to its root clearing caches.
    fn invalidate_upward(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node) = current {
            current = self.nodes.get_mut(node).and_then(|data| {
                data.cache.clear();
                data.parent
            });
        }
    }

    // ----- results -----

    /// Final layout of `id` from the last pass that reached it.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `id` is unknown.
    #[inline]
    pub fn layout(&self, id: NodeId) -> Result<&Layout, LayoutError> {
        Ok(&self.node(id)?.final_layout)
    }

    /// Layout of `id` before rounding.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `id` is unknown.
    #[inline]
    pub fn unrounded_layout(&self, id: NodeId) -> Result<&Layout, LayoutError> {
        Ok(&self.node(id)?.unrounded_layout)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    /// # Panics
    /// Panics if attaching an ancestor under its descendant is not refused.
    fn refuses_cycles() -> Result<()> {
        let mut engine = LayoutEngine::new();
        let leaf = engine.new_leaf(Style::default())?;
        let middle = engine.new_with_children(Style::default(), &[leaf])?;
        let root = engine.new_with_children(Style::default(), &[middle])?;
        let refused = engine.append_child(leaf, root);
        assert_eq!(
            refused,
            Err(LayoutError::InvalidParentingOperation {
                parent: leaf,
                child: root,
                reason: ParentingError::ChildIsAncestor,
            })
        );
        assert_eq!(engine.child_count(leaf)?, 0);
        assert_eq!(engine.parent(root)?, None);
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if re-parenting is silently allowed.
    fn refuses_second_parent() -> Result<()> {
        let mut engine = LayoutEngine::new();
        let child = engine.new_leaf(Style::default())?;
        let first = engine.new_with_children(Style::default(), &[child])?;
        let second = engine.new_leaf(Style::default())?;
        assert!(matches!(
            engine.append_child(second, child),
            Err(LayoutError::InvalidParentingOperation {
                reason: ParentingError::AlreadyHasParent,
                ..
            })
        ));
        assert_eq!(engine.remove_child(first, child)?, child);
        engine.append_child(second, child)?;
        assert_eq!(engine.parent(child)?, Some(second));
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if removing a node leaves its subtree alive.
    fn remove_node_frees_subtree() -> Result<()> {
        let mut engine = LayoutEngine::new();
        let grandchild = engine.new_leaf(Style::default())?;
        let child = engine.new_with_children(Style::default(), &[grandchild])?;
        let root = engine.new_with_children(Style::default(), &[child])?;
        assert_eq!(engine.total_node_count(), 3);
        engine.remove_node(child)?;
        assert_eq!(engine.total_node_count(), 1);
        assert_eq!(engine.child_count(root)?, 0);
        assert_eq!(engine.style(grandchild).err(), Some(LayoutError::InvalidNodeId(grandchild)));
        assert_eq!(engine.mark_dirty(child), Err(LayoutError::InvalidNodeId(child)));
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if an index-based edit accepts an out-of-range index or mis-orders children.
    fn index_edits() -> Result<()> {
        let mut engine = LayoutEngine::new();
        let parent = engine.new_leaf(Style::default())?;
        let first = engine.new_leaf(Style::default())?;
        let second = engine.new_leaf(Style::default())?;
        let third = engine.new_leaf(Style::default())?;
        engine.append_child(parent, second)?;
        engine.insert_child_at_index(parent, 0, first)?;
        assert_eq!(
            engine.insert_child_at_index(parent, 5, third),
            Err(LayoutError::ChildIndexOutOfBounds {
                parent,
                index: 5,
                child_count: 2,
            })
        );
        assert_eq!(engine.replace_child_at_index(parent, 1, third)?, second);
        assert_eq!(engine.children(parent)?, &[first, third]);
        assert_eq!(engine.parent(second)?, None);
        assert_eq!(engine.remove_child_at_index(parent, 0)?, first);
        assert_eq!(engine.child_at_index(parent, 0)?, third);
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if set_children accepts duplicates or keeps stale parents.
    fn set_children_replaces_list() -> Result<()> {
        let mut engine = LayoutEngine::new();
        let old = engine.new_leaf(Style::default())?;
        let fresh = engine.new_leaf(Style::default())?;
        let parent = engine.new_with_children(Style::default(), &[old])?;
        assert!(matches!(
            engine.set_children(parent, &[fresh, fresh]),
            Err(LayoutError::InvalidParentingOperation {
                reason: ParentingError::DuplicateChild,
                ..
            })
        ));
        engine.set_children(parent, &[fresh])?;
        assert_eq!(engine.parent(old)?, None);
        assert_eq!(engine.parent(fresh)?, Some(parent));
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if measuring a node without a measure function does not report it.
    fn measure_node_requires_function() -> Result<()> {
        let mut engine = LayoutEngine::new();
        let plain = engine.new_leaf(Style::default())?;
        assert_eq!(
            engine.measure_node(plain, Size::NONE, Size::default()),
            Err(LayoutError::MeasureContextMissing(plain))
        );
        let text = engine.new_leaf_with_measure(Style::default(), |_: &MeasureRequest| Size {
            width: 12.0,
            height: 4.0,
        })?;
        assert!(engine.has_measure(text)?);
        assert_eq!(
            engine.measure_node(text, Size::NONE, Size::default())?,
            Size {
                width: 12.0,
                height: 4.0,
            }
        );
        Ok(())
    }
}
