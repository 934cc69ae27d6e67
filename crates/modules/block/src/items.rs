//! Children of a block container with the styles the stacking pass reads.

use trellis_geometry::{Rect, Size};
use trellis_style::{MaybeResolve as _, ResolveOrZero as _};
use trellis_tree::{LayoutTree, NodeId};

/// One child of a block container.
#[derive(Debug, Clone, Copy)]
pub struct BlockItem {
    /// The child.
    pub node: NodeId,
    /// Index among the container's children.
    pub order: u32,
    /// `display: none`.
    pub is_hidden: bool,
    /// Out of flow.
    pub is_absolute: bool,
    /// Margins resolvable without a containing block; `auto` is `None`.
    pub margin: Rect<Option<f32>>,
    /// Size resolvable without a containing block.
    pub size: Size<Option<f32>>,
    /// Minimum size resolvable without a containing block.
    pub min_size: Size<Option<f32>>,
    /// Maximum size resolvable without a containing block.
    pub max_size: Size<Option<f32>>,
    /// Padding plus border, percentages treated as zero.
    pub padding_border_size: Size<f32>,
}

impl BlockItem {
    /// Takes part in stacking.
    #[inline]
    pub const fn is_in_flow(&self) -> bool {
        !self.is_hidden && !self.is_absolute
    }
}

/// Snapshot the children of `node` in storage order.
pub fn collect_block_items(tree: &impl LayoutTree, node: NodeId) -> Vec<BlockItem> {
    tree.children(node)
        .iter()
        .enumerate()
        .map(|(index, &child)| {
            let style = tree.style(child);
            let is_hidden = style.is_hidden();
            BlockItem {
                node: child,
                order: index as u32,
                is_hidden,
                is_absolute: !is_hidden && style.is_absolute(),
                margin: style.margin.maybe_resolve(Size::NONE),
                size: style
                    .size
                    .maybe_resolve(Size::NONE)
                    .maybe_apply_aspect_ratio(style.aspect_ratio),
                min_size: style.min_size.maybe_resolve(Size::NONE),
                max_size: style.max_size.maybe_resolve(Size::NONE),
                padding_border_size: (style.padding.resolve_or_zero(None)
                    + style.border.resolve_or_zero(None))
                .sum_axes(),
            }
        })
        .collect()
}
