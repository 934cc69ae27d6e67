//! Flex items: the in-flow children of a flex container
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-items>

use trellis_geometry::{AbsoluteAxis, AvailableSpace, MaybeMath as _, Point, Rect, Size};
use trellis_style::{AlignItems, AlignSelf, Dimension, MaybeResolve as _, Overflow, ResolveOrZero as _};
use trellis_tree::{LayoutTree, NodeId, resolve_intrinsic_size};

/// Working state for one flex item while its container is laid out.
#[derive(Debug, Clone, Copy)]
pub struct FlexItem {
    /// The child.
    pub node: NodeId,
    /// Position in `order`-modified document order.
    pub order: u32,

    /// Preferred size, resolved against the container's inner size.
    pub size: Size<Option<f32>>,
    /// Minimum size, resolved against the container's inner size.
    pub min_size: Size<Option<f32>>,
    /// Maximum size, resolved against the container's inner size.
    pub max_size: Size<Option<f32>>,
    /// Relative offsets.
    pub inset: Rect<Option<f32>>,
    /// Margins, `auto` resolved to zero until free space is distributed.
    pub margin: Rect<f32>,
    /// Which margins were `auto`.
    pub margin_is_auto: Rect<bool>,
    /// Resolved padding.
    pub padding: Rect<f32>,
    /// Resolved border.
    pub border: Rect<f32>,
    /// Cross-axis alignment after falling back to the container's `align-items`.
    pub align_self: AlignSelf,
    /// Overflow per axis.
    pub overflow: Point<Overflow>,
    /// Space reserved for the item's own scrollbars.
    pub scrollbar_size: Size<f32>,
    /// `flex-grow`.
    pub flex_grow: f32,
    /// `flex-shrink`.
    pub flex_shrink: f32,

    /// Outer-less flex base size, floored by padding and border.
    pub flex_basis: f32,
    /// Flex base size minus padding and border.
    pub inner_flex_basis: f32,
    /// The automatic or specified minimum main size.
    pub resolved_minimum_main_size: f32,
    /// Clamp adjustment from the last flexing round.
    pub violation: f32,
    /// Whether the item's target main size is final.
    pub frozen: bool,
    /// Desired growth or shrinkage per unit of flex factor under an intrinsic constraint.
    pub content_flex_fraction: f32,

    /// Hypothetical border-box size.
    pub hypothetical_inner_size: Size<f32>,
    /// Hypothetical margin-box size.
    pub hypothetical_outer_size: Size<f32>,
    /// Used border-box size.
    pub target_size: Size<f32>,
    /// Used margin-box size.
    pub outer_target_size: Size<f32>,

    /// Distance from the item's outer cross-start edge to its first baseline.
    pub baseline: f32,
    /// Main-axis space placed before the item.
    pub offset_main: f32,
    /// Cross-axis offset of the item inside its line.
    pub offset_cross: f32,
}

impl FlexItem {
    /// True when the item clips its overflow in either axis.
    #[inline]
    pub const fn is_scroll_container(&self) -> bool {
        self.overflow.x.is_scroll_container() || self.overflow.y.is_scroll_container()
    }
}

/// Generate flex items for the in-flow children of a container.
///
/// `children` is the `order`-sorted child list. Absolutely positioned and
/// `display: none` children are skipped.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-anon-box>
pub fn generate_flex_items(
    tree: &impl LayoutTree,
    children: &[(NodeId, u32)],
    node_inner_size: Size<Option<f32>>,
    align_items: AlignItems,
) -> Vec<FlexItem> {
    children
        .iter()
        .filter_map(|&(child, order)| {
            let style = tree.style(child);
            if style.is_hidden() || style.is_absolute() {
                return None;
            }
            let aspect_ratio = style.aspect_ratio;
            let resolve_size = |size: Size<Dimension>| {
                size.maybe_resolve(node_inner_size)
                    .maybe_apply_aspect_ratio(aspect_ratio)
            };
            Some(FlexItem {
                node: child,
                order,
                size: resolve_size(style.size),
                min_size: resolve_size(style.min_size),
                max_size: resolve_size(style.max_size),
                inset: style.inset.maybe_resolve(node_inner_size),
                margin: style.margin.resolve_or_zero(node_inner_size.width),
                margin_is_auto: style.margin.map(Dimension::is_auto),
                padding: style.padding.resolve_or_zero(node_inner_size.width),
                border: style.border.resolve_or_zero(node_inner_size.width),
                align_self: style.align_self.unwrap_or(align_items),
                overflow: style.overflow,
                scrollbar_size: style.scrollbar_gutter(),
                flex_grow: style.flex_grow,
                flex_shrink: style.flex_shrink,
                flex_basis: 0.0,
                inner_flex_basis: 0.0,
                resolved_minimum_main_size: 0.0,
                violation: 0.0,
                frozen: false,
                content_flex_fraction: 0.0,
                hypothetical_inner_size: Size::ZERO,
                hypothetical_outer_size: Size::ZERO,
                target_size: Size::ZERO,
                outer_target_size: Size::ZERO,
                baseline: 0.0,
                offset_main: 0.0,
                offset_cross: 0.0,
            })
        })
        .collect()
}

/// Replace `min-content`, `max-content` and `fit-content` preferred sizes
/// with the size the item measures to under that constraint.
///
/// The width is resolved first so a keyword height wraps at it.
pub fn resolve_intrinsic_item_sizes(
    tree: &mut impl LayoutTree,
    items: &mut [FlexItem],
    node_inner_size: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) {
    for item in items.iter_mut() {
        let margin = item.margin.sum_axes();
        let item_available = Size {
            width: available_space.width.maybe_sub(margin.width),
            height: available_space.height.maybe_sub(margin.height),
        };
        for axis in [AbsoluteAxis::Horizontal, AbsoluteAxis::Vertical] {
            if item.size.get(axis).is_some() {
                continue;
            }
            if let Some(value) =
                resolve_intrinsic_size(tree, item.node, axis, item.size, node_inner_size, item_available)
            {
                item.size.set(axis, Some(value));
            }
        }
    }
}
