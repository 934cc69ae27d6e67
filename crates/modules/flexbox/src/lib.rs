//! CSS Flexible Box Layout Module Level 1: the flex formatting context.
//! Spec: <https://www.w3.org/TR/css-flexbox-1/>

// Chapter modules follow the section numbering of Flexbox Level 1.
// §6 Flex Items
#[path = "6_flex_items/mod.rs"]
mod chapter6;
// §7 Axis and Order
#[path = "7_axis_and_order/mod.rs"]
mod chapter7;
// §9 Flex Layout Algorithm
#[path = "9_algorithm/mod.rs"]
mod chapter9;

pub use chapter7::FlexAxes;

use trellis_geometry::{MaybeMath as _, Size};
use trellis_style::{MaybeResolve as _, ResolveOrZero as _};
use trellis_tree::{LayoutInput, LayoutOutput, LayoutTree, NodeId, RunMode, SizingMode};

/// Lay out `node` as a flex container.
///
/// Resolves as much of the container's own size as its style allows, then
/// runs the flex layout algorithm over its children.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#layout-algorithm>
pub fn compute_flexbox_layout(
    tree: &mut impl LayoutTree,
    node: NodeId,
    input: LayoutInput,
) -> LayoutOutput {
    let LayoutInput {
        known_dimensions,
        parent_size,
        run_mode,
        sizing_mode,
        ..
    } = input;
    let style = tree.style(node);

    let aspect_ratio = style.aspect_ratio;
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let padding_border_size = (padding + border).sum_axes();
    let min_size = style
        .min_size
        .maybe_resolve(parent_size)
        .maybe_apply_aspect_ratio(aspect_ratio);
    let max_size = style
        .max_size
        .maybe_resolve(parent_size)
        .maybe_apply_aspect_ratio(aspect_ratio);
    let clamped_style_size = if sizing_mode == SizingMode::InherentSize {
        style
            .size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_clamp(min_size, max_size)
    } else {
        Size::NONE
    };

    // A max below the min pins the size.
    let min_max_definite_size = min_size.zip_map(max_size, |min, max| match (min, max) {
        (Some(min), Some(max)) if max <= min => Some(min),
        _ => None,
    });
    let known_dimensions = known_dimensions
        .or(min_max_definite_size.or(clamped_style_size))
        .maybe_max(padding_border_size.map(Some));

    if run_mode == RunMode::ComputeSize
        && let Size {
            width: Some(width),
            height: Some(height),
        } = known_dimensions
    {
        return LayoutOutput::from_outer_size(Size { width, height });
    }

    log::debug!(
        target: "trellis::flexbox",
        "[FLEX] node={node} mode={run_mode:?} known={:?}x{:?}",
        known_dimensions.width,
        known_dimensions.height
    );
    chapter9::compute_preliminary(
        tree,
        node,
        LayoutInput {
            known_dimensions,
            ..input
        },
    )
}
