//! `min-content`, `max-content` and `fit-content()` box sizes.
//!
//! Spec: <https://www.w3.org/TR/css-sizing-3/#sizing-values>

use trellis_geometry::{AbsoluteAxis, AvailableSpace, MaybeMath as _, Size};
use trellis_style::{Dimension, MaybeResolve as _};

use crate::{LayoutTree, NodeId, SizingMode};

/// Resolve an intrinsic `width` or `height` of `node` along `axis` by
/// measuring the node under the matching constraint.
///
/// Returns `None` when the node's preferred size along `axis` is not a
/// sizing keyword. `fit-content` is `min(max-content, max(min-content,
/// limit))`, where the limit falls back to the available space and then
/// to max-content. The result is clamped by the node's min and max sizes.
pub fn resolve_intrinsic_size(
    tree: &mut impl LayoutTree,
    node: NodeId,
    axis: AbsoluteAxis,
    known_dimensions: Size<Option<f32>>,
    parent_size: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Option<f32> {
    let style = tree.style(node);
    let keyword = style.size.get(axis);
    if !keyword.is_intrinsic() {
        return None;
    }
    let min_size = style.min_size.maybe_resolve(parent_size).get(axis);
    let max_size = style.max_size.maybe_resolve(parent_size).get(axis);

    let known = known_dimensions.with(axis, None);
    let mut measure_under = |constraint: AvailableSpace| {
        tree.measure_child_size(
            node,
            known,
            parent_size,
            available_space.with(axis, constraint),
            SizingMode::ContentSize,
            axis,
        )
    };
    let value = match keyword {
        Dimension::MinContent => measure_under(AvailableSpace::MinContent),
        Dimension::MaxContent => measure_under(AvailableSpace::MaxContent),
        _ => {
            let min_content = measure_under(AvailableSpace::MinContent);
            let max_content = measure_under(AvailableSpace::MaxContent);
            let limit = keyword
                .fit_content_limit(parent_size.get(axis))
                .or_else(|| available_space.get(axis).into_option())
                .unwrap_or(max_content);
            max_content.min(limit).max(min_content)
        }
    };
    let value = value.maybe_clamp(min_size, max_size);
    log::trace!(
        target: "trellis::intrinsic",
        "[INTRINSIC] node={node} axis={axis:?} keyword={keyword:?} value={value}"
    );
    Some(value)
}
