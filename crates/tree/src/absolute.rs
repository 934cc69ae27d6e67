//! Out-of-flow children, shared by every container algorithm.
//!
//! An absolutely positioned child is sized and placed against its parent's
//! padding box. Insets resolve against that box; an axis with neither inset
//! set keeps the static position the parent algorithm computed for it.

use trellis_geometry::{AvailableSpace, MaybeMath as _, Point, Rect, Size};
use trellis_style::{MaybeResolve as _, ResolveOrZero as _};

use crate::{Layout, LayoutTree, NodeId, SizingMode, content_size_contribution};

/// The box an absolutely positioned child is placed into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsoluteContainer {
    /// Border-box size of the parent.
    pub size: Size<f32>,
    /// Parent border widths.
    pub border: Rect<f32>,
    /// Parent scrollbar gutters.
    pub scrollbar_gutter: Size<f32>,
}

impl AbsoluteContainer {
    /// The padding box: border box minus borders and scrollbar gutters.
    #[inline]
    pub fn padding_box_size(&self) -> Size<f32> {
        (self.size - self.border.sum_axes() - self.scrollbar_gutter).f32_max(Size::ZERO)
    }
}

/// Size and place one absolutely positioned child, record its layout and
/// return its contribution to the parent's content size.
///
/// `static_position` receives the child's final border-box size and resolved
/// margins and returns where normal flow would have put the child; it is
/// only consulted per axis when both insets in that axis are unset.
pub fn layout_absolute_child(
    tree: &mut impl LayoutTree,
    child: NodeId,
    order: u32,
    container: &AbsoluteContainer,
    static_position: impl FnOnce(Size<f32>, Rect<f32>) -> Point<f32>,
) -> Size<f32> {
    let area = container.padding_box_size();
    let area_options = area.map(Some);
    let style = tree.style(child);

    let overflow = style.overflow;
    let scrollbar_gutter = style.scrollbar_gutter();
    let aspect_ratio = style.aspect_ratio;
    let margin = style.margin.map(|edge| edge.maybe_resolve(Some(area.width)));
    let padding = style.padding.resolve_or_zero(Some(area.width));
    let border = style.border.resolve_or_zero(Some(area.width));
    let padding_border_sum = (padding + border).sum_axes();
    let inset = style.inset.maybe_resolve(area_options);

    let min_size = style
        .min_size
        .maybe_resolve(area_options)
        .maybe_apply_aspect_ratio(aspect_ratio)
        .or(padding_border_sum.map(Some))
        .maybe_max(padding_border_sum.map(Some));
    let max_size = style
        .max_size
        .maybe_resolve(area_options)
        .maybe_apply_aspect_ratio(aspect_ratio);
    let mut known_dimensions = style
        .size
        .maybe_resolve(area_options)
        .maybe_apply_aspect_ratio(aspect_ratio)
        .maybe_clamp(min_size, max_size);

    // Both insets set and no size: the box fills the space between them.
    if let (None, Some(left), Some(right)) = (known_dimensions.width, inset.left, inset.right) {
        let width = area.width.maybe_sub(margin.left).maybe_sub(margin.right) - left - right;
        known_dimensions.width = Some(width.max(0.0));
        known_dimensions = known_dimensions
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_clamp(min_size, max_size);
    }
    if let (None, Some(top), Some(bottom)) = (known_dimensions.height, inset.top, inset.bottom) {
        let height = area.height.maybe_sub(margin.top).maybe_sub(margin.bottom) - top - bottom;
        known_dimensions.height = Some(height.max(0.0));
        known_dimensions = known_dimensions
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_clamp(min_size, max_size);
    }

    let output = tree.perform_child_layout(
        child,
        known_dimensions,
        area_options,
        Size {
            width: AvailableSpace::Definite(area.width.maybe_clamp(min_size.width, max_size.width)),
            height: AvailableSpace::Definite(
                area.height.maybe_clamp(min_size.height, max_size.height),
            ),
        },
        SizingMode::InherentSize,
    );
    let final_size = known_dimensions
        .unwrap_or(output.size)
        .maybe_clamp(min_size, max_size);

    // Auto margins share whatever space the box leaves in the padding box.
    let fixed_margin = margin.map(|edge| edge.unwrap_or(0.0));
    let free_space = Size {
        width: area.width - final_size.width - fixed_margin.horizontal_axis_sum(),
        height: area.height - final_size.height - fixed_margin.vertical_axis_sum(),
    }
    .f32_max(Size::ZERO);
    let auto_share = |first: Option<f32>, second: Option<f32>, free: f32| {
        let count = u8::from(first.is_none()) + u8::from(second.is_none());
        if count == 0 { 0.0 } else { free / f32::from(count) }
    };
    let horizontal_share = auto_share(margin.left, margin.right, free_space.width);
    let vertical_share = auto_share(margin.top, margin.bottom, free_space.height);
    let resolved_margin = Rect {
        left: margin.left.unwrap_or(horizontal_share),
        right: margin.right.unwrap_or(horizontal_share),
        top: margin.top.unwrap_or(vertical_share),
        bottom: margin.bottom.unwrap_or(vertical_share),
    };

    let fallback = static_position(final_size, resolved_margin);
    let x = inset.left.map_or_else(
        || {
            inset.right.map_or(fallback.x, |right| {
                container.size.width
                    - container.border.right
                    - container.scrollbar_gutter.width
                    - final_size.width
                    - right
                    - resolved_margin.right
            })
        },
        |left| container.border.left + left + resolved_margin.left,
    );
    let y = inset.top.map_or_else(
        || {
            inset.bottom.map_or(fallback.y, |bottom| {
                container.size.height
                    - container.border.bottom
                    - container.scrollbar_gutter.height
                    - final_size.height
                    - bottom
                    - resolved_margin.bottom
            })
        },
        |top| container.border.top + top + resolved_margin.top,
    );
    let location = Point { x, y };

    log::trace!(
        target: "trellis::absolute",
        "[ABSOLUTE] child={child} location=({x}, {y}) size={}x{}",
        final_size.width,
        final_size.height
    );

    tree.set_unrounded_layout(
        child,
        &Layout {
            order,
            location,
            size: final_size,
            content_size: output.content_size,
            scrollbar_size: scrollbar_gutter,
            border,
            padding,
            margin: resolved_margin,
        },
    );

    content_size_contribution(location, final_size, output.content_size, overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if the padding box keeps borders or gutters.
    fn padding_box_excludes_border_and_gutter() {
        let container = AbsoluteContainer {
            size: Size {
                width: 100.0,
                height: 60.0,
            },
            border: Rect {
                left: 2.0,
                right: 2.0,
                top: 1.0,
                bottom: 1.0,
            },
            scrollbar_gutter: Size {
                width: 10.0,
                height: 0.0,
            },
        };
        let area = container.padding_box_size();
        assert!((area.width - 86.0).abs() < f32::EPSILON);
        assert!((area.height - 58.0).abs() < f32::EPSILON);
    }
}
