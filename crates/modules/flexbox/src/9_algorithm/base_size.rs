//! Available space, flex base size and hypothetical main size
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-available>
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-main-item>

use trellis_geometry::{AvailableSpace, MaybeMath as _, Size};
use trellis_style::{AlignSelf, Dimension, MaybeResolve as _};
use trellis_tree::{LayoutTree, SizingMode};

use super::AlgoConstants;
use crate::chapter6::FlexItem;

/// Determine the available main and cross space for the flex items.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-available>
pub fn determine_available_space(
    known_dimensions: Size<Option<f32>>,
    outer_available_space: Size<AvailableSpace>,
    constants: &AlgoConstants,
) -> Size<AvailableSpace> {
    let inset = constants.content_box_inset.sum_axes();
    let margin = constants.margin.sum_axes();
    let resolve = |known: Option<f32>, outer: AvailableSpace, inset: f32, margin: f32| {
        known.map_or_else(
            || outer.maybe_sub(margin).maybe_sub(inset),
            |size| AvailableSpace::Definite((size - inset).max(0.0)),
        )
    };
    Size {
        width: resolve(
            known_dimensions.width,
            outer_available_space.width,
            inset.width,
            margin.width,
        ),
        height: resolve(
            known_dimensions.height,
            outer_available_space.height,
            inset.height,
            margin.height,
        ),
    }
}

/// Space offered to an item in the cross axis, narrowed by its own min and max.
pub fn item_cross_available_space(
    item: &FlexItem,
    available_space: Size<AvailableSpace>,
    constants: &AlgoConstants,
) -> AvailableSpace {
    let axes = constants.axes;
    let cross_margin = axes.cross_sum(item.margin);
    let min_cross = axes.cross(item.min_size).maybe_add(cross_margin);
    let max_cross = axes.cross(item.max_size).maybe_add(cross_margin);
    match axes.cross(available_space) {
        AvailableSpace::Definite(value) => AvailableSpace::Definite(value.maybe_clamp(min_cross, max_cross)),
        AvailableSpace::MinContent => min_cross.map_or(AvailableSpace::MinContent, AvailableSpace::Definite),
        AvailableSpace::MaxContent => max_cross.map_or(AvailableSpace::MaxContent, AvailableSpace::Definite),
    }
}

/// Known dimensions passed when measuring an item in its main axis.
///
/// The main size is always left open. A stretched item with an auto cross
/// size is measured at the cross space it will be stretched to.
pub fn item_known_dimensions(
    item: &FlexItem,
    cross_available_space: AvailableSpace,
    constants: &AlgoConstants,
) -> Size<Option<f32>> {
    let axes = constants.axes;
    let mut known = item.size.with(axes.main, None);
    if item.align_self == AlignSelf::Stretch && axes.cross(known).is_none() {
        known.set(
            axes.cross,
            cross_available_space
                .into_option()
                .maybe_sub(axes.cross_sum(item.margin)),
        );
    }
    known
}

/// Determine the flex base size and hypothetical main size of each item.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#algo-main-item>
pub fn determine_flex_base_size(
    tree: &mut impl LayoutTree,
    constants: &AlgoConstants,
    available_space: Size<AvailableSpace>,
    flex_items: &mut [FlexItem],
) {
    let axes = constants.axes;
    let child_parent_size = axes.size(None, axes.cross(constants.node_inner_size));

    for child in flex_items.iter_mut() {
        let style = tree.style(child.node);
        let flex_basis_style = style.flex_basis;
        let automatic_min_size = style.automatic_min_size();

        let cross_available_space = item_cross_available_space(child, available_space, constants);
        let child_known_dimensions = item_known_dimensions(child, cross_available_space, constants);

        // A. A definite flex basis is the flex base size.
        // B. Aspect ratios have already been folded into `child.size`.
        // C-E. Otherwise size the item as max-content, or min-content under a `min-content` basis or container constraint.
        let content_basis = matches!(flex_basis_style, Dimension::MinContent | Dimension::MaxContent);
        let definite_basis = flex_basis_style
            .maybe_resolve(axes.main(constants.node_inner_size))
            .or(if content_basis { None } else { axes.main(child.size) });
        let flex_basis = definite_basis.unwrap_or_else(|| {
            let main_space = if flex_basis_style == Dimension::MinContent
                || axes.main(available_space) == AvailableSpace::MinContent
            {
                AvailableSpace::MinContent
            } else {
                AvailableSpace::MaxContent
            };
            tree.measure_child_size(
                child.node,
                child_known_dimensions,
                child_parent_size,
                axes.size(main_space, cross_available_space),
                SizingMode::ContentSize,
                axes.main,
            )
        });

        let padding_border = (child.padding + child.border).sum_axes();
        let main_padding_border = axes.main(padding_border);
        child.flex_basis = flex_basis.max(main_padding_border);
        child.inner_flex_basis = child.flex_basis - main_padding_border;

        // 4.5. Automatic Minimum Size of Flex Items
        let style_min_main_size = axes.main(child.min_size.or(automatic_min_size));
        let resolved_minimum_main_size = style_min_main_size.unwrap_or_else(|| {
            let min_content_main_size = tree.measure_child_size(
                child.node,
                child_known_dimensions,
                child_parent_size,
                axes.size(AvailableSpace::MinContent, cross_available_space),
                SizingMode::ContentSize,
                axes.main,
            );
            min_content_main_size
                .maybe_min(axes.main(child.size))
                .maybe_min(axes.main(child.max_size))
                .max(main_padding_border)
        });
        child.resolved_minimum_main_size = resolved_minimum_main_size;

        let hypothetical_inner_size = child.flex_basis.maybe_clamp(
            Some(resolved_minimum_main_size.max(main_padding_border)),
            axes.main(child.max_size),
        );
        let hypothetical_outer_size = hypothetical_inner_size + axes.main_sum(child.margin);
        child.hypothetical_inner_size.set(axes.main, hypothetical_inner_size);
        child.hypothetical_outer_size.set(axes.main, hypothetical_outer_size);

        log::trace!(
            target: "trellis::flexbox",
            "[FLEX-BASIS] child={} basis={} min={} hypothetical={}",
            child.node,
            child.flex_basis,
            child.resolved_minimum_main_size,
            hypothetical_inner_size
        );
    }
}
