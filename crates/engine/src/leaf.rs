//! Layout of childless nodes.

use trellis_geometry::{MaybeMath as _, Point, Size};
use trellis_style::{MaybeResolve as _, ResolveOrZero as _, Style};
use trellis_tree::{LayoutInput, LayoutOutput, RunMode, SizingMode};

use crate::measure::{BoxedMeasure, MeasureRequest};

/// Size a leaf from its styles and, if present, its measure function.
///
/// The measure function sees content-box constraints; padding, border and
/// scrollbar gutters are added back afterwards. Without one the content is
/// zero-sized.
pub(crate) fn compute_leaf_layout(
    input: LayoutInput,
    style: &Style,
    measure: Option<&mut BoxedMeasure>,
) -> LayoutOutput {
    let LayoutInput {
        run_mode,
        sizing_mode,
        known_dimensions,
        parent_size,
        available_space,
        ..
    } = input;

    let margin = style.margin.resolve_or_zero(parent_size.width);
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let padding_border = padding + border;
    let padding_border_size = padding_border.sum_axes();

    let (node_size, node_min_size, node_max_size, aspect_ratio) = match sizing_mode {
        SizingMode::ContentSize => (known_dimensions, Size::NONE, Size::NONE, None),
        SizingMode::InherentSize => {
            let aspect_ratio = style.aspect_ratio;
            let style_size = style
                .size
                .maybe_resolve(parent_size)
                .maybe_apply_aspect_ratio(aspect_ratio);
            let style_min_size = style
                .min_size
                .maybe_resolve(parent_size)
                .maybe_apply_aspect_ratio(aspect_ratio);
            let style_max_size = style.max_size.maybe_resolve(parent_size);
            (
                known_dimensions.or(style_size),
                style_min_size,
                style_max_size,
                aspect_ratio,
            )
        }
    };

    let gutter = style.scrollbar_gutter();
    let inset_size = padding_border_size + gutter;

    if run_mode == RunMode::ComputeSize
        && let Size {
            width: Some(width),
            height: Some(height),
        } = node_size
    {
        let size = Size { width, height }
            .maybe_clamp(node_min_size, node_max_size)
            .f32_max(padding_border_size);
        return LayoutOutput::from_outer_size(size);
    }

    let Some(measure) = measure else {
        log::trace!(target: "trellis::leaf", "[LEAF] no measure function, content is empty");
        let size = Size {
            width: node_size
                .width
                .unwrap_or(inset_size.width)
                .maybe_clamp(node_min_size.width, node_max_size.width)
                .max(inset_size.width),
            height: node_size
                .height
                .unwrap_or(inset_size.height)
                .maybe_clamp(node_min_size.height, node_max_size.height)
                .max(inset_size.height),
        };
        return LayoutOutput::from_sizes(size, padding.sum_axes());
    };

    let content_space = Size {
        width: available_space
            .width
            .maybe_sub(margin.horizontal_axis_sum())
            .maybe_set(node_size.width)
            .map_definite_value(|space| {
                (space.maybe_clamp(node_min_size.width, node_max_size.width) - inset_size.width).max(0.0)
            }),
        height: available_space
            .height
            .maybe_sub(margin.vertical_axis_sum())
            .maybe_set(node_size.height)
            .map_definite_value(|space| {
                (space.maybe_clamp(node_min_size.height, node_max_size.height) - inset_size.height).max(0.0)
            }),
    };
    let content_known = node_size.zip_map(inset_size, |size, inset| size.map(|outer| (outer - inset).max(0.0)));
    let measured = measure.measure(&MeasureRequest {
        known_dimensions: content_known,
        available_space: content_space,
    });
    let measured = measured.map(|value| if value.is_finite() { value.max(0.0) } else { 0.0 });

    let clamped = node_size
        .unwrap_or(measured + inset_size)
        .maybe_clamp(node_min_size, node_max_size);
    let size = Size {
        width: clamped.width,
        height: clamped
            .height
            .max(aspect_ratio.map_or(0.0, |ratio| clamped.width / ratio)),
    }
    .f32_max(padding_border_size);

    log::trace!(
        target: "trellis::leaf",
        "[LEAF] measured={}x{} size={}x{}",
        measured.width,
        measured.height,
        size.width,
        size.height
    );
    LayoutOutput {
        size,
        content_size: measured + padding.sum_axes(),
        first_baselines: Point::NONE,
    }
}

#[cfg(test)]
mod tests {
    use trellis_geometry::{AvailableSpace, Rect};
    use trellis_style::{Dimension, length_size, uniform_edges};
    use trellis_tree::RequestedAxis;

    use super::*;

    fn input(width: AvailableSpace, height: AvailableSpace) -> LayoutInput {
        LayoutInput {
            run_mode: RunMode::PerformLayout,
            sizing_mode: SizingMode::InherentSize,
            axis: RequestedAxis::Both,
            known_dimensions: Size::NONE,
            parent_size: Size::NONE,
            available_space: Size { width, height },
        }
    }

    #[test]
    /// # Panics
    /// Panics if a leaf without measure function is not sized by its insets.
    fn empty_leaf_is_padding_and_border() {
        let style = Style {
            padding: uniform_edges(5.0),
            border: Rect {
                left: Dimension::length(1.0),
                ..uniform_edges(0.0)
            },
            ..Style::default()
        };
        let output = compute_leaf_layout(
            input(AvailableSpace::Definite(100.0), AvailableSpace::Definite(100.0)),
            &style,
            None,
        );
        assert!((output.size.width - 11.0).abs() < f32::EPSILON);
        assert!((output.size.height - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    /// # Panics
    /// Panics if measured content is not wrapped in padding or clamped by max size.
    fn measured_content_gets_insets_and_clamps() {
        let style = Style {
            padding: uniform_edges(2.0),
            max_size: Size {
                width: Dimension::length(50.0),
                height: Dimension::None,
            },
            ..Style::default()
        };
        let mut measure: BoxedMeasure = Box::new(|request: &MeasureRequest| Size {
            width: request.available_space.width.unwrap_or(200.0).min(200.0),
            height: 10.0,
        });
        let output = compute_leaf_layout(
            input(AvailableSpace::MaxContent, AvailableSpace::MaxContent),
            &style,
            Some(&mut measure),
        );
        assert!((output.size.width - 50.0).abs() < f32::EPSILON);
        assert!((output.size.height - 14.0).abs() < f32::EPSILON);
        assert!((output.content_size.width - 204.0).abs() < f32::EPSILON);
    }

    #[test]
    /// # Panics
    /// Panics if a fully sized leaf calls its measure function during sizing.
    fn known_size_skips_measurement() {
        let style = Style {
            size: length_size(30.0, 20.0),
            ..Style::default()
        };
        let mut measure: BoxedMeasure = Box::new(|_: &MeasureRequest| Size {
            width: f32::NAN,
            height: f32::NAN,
        });
        let mut sizing = input(AvailableSpace::MaxContent, AvailableSpace::MaxContent);
        sizing.run_mode = RunMode::ComputeSize;
        let output = compute_leaf_layout(sizing, &style, Some(&mut measure));
        assert_eq!(
            output.size,
            Size {
                width: 30.0,
                height: 20.0,
            }
        );
    }
}
