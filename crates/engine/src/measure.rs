//! Host-supplied content measurement for leaf nodes.

use trellis_geometry::{AvailableSpace, Size};

/// How a measure function should treat one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MeasureMode {
    /// The size is fixed; return it.
    Exact,
    /// Fit the content into at most the given size.
    FitContent,
    /// Report the narrowest size the content can take.
    MinContent,
    /// Report the size the content takes without constraint.
    MaxContent,
}

/// One measurement call.
///
/// Sizes are content-box sizes: the caller adds padding, border and
/// scrollbar gutters itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureRequest {
    /// Content-box sizes already fixed by the caller.
    pub known_dimensions: Size<Option<f32>>,
    /// Content-box space available in each axis.
    pub available_space: Size<AvailableSpace>,
}

impl MeasureRequest {
    /// The width constraint as a mode and a value.
    #[inline]
    pub fn width_mode(&self) -> (MeasureMode, f32) {
        Self::axis_mode(self.known_dimensions.width, self.available_space.width)
    }

    /// The height constraint as a mode and a value.
    #[inline]
    pub fn height_mode(&self) -> (MeasureMode, f32) {
        Self::axis_mode(self.known_dimensions.height, self.available_space.height)
    }

    /// Collapse one axis into the binding-layer pair.
    fn axis_mode(known: Option<f32>, available: AvailableSpace) -> (MeasureMode, f32) {
        match (known, available) {
            (Some(value), _) => (MeasureMode::Exact, value),
            (None, AvailableSpace::Definite(value)) => (MeasureMode::FitContent, value),
            (None, AvailableSpace::MinContent) => (MeasureMode::MinContent, f32::INFINITY),
            (None, AvailableSpace::MaxContent) => (MeasureMode::MaxContent, f32::INFINITY),
        }
    }
}

/// Measures a leaf's content.
///
/// Implementations must answer identical requests identically; the engine
/// caches results until the node is marked dirty.
pub trait MeasureFunc {
    /// Content-box size for `request`.
    fn measure(&mut self, request: &MeasureRequest) -> Size<f32>;
}

impl<F> MeasureFunc for F
where
    F: FnMut(&MeasureRequest) -> Size<f32>,
{
    #[inline]
    fn measure(&mut self, request: &MeasureRequest) -> Size<f32> {
        self(request)
    }
}

/// A measure function stored on a node.
pub type BoxedMeasure = Box<dyn MeasureFunc + Send>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if constraints are not collapsed into binding-layer modes.
    fn modes_follow_constraints() {
        let request = MeasureRequest {
            known_dimensions: Size {
                width: Some(40.0),
                height: None,
            },
            available_space: Size {
                width: AvailableSpace::MinContent,
                height: AvailableSpace::Definite(30.0),
            },
        };
        assert_eq!(request.width_mode(), (MeasureMode::Exact, 40.0));
        assert_eq!(request.height_mode(), (MeasureMode::FitContent, 30.0));
        let open = MeasureRequest {
            known_dimensions: Size::NONE,
            available_space: Size {
                width: AvailableSpace::MinContent,
                height: AvailableSpace::MaxContent,
            },
        };
        assert_eq!(open.width_mode(), (MeasureMode::MinContent, f32::INFINITY));
        assert_eq!(open.height_mode(), (MeasureMode::MaxContent, f32::INFINITY));
    }

    #[test]
    /// # Panics
    /// Panics if closures do not act as measure functions.
    fn closures_measure() {
        let mut calls = 0_u32;
        let mut text = |request: &MeasureRequest| {
            calls += 1;
            let (_, width) = request.width_mode();
            Size {
                width: width.min(120.0),
                height: 16.0,
            }
        };
        let size = text.measure(&MeasureRequest {
            known_dimensions: Size::NONE,
            available_space: Size {
                width: AvailableSpace::Definite(80.0),
                height: AvailableSpace::MaxContent,
            },
        });
        assert!((size.width - 80.0).abs() < f32::EPSILON);
        assert_eq!(calls, 1);
    }
}
