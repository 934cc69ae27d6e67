//! Content distribution and overflow helpers shared by flex and grid.

use trellis_geometry::{Point, Size};
use trellis_style::{AlignContent, Overflow};

/// Offset placed before one item (or track) when distributing `free_space`
/// among `item_count` items with `alignment`.
///
/// Offsets are in the order items are laid out. `layout_is_reversed` flips
/// the physical keywords (`Start`, `End`) for reversed flex directions.
/// Negative free space never spreads: the distributed keywords fall back to
/// `Start` (`SpaceBetween`) or `Center` (`SpaceAround`, `SpaceEvenly`).
pub fn compute_alignment_offset(
    free_space: f32,
    item_count: usize,
    gap: f32,
    alignment: AlignContent,
    layout_is_reversed: bool,
    is_first: bool,
) -> f32 {
    let count = item_count.max(1) as f32;
    if is_first {
        match alignment {
            AlignContent::Normal
            | AlignContent::Stretch
            | AlignContent::FlexStart
            | AlignContent::SpaceBetween => 0.0,
            AlignContent::FlexEnd => free_space,
            AlignContent::Start => {
                if layout_is_reversed {
                    free_space
                } else {
                    0.0
                }
            }
            AlignContent::End => {
                if layout_is_reversed {
                    0.0
                } else {
                    free_space
                }
            }
            AlignContent::Center => free_space / 2.0,
            AlignContent::SpaceAround => {
                if free_space >= 0.0 {
                    free_space / count / 2.0
                } else {
                    free_space / 2.0
                }
            }
            AlignContent::SpaceEvenly => {
                if free_space >= 0.0 {
                    free_space / (count + 1.0)
                } else {
                    free_space / 2.0
                }
            }
        }
    } else {
        let free_space = free_space.max(0.0);
        gap + match alignment {
            AlignContent::SpaceBetween if item_count > 1 => free_space / (count - 1.0),
            AlignContent::SpaceAround => free_space / count,
            AlignContent::SpaceEvenly => free_space / (count + 1.0),
            _ => 0.0,
        }
    }
}

/// How far a child at `location` extends its parent's scrollable overflow.
///
/// A child with visible overflow contributes its own overflow too. Zero-area
/// boxes contribute nothing.
pub fn content_size_contribution(
    location: Point<f32>,
    size: Size<f32>,
    content_size: Size<f32>,
    overflow: Point<Overflow>,
) -> Size<f32> {
    let extent = Size {
        width: if overflow.x == Overflow::Visible {
            size.width.max(content_size.width)
        } else {
            size.width
        },
        height: if overflow.y == Overflow::Visible {
            size.height.max(content_size.height)
        } else {
            size.height
        },
    };
    if extent.width > 0.0 && extent.height > 0.0 {
        Size {
            width: location.x + extent.width,
            height: location.y + extent.height,
        }
    } else {
        Size::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if space-between does not put all free space between two items.
    fn space_between_two_items() {
        let first = compute_alignment_offset(60.0, 2, 0.0, AlignContent::SpaceBetween, false, true);
        let second = compute_alignment_offset(60.0, 2, 0.0, AlignContent::SpaceBetween, false, false);
        assert!(first.abs() < f32::EPSILON);
        assert!((second - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    /// # Panics
    /// Panics if distributed keywords spread negative space instead of falling back.
    fn negative_space_falls_back() {
        let around = compute_alignment_offset(-20.0, 3, 0.0, AlignContent::SpaceAround, false, true);
        assert!((around + 10.0).abs() < f32::EPSILON);
        let between = compute_alignment_offset(-20.0, 3, 5.0, AlignContent::SpaceBetween, false, false);
        assert!((between - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    /// # Panics
    /// Panics if physical keywords ignore reversal.
    fn start_flips_when_reversed() {
        assert!(
            (compute_alignment_offset(30.0, 1, 0.0, AlignContent::Start, true, true) - 30.0).abs()
                < f32::EPSILON
        );
        assert!(compute_alignment_offset(30.0, 1, 0.0, AlignContent::FlexStart, true, true).abs() < f32::EPSILON);
    }

    #[test]
    /// # Panics
    /// Panics if zero-area children contribute to overflow.
    fn zero_area_contributes_nothing() {
        let visible = Point {
            x: Overflow::Visible,
            y: Overflow::Visible,
        };
        let zero = content_size_contribution(
            Point { x: 10.0, y: 10.0 },
            Size {
                width: 0.0,
                height: 5.0,
            },
            Size::ZERO,
            visible,
        );
        assert_eq!(zero, Size::ZERO);
        let spilled = content_size_contribution(
            Point { x: 10.0, y: 0.0 },
            Size {
                width: 20.0,
                height: 5.0,
            },
            Size {
                width: 50.0,
                height: 5.0,
            },
            visible,
        );
        assert!((spilled.width - 60.0).abs() < f32::EPSILON);
    }
}
