//! Base sizes, flexing, wrapping and intrinsic container sizes.

use trellis_geometry::{AvailableSpace, Size};
use trellis_style::{Dimension, FlexWrap, Style};

use super::*;

#[test]
/// Grow factors split positive free space proportionally.
///
/// # Panics
/// Panics if widths or positions do not follow the 1:2:1 split.
fn grow_factors_share_free_space() {
    let mut tree = TestTree::default();
    let grower = |grow: f32| Style {
        flex_grow: grow,
        flex_basis: Dimension::ZERO,
        ..fixed(0.0, 10.0)
    };
    let first = tree.add(grower(1.0), &[]);
    let second = tree.add(grower(2.0), &[]);
    let third = tree.add(grower(1.0), &[]);
    let root = tree.add(container(100.0, 10.0), &[first, second, third]);
    tree.run(root, definite(100.0, 10.0));

    assert!(near(tree.layout(first).size.width, 25.0));
    assert!(near(tree.layout(second).size.width, 50.0));
    assert!(near(tree.layout(second).location.x, 25.0));
    assert!(near(tree.layout(third).location.x, 75.0));
}

#[test]
/// An item shrunk below its min width is frozen and the rest absorbs the overflow.
///
/// # Panics
/// Panics if the min violation is not redistributed.
fn shrink_respects_min_width() {
    let mut tree = TestTree::default();
    let clamped = tree.add(
        Style {
            min_size: Size {
                width: Dimension::length(70.0),
                height: Dimension::Auto,
            },
            ..fixed(80.0, 10.0)
        },
        &[],
    );
    let free = tree.add(fixed(80.0, 10.0), &[]);
    let root = tree.add(container(100.0, 10.0), &[clamped, free]);
    tree.run(root, definite(100.0, 10.0));

    assert!(near(tree.layout(clamped).size.width, 70.0));
    assert!(near(tree.layout(free).size.width, 30.0));
    assert!(near(tree.layout(free).location.x, 70.0));
}

#[test]
/// Items with no shrink factor overflow instead of shrinking.
///
/// # Panics
/// Panics if an inflexible item shrinks.
fn zero_shrink_overflows() {
    let mut tree = TestTree::default();
    let rigid = |width: f32| Style {
        flex_shrink: 0.0,
        ..fixed(width, 10.0)
    };
    let first = tree.add(rigid(70.0), &[]);
    let second = tree.add(rigid(70.0), &[]);
    let root = tree.add(container(100.0, 10.0), &[first, second]);
    let output = tree.run(root, definite(100.0, 10.0));

    assert!(near(tree.layout(second).size.width, 70.0));
    assert!(near(tree.layout(second).location.x, 70.0));
    assert!(near(output.content_size.width, 140.0));
}

#[test]
/// A wrapping row breaks before the item that would overflow.
///
/// # Panics
/// Panics if the third item is not moved to a second line.
fn wrap_breaks_lines() {
    let mut tree = TestTree::default();
    let items: Vec<NodeId> = (0..3).map(|_| tree.add(fixed(40.0, 10.0), &[])).collect();
    let root = tree.add(
        Style {
            flex_wrap: FlexWrap::Wrap,
            size: Size {
                width: Dimension::length(100.0),
                height: Dimension::Auto,
            },
            ..Style::default()
        },
        &items,
    );
    let output = tree.run(
        root,
        Size {
            width: AvailableSpace::Definite(100.0),
            height: AvailableSpace::MaxContent,
        },
    );

    assert!(near(tree.layout(items[1]).location.x, 40.0));
    assert!(near(tree.layout(items[2]).location.x, 0.0));
    assert!(near(tree.layout(items[2]).location.y, 10.0));
    assert!(near(output.size.height, 20.0));
}

#[test]
/// Under a max-content constraint the container hugs its items.
///
/// # Panics
/// Panics if the intrinsic size is not the sum of widths and the tallest height.
fn max_content_container_hugs_items() {
    let mut tree = TestTree::default();
    let short = tree.add(fixed(30.0, 10.0), &[]);
    let tall = tree.add(fixed(20.0, 20.0), &[]);
    let root = tree.add(Style::default(), &[short, tall]);
    let output = tree.run(
        root,
        Size {
            width: AvailableSpace::MaxContent,
            height: AvailableSpace::MaxContent,
        },
    );

    assert!(near(output.size.width, 50.0));
    assert!(near(output.size.height, 20.0));
}

#[test]
/// A content-sized item takes its measured width as flex basis.
///
/// # Panics
/// Panics if the measured content does not drive the item's width.
fn content_drives_flex_basis() {
    let mut tree = TestTree::default();
    let text = tree.add_with_content(
        Style::default(),
        &[],
        Size {
            width: 42.0,
            height: 12.0,
        },
    );
    let root = tree.add(container(100.0, 50.0), &[text]);
    tree.run(root, definite(100.0, 50.0));

    assert!(near(tree.layout(text).size.width, 42.0));
    assert!(near(tree.layout(text).size.height, 12.0));
}

#[test]
/// Gaps separate items and count against free space.
///
/// # Panics
/// Panics if the second item does not start after the gap.
fn gap_separates_items() {
    let mut tree = TestTree::default();
    let first = tree.add(fixed(20.0, 10.0), &[]);
    let second = tree.add(fixed(20.0, 10.0), &[]);
    let root = tree.add(
        Style {
            gap: Size {
                width: Dimension::length(10.0),
                height: Dimension::ZERO,
            },
            ..container(100.0, 10.0)
        },
        &[first, second],
    );
    tree.run(root, definite(100.0, 10.0));
    assert!(near(tree.layout(second).location.x, 30.0));
}

#[test]
/// The `order` property changes visit order and the recorded order index.
///
/// # Panics
/// Panics if the later-ordered item is placed first.
fn order_property_reorders_items() {
    let mut tree = TestTree::default();
    let late = tree.add(
        Style {
            order: 1,
            ..fixed(10.0, 10.0)
        },
        &[],
    );
    let early = tree.add(fixed(20.0, 10.0), &[]);
    let root = tree.add(container(100.0, 10.0), &[late, early]);
    tree.run(root, definite(100.0, 10.0));

    assert!(near(tree.layout(early).location.x, 0.0));
    assert!(near(tree.layout(late).location.x, 20.0));
    assert_eq!(tree.layout(late).order, 1);
    assert_eq!(tree.layout(early).order, 0);
}
