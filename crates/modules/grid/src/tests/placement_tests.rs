use trellis_style::{AlignSelf, GridAutoFlow, GridPlacement, TrackSize};

use super::*;

/// Test that items fill fixed tracks in row order.
///
/// # Panics
/// Panics if any item lands in the wrong cell.
#[test]
fn fixed_tracks_position_items() {
    let mut tree = TestTree::default();
    let cells: Vec<NodeId> = (0..4).map(|_| tree.leaf(10.0, 10.0)).collect();
    let root = tree.add(grid(300.0, 200.0, lengths(&[100.0, 200.0]), lengths(&[50.0, 150.0])), &cells);
    let output = tree.run(root, definite(300.0, 200.0));

    assert!(near(output.size.width, 300.0));
    assert!(near(output.size.height, 200.0));
    let expected = [(0.0, 0.0), (100.0, 0.0), (0.0, 50.0), (100.0, 50.0)];
    for (&cell, (x, y)) in cells.iter().zip(expected) {
        let layout = tree.layout(cell);
        assert!(near(layout.location.x, x), "x of {cell}: {}", layout.location.x);
        assert!(near(layout.location.y, y), "y of {cell}: {}", layout.location.y);
        assert!(near(layout.size.width, 10.0));
    }
}

/// Test an item spanning lines 1 to 3 and the auto-placed item after it.
///
/// # Panics
/// Panics if the span or the following item is misplaced.
#[test]
fn span_covers_two_columns() {
    let mut tree = TestTree::default();
    let wide = tree.add(
        Style {
            grid_column: GridPlacement::lines(1, 3),
            justify_self: Some(AlignSelf::Stretch),
            ..Style::default()
        },
        &[],
    );
    let next = tree.leaf(10.0, 10.0);
    let root = tree.add(grid(300.0, 100.0, lengths(&[100.0, 100.0, 100.0]), Vec::new()), &[wide, next]);
    tree.run(root, definite(300.0, 100.0));

    assert!(near(tree.layout(wide).location.x, 0.0));
    assert!(near(tree.layout(wide).size.width, 200.0));
    assert!(near(tree.layout(next).location.x, 200.0));
    assert!(near(tree.layout(next).location.y, 0.0));
}

/// Test that negative lines count back from the end of the explicit grid.
///
/// # Panics
/// Panics if the item is not in the last column.
#[test]
fn negative_lines_count_from_end() {
    let mut tree = TestTree::default();
    let last = tree.add(
        Style {
            grid_column: GridPlacement::lines(-2, -1),
            ..Style::default()
        },
        &[],
    );
    let root = tree.add(grid(300.0, 100.0, lengths(&[100.0, 100.0, 100.0]), Vec::new()), &[last]);
    tree.run(root, definite(300.0, 100.0));

    assert!(near(tree.layout(last).location.x, 200.0));
}

/// Test that lines before the explicit grid create implicit tracks that
/// cycle through `grid-auto-columns`.
///
/// # Panics
/// Panics if the negative implicit tracks are sized or ordered wrongly.
#[test]
fn lines_before_grid_add_implicit_tracks() {
    let mut tree = TestTree::default();
    let before = tree.add(
        Style {
            grid_column: GridPlacement::lines(-5, -4),
            ..Style::default()
        },
        &[],
    );
    let explicit = tree.add(
        Style {
            grid_column: GridPlacement::lines(1, 2),
            ..Style::default()
        },
        &[],
    );
    let mut style = grid(200.0, 100.0, lengths(&[50.0, 50.0]), Vec::new());
    style.grid_auto_columns = vec![TrackSize::length(10.0)];
    let root = tree.add(style, &[before, explicit]);
    tree.run(root, definite(200.0, 100.0));

    assert!(near(tree.layout(before).location.x, 0.0));
    assert!(near(tree.layout(explicit).location.x, 20.0));
}

/// Test that implicit rows take `grid-auto-rows` and size the container.
///
/// # Panics
/// Panics if implicit rows are missing or mis-sized.
#[test]
fn implicit_rows_use_auto_rows() {
    let mut tree = TestTree::default();
    let cells: Vec<NodeId> = (0..3).map(|_| tree.leaf(10.0, 10.0)).collect();
    let root = tree.add(
        Style {
            display: Display::Grid,
            size: Size {
                width: Dimension::Length(100.0),
                height: Dimension::Auto,
            },
            grid_template_columns: lengths(&[100.0]),
            grid_auto_rows: vec![TrackSize::length(30.0)],
            ..Style::default()
        },
        &cells,
    );
    let output = tree.run(root, definite(100.0, 500.0));

    assert!(near(output.size.height, 90.0));
    assert!(near(tree.layout(cells[2]).location.y, 60.0));
}

/// Build three items (two spanning two columns) under `auto_flow`.
fn spanning_grid(auto_flow: GridAutoFlow) -> (TestTree, NodeId, NodeId) {
    let mut tree = TestTree::default();
    let span_two = Style {
        grid_column: GridPlacement::span(2),
        ..Style::default()
    };
    let first = tree.add_with_content(span_two.clone(), &[], Size::new(10.0, 10.0));
    let second = tree.add_with_content(span_two, &[], Size::new(10.0, 10.0));
    let single = tree.leaf(10.0, 10.0);
    let root = tree.add(
        Style {
            display: Display::Grid,
            size: Size {
                width: Dimension::Length(150.0),
                height: Dimension::Auto,
            },
            grid_template_columns: lengths(&[50.0, 50.0, 50.0]),
            grid_auto_flow: auto_flow,
            ..Style::default()
        },
        &[first, second, single],
    );
    (tree, root, single)
}

/// Test that sparse placement never backtracks into earlier holes.
///
/// # Panics
/// Panics if the single item fills the hole in the first row.
#[test]
fn sparse_flow_leaves_holes() {
    let (mut tree, root, single) = spanning_grid(GridAutoFlow::Row);
    tree.run(root, definite(150.0, 500.0));

    assert!(near(tree.layout(single).location.x, 100.0));
    assert!(near(tree.layout(single).location.y, 10.0));
}

/// Test that dense placement fills the earliest hole.
///
/// # Panics
/// Panics if the single item does not move into the first row.
#[test]
fn dense_flow_fills_holes() {
    let (mut tree, root, single) = spanning_grid(GridAutoFlow::RowDense);
    tree.run(root, definite(150.0, 500.0));

    assert!(near(tree.layout(single).location.x, 100.0));
    assert!(near(tree.layout(single).location.y, 0.0));
}

/// Test that children hidden with `display: none` take no cell.
///
/// # Panics
/// Panics if the hidden child occupies a cell or keeps a size.
#[test]
fn hidden_child_takes_no_cell() {
    let mut tree = TestTree::default();
    let hidden = tree.add(
        Style {
            display: Display::None,
            ..fixed(40.0, 40.0)
        },
        &[],
    );
    let first = tree.leaf(10.0, 10.0);
    let second = tree.leaf(10.0, 10.0);
    let root = tree.add(grid(100.0, 100.0, lengths(&[50.0, 50.0]), Vec::new()), &[hidden, first, second]);
    tree.run(root, definite(100.0, 100.0));

    assert_eq!(tree.layout(hidden).size, Size::ZERO);
    assert_eq!(tree.layout(hidden).order, 0);
    assert!(near(tree.layout(first).location.x, 0.0));
    assert!(near(tree.layout(second).location.x, 50.0));
}
