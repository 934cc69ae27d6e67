#![cfg(test)]
#![allow(
    clippy::missing_errors_doc,
    reason = "Test helpers return Result for clear propagation"
)]
#![allow(
    clippy::missing_panics_doc,
    reason = "Assertions in tests are expected"
)]

use anyhow::Result;
use trellis::{
    AvailableSpace, Dimension, LayoutEngine, LayoutError, MeasureRequest, NodeId, ParentingError,
    Size, StatusCode, Style, StyleError, StyleField, Unit, length_size, uniform_edges,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fixed(width: f32, height: f32) -> Style {
    Style {
        size: length_size(width, height),
        ..Style::default()
    }
}

const UNBOUNDED: Size<AvailableSpace> = Size {
    width: AvailableSpace::MaxContent,
    height: AvailableSpace::MaxContent,
};

/// Appending an ancestor under its own descendant fails and changes nothing.
///
/// # Panics
/// Panics if the cycle is accepted or the tree is modified.
#[test]
fn cycle_is_refused_without_mutation() -> Result<()> {
    init_logging();
    let mut engine = LayoutEngine::new();
    let leaf = engine.new_leaf(Style::default())?;
    let middle = engine.new_with_children(Style::default(), &[leaf])?;
    let root = engine.new_with_children(Style::default(), &[middle])?;

    let refused = engine.append_child(leaf, root);
    assert_eq!(
        refused,
        Err(LayoutError::InvalidParentingOperation {
            parent: leaf,
            child: root,
            reason: ParentingError::ChildIsAncestor,
        })
    );
    assert!(engine.children(leaf)?.is_empty());
    assert_eq!(engine.parent(root)?, None);
    assert_eq!(engine.children(root)?, &[middle]);
    assert_eq!(StatusCode::from(&refused), StatusCode::InvalidNodeId);
    Ok(())
}

/// A node cannot be silently moved to a second parent.
///
/// # Panics
/// Panics if re-parenting is accepted.
#[test]
fn second_parent_is_refused() -> Result<()> {
    init_logging();
    let mut engine = LayoutEngine::new();
    let child = engine.new_leaf(Style::default())?;
    let first = engine.new_with_children(Style::default(), &[child])?;
    let second = engine.new_leaf(Style::default())?;

    assert!(matches!(
        engine.append_child(second, child),
        Err(LayoutError::InvalidParentingOperation {
            reason: ParentingError::AlreadyHasParent,
            ..
        })
    ));
    engine.remove_child(first, child)?;
    engine.append_child(second, child)?;
    assert_eq!(engine.parent(child)?, Some(second));
    assert!(engine.children(first)?.is_empty());
    Ok(())
}

/// Removed nodes leave stale handles that never alias a reused slot.
///
/// # Panics
/// Panics if a stale id resolves to the new node.
#[test]
fn stale_ids_are_rejected() -> Result<()> {
    init_logging();
    let mut engine = LayoutEngine::new();
    let child = engine.new_leaf(Style::default())?;
    let root = engine.new_with_children(Style::default(), &[child])?;
    engine.remove_node(root)?;
    assert_eq!(engine.total_node_count(), 0);

    let reused = engine.new_leaf(Style::default())?;
    assert_ne!(reused, child);
    assert_ne!(reused, root);
    assert_eq!(engine.style(child).err(), Some(LayoutError::InvalidNodeId(child)));
    assert_eq!(engine.layout(root).err(), Some(LayoutError::InvalidNodeId(root)));
    assert_eq!(
        engine.compute_layout(root, UNBOUNDED),
        Err(LayoutError::InvalidNodeId(root))
    );
    assert_eq!(engine.remove_node(child), Err(LayoutError::InvalidNodeId(child)));
    Ok(())
}

/// Removing a child invalidates its ancestors so the parent shrinks.
///
/// # Panics
/// Panics if a stale cached size survives the removal.
#[test]
fn removal_invalidates_ancestor_caches() -> Result<()> {
    init_logging();
    let mut engine = LayoutEngine::new();
    let narrow = engine.new_leaf(fixed(30.0, 10.0))?;
    let wide = engine.new_leaf(fixed(40.0, 10.0))?;
    let row = engine.new_with_children(Style::default(), &[narrow, wide])?;
    let root = engine.new_with_children(Style::default(), &[row])?;

    engine.compute_layout(root, UNBOUNDED)?;
    assert!((engine.layout(root)?.size.width - 70.0).abs() < f32::EPSILON);
    assert!(!engine.is_dirty(root)?);

    engine.remove_node(wide)?;
    assert!(engine.is_dirty(row)?);
    assert!(engine.is_dirty(root)?);
    assert!(!engine.is_dirty(narrow)?);

    engine.compute_layout(root, UNBOUNDED)?;
    assert!((engine.layout(root)?.size.width - 30.0).abs() < f32::EPSILON);
    assert!((engine.layout(row)?.size.width - 30.0).abs() < f32::EPSILON);
    Ok(())
}

/// Invalid styles are refused and the previous style stays in place.
///
/// # Panics
/// Panics if an invalid style is committed or mapped to the wrong code.
#[test]
fn invalid_style_rolls_back() -> Result<()> {
    init_logging();
    let mut engine = LayoutEngine::new();
    let node = engine.new_leaf(fixed(10.0, 10.0))?;

    let fr_width = engine.set_style(
        node,
        Style {
            size: Size {
                width: Dimension::Fr(1.0),
                height: Dimension::Auto,
            },
            ..Style::default()
        },
    );
    assert_eq!(
        fr_width,
        Err(LayoutError::Style(StyleError::InvalidUnitForField {
            field: StyleField::Width,
            unit: Unit::Fr,
        }))
    );
    assert_eq!(StatusCode::from(&fr_width), StatusCode::InvalidFr);

    let nan_grow = engine.update_style(node, |style| {
        style.flex_grow = f32::NAN;
        style.size.width = Dimension::Length(99.0);
    });
    assert_eq!(StatusCode::from(&nan_grow), StatusCode::UnexpectedNaN);
    assert_eq!(engine.style(node)?, &fixed(10.0, 10.0));

    let negative_padding = engine.new_leaf(Style {
        padding: uniform_edges(-1.0),
        ..Style::default()
    });
    assert_eq!(
        StatusCode::from(&negative_padding),
        StatusCode::UnexpectedNegative
    );
    assert_eq!(engine.total_node_count(), 1);
    Ok(())
}

/// Index-based edits keep the child list and parent links in step.
///
/// # Panics
/// Panics if a child list edit leaves inconsistent links.
#[test]
fn index_edits_keep_links_consistent() -> Result<()> {
    init_logging();
    let mut engine = LayoutEngine::new();
    let first = engine.new_leaf(Style::default())?;
    let second = engine.new_leaf(Style::default())?;
    let third = engine.new_leaf(Style::default())?;
    let root = engine.new_with_children(Style::default(), &[first, second])?;

    engine.insert_child_at_index(root, 1, third)?;
    assert_eq!(engine.children(root)?, &[first, third, second]);
    assert!(matches!(
        engine.insert_child_at_index(root, 9, NodeId::new(99, 0)),
        Err(LayoutError::InvalidNodeId(_))
    ));

    let fresh = engine.new_leaf(Style::default())?;
    assert_eq!(engine.replace_child_at_index(root, 0, fresh)?, first);
    assert_eq!(engine.parent(first)?, None);

    let removed = engine.remove_child_at_index(root, 2)?;
    assert_eq!(removed, second);
    assert_eq!(engine.child_count(root)?, 2);
    assert!(matches!(
        engine.child_at_index(root, 5),
        Err(LayoutError::ChildIndexOutOfBounds {
            index: 5,
            child_count: 2,
            ..
        })
    ));

    engine.set_children(root, &[second, first])?;
    assert_eq!(engine.parent(third)?, None);
    assert_eq!(engine.parent(second)?, Some(root));
    assert!(matches!(
        engine.set_children(root, &[first, first]),
        Err(LayoutError::InvalidParentingOperation {
            reason: ParentingError::DuplicateChild,
            ..
        })
    ));
    assert_eq!(engine.children(root)?, &[second, first]);
    Ok(())
}

/// Direct measurement needs a measure function.
///
/// # Panics
/// Panics if a node without a measure function is measured.
#[test]
fn measure_node_requires_a_function() -> Result<()> {
    init_logging();
    let mut engine = LayoutEngine::new();
    let plain = engine.new_leaf(Style::default())?;
    assert_eq!(
        engine.measure_node(plain, Size::NONE, UNBOUNDED),
        Err(LayoutError::MeasureContextMissing(plain))
    );

    engine.set_measure(plain, |_: &MeasureRequest| Size {
        width: 12.0,
        height: 7.0,
    })?;
    assert!(engine.has_measure(plain)?);
    let measured = engine.measure_node(plain, Size::NONE, UNBOUNDED)?;
    assert!((measured.width - 12.0).abs() < f32::EPSILON);
    engine.clear_measure(plain)?;
    assert!(!engine.has_measure(plain)?);
    Ok(())
}
