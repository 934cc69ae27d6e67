//! Tests for block stacking.

use trellis_geometry::{AvailableSpace, Rect, Size};
use trellis_style::{Dimension, Position, Style, length_size};
use trellis_tree::{Layout, LayoutInput, LayoutOutput, LayoutTree, NodeId, RunMode, SizingMode};

use super::compute_block_layout;


/// Style reported for unknown ids.
static DEFAULT_STYLE: Style = Style::DEFAULT;

/// Minimal tree: containers use the block algorithm, leaves take their style size.
#[derive(Default)]
pub struct TestTree {
    /// Node styles, children and recorded layouts, indexed by slot.
    nodes: Vec<(Style, Vec<NodeId>, Layout)>,
}

impl TestTree {
    /// Add a node and return its id.
    pub fn add(&mut self, style: Style, children: &[NodeId]) -> NodeId {
        self.nodes.push((style, children.to_vec(), Layout::default()));
        NodeId::new(self.nodes.len() as u32 - 1, 0)
    }

    /// The layout recorded for `node`.
    pub fn layout(&self, node: NodeId) -> Layout {
        self.nodes
            .get(node.slot() as usize)
            .map(|(_, _, layout)| *layout)
            .unwrap_or_default()
    }

    /// Lay out `root` into a definite width and an unbounded height.
    pub fn run(&mut self, root: NodeId, width: AvailableSpace) -> LayoutOutput {
        let _ = env_logger::builder().is_test(true).try_init();
        compute_block_layout(
            self,
            root,
            LayoutInput {
                run_mode: RunMode::PerformLayout,
                sizing_mode: SizingMode::InherentSize,
                axis: trellis_tree::RequestedAxis::Both,
                known_dimensions: Size::NONE,
                parent_size: Size {
                    width: width.into_option(),
                    height: None,
                },
                available_space: Size {
                    width,
                    height: AvailableSpace::MaxContent,
                },
            },
        )
    }
}

impl LayoutTree for TestTree {
    fn children(&self, node: NodeId) -> &[NodeId] {
        match self.nodes.get(node.slot() as usize) {
            Some((_, children, _)) => children.as_slice(),
            None => &[],
        }
    }

    fn style(&self, node: NodeId) -> &Style {
        self.nodes
            .get(node.slot() as usize)
            .map_or(&DEFAULT_STYLE, |(style, _, _)| style)
    }

    fn set_unrounded_layout(&mut self, node: NodeId, layout: &Layout) {
        if let Some(entry) = self.nodes.get_mut(node.slot() as usize) {
            entry.2 = *layout;
        }
    }

    fn compute_child_layout(&mut self, node: NodeId, input: LayoutInput) -> LayoutOutput {
        if input.run_mode == RunMode::PerformHiddenLayout {
            return LayoutOutput::HIDDEN;
        }
        if !self.children(node).is_empty() {
            return compute_block_layout(self, node, input);
        }
        let style_size = self.style(node).size.map(|dimension| match dimension {
            Dimension::Length(value) => Some(value),
            _ => None,
        });
        let size = input.known_dimensions.or(style_size).unwrap_or(Size::ZERO);
        LayoutOutput::from_outer_size(size)
    }
}

/// A fixed-size leaf style.
pub fn fixed(width: f32, height: f32) -> Style {
    Style {
        size: length_size(width, height),
        ..Style::default()
    }
}

/// An absolutely positioned leaf style.
pub fn absolute(width: f32, height: f32, inset: Rect<Dimension>) -> Style {
    Style {
        position: Position::Absolute,
        inset,
        ..fixed(width, height)
    }
}
