//! Tests for the flex layout algorithm.

use trellis_geometry::{AvailableSpace, Size};
use trellis_style::{Dimension, Display, Style, length_size};
use trellis_tree::{
    Layout, LayoutInput, LayoutOutput, LayoutTree, NodeId, RequestedAxis, RunMode, SizingMode,
};

use crate::compute_flexbox_layout;

mod flexing_tests;

/// Style reported for unknown ids.
static DEFAULT_STYLE: Style = Style::DEFAULT;

/// One node of the test tree.
struct TestNode {
    /// Style of the node.
    style: Style,
    /// Children in storage order.
    children: Vec<NodeId>,
    /// Intrinsic content size reported by leaves.
    content: Size<f32>,
    /// Last recorded layout.
    layout: Layout,
}

/// Minimal tree: containers run the flex algorithm, leaves report a fixed content size.
#[derive(Default)]
pub struct TestTree {
    /// Nodes indexed by slot.
    nodes: Vec<TestNode>,
}

impl TestTree {
    /// Add a node and return its id.
    pub fn add(&mut self, style: Style, children: &[NodeId]) -> NodeId {
        self.add_with_content(style, children, Size::ZERO)
    }

    /// Add a leaf whose content measures `content`.
    pub fn add_with_content(&mut self, style: Style, children: &[NodeId], content: Size<f32>) -> NodeId {
        self.nodes.push(TestNode {
            style,
            children: children.to_vec(),
            content,
            layout: Layout::default(),
        });
        NodeId::new(self.nodes.len() as u32 - 1, 0)
    }

    /// The layout recorded for `node`.
    pub fn layout(&self, node: NodeId) -> Layout {
        self.nodes
            .get(node.slot() as usize)
            .map(|entry| entry.layout)
            .unwrap_or_default()
    }

    /// Lay out `root` into `available` space.
    pub fn run(&mut self, root: NodeId, available: Size<AvailableSpace>) -> LayoutOutput {
        let _ = env_logger::builder().is_test(true).try_init();
        compute_flexbox_layout(
            self,
            root,
            LayoutInput {
                run_mode: RunMode::PerformLayout,
                sizing_mode: SizingMode::InherentSize,
                axis: RequestedAxis::Both,
                known_dimensions: Size::NONE,
                parent_size: available.map(AvailableSpace::into_option),
                available_space: available,
            },
        )
    }
}

impl LayoutTree for TestTree {
    fn children(&self, node: NodeId) -> &[NodeId] {
        match self.nodes.get(node.slot() as usize) {
            Some(entry) => entry.children.as_slice(),
            None => &[],
        }
    }

    fn style(&self, node: NodeId) -> &Style {
        self.nodes
            .get(node.slot() as usize)
            .map_or(&DEFAULT_STYLE, |entry| &entry.style)
    }

    fn set_unrounded_layout(&mut self, node: NodeId, layout: &Layout) {
        if let Some(entry) = self.nodes.get_mut(node.slot() as usize) {
            entry.layout = *layout;
        }
    }

    fn compute_child_layout(&mut self, node: NodeId, input: LayoutInput) -> LayoutOutput {
        if input.run_mode == RunMode::PerformHiddenLayout {
            return LayoutOutput::HIDDEN;
        }
        if !self.children(node).is_empty() {
            return compute_flexbox_layout(self, node, input);
        }
        let Some(entry) = self.nodes.get(node.slot() as usize) else {
            return LayoutOutput::HIDDEN;
        };
        let style_size = if input.sizing_mode == SizingMode::InherentSize {
            entry.style.size.map(|dimension| match dimension {
                Dimension::Length(value) => Some(value),
                _ => None,
            })
        } else {
            Size::NONE
        };
        let size = input
            .known_dimensions
            .or(style_size)
            .unwrap_or(entry.content);
        LayoutOutput::from_outer_size(size)
    }
}

/// Definite space in both axes.
pub fn definite(width: f32, height: f32) -> Size<AvailableSpace> {
    Size {
        width: AvailableSpace::Definite(width),
        height: AvailableSpace::Definite(height),
    }
}

/// A fixed-size leaf style.
pub fn fixed(width: f32, height: f32) -> Style {
    Style {
        size: length_size(width, height),
        ..Style::default()
    }
}

/// A flex container of the given size.
pub fn container(width: f32, height: f32) -> Style {
    Style {
        display: Display::Flex,
        size: length_size(width, height),
        ..Style::default()
    }
}

/// Compare two floats within layout tolerance.
pub fn near(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < 0.001
}
