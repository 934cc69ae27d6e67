//! Human-readable dump of a laid-out tree.

use core::fmt::Write as _;

use trellis_style::Display;
use trellis_tree::NodeId;

use crate::engine::LayoutEngine;
use crate::error::LayoutError;

impl LayoutEngine {
    /// Render the subtree under `root` with each node's display mode, final
    /// location and size, one node per line.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidNodeId`] if `root` is unknown.
    pub fn debug_tree(&self, root: NodeId) -> Result<String, LayoutError> {
        self.node(root)?;
        let mut out = String::from("TREE\n");
        self.print_node(&mut out, root, "", true);
        Ok(out)
    }

    /// Append `node` and its subtree to `out`.
    fn print_node(&self, out: &mut String, node: NodeId, prefix: &str, is_last: bool) {
        let Ok(data) = self.node(node) else {
            return;
        };
        let label = match (data.style.display, data.children.is_empty()) {
            (Display::None, _) => "NONE",
            (_, true) if data.measure.is_some() => "MEASURED",
            (_, true) => "LEAF",
            (Display::Block, false) => "BLOCK",
            (Display::Flex, false) => "FLEX",
            (Display::Grid, false) => "GRID",
        };
        let layout = &data.final_layout;
        let fork = if is_last { "└── " } else { "├── " };
        let _ = writeln!(
            out,
            "{prefix}{fork}{label} [x: {:<4} y: {:<4} w: {:<4} h: {:<4} content_w: {:<4} content_h: {:<4}] ({node})",
            layout.location.x,
            layout.location.y,
            layout.size.width,
            layout.size.height,
            layout.content_size.width,
            layout.content_size.height,
        );
        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let count = data.children.len();
        for (index, child) in data.children.iter().enumerate() {
            self.print_node(out, *child, &child_prefix, index + 1 == count);
        }
    }
}
