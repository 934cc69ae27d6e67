//! Block, flexbox and grid layout over a generational node arena.
//!
//! Build a tree with [`LayoutEngine`], give each node a [`Style`], optionally
//! attach a [`MeasureFunc`] to leaves whose content has an intrinsic size,
//! then call [`LayoutEngine::compute_layout`] and read back each node's
//! [`Layout`].
//!
//! ```
//! use trellis::{AvailableSpace, Dimension, JustifyContent, LayoutEngine, Size, Style};
//!
//! # fn main() -> Result<(), trellis::LayoutError> {
//! let mut engine = LayoutEngine::new();
//! let child = engine.new_leaf(Style {
//!     size: Size { width: Dimension::percent(0.5), height: Dimension::Auto },
//!     ..Style::default()
//! })?;
//! let root = engine.new_with_children(
//!     Style {
//!         size: trellis::length_size(100.0, 100.0),
//!         justify_content: JustifyContent::Center,
//!         ..Style::default()
//!     },
//!     &[child],
//! )?;
//! engine.compute_layout(root, Size { width: AvailableSpace::Definite(100.0), height: AvailableSpace::Definite(100.0) })?;
//! assert_eq!(engine.layout(child)?.location.x, 25.0);
//! # Ok(())
//! # }
//! ```

mod arena;
mod engine;
mod error;
mod leaf;
mod measure;
mod printing;
mod rounding;

pub use engine::{LayoutConfig, LayoutEngine};
pub use error::{LayoutError, ParentingError, StatusCode};
pub use measure::{BoxedMeasure, MeasureFunc, MeasureMode, MeasureRequest};
pub use trellis_geometry::{AbsoluteAxis, AvailableSpace, Line, MaybeMath, Point, Rect, Size};
pub use trellis_style::{
    AlignContent, AlignItems, AlignSelf, Dimension, Display, Edge, FlexDirection, FlexWrap,
    GridAutoFlow, GridPlacement, JustifyContent, JustifyItems, JustifySelf, NumericProblem,
    Overflow, Position, RepeatCount, Style, StyleError, StyleField, TrackEntry, TrackSize, Unit,
    length_size, uniform_edges,
};
pub use trellis_tree::{Layout, NodeId};
