//! Typed failures of the engine API and their binding-layer status codes.

use thiserror::Error;
use trellis_style::{NumericProblem, StyleError, Unit};
use trellis_tree::NodeId;

/// Why a tree edit was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParentingError {
    /// The child is already attached somewhere else.
    #[error("child already has a parent")]
    AlreadyHasParent,
    /// The child is the parent or one of its ancestors.
    #[error("child is an ancestor of the parent")]
    ChildIsAncestor,
    /// A node was asked to adopt itself.
    #[error("node cannot be its own child")]
    SelfParent,
    /// The node is not a child of the given parent.
    #[error("node is not a child of the parent")]
    NotAChild,
    /// The same child appears twice in one child list.
    #[error("child listed more than once")]
    DuplicateChild,
}

/// Errors returned by [`crate::LayoutEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    /// The handle is unknown, freed or from an older generation.
    #[error("node {0} does not exist")]
    InvalidNodeId(NodeId),
    /// The edit would create a cycle or give a node two parents.
    #[error("cannot attach {child} to {parent}: {reason}")]
    InvalidParentingOperation {
        /// Intended parent.
        parent: NodeId,
        /// Intended child.
        child: NodeId,
        /// What went wrong.
        reason: ParentingError,
    },
    /// A child index past the end of the child list.
    #[error("index {index} is out of bounds for {parent} with {child_count} children")]
    ChildIndexOutOfBounds {
        /// The parent whose list was indexed.
        parent: NodeId,
        /// Requested index.
        index: usize,
        /// Length of the child list.
        child_count: usize,
    },
    /// The style failed validation; nothing was changed.
    #[error(transparent)]
    Style(#[from] StyleError),
    /// A direct measurement was requested for a node without a measure function.
    #[error("node {0} has no measure function")]
    MeasureContextMissing(NodeId),
}

/// Binding-layer result codes, in their stable declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StatusCode {
    /// Success.
    Ok,
    /// A null style handle crossed the boundary.
    NullStylePointer,
    /// A null tree handle crossed the boundary.
    NullTreePointer,
    /// Unknown or stale node, or a refused tree edit.
    InvalidNodeId,
    /// A keyword discriminant out of range.
    InvalidEnumValue,
    /// `None` where it is not allowed.
    InvalidNone,
    /// A pixel length where it is not allowed.
    InvalidPoints,
    /// A percentage where it is not allowed.
    InvalidPercent,
    /// `min-content` where it is not allowed.
    InvalidMinContent,
    /// `max-content` where it is not allowed.
    InvalidMaxContent,
    /// `fit-content(<px>)` where it is not allowed.
    InvalidFitContentPx,
    /// `fit-content(<percent>)` where it is not allowed.
    InvalidFitContentPercent,
    /// `auto` where it is not allowed.
    InvalidAuto,
    /// `fr` where it is not allowed.
    InvalidFr,
    /// A NaN magnitude.
    UnexpectedNaN,
    /// An infinite magnitude.
    UnexpectedInfinity,
    /// A negative or zero magnitude where only positive values are allowed.
    UnexpectedNegative,
}

impl From<Unit> for StatusCode {
    #[inline]
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::None => Self::InvalidNone,
            Unit::Length => Self::InvalidPoints,
            Unit::Percent => Self::InvalidPercent,
            Unit::MinContent => Self::InvalidMinContent,
            Unit::MaxContent => Self::InvalidMaxContent,
            Unit::FitContentPx => Self::InvalidFitContentPx,
            Unit::FitContentPercent => Self::InvalidFitContentPercent,
            Unit::Auto => Self::InvalidAuto,
            Unit::Fr => Self::InvalidFr,
        }
    }
}

impl From<&StyleError> for StatusCode {
    fn from(error: &StyleError) -> Self {
        match *error {
            StyleError::InvalidUnitForField { unit, .. } => Self::from(unit),
            StyleError::InvalidNumericValue { problem, .. } => match problem {
                NumericProblem::NaN => Self::UnexpectedNaN,
                NumericProblem::Infinite => Self::UnexpectedInfinity,
                NumericProblem::Negative | NumericProblem::NonPositive => Self::UnexpectedNegative,
            },
            StyleError::InvalidEnumValue { .. } => Self::InvalidEnumValue,
        }
    }
}

impl From<&LayoutError> for StatusCode {
    fn from(error: &LayoutError) -> Self {
        match error {
            LayoutError::InvalidNodeId(_)
            | LayoutError::InvalidParentingOperation { .. }
            | LayoutError::ChildIndexOutOfBounds { .. }
            | LayoutError::MeasureContextMissing(_) => Self::InvalidNodeId,
            LayoutError::Style(style_error) => Self::from(style_error),
        }
    }
}

impl<T> From<&Result<T, LayoutError>> for StatusCode {
    #[inline]
    fn from(result: &Result<T, LayoutError>) -> Self {
        result.as_ref().map_or_else(Self::from, |_| Self::Ok)
    }
}
