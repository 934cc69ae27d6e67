//! CSS Grid Layout Module Level 2
//! Spec: <https://www.w3.org/TR/css-grid-2/>
//!
//! Two-dimensional layout: children are placed into rows and columns whose
//! sizes come from the track definitions and the content placed in them.

// Track and item types
mod types;
pub use types::{GridArea, TrackCounts};

// Explicit grid and track initialization
mod explicit;

// Grid placement algorithm
mod placement;

// Track sizing algorithm
mod track_sizing;

// Track and item alignment
mod alignment;

// Grid layout algorithm
mod layout;
pub use layout::compute_grid_layout;

#[cfg(test)]
mod tests;
