//! Grid item placement algorithm.
//!
//! Spec: §8 Placing Grid Items
//! <https://www.w3.org/TR/css-grid-2/#placement>

use trellis_geometry::{AbsoluteAxis, Line};
use trellis_style::{GridAutoFlow, GridPlacement, Style};
use trellis_tree::{LayoutTree, NodeId};

use crate::types::{GridArea, TrackCounts};

/// Which step of the placement algorithm filled a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellState {
    /// Free.
    Unoccupied,
    /// Taken by an item with a definite position in both axes.
    DefinitelyPlaced,
    /// Taken by an auto-placed item.
    AutoPlaced,
}

/// Occupancy of every cell of the implicit grid.
///
/// Cells are stored row-major; the matrix grows whenever an area lands
/// outside it.
#[derive(Debug, Clone)]
pub struct CellOccupancy {
    /// Column counts.
    columns: TrackCounts,
    /// Row counts.
    rows: TrackCounts,
    /// Row-major cells.
    cells: Vec<CellState>,
}

impl CellOccupancy {
    /// An empty matrix covering the explicit grid.
    pub fn new(columns: TrackCounts, rows: TrackCounts) -> Self {
        Self {
            columns,
            rows,
            cells: vec![CellState::Unoccupied; columns.len() * rows.len()],
        }
    }

    /// Track counts along `axis`.
    #[inline]
    pub const fn counts(&self, axis: AbsoluteAxis) -> TrackCounts {
        match axis {
            AbsoluteAxis::Horizontal => self.columns,
            AbsoluteAxis::Vertical => self.rows,
        }
    }

    /// Grow the matrix so `area` lies inside it, keeping existing cells in place.
    fn expand_to_fit(&mut self, area: GridArea) {
        let mut columns = self.columns;
        let mut rows = self.rows;
        columns.include(area.column);
        rows.include(area.row);
        if columns == self.columns && rows == self.rows {
            return;
        }

        let mut cells = vec![CellState::Unoccupied; columns.len() * rows.len()];
        let column_shift = usize::from(columns.negative_implicit - self.columns.negative_implicit);
        let row_shift = usize::from(rows.negative_implicit - self.rows.negative_implicit);
        for (row, old_row) in self.cells.chunks(self.columns.len().max(1)).enumerate() {
            let start = (row + row_shift) * columns.len() + column_shift;
            if let Some(target) = cells.get_mut(start..start + old_row.len()) {
                target.copy_from_slice(old_row);
            }
        }
        self.columns = columns;
        self.rows = rows;
        self.cells = cells;
    }

    /// State of the cell at track indexes `(column, row)`.
    #[inline]
    fn cell(&self, column: usize, row: usize) -> CellState {
        self.cells
            .get(row * self.columns.len() + column)
            .copied()
            .unwrap_or(CellState::Unoccupied)
    }

    /// Record `area` as taken.
    fn mark(&mut self, area: GridArea, state: CellState) {
        self.expand_to_fit(area);
        let columns = self.columns.track_range(area.column);
        let rows = self.rows.track_range(area.row);
        let width = self.columns.len();
        for row in rows.start..rows.end {
            if let Some(cells) = self.cells.get_mut(row * width + columns.start..row * width + columns.end) {
                cells.fill(state);
            }
        }
    }

    /// True when no cell of `area` is taken. Cells outside the matrix are free.
    pub fn is_free(&self, area: GridArea) -> bool {
        let clamp_span = |span: Line<i32>, counts: TrackCounts| Line {
            start: span.start.max(counts.implicit_start_line()),
            end: span.end.min(counts.implicit_end_line()),
        };
        let columns = clamp_span(area.column, self.columns);
        let rows = clamp_span(area.row, self.rows);
        if columns.start >= columns.end || rows.start >= rows.end {
            return true;
        }
        let columns = self.columns.track_range(columns);
        let rows = self.rows.track_range(rows);
        (rows.start..rows.end).all(|row| {
            (columns.start..columns.end).all(|column| self.cell(column, row) == CellState::Unoccupied)
        })
    }

    /// The line just past the last auto-placed cell of the track starting at
    /// `line` across `primary_axis`.
    fn last_auto_placed_end(&self, primary_axis: AbsoluteAxis, line: i32) -> Option<i32> {
        let primary = self.counts(primary_axis);
        let secondary = self.counts(primary_axis.other());
        if line < secondary.implicit_start_line() || line >= secondary.implicit_end_line() {
            return None;
        }
        let track = secondary.track_index(line);
        (0..primary.len())
            .rev()
            .find(|&index| {
                let (column, row) = match primary_axis {
                    AbsoluteAxis::Horizontal => (index, track),
                    AbsoluteAxis::Vertical => (track, index),
                };
                self.cell(column, row) == CellState::AutoPlaced
            })
            .map(|index| index as i32 + 1 + primary.implicit_start_line())
    }

    /// True when any item occupies track `index` along `axis`.
    pub fn track_is_occupied(&self, axis: AbsoluteAxis, index: usize) -> bool {
        match axis {
            AbsoluteAxis::Horizontal => {
                (0..self.rows.len()).any(|row| self.cell(index, row) != CellState::Unoccupied)
            }
            AbsoluteAxis::Vertical => {
                (0..self.columns.len()).any(|column| self.cell(column, index) != CellState::Unoccupied)
            }
        }
    }
}

/// An item's placement along one axis once its lines are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisPlacement {
    /// Both lines known.
    Definite(Line<i32>),
    /// To be auto-placed, spanning this many tracks.
    Auto(i32),
}

impl AxisPlacement {
    /// Span length.
    #[inline]
    const fn span(self) -> i32 {
        match self {
            Self::Definite(lines) => lines.end - lines.start,
            Self::Auto(span) => span,
        }
    }

    /// True for [`AxisPlacement::Definite`].
    #[inline]
    const fn is_definite(self) -> bool {
        matches!(self, Self::Definite(_))
    }
}

/// Convert a 1-based (or negative) line number to an origin-zero line.
#[inline]
fn to_origin_zero(line: i16, explicit: u16) -> i32 {
    if line > 0 {
        i32::from(line) - 1
    } else {
        i32::from(explicit) + 1 + i32::from(line)
    }
}

/// Resolve one axis of a placement against the explicit grid.
///
/// Spec: <https://www.w3.org/TR/css-grid-2/#line-placement>
fn resolve_axis(placement: GridPlacement, explicit: u16) -> AxisPlacement {
    let span = i32::from(placement.effective_span());
    match (placement.start_line(), placement.end_line()) {
        (Some(start), Some(end)) => {
            let start = to_origin_zero(start, explicit);
            let end = to_origin_zero(end, explicit);
            AxisPlacement::Definite(match start.cmp(&end) {
                core::cmp::Ordering::Less => Line { start, end },
                core::cmp::Ordering::Equal => Line {
                    start,
                    end: start + 1,
                },
                core::cmp::Ordering::Greater => Line {
                    start: end,
                    end: start,
                },
            })
        }
        (Some(start), None) => {
            let start = to_origin_zero(start, explicit);
            AxisPlacement::Definite(Line {
                start,
                end: start + span,
            })
        }
        (None, Some(end)) => {
            let end = to_origin_zero(end, explicit);
            AxisPlacement::Definite(Line {
                start: end - span,
                end,
            })
        }
        (None, None) => AxisPlacement::Auto(span),
    }
}

/// Origin-zero lines of `placement` when at least one of its lines is set.
pub fn definite_lines(placement: GridPlacement, explicit: u16) -> Option<Line<i32>> {
    match resolve_axis(placement, explicit) {
        AxisPlacement::Definite(lines) => Some(lines),
        AxisPlacement::Auto(_) => None,
    }
}

/// The placement property of `style` along `axis`.
#[inline]
const fn axis_placement(style: &Style, axis: AbsoluteAxis) -> GridPlacement {
    match axis {
        AbsoluteAxis::Horizontal => style.grid_column,
        AbsoluteAxis::Vertical => style.grid_row,
    }
}

/// The axis auto-placement walks along.
#[inline]
pub const fn primary_axis(auto_flow: GridAutoFlow) -> AbsoluteAxis {
    if auto_flow.is_row() {
        AbsoluteAxis::Horizontal
    } else {
        AbsoluteAxis::Vertical
    }
}

/// Lines along one axis for a span starting at `start`.
#[inline]
const fn span_from(start: i32, span: i32) -> Line<i32> {
    Line {
        start,
        end: start + span,
    }
}

/// Place grid items according to the grid placement algorithm.
///
/// `children` are in-flow children in visit order. Returns each child's
/// area, in the same order, along with the final cell occupancy.
///
/// Spec: §8.5 Grid Item Placement Algorithm
/// <https://www.w3.org/TR/css-grid-2/#auto-placement-algo>
pub fn place_grid_items(
    tree: &impl LayoutTree,
    children: &[NodeId],
    explicit_columns: u16,
    explicit_rows: u16,
    auto_flow: GridAutoFlow,
) -> (Vec<GridArea>, CellOccupancy) {
    let primary = primary_axis(auto_flow);
    let secondary = primary.other();
    let explicit = |axis: AbsoluteAxis| match axis {
        AbsoluteAxis::Horizontal => explicit_columns,
        AbsoluteAxis::Vertical => explicit_rows,
    };
    let placements: Vec<(AxisPlacement, AxisPlacement)> = children
        .iter()
        .map(|&child| {
            let style = tree.style(child);
            (
                resolve_axis(axis_placement(style, primary), explicit(primary)),
                resolve_axis(axis_placement(style, secondary), explicit(secondary)),
            )
        })
        .collect();

    let mut occupancy = CellOccupancy::new(
        TrackCounts::from_explicit(explicit_columns),
        TrackCounts::from_explicit(explicit_rows),
    );
    let mut areas: Vec<Option<GridArea>> = vec![None; children.len()];

    // 1. Items with definite positions in both axes.
    for (index, &(along, across)) in placements.iter().enumerate() {
        if let (AxisPlacement::Definite(along), AxisPlacement::Definite(across)) = (along, across) {
            let area = GridArea::from_axes(primary, along, across);
            occupancy.mark(area, CellState::DefinitelyPlaced);
            areas[index] = Some(area);
        }
    }

    // 3. Make room for the widest auto-placed span along the primary axis.
    let widest_auto_span = placements
        .iter()
        .filter(|(along, _)| !along.is_definite())
        .map(|(along, _)| along.span())
        .max()
        .unwrap_or(1);
    let primary_counts = occupancy.counts(primary);
    let primary_start = primary_counts.implicit_start_line();
    if primary_start + widest_auto_span > primary_counts.implicit_end_line() {
        occupancy.expand_to_fit(GridArea::from_axes(
            primary,
            span_from(primary_start, widest_auto_span),
            span_from(occupancy.counts(secondary).implicit_start_line(), 0),
        ));
    }

    // 2. Items locked to a secondary-axis track.
    for (index, &(along, across)) in placements.iter().enumerate() {
        let (AxisPlacement::Auto(span), AxisPlacement::Definite(across)) = (along, across) else {
            continue;
        };
        let grid_start = occupancy.counts(primary).implicit_start_line();
        let mut position = if auto_flow.is_dense() {
            grid_start
        } else {
            occupancy
                .last_auto_placed_end(primary, across.start)
                .unwrap_or(grid_start)
        };
        let area = loop {
            let candidate = GridArea::from_axes(primary, span_from(position, span), across);
            if occupancy.is_free(candidate) {
                break candidate;
            }
            position += 1;
        };
        occupancy.mark(area, CellState::AutoPlaced);
        areas[index] = Some(area);
    }

    // 4. Everything else, with the auto-placement cursor.
    let start = (
        occupancy.counts(primary).implicit_start_line(),
        occupancy.counts(secondary).implicit_start_line(),
    );
    let mut cursor = start;
    for (index, &(along, across)) in placements.iter().enumerate() {
        if across.is_definite() {
            continue;
        }
        let across_span = across.span();
        let (mut primary_position, mut secondary_position) = cursor;

        let area = if let AxisPlacement::Definite(along) = along {
            if auto_flow.is_dense() {
                secondary_position = start.1;
            } else if along.start < primary_position {
                secondary_position += 1;
            }
            loop {
                let candidate = GridArea::from_axes(primary, along, span_from(secondary_position, across_span));
                if occupancy.is_free(candidate) {
                    break candidate;
                }
                secondary_position += 1;
            }
        } else {
            let along_span = along.span();
            loop {
                if primary_position + along_span > occupancy.counts(primary).implicit_end_line() {
                    secondary_position += 1;
                    primary_position = start.0;
                    continue;
                }
                let candidate = GridArea::from_axes(
                    primary,
                    span_from(primary_position, along_span),
                    span_from(secondary_position, across_span),
                );
                if occupancy.is_free(candidate) {
                    break candidate;
                }
                primary_position += 1;
            }
        };

        occupancy.mark(area, CellState::AutoPlaced);
        areas[index] = Some(area);
        cursor = if auto_flow.is_dense() {
            start
        } else {
            (area.get(primary).end, area.get(secondary).start)
        };
    }

    let areas = areas
        .into_iter()
        .map(|area| {
            area.unwrap_or(GridArea {
                column: span_from(0, 1),
                row: span_from(0, 1),
            })
        })
        .collect();
    tracing::debug!(
        "place_grid_items: items={} columns={:?} rows={:?}",
        children.len(),
        occupancy.counts(AbsoluteAxis::Horizontal),
        occupancy.counts(AbsoluteAxis::Vertical)
    );
    (areas, occupancy)
}
