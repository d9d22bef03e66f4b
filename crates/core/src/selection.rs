use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::{Coord, Path, Result};

/// An axis-aligned rectangle of cells, inclusive on both ends.
///
/// Well-formed rectangles have `start <= end` on both axes. [`resize`] may
/// invert one; an inverted rectangle contains and enumerates nothing.
///
/// [`resize`]: SelectionRect::resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRect {
    pub start_col: i32,
    pub end_col: i32,
    pub start_row: i32,
    pub end_row: i32,
}

impl SelectionRect {
    /// Create a rectangle from raw bounds (not normalized).
    pub fn new(start_col: i32, end_col: i32, start_row: i32, end_row: i32) -> Self {
        Self {
            start_col,
            end_col,
            start_row,
            end_row,
        }
    }

    /// Create a single-cell rectangle.
    pub fn single(at: Coord) -> Self {
        Self::new(at.col, at.col, at.row, at.row)
    }

    /// Create a rectangle spanning two corners, normalizing so start <= end.
    pub fn from_corners(a: Coord, b: Coord) -> Self {
        Self::new(
            a.col.min(b.col),
            a.col.max(b.col),
            a.row.min(b.row),
            a.row.max(b.row),
        )
    }

    /// Smallest rectangle covering every coordinate, or `None` for no input.
    pub fn bounding(coords: impl IntoIterator<Item = Coord>) -> Option<Self> {
        coords.into_iter().fold(None, |acc, c| {
            Some(match acc {
                None => Self::single(c),
                Some(r) => Self::new(
                    r.start_col.min(c.col),
                    r.end_col.max(c.col),
                    r.start_row.min(c.row),
                    r.end_row.max(c.row),
                ),
            })
        })
    }

    /// The anchor corner (start column, start row).
    pub fn origin(&self) -> Coord {
        Coord::new(self.start_col, self.start_row)
    }

    /// The moving corner (end column, end row).
    pub fn end(&self) -> Coord {
        Coord::new(self.end_col, self.end_row)
    }

    /// True if either axis has `end < start`.
    pub fn is_inverted(&self) -> bool {
        self.end_col < self.start_col || self.end_row < self.start_row
    }

    /// Same cells, with start <= end on both axes.
    pub fn normalized(&self) -> Self {
        Self::from_corners(self.origin(), self.end())
    }

    /// Columns spanned; zero or negative when inverted.
    pub fn width(&self) -> i64 {
        i64::from(self.end_col) - i64::from(self.start_col) + 1
    }

    /// Rows spanned; zero or negative when inverted.
    pub fn height(&self) -> i64 {
        i64::from(self.end_row) - i64::from(self.start_row) + 1
    }

    /// Number of cells enumerated: `max(0, width) * max(0, height)`.
    pub fn cell_count(&self) -> usize {
        let n = self.width().max(0).saturating_mul(self.height().max(0));
        usize::try_from(n).unwrap_or(usize::MAX)
    }

    pub fn is_single(&self) -> bool {
        self.start_col == self.end_col && self.start_row == self.end_row
    }

    /// Check if this rectangle contains a cell.
    pub fn contains(&self, at: Coord) -> bool {
        if at.col < self.start_col || at.col > self.end_col {
            return false;
        }
        if at.row < self.start_row || at.row > self.end_row {
            return false;
        }
        true
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        self.contains(path.coord())
    }

    /// Shift all four bounds; shape and orientation are preserved.
    pub fn translate(&self, d_cols: i32, d_rows: i32) -> Self {
        Self::new(
            self.start_col.saturating_add(d_cols),
            self.end_col.saturating_add(d_cols),
            self.start_row.saturating_add(d_rows),
            self.end_row.saturating_add(d_rows),
        )
    }

    /// Move only the end corner; the start stays anchored.
    ///
    /// No normalization: shrinking past the anchor yields an inverted rectangle.
    pub fn resize(&self, d_cols: i32, d_rows: i32) -> Self {
        Self::new(
            self.start_col,
            self.end_col.saturating_add(d_cols),
            self.start_row,
            self.end_row.saturating_add(d_rows),
        )
    }

    /// Iterate over all cells, column-major (every row of a column before the next column).
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (start_row, end_row) = (self.start_row, self.end_row);
        (self.start_col..=self.end_col)
            .flat_map(move |col| (start_row..=end_row).map(move |row| Coord::new(col, row)))
    }

    /// All cells as paths, column-major. Fails if any cell has no path encoding.
    pub fn paths(&self) -> Result<Vec<Path>> {
        self.coords().map(Coord::to_path).collect()
    }
}

impl fmt::Display for SelectionRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.origin().to_path(), self.end().to_path()) {
            (Ok(start), Ok(end)) => write!(f, "{start}:{end}"),
            _ => write!(f, "{}:{}", self.origin(), self.end()),
        }
    }
}
