use rustc_hash::FxHashMap;

use ideagrid_core::address::{Coord, Path};
use ideagrid_core::SelectionRect;

use crate::cell::{Cell, Ref};
use crate::validation::{PayloadValidator, SchemaValidator};

/// Sparse grid of cells, anchored at `origin`.
///
/// For a full sheet the origin is `A0`. For a sub-sheet cut out of a larger
/// one it is the top-left corner of the region it came from, which is what
/// lets a sub-sheet be translated onto a new destination.
///
/// Live sheets never hold empty cells: writing one removes the entry.
/// Sub-sheets from [`Sheet::extract_subsheet`] keep empty cells for the holes
/// of their region, so merging them clears those destination cells too.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    origin: Coord,
    cells: FxHashMap<(i32, i32), Cell>,
}

#[inline]
fn key(at: Coord) -> (i32, i32) {
    (at.col, at.row)
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(origin: Coord) -> Self {
        Self {
            origin,
            cells: FxHashMap::default(),
        }
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Number of entries (including the empty placeholders of a sub-sheet).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, at: Coord) -> Option<&Cell> {
        self.cells.get(&key(at))
    }

    pub fn get_path(&self, path: &Path) -> Option<&Cell> {
        self.get(path.coord())
    }

    /// True if the position holds non-empty content.
    pub fn is_occupied(&self, at: Coord) -> bool {
        self.get(at).is_some_and(|c| !c.is_empty())
    }

    /// All entries, sorted column-major so iteration is deterministic.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        let mut entries: Vec<(Coord, &Cell)> = self
            .cells
            .iter()
            .map(|(&(col, row), cell)| (Coord::new(col, row), cell))
            .collect();
        entries.sort_by_key(|(at, _)| *at);
        entries.into_iter()
    }

    /// Smallest rectangle covering every occupied cell.
    pub fn bounds(&self) -> Option<SelectionRect> {
        SelectionRect::bounding(
            self.cells
                .iter()
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(&(col, row), _)| Coord::new(col, row)),
        )
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert or overwrite a cell. An empty cell clears the position.
    pub fn set_cell(&mut self, at: Coord, cell: Cell) {
        if cell.is_empty() {
            self.cells.remove(&key(at));
        } else {
            self.cells.insert(key(at), cell);
        }
    }

    pub fn set_path(&mut self, path: &Path, cell: Cell) {
        self.set_cell(path.coord(), cell);
    }

    /// Remove a cell. Removing an absent cell is a no-op.
    pub fn clear_cell(&mut self, at: Coord) -> Option<Cell> {
        self.cells.remove(&key(at))
    }

    pub fn clear_path(&mut self, path: &Path) -> Option<Cell> {
        self.clear_cell(path.coord())
    }

    /// Remove many cells; returns the positions that actually held something.
    pub fn clear_cells(&mut self, positions: impl IntoIterator<Item = Coord>) -> Vec<Coord> {
        positions
            .into_iter()
            .filter(|&at| self.cells.remove(&key(at)).is_some())
            .collect()
    }

    /// Write every entry of `partial` into this sheet, overwriting what is
    /// there. Empty entries clear their position. Returns the positions whose
    /// contents changed.
    pub fn merge_cells(&mut self, partial: &Sheet) -> Vec<Coord> {
        let mut changed = Vec::new();
        for (at, cell) in partial.iter() {
            let differs = if cell.is_empty() {
                self.cells.remove(&key(at)).is_some()
            } else if self.get(at) == Some(cell) {
                false
            } else {
                self.cells.insert(key(at), cell.clone());
                true
            };
            if differs {
                changed.push(at);
            }
        }
        changed
    }

    // =========================================================================
    // Sub-sheets
    // =========================================================================

    /// Copy the cells inside `rect` into a new sheet anchored at the rect's
    /// start corner. Every position of the rect gets an entry; holes are
    /// empty cells. An inverted rect yields an empty sub-sheet.
    pub fn extract_subsheet(&self, rect: &SelectionRect) -> Sheet {
        let mut sub = Sheet::with_origin(rect.origin());
        sub.cells.reserve(rect.cell_count());
        for at in rect.coords() {
            let cell = self.get(at).cloned().unwrap_or_default();
            sub.cells.insert(key(at), cell);
        }
        sub
    }

    /// Shift the origin and every entry by the same delta.
    pub fn translate(&self, d_cols: i32, d_rows: i32) -> Sheet {
        let cells = self
            .cells
            .iter()
            .map(|(&(col, row), cell)| {
                let at = Coord::new(col, row).offset(d_cols, d_rows);
                (key(at), cell.clone())
            })
            .collect();
        Sheet {
            origin: self.origin.offset(d_cols, d_rows),
            cells,
        }
    }

    /// Copy the block under `source` so its top-left lands on `dest`.
    ///
    /// The source region is left untouched. Returns the destination positions
    /// whose contents changed.
    pub fn transplant(&mut self, source: &SelectionRect, dest: Coord) -> Vec<Coord> {
        let sub = self.extract_subsheet(source);
        let (d_cols, d_rows) = sub.origin().delta_to(dest);
        let moved = sub.translate(d_cols, d_rows);
        self.merge_cells(&moved)
    }

    // =========================================================================
    // References
    // =========================================================================

    /// Look up the cell a reference points at.
    ///
    /// Invalid references are logged and resolve to nothing.
    pub fn resolve_ref(&self, r: &Ref) -> Option<&Cell> {
        if let Err(e) = SchemaValidator.validate_ref(r) {
            log::warn!("ignoring invalid reference {:?} -> {:?}: {}", r.kind, r.path, e);
            return None;
        }
        match r.target() {
            Ok(path) => self.get_path(&path),
            Err(e) => {
                log::warn!("ignoring unresolvable reference {:?}: {}", r.path, e);
                None
            }
        }
    }
}

impl FromIterator<(Coord, Cell)> for Sheet {
    fn from_iter<I: IntoIterator<Item = (Coord, Cell)>>(iter: I) -> Self {
        let mut sheet = Sheet::new();
        for (at, cell) in iter {
            sheet.set_cell(at, cell);
        }
        sheet
    }
}
