//! Cell addressing.
//!
//! A [`Path`] is the human-readable address of a cell (`A0`, `C12`): a run of
//! uppercase letters naming the column followed by a run of digits naming the
//! row. A [`Coord`] is the integer pair the path stands for.
//!
//! Column letters decode by *summing* each letter's offset from `A`, so `AB`
//! and `BA` both name column 1. Encoding only ever produces a single letter,
//! which keeps `decode(encode(col, row)) == (col, row)` for columns `0..=25`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Highest column with a single-letter encoding (`Z`).
pub const MAX_ENCODABLE_COL: i32 = 25;

/// Errors produced when converting between paths and coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The string is not `[A-Z]+[0-9]+` (or its row does not fit in an `i32`).
    #[error("invalid path '{0}': expected uppercase letters followed by digits")]
    InvalidPath(String),

    /// The column has no single-letter encoding.
    #[error("column {0} cannot be encoded (expected 0..={MAX_ENCODABLE_COL})")]
    ColumnOutOfRange(i32),

    /// Rows are written as bare digits, so negative rows cannot be encoded.
    #[error("row {0} cannot be encoded (rows must not be negative)")]
    NegativeRow(i32),
}

pub type Result<T> = std::result::Result<T, AddressError>;

// ============================================================================
// Coordinates
// ============================================================================

/// Integer position on the grid.
///
/// Ordering is column-major (column first, then row), matching the order in
/// which selections enumerate their cells.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coord {
    pub col: i32,
    pub row: i32,
}

impl Coord {
    /// The top-left cell, `A0`.
    pub const ORIGIN: Coord = Coord { col: 0, row: 0 };

    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Shift by a delta. Saturates instead of overflowing.
    #[inline]
    pub fn offset(self, d_col: i32, d_row: i32) -> Self {
        Self {
            col: self.col.saturating_add(d_col),
            row: self.row.saturating_add(d_row),
        }
    }

    /// One step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (d_col, d_row) = direction.delta();
        self.offset(d_col, d_row)
    }

    /// The `(d_col, d_row)` that moves `self` onto `target`.
    pub fn delta_to(self, target: Coord) -> (i32, i32) {
        (
            target.col.saturating_sub(self.col),
            target.row.saturating_sub(self.row),
        )
    }

    /// Encode as a path. Fails outside the single-letter column range.
    pub fn to_path(self) -> Result<Path> {
        Path::encode(self.col, self.row)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((col, row): (i32, i32)) -> Self {
        Self { col, row }
    }
}

// ============================================================================
// Directions
// ============================================================================

/// Unit movement on the grid, in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(d_col, d_row)`: right/down increase, left/up decrease.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

}

// ============================================================================
// Paths
// ============================================================================

/// A validated cell path such as `A0` or `C12`.
///
/// The decoded coordinate is cached, so [`Path::coord`] never re-parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    text: String,
    coord: Coord,
}

impl Path {
    /// `chr('A' + col)` followed by the decimal row.
    pub fn encode(col: i32, row: i32) -> Result<Path> {
        if !(0..=MAX_ENCODABLE_COL).contains(&col) {
            return Err(AddressError::ColumnOutOfRange(col));
        }
        if row < 0 {
            return Err(AddressError::NegativeRow(row));
        }
        let offset = u8::try_from(col).map_err(|_| AddressError::ColumnOutOfRange(col))?;
        let letter = char::from(b'A' + offset);
        Ok(Path {
            text: format!("{letter}{row}"),
            coord: Coord { col, row },
        })
    }

    /// Validate and decode a path string.
    pub fn parse(text: &str) -> Result<Path> {
        let coord = decode(text)?;
        Ok(Path {
            text: text.to_string(),
            coord,
        })
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.coord.col
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.coord.row
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Move one cell in `direction` and re-encode.
    ///
    /// Fails when the result leaves the encodable range, e.g. left of `A0`.
    pub fn step(&self, direction: Direction) -> Result<Path> {
        self.coord.step(direction).to_path()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Path {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Path::parse(&text).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Free functions
// ============================================================================

/// Encode a coordinate pair as a path string.
pub fn encode(col: i32, row: i32) -> Result<Path> {
    Path::encode(col, row)
}

/// Decode a path string into its coordinate.
///
/// The letter run is summed letter by letter (`AB` -> 0 + 1 = 1); the digit
/// run is read as a decimal row. Anything else is `InvalidPath`.
pub fn decode(path: &str) -> Result<Coord> {
    let invalid = || AddressError::InvalidPath(path.to_string());

    let split = path.find(|c: char| c.is_ascii_digit()).ok_or_else(invalid)?;
    let (letters, digits) = path.split_at(split);

    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(invalid());
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let col = letters
        .bytes()
        .try_fold(0i32, |acc, b| acc.checked_add(i32::from(b - b'A')))
        .ok_or_else(invalid)?;
    let row = digits.parse::<i32>().map_err(|_| invalid())?;

    Ok(Coord { col, row })
}

/// Move a path one cell in `direction`.
pub fn translate(path: &Path, direction: Direction) -> Result<Path> {
    path.step(direction)
}

/// The path furthest to the right. Ties keep the earliest path.
pub fn rightmost(paths: &[Path]) -> Option<&Path> {
    paths.iter().fold(None, |best: Option<&Path>, p| match best {
        Some(b) if b.col() >= p.col() => Some(b),
        _ => Some(p),
    })
}
