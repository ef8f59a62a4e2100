//! Bit-packed wall grid and the label encoding of its cells.
//!
//! Cells are addressed row-major: the wall bit of `(x, y)` is bit `(y * width + x) % 8` of byte
//! `(y * width + x) / 8`. A set bit is a wall, a cleared bit is a passage.
//!
//! Cells are named by labels made of one or two uppercase letters for the column followed by the
//! one-based row, e.g. `A1` for `(0, 0)` and `AA12` for `(26, 11)`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::MazeError;

/// Largest column index that can be written as a label (`ZZ`).
pub const MAX_COLUMN: u16 = 76;

/// Largest row index that can be written as a label (`99`).
pub const MAX_ROW: u16 = 98;

/// Number of letters in the alphabet used for column labels.
const LETTERS: u16 = 26;

/// A cell coordinate that can be written as, and parsed from, a label.
///
/// Positions serialize as their label, so a path serializes as `["A1", "B1", ...]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    /// Zero-based column.
    pub x: u16,
    /// Zero-based row.
    pub y: u16,
}

impl Position {
    /// Creates a position from its coordinates.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Returns the label naming this position.
    #[must_use]
    pub fn label(self) -> String {
        to_label(self.x, self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&to_label(self.x, self.y))
    }
}

impl FromStr for Position {
    type Err = MazeError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let (x, y) = parse_label(label)?;
        Ok(Self { x, y })
    }
}

impl TryFrom<String> for Position {
    type Error = MazeError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.label()
    }
}

/// Converts a coordinate pair to its label.
///
/// Columns below 26 use a single letter. Wider columns use two letters whose values, with the
/// second one offset by 26, add up to the column; this is the inverse of [`parse_label`]. Columns
/// past [`MAX_COLUMN`] saturate at `ZZ`.
#[must_use]
pub fn to_label(x: u16, y: u16) -> String {
    let mut label = String::with_capacity(4);
    if x < LETTERS {
        label.push(letter(x));
    } else {
        let rest = (x - LETTERS).min(2 * (LETTERS - 1));
        let first = rest.saturating_sub(LETTERS - 1);
        label.push(letter(first));
        label.push(letter(rest - first));
    }
    label.push_str(&(u32::from(y) + 1).to_string());
    label
}

/// Returns the uppercase letter for a value in `0..26`.
fn letter(value: u16) -> char {
    char::from_u32(u32::from('A') + u32::from(value.min(LETTERS - 1))).unwrap_or('Z')
}

/// Parses a label of the form `[A-Z]{1,2}[0-9]{1,2}` into a coordinate pair.
///
/// The column is the sum, over every letter at index `i`, of the letter value plus `i * 26`. The row
/// is the numeric suffix minus one.
///
/// # Errors
///
/// Returns [`MazeError::InvalidPosition`] if the label does not follow the grammar or if its row is
/// `0`.
pub fn parse_label(label: &str) -> Result<(u16, u16), MazeError> {
    let invalid = || MazeError::InvalidPosition {
        label: label.to_owned(),
    };

    let split = label
        .find(|ch: char| !ch.is_ascii_uppercase())
        .ok_or_else(invalid)?;
    let (letters, digits) = label.split_at(split);
    if !(1..=2).contains(&letters.len())
        || !(1..=2).contains(&digits.len())
        || !digits.bytes().all(|byte| byte.is_ascii_digit())
    {
        return Err(invalid());
    }

    let mut column = 0;
    for (idx, byte) in (0_u16..).zip(letters.bytes()) {
        column += u16::from(byte - b'A') + idx * LETTERS;
    }

    digits
        .parse::<u16>()
        .ok()
        .and_then(|row| row.checked_sub(1))
        .map(|row| (column, row))
        .ok_or_else(invalid)
}

/// Parses a grid size of the form `<width>x<height>`.
///
/// # Errors
///
/// Returns [`MazeError::InvalidGridSize`] if the text does not follow the grammar or if either side
/// does not fit in a `u16`.
pub fn parse_grid_size(text: &str) -> Result<(u16, u16), MazeError> {
    let side = |value: &str| {
        if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        value.parse::<u16>().ok()
    };

    text.split_once('x')
        .and_then(|(width, height)| Some((side(width)?, side(height)?)))
        .ok_or_else(|| MazeError::InvalidGridSize {
            text: text.to_owned(),
        })
}

/// Formats a grid size as `<width>x<height>`.
#[must_use]
pub fn format_grid_size(width: u16, height: u16) -> String {
    format!("{width}x{height}")
}

/// Rectangular wall matrix stored as a bitset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: u16,
    /// Number of rows.
    height: u16,
    /// Wall bits, row-major, least significant bit first within each byte.
    walls: Vec<u8>,
}

impl Grid {
    /// Creates a grid with every cell open.
    ///
    /// Dimensions are capped at `MAX_COLUMN + 1` columns and `MAX_ROW + 1` rows because labels
    /// (`A`..`ZZ` for columns, two digits for rows) cannot name cells past those bounds, and every
    /// wall must be expressible in a wall-list document.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidGridDimensions`] if a dimension is zero or if the grid has cells
    /// that cannot be named by a label.
    pub fn new(width: u16, height: u16) -> Result<Self, MazeError> {
        let len = Self::byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            walls: vec![0; len],
        })
    }

    /// Creates a grid with every cell walled.
    ///
    /// # Errors
    ///
    /// Same as [`Grid::new`].
    pub fn filled(width: u16, height: u16) -> Result<Self, MazeError> {
        let mut grid = Self::new(width, height)?;
        grid.walls.fill(u8::MAX);
        Ok(grid)
    }

    /// Wraps a stored wall bitset.
    ///
    /// Buffers longer than needed are kept as they are, which preserves the padding byte older
    /// records carry.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidGridDimensions`] for bad dimensions and
    /// [`MazeError::InvalidWallBuffer`] if the buffer cannot hold a bit per cell.
    pub fn from_bytes(width: u16, height: u16, walls: Vec<u8>) -> Result<Self, MazeError> {
        let expected = Self::byte_len(width, height)?;
        if walls.len() < expected {
            return Err(MazeError::InvalidWallBuffer {
                expected,
                actual: walls.len(),
            });
        }

        Ok(Self {
            width,
            height,
            walls,
        })
    }

    /// Returns the number of bytes needed to hold one bit per cell.
    fn byte_len(width: u16, height: u16) -> Result<usize, MazeError> {
        if width == 0 || height == 0 || width > MAX_COLUMN + 1 || height > MAX_ROW + 1 {
            return Err(MazeError::InvalidGridDimensions { width, height });
        }

        Ok((usize::from(width) * usize::from(height)).div_ceil(8))
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Raw wall bitset.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.walls
    }

    /// Returns whether `(x, y)` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Returns whether `(x, y)` lies on the outer border.
    #[must_use]
    pub const fn is_border(&self, x: u16, y: u16) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Splits the bit index of `(x, y)` into a byte offset and a mask.
    fn address(&self, x: u16, y: u16) -> (usize, u8) {
        debug_assert!(
            self.contains(x, y),
            "({x}, {y}) is outside a {}x{} grid",
            self.width,
            self.height
        );
        let index = usize::from(y) * usize::from(self.width) + usize::from(x);
        (index / 8, 1 << (index % 8))
    }

    /// Sets or clears the wall bit of `(x, y)`.
    ///
    /// The coordinates must lie inside the grid.
    pub fn set_wall(&mut self, x: u16, y: u16, is_wall: bool) {
        let (byte, mask) = self.address(x, y);
        if let Some(bits) = self.walls.get_mut(byte) {
            if is_wall {
                *bits |= mask;
            } else {
                *bits &= !mask;
            }
        }
    }

    /// Returns whether `(x, y)` is a wall.
    ///
    /// The coordinates must lie inside the grid.
    #[must_use]
    pub fn is_wall(&self, x: u16, y: u16) -> bool {
        let (byte, mask) = self.address(x, y);
        self.walls.get(byte).map_or(true, |bits| bits & mask != 0)
    }

    /// Counts the open orthogonal neighbors of an interior cell.
    #[must_use]
    pub fn open_neighbors(&self, x: u16, y: u16) -> usize {
        self.neighbors(x, y)
            .into_iter()
            .flatten()
            .filter(|&(nx, ny)| !self.is_wall(nx, ny))
            .count()
    }

    /// Returns the in-range neighbors of `(x, y)` in right, down, left, up order.
    #[must_use]
    pub fn neighbors(&self, x: u16, y: u16) -> [Option<(u16, u16)>; 4] {
        [
            (x + 1 < self.width).then_some((x + 1, y)),
            (y + 1 < self.height).then_some((x, y + 1)),
            x.checked_sub(1).map(|left| (left, y)),
            y.checked_sub(1).map(|up| (x, up)),
        ]
    }

    /// Marks every labelled cell as a wall.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidPosition`] for a malformed label and [`MazeError::OutOfRange`]
    /// for a label outside the grid. Walls applied before the failing label stay applied.
    pub fn apply_walls<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<(), MazeError> {
        for label in labels {
            let (x, y) = parse_label(label.as_ref())?;
            self.check_range(x, y)?;
            self.set_wall(x, y, true);
        }

        Ok(())
    }

    /// Fails with [`MazeError::OutOfRange`] if `(x, y)` lies outside the grid.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn check_range(&self, x: u16, y: u16) -> Result<(), MazeError> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(MazeError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Lists the label of every wall, column by column.
    #[must_use]
    pub fn wall_labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                if self.is_wall(x, y) {
                    labels.push(to_label(x, y));
                }
            }
        }
        labels
    }
}
