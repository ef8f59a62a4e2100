//! Error type shared by the grid, generator, solver and renderer.

use thiserror::Error;

/// Failures reported by the maze core.
///
/// Every variant is a local validation or search failure. None of them is fatal to the process and
/// each carries the offending value so that callers can report it precisely.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MazeError {
    /// A position label does not follow the `[A-Z]{1,2}[0-9]{1,2}` grammar.
    #[error("invalid position `{label}`")]
    InvalidPosition {
        /// The rejected label.
        label: String,
    },
    /// A grid size does not follow the `<width>x<height>` grammar.
    #[error("invalid grid size `{text}`")]
    InvalidGridSize {
        /// The rejected text.
        text: String,
    },
    /// A wall, entrance or path position lies outside the grid.
    #[error("position out of range x={x} y={y} for a {width}x{height} grid")]
    OutOfRange {
        /// Column of the offending position.
        x: u16,
        /// Row of the offending position.
        y: u16,
        /// Width of the grid the position was checked against.
        width: u16,
        /// Height of the grid the position was checked against.
        height: u16,
    },
    /// The entrance is not on the outer border of the grid.
    #[error("invalid entrance x={x} y={y}, the entrance must be on the outer border")]
    InvalidEntrance {
        /// Column of the entrance.
        x: u16,
        /// Row of the entrance.
        y: u16,
    },
    /// A grid dimension is zero or too large to be addressed by labels.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidGridDimensions {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// A stored wall bitset is too short for the declared dimensions.
    #[error("wall buffer holds {actual} bytes, at least {expected} are required")]
    InvalidWallBuffer {
        /// Minimum number of bytes for the declared dimensions.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },
    /// Path enumeration did not reach the bottom edge.
    #[error("no solution found")]
    NoSolution,
    /// Completed paths end at more than one bottom-edge cell.
    #[error("multiple exits found: {first} and {second}")]
    MultipleExits {
        /// Exit of the first solution.
        first: String,
        /// First exit that differs from `first`.
        second: String,
    },
    /// The single exit of the maze is not on the bottom row.
    #[error("exit {exit} is not on the bottom edge")]
    ExitNotOnBottomEdge {
        /// Label of the exit.
        exit: String,
    },
    /// The solver exceeded its node-visit budget before finishing the enumeration.
    #[error("search aborted after visiting {visits} cells")]
    SearchAborted {
        /// Number of cells entered before the search gave up.
        visits: u64,
    },
    /// The renderer failed to encode the bitmap.
    #[error("failed to encode maze image")]
    Render(#[from] image::ImageError),
}
