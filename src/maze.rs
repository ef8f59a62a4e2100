//! A grid together with its entrance, and the shapes it is stored and exchanged in.

use serde::{Deserialize, Serialize};

use crate::{
    error::MazeError,
    grid::{self, Grid, Position},
};

/// A wall grid with a breach on its outer border that searches start from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// Opaque identifier assigned by whoever stores the maze.
    pub id: Option<String>,
    /// Entrance cell, always on the outer border.
    pub entrance: Position,
    /// Wall matrix.
    pub grid: Grid,
}

impl Maze {
    /// Pairs a grid with its entrance.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfRange`] if the entrance lies outside the grid and
    /// [`MazeError::InvalidEntrance`] if it is not on the outer border.
    pub fn new(grid: Grid, entrance: Position) -> Result<Self, MazeError> {
        grid.check_range(entrance.x, entrance.y)?;
        if !grid.is_border(entrance.x, entrance.y) {
            return Err(MazeError::InvalidEntrance {
                x: entrance.x,
                y: entrance.y,
            });
        }

        Ok(Self {
            id: None,
            entrance,
            grid,
        })
    }

    /// Attaches an opaque identifier.
    #[must_use]
    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Rebuilds a maze from its stored record.
    ///
    /// # Errors
    ///
    /// Fails on bad dimensions, a short wall buffer, or an entrance off the border.
    pub fn from_record(record: MazeRecord) -> Result<Self, MazeError> {
        let grid = Grid::from_bytes(record.grid_width, record.grid_height, record.walls)?;
        let maze = Self::new(grid, Position::new(record.entrance_x, record.entrance_y))?;
        Ok(Self {
            id: record.id,
            ..maze
        })
    }

    /// Produces the record a storage layer persists.
    #[must_use]
    pub fn to_record(&self) -> MazeRecord {
        MazeRecord {
            id: self.id.clone(),
            entrance_x: self.entrance.x,
            entrance_y: self.entrance.y,
            grid_width: self.grid.width(),
            grid_height: self.grid.height(),
            walls: self.grid.as_bytes().to_vec(),
        }
    }

    /// Builds a maze from a wall-list document.
    ///
    /// # Errors
    ///
    /// Fails with [`MazeError::InvalidPosition`], [`MazeError::InvalidGridSize`],
    /// [`MazeError::InvalidGridDimensions`], [`MazeError::OutOfRange`] or
    /// [`MazeError::InvalidEntrance`] depending on which field is malformed.
    pub fn from_document(document: &MazeDocument) -> Result<Self, MazeError> {
        let entrance = document.entrance.parse::<Position>()?;
        let (width, height) = grid::parse_grid_size(&document.grid_size)?;
        let mut grid = Grid::new(width, height)?;
        grid.apply_walls(&document.walls)?;

        let maze = Self::new(grid, entrance)?;
        Ok(Self {
            id: document.id.clone(),
            ..maze
        })
    }

    /// Describes the maze as a wall-list document without a path.
    #[must_use]
    pub fn to_document(&self) -> MazeDocument {
        MazeDocument {
            id: self.id.clone(),
            entrance: self.entrance.label(),
            grid_size: grid::format_grid_size(self.grid.width(), self.grid.height()),
            walls: self.grid.wall_labels(),
            path: Vec::new(),
        }
    }

    /// Parses a path given as labels, checking that every cell lies inside the grid.
    ///
    /// # Errors
    ///
    /// Fails with [`MazeError::InvalidPosition`] or [`MazeError::OutOfRange`].
    pub fn path_from_labels<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<Position>, MazeError> {
        labels
            .iter()
            .map(|label| {
                let position = label.as_ref().parse::<Position>()?;
                self.grid.check_range(position.x, position.y)?;
                Ok(position)
            })
            .collect()
    }
}

/// Fields a storage layer keeps for a maze.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeRecord {
    /// Opaque identifier, never interpreted here.
    pub id: Option<String>,
    /// Entrance column.
    pub entrance_x: u16,
    /// Entrance row.
    pub entrance_y: u16,
    /// Number of columns.
    pub grid_width: u16,
    /// Number of rows.
    pub grid_height: u16,
    /// Raw wall bitset.
    pub walls: Vec<u8>,
}

/// Human-editable description of a maze, listing walls by label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeDocument {
    /// Opaque identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Entrance label, e.g. `B1`.
    pub entrance: String,
    /// Grid size, e.g. `16x16`.
    pub grid_size: String,
    /// Labels of every wall cell.
    #[serde(default)]
    pub walls: Vec<String>,
    /// Optional path to draw over the maze.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}
