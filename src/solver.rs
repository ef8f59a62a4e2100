//! Exhaustive path enumeration over a maze.
//!
//! The search is a depth-first walk from the entrance that tries neighbors right, down, left, up
//! and never revisits a cell already on the current path. Every path that reaches the bottom row is
//! a solution; the walk does not continue past a bottom-row cell. Solutions are reported in the order
//! the walk discovers them, which makes shortest/longest tie-breaking deterministic.
//!
//! Enumerating every simple path is exponential on mazes with cycles. Generated mazes are trees and
//! stay cheap, but mazes supplied by users should be searched with a visit budget (see
//! [`Solver::with_max_visits`]).

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    error::MazeError,
    grid::{Grid, Position},
    maze::Maze,
};

/// Which solution to pick among those found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Steps {
    /// The first solution with the fewest cells.
    #[default]
    Min,
    /// The first solution with the most cells.
    Max,
}

impl fmt::Display for Steps {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Min => "min",
            Self::Max => "max",
        })
    }
}

/// A path from the entrance to a bottom-edge cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Number of cells on the path, entrance and exit included.
    pub length: usize,
    /// Cells from the entrance to the exit.
    pub path: Vec<Position>,
    /// Last cell of the path.
    pub exit: Position,
}

/// Depth-first path enumerator with an optional node-visit budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Solver {
    /// Maximum number of cells a single search may enter.
    max_visits: Option<u64>,
}

impl Solver {
    /// Creates a solver without a visit budget.
    #[must_use]
    pub const fn new() -> Self {
        Self { max_visits: None }
    }

    /// Aborts searches that enter more than `limit` cells.
    #[must_use]
    pub const fn with_max_visits(mut self, limit: u64) -> Self {
        self.max_visits = Some(limit);
        self
    }

    /// Returns the visit budget, if any.
    #[must_use]
    pub const fn max_visits(&self) -> Option<u64> {
        self.max_visits
    }

    /// Enumerates every simple path from the entrance to the bottom row, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::NoSolution`] if no path reaches the bottom row and
    /// [`MazeError::SearchAborted`] if the visit budget runs out.
    pub fn find_solutions(&self, maze: &Maze) -> Result<Vec<Solution>, MazeError> {
        let mut solutions = Vec::new();
        let visits = enumerate(
            &maze.grid,
            maze.entrance,
            Goal::BottomEdge,
            self.max_visits,
            |path| {
                if let Some(&exit) = path.last() {
                    solutions.push(Solution {
                        length: path.len(),
                        path: path.to_vec(),
                        exit,
                    });
                }
            },
        )?;

        tracing::debug!(visits, solutions = solutions.len(), "enumerated maze paths");

        if solutions.is_empty() {
            return Err(MazeError::NoSolution);
        }
        Ok(solutions)
    }

    /// Finds the shortest or longest solution.
    ///
    /// # Errors
    ///
    /// Same as [`Solver::find_solutions`].
    pub fn solve(&self, maze: &Maze, steps: Steps) -> Result<Solution, MazeError> {
        let solutions = self.find_solutions(maze)?;
        select_extreme(&solutions, steps)
            .cloned()
            .ok_or(MazeError::NoSolution)
    }

    /// Accepts a maze if all of its solutions leave through one bottom-edge cell, which is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::NoSolution`], [`MazeError::MultipleExits`] or
    /// [`MazeError::ExitNotOnBottomEdge`] for rejected mazes, and [`MazeError::SearchAborted`] if
    /// the visit budget runs out.
    pub fn validate(&self, maze: &Maze) -> Result<Position, MazeError> {
        let solutions = self.find_solutions(maze)?;
        check_exits(&solutions, maze.grid.height())
    }
}

/// Returns the first solution with the fewest (`Min`) or most (`Max`) cells.
///
/// Ties go to the solution discovered first.
#[must_use]
pub fn select_extreme(solutions: &[Solution], steps: Steps) -> Option<&Solution> {
    let mut best: Option<&Solution> = None;
    for solution in solutions {
        let replaces = best.map_or(true, |current| match steps {
            Steps::Min => solution.length < current.length,
            Steps::Max => solution.length > current.length,
        });
        if replaces {
            best = Some(solution);
        }
    }
    best
}

/// Checks that a solution list has one shared exit on the bottom row of a grid `height` cells
/// tall.
///
/// # Errors
///
/// Returns [`MazeError::NoSolution`] for an empty list, [`MazeError::MultipleExits`] when two
/// solutions end in different cells and [`MazeError::ExitNotOnBottomEdge`] when the shared exit is
/// above the bottom row.
pub fn check_exits(solutions: &[Solution], height: u16) -> Result<Position, MazeError> {
    let mut exits = solutions.iter().map(|solution| solution.exit);
    let exit = exits.next().ok_or(MazeError::NoSolution)?;

    if let Some(other) = exits.find(|&other| other != exit) {
        return Err(MazeError::MultipleExits {
            first: exit.label(),
            second: other.label(),
        });
    }
    if exit.y + 1 != height {
        return Err(MazeError::ExitNotOnBottomEdge {
            exit: exit.label(),
        });
    }

    Ok(exit)
}

/// Returns the longest maximal path from `start`, the first one found among equals.
///
/// A maximal path ends in a cell with no unvisited open neighbor. The walk does not stop at the
/// bottom row.
#[must_use]
pub fn longest_path(grid: &Grid, start: Position) -> Vec<Position> {
    let mut longest: Vec<Position> = Vec::new();
    let walk = enumerate(grid, start, Goal::DeadEnd, None, |path| {
        if path.len() > longest.len() {
            longest.clear();
            longest.extend_from_slice(path);
        }
    });

    match walk {
        Ok(visits) => tracing::debug!(visits, length = longest.len(), "found longest path"),
        Err(err) => tracing::warn!(%err, "longest path search stopped early"),
    }
    longest
}

/// Where a path is considered complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Goal {
    /// Paths end on the bottom row and are not extended past it.
    BottomEdge,
    /// Paths end where they cannot be extended.
    DeadEnd,
}

/// A cell on the current path together with the next neighbor to try.
struct Frame {
    /// The cell this frame explores.
    cell: Position,
    /// Index into the right, down, left, up neighbor order.
    next: usize,
    /// Whether any neighbor was entered from this cell.
    extended: bool,
}

/// Walks every simple path from `start` with an explicit stack, calling `on_complete` with each
/// completed path, and returns the number of cells entered.
///
/// The visiting order is the same as a recursive walk trying right, down, left, up.
fn enumerate<F>(
    grid: &Grid,
    start: Position,
    goal: Goal,
    max_visits: Option<u64>,
    mut on_complete: F,
) -> Result<u64, MazeError>
where
    F: FnMut(&[Position]),
{
    let width = usize::from(grid.width());
    let index = |cell: Position| usize::from(cell.y) * width + usize::from(cell.x);

    let mut on_path = vec![false; width * usize::from(grid.height())];
    let mut path: Vec<Position> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut visits = 0_u64;
    let mut entering = Some(start);

    loop {
        if let Some(cell) = entering.take() {
            visits += 1;
            if max_visits.is_some_and(|limit| visits > limit) {
                return Err(MazeError::SearchAborted { visits });
            }

            path.push(cell);
            if goal == Goal::BottomEdge && cell.y + 1 == grid.height() {
                on_complete(&path);
                let _ = path.pop();
                continue;
            }

            if let Some(seen) = on_path.get_mut(index(cell)) {
                *seen = true;
            }
            stack.push(Frame {
                cell,
                next: 0,
                extended: false,
            });
            continue;
        }

        let Some(frame) = stack.last_mut() else {
            break;
        };

        if let Some(&neighbor) = grid.neighbors(frame.cell.x, frame.cell.y).get(frame.next) {
            frame.next += 1;
            if let Some((x, y)) = neighbor {
                let candidate = Position::new(x, y);
                let seen = on_path.get(index(candidate)).copied().unwrap_or(true);
                if !seen && !grid.is_wall(x, y) {
                    frame.extended = true;
                    entering = Some(candidate);
                }
            }
            continue;
        }

        if goal == Goal::DeadEnd && !frame.extended {
            on_complete(&path);
        }
        let cell = frame.cell;
        let _ = stack.pop();
        let _ = path.pop();
        if let Some(seen) = on_path.get_mut(index(cell)) {
            *seen = false;
        }
    }

    Ok(visits)
}
