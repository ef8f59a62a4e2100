//! Randomized maze generation.
//!
//! Generation starts from a fully walled grid, opens an entrance on the top edge and carves
//! passages below it with a randomized backtracker. A cell is only carved while it has at most one
//! open neighbor, so passages never merge and the carved cells form a tree. The exit is then placed
//! next to the far end of the longest path from the entrance.

use rand::{seq::SliceRandom as _, Rng};

use crate::{
    error::MazeError,
    grid::{Grid, Position},
    maze::Maze,
    solver::{self, Solver},
};

/// Generates a maze of the given size.
///
/// Grids narrower or shorter than three cells have no interior to carve: the result only has its
/// entrance breach and no exit, which the solver rejects downstream.
///
/// # Errors
///
/// Returns [`MazeError::InvalidGridDimensions`] for sizes a [`Grid`] cannot hold.
pub fn generate<R: Rng + ?Sized>(width: u16, height: u16, rng: &mut R) -> Result<Maze, MazeError> {
    let mut grid = Grid::filled(width, height)?;

    let entrance_x = if width >= 3 {
        rng.gen_range(1..=width - 2)
    } else {
        width / 2
    };
    let entrance = Position::new(entrance_x, 0);
    grid.set_wall(entrance.x, entrance.y, false);

    carve(&mut grid, Position::new(entrance_x, 1), rng);
    let exit = place_exit(&mut grid, entrance);

    tracing::debug!(
        width,
        height,
        %entrance,
        exit = ?exit,
        "generated maze"
    );

    Maze::new(grid, entrance)
}

/// Generates mazes until one passes [`Solver::validate`], trying at most `attempts` times.
///
/// # Errors
///
/// Returns the rejection of the last attempt if none is accepted, or
/// [`MazeError::InvalidGridDimensions`] for sizes a [`Grid`] cannot hold.
pub fn generate_accepted<R: Rng + ?Sized>(
    width: u16,
    height: u16,
    rng: &mut R,
    solver: &Solver,
    attempts: u32,
) -> Result<Maze, MazeError> {
    let mut rejection = MazeError::NoSolution;
    for attempt in 1..=attempts.max(1) {
        let maze = generate(width, height, rng)?;
        match solver.validate(&maze) {
            Ok(exit) => {
                tracing::debug!(attempt, %exit, "generated maze accepted");
                return Ok(maze);
            }
            Err(err) => {
                tracing::debug!(attempt, %err, "generated maze rejected");
                rejection = err;
            }
        }
    }

    Err(rejection)
}

/// Returns whether `cell` may be opened without joining two passages.
fn can_carve(grid: &Grid, cell: Position) -> bool {
    grid.contains(cell.x, cell.y)
        && !grid.is_border(cell.x, cell.y)
        && grid.is_wall(cell.x, cell.y)
        && grid.open_neighbors(cell.x, cell.y) <= 1
}

/// A carved cell and its neighbors in the order they will be tried.
struct Branches {
    /// Neighbors of the carved cell, shuffled.
    cells: [Position; 4],
    /// Index of the next neighbor to try.
    next: usize,
}

/// Opens an interior cell and shuffles the order its neighbors are tried in.
fn open<R: Rng + ?Sized>(grid: &mut Grid, cell: Position, rng: &mut R) -> Branches {
    grid.set_wall(cell.x, cell.y, false);

    let mut cells = [
        Position::new(cell.x + 1, cell.y),
        Position::new(cell.x - 1, cell.y),
        Position::new(cell.x, cell.y + 1),
        Position::new(cell.x, cell.y - 1),
    ];
    cells.shuffle(rng);

    Branches { cells, next: 0 }
}

/// Carves passages from `start` with an explicit stack.
///
/// A neighbor is checked when it is reached rather than when its parent is carved, exactly as a
/// recursive backtracker would.
fn carve<R: Rng + ?Sized>(grid: &mut Grid, start: Position, rng: &mut R) {
    if !can_carve(grid, start) {
        return;
    }

    let mut stack = vec![open(grid, start, rng)];
    while let Some(branches) = stack.last_mut() {
        let next = branches.cells.get(branches.next).copied();
        branches.next += 1;
        match next {
            Some(cell) if can_carve(grid, cell) => {
                let child = open(grid, cell, rng);
                stack.push(child);
            }
            Some(_) => {}
            None => {
                let _ = stack.pop();
            }
        }
    }
}

/// Opens the exit and returns it.
///
/// The longest path from the entrance is walked back from its far end. The first interior cell
/// next to the border gets the border cell beside it opened, checking the left, top, right and
/// bottom sides in that order and never reusing the entrance.
fn place_exit(grid: &mut Grid, entrance: Position) -> Option<Position> {
    let width = grid.width();
    let height = grid.height();
    let path = solver::longest_path(grid, entrance);

    let exit = path
        .iter()
        .rev()
        .filter(|cell| !grid.is_border(cell.x, cell.y))
        .find_map(|cell| {
            [
                (cell.x == 1).then_some(Position::new(0, cell.y)),
                (cell.y == 1).then_some(Position::new(cell.x, 0)),
                (cell.x + 2 == width).then_some(Position::new(width - 1, cell.y)),
                (cell.y + 2 == height).then_some(Position::new(cell.x, height - 1)),
            ]
            .into_iter()
            .flatten()
            .find(|&breach| breach != entrance)
        })?;

    grid.set_wall(exit.x, exit.y, false);
    Some(exit)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;

    fn border_breaches(maze: &Maze) -> Vec<Position> {
        let grid = &maze.grid;
        let mut breaches = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.is_border(x, y) && !grid.is_wall(x, y) {
                    breaches.push(Position::new(x, y));
                }
            }
        }
        breaches
    }

    fn reachable(maze: &Maze, target: Position) -> bool {
        let grid = &maze.grid;
        let mut seen = vec![false; usize::from(grid.width()) * usize::from(grid.height())];
        let mut queue = VecDeque::from([maze.entrance]);
        while let Some(cell) = queue.pop_front() {
            if cell == target {
                return true;
            }
            let index = usize::from(cell.y) * usize::from(grid.width()) + usize::from(cell.x);
            if seen.get(index).copied().unwrap_or(true) {
                continue;
            }
            if let Some(flag) = seen.get_mut(index) {
                *flag = true;
            }
            for (x, y) in grid.neighbors(cell.x, cell.y).into_iter().flatten() {
                if !grid.is_wall(x, y) {
                    queue.push_back(Position::new(x, y));
                }
            }
        }
        false
    }

    #[test]
    fn test_generation_is_reproducible() {
        let first = generate(16, 16, &mut StdRng::seed_from_u64(7)).expect("16x16 is valid");
        let second = generate(16, 16, &mut StdRng::seed_from_u64(7)).expect("16x16 is valid");
        assert_eq!(first, second);
    }

    #[test]
    fn test_entrance_is_on_top_edge_away_from_corners() {
        for seed in 0..32 {
            let maze = generate(9, 7, &mut StdRng::seed_from_u64(seed)).expect("9x7 is valid");
            assert_eq!(maze.entrance.y, 0);
            assert!((1..=7).contains(&maze.entrance.x), "seed {seed}");
            assert!(!maze.grid.is_wall(maze.entrance.x, 0));
        }
    }

    #[test]
    fn test_generated_mazes_have_one_connected_exit() {
        for (width, height) in [(3, 3), (3, 8), (8, 3), (4, 4), (12, 9), (20, 20)] {
            for seed in 0..24 {
                let maze = generate(width, height, &mut StdRng::seed_from_u64(seed))
                    .expect("size is valid");
                let breaches = border_breaches(&maze);
                assert_eq!(
                    breaches.len(),
                    2,
                    "{width}x{height} seed {seed} has breaches {breaches:?}"
                );
                assert!(breaches.contains(&maze.entrance), "{width}x{height} seed {seed}");

                let exit = breaches
                    .iter()
                    .copied()
                    .find(|&cell| cell != maze.entrance)
                    .expect("one breach is not the entrance");
                assert!(
                    reachable(&maze, exit),
                    "{width}x{height} seed {seed} exit {exit} is unreachable"
                );
            }
        }
    }

    #[test]
    fn test_carved_passages_form_a_tree() {
        let maze = generate(15, 11, &mut StdRng::seed_from_u64(3)).expect("15x11 is valid");
        let grid = &maze.grid;

        let mut open_cells = 0_usize;
        let mut adjacencies = 0_usize;
        for y in 1..grid.height() - 1 {
            for x in 1..grid.width() - 1 {
                if grid.is_wall(x, y) {
                    continue;
                }
                open_cells += 1;
                for (nx, ny) in [(x + 1, y), (x, y + 1)] {
                    if !grid.is_border(nx, ny) && !grid.is_wall(nx, ny) {
                        adjacencies += 1;
                    }
                }
            }
        }
        assert!(open_cells > 1);
        assert_eq!(adjacencies, open_cells - 1);
    }

    #[test]
    fn test_degenerate_sizes_only_open_the_entrance() {
        for (width, height) in [(1, 1), (2, 2), (1, 5), (5, 2), (2, 6)] {
            let maze = generate(width, height, &mut StdRng::seed_from_u64(1))
                .expect("small sizes are not an error");
            assert_eq!(border_breaches(&maze), vec![maze.entrance]);
            if width < 3 {
                assert_eq!(maze.entrance, Position::new(width / 2, 0));
            }
        }
    }

    #[test]
    fn test_degenerate_maze_is_rejected_by_solver() {
        let maze = generate(5, 2, &mut StdRng::seed_from_u64(1)).expect("5x2 is not an error");
        assert!(matches!(
            Solver::new().validate(&maze),
            Err(MazeError::NoSolution)
        ));
    }

    #[test]
    fn test_generate_rejects_invalid_dimensions() {
        assert!(matches!(
            generate(0, 10, &mut StdRng::seed_from_u64(1)),
            Err(MazeError::InvalidGridDimensions { .. })
        ));
    }

    #[test]
    fn test_generate_accepted_has_solution() {
        let solver = Solver::new();
        for seed in 0..4 {
            let maze = generate_accepted(10, 10, &mut StdRng::seed_from_u64(seed), &solver, 500)
                .expect("an acceptable maze is found");

            let solutions = solver.find_solutions(&maze).expect("accepted maze is solvable");
            assert_eq!(solutions.len(), 1);
            let exit = solver.validate(&maze).expect("accepted maze is valid");
            assert_eq!(exit.y, 9);
            assert_eq!(border_breaches(&maze).len(), 2);
        }
    }

    #[test]
    fn test_generate_accepted_reports_last_rejection() {
        let result = generate_accepted(4, 2, &mut StdRng::seed_from_u64(1), &Solver::new(), 3);
        assert!(matches!(result, Err(MazeError::NoSolution)));
    }
}
