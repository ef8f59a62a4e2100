//! Core state of the terminal maze viewer.

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{
    animation::AnimationManager,
    events,
    maze::Maze,
    solver::{Solution, Solver},
    ui,
};

/// Application state container for the maze viewer.
///
/// This structure holds the state ratatui renders from and that key events write to.
#[derive(Debug)]
pub(crate) struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the viewer should exit. It is set to `true` when the user asks
    /// to quit, which ends the main loop, but it starts off `false`.
    pub(crate) exit: bool,
    /// Maze being displayed.
    ///
    /// This field holds the maze loaded from the document given on the command line. Its walls are
    /// drawn on every frame and never change while the viewer runs.
    pub(crate) maze: Maze,
    /// Every solution of the maze, in discovery order.
    ///
    /// This field holds the solver's output for [`maze`](App::maze). It is never empty, since
    /// construction fails for mazes without a solution.
    pub(crate) solutions: Vec<Solution>,
    /// Index of the solution being animated.
    ///
    /// This field points into [`solutions`](App::solutions) and wraps around at both ends when the
    /// user cycles through them.
    pub(crate) selected: usize,
    /// Animation manager for solution playback.
    ///
    /// This field holds the path of the selected solution and how much of it is currently shown.
    pub(crate) animation_manager: AnimationManager,
}

impl App {
    /// Solves `maze` and prepares the animation of its first solution.
    ///
    /// # Errors
    ///
    /// Fails with the solver's error if the maze has no solution or the visit budget runs out.
    pub(crate) fn new(maze: Maze, solver: &Solver) -> Result<Self> {
        let solutions = solver.find_solutions(&maze)?;
        let mut app = Self {
            exit: false,
            maze,
            solutions,
            selected: 0,
            animation_manager: AnimationManager::new(),
        };
        app.select(0);

        Ok(app)
    }

    /// Solution currently selected.
    pub(crate) fn selected_solution(&self) -> Option<&Solution> {
        self.solutions.get(self.selected)
    }

    /// Selects the next solution, wrapping around after the last one.
    pub(crate) fn select_next(&mut self) {
        let next = (self.selected + 1) % self.solutions.len().max(1);
        self.select(next);
    }

    /// Selects the previous solution, wrapping around before the first one.
    pub(crate) fn select_previous(&mut self) {
        let count = self.solutions.len().max(1);
        let previous = (self.selected + count - 1) % count;
        self.select(previous);
    }

    /// Restarts the animation of the selected solution.
    pub(crate) fn restart(&mut self) {
        self.animation_manager.reset();
    }

    /// Selects the solution at `index` and starts animating it.
    fn select(&mut self, index: usize) {
        self.selected = index;
        if let Some(solution) = self.solutions.get(index) {
            self.animation_manager.load(&solution.path);
        }
    }

    /// Runs the main loop of the application until the user quits.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub(crate) fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Position};

    fn create_test_app() -> App {
        let mut grid = Grid::filled(4, 4).expect("4x4 is a valid size");
        for (x, y) in [(1, 0), (1, 1), (2, 1), (1, 2), (2, 2), (1, 3), (2, 3)] {
            grid.set_wall(x, y, false);
        }
        let maze = Maze::new(grid, Position::new(1, 0)).expect("entrance is on the border");
        App::new(maze, &Solver::new()).expect("maze has solutions")
    }

    #[test]
    fn test_new_selects_first_solution() {
        let app = create_test_app();

        assert!(!app.exit);
        assert_eq!(app.selected, 0);
        assert!(app.solutions.len() > 1);
        let first = app.selected_solution().expect("a solution is selected");
        assert_eq!(app.animation_manager.steps, first.path);
    }

    #[test]
    fn test_selection_wraps_around() {
        let mut app = create_test_app();
        let count = app.solutions.len();

        app.select_previous();
        assert_eq!(app.selected, count - 1);

        app.select_next();
        assert_eq!(app.selected, 0);

        app.select_next();
        assert_eq!(app.selected, 1);
        let second = app.solutions.get(1).expect("there is a second solution");
        assert_eq!(app.animation_manager.steps, second.path);
    }

    #[test]
    fn test_restart_hides_path() {
        let mut app = create_test_app();
        app.animation_manager.advance();
        app.animation_manager.advance();

        app.restart();
        assert_eq!(app.animation_manager.current_index, 0);
    }

    #[test]
    fn test_new_without_solution() {
        let grid = Grid::filled(4, 4).expect("4x4 is a valid size");
        let maze = Maze::new(grid, Position::new(1, 0)).expect("entrance is on the border");
        assert!(App::new(maze, &Solver::new()).is_err());
    }
}
