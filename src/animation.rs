//! Solution animation and coordinate transformation for the terminal viewer.

use std::time::{Duration, Instant};

use crate::grid::{Grid, Position};

/// Animation frame delay in milliseconds.
///
/// This constant controls the time between two revealed cells of the solution path. A lower value
/// reveals the solution faster, while a higher value makes the walk easier to follow.
pub(crate) const ANIMATION_FRAME_DELAY_MS: u64 = 120;

/// Animation state manager for solution playback.
///
/// This structure reveals the selected solution path one cell per frame. Once every cell is shown
/// the animation holds for a frame and starts over from the entrance.
#[derive(Debug)]
pub(crate) struct AnimationManager {
    /// Cells of the path being animated.
    ///
    /// This field holds a copy of the selected solution's path, ordered from the entrance to the
    /// exit. It is replaced whenever another solution is selected.
    pub steps: Vec<Position>,
    /// Number of cells currently revealed.
    ///
    /// This field indexes into [`steps`](AnimationManager::steps): the cells before it are drawn,
    /// the ones after it are still pending.
    pub current_index: usize,
    /// Timestamp of the last animation frame update.
    ///
    /// This field stores the time when a cell was last revealed, used to pace the animation by
    /// [`ANIMATION_FRAME_DELAY_MS`].
    pub last_update_time: Instant,
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationManager {
    /// Creates an animation with nothing to show.
    pub(crate) fn new() -> Self {
        Self {
            steps: Vec::new(),
            current_index: 0,
            last_update_time: Instant::now(),
        }
    }

    /// Replaces the animated path and starts over.
    pub(crate) fn load(&mut self, path: &[Position]) {
        self.steps.clear();
        self.steps.extend_from_slice(path);
        self.reset();
    }

    /// Hides every cell and restarts the timer.
    pub(crate) fn reset(&mut self) {
        self.current_index = 0;
        self.last_update_time = Instant::now();
    }

    /// Cells revealed so far.
    pub(crate) fn current_path(&self) -> &[Position] {
        self.steps
            .get(..self.current_index)
            .unwrap_or(self.steps.as_slice())
    }

    /// Returns whether the whole path is shown.
    pub(crate) fn is_complete(&self) -> bool {
        self.current_index >= self.steps.len()
    }

    /// Updates the animation state based on timing and current progress.
    ///
    /// This method reveals the next cell once a frame delay has elapsed since the previous one. When
    /// the whole path is already visible, the animation starts over from an empty path.
    pub(crate) fn update(&mut self) {
        if self.last_update_time.elapsed() >= Duration::from_millis(ANIMATION_FRAME_DELAY_MS) {
            self.advance();
        }
    }

    /// Moves the animation one frame forward regardless of timing.
    pub(crate) fn advance(&mut self) {
        self.last_update_time = Instant::now();
        if self.is_complete() {
            self.current_index = 0;
        } else {
            self.current_index += 1;
        }
    }
}

/// Transforms grid cells to canvas coordinates centered on the grid.
///
/// Columns map to `x - (width - 1) / 2` and rows to `(height - 1) / 2 - y`, so the top row is drawn
/// at the top of the canvas.
pub(crate) fn transform_maze_to_screen_coords(cells: &[Position], grid: &Grid) -> Vec<(f64, f64)> {
    let rows_n = f64::from(grid.height());
    let cols_n = f64::from(grid.width());

    cells
        .iter()
        .map(|cell| {
            let screen_x = f64::from(cell.x) - (cols_n - 1.) / 2.;
            let screen_y = (rows_n - 1.) / 2. - f64::from(cell.y);
            (screen_x, screen_y)
        })
        .collect()
}

/// Lists every wall cell in row-major order.
pub(crate) fn wall_cells(grid: &Grid) -> Vec<Position> {
    (0..grid.height())
        .flat_map(|y| (0..grid.width()).map(move |x| Position::new(x, y)))
        .filter(|cell| grid.is_wall(cell.x, cell.y))
        .collect()
}
