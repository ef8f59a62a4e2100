//! User interface rendering for the maze viewer.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{animation, app::App};

/// Renders the maze, the animated solution and the footer.
///
/// # Errors
///
/// This function may return errors if the layout cannot be split as expected.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let overall_layout = Layout::vertical([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());
    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let footer_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get footer area from layout")?;

    let space = centered(
        maze_content_area,
        app.maze.grid.width(),
        app.maze.grid.height(),
    )?;
    maze_canvas(app, frame, space);
    footer(app, frame, footer_area);

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Returns a `width` by `height` area centered in `area`, shrunk to fit if needed.
///
/// # Errors
///
/// This function may return errors if the layout cannot be split as expected.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Result<Rect> {
    let row = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area)
        .first()
        .copied()
        .ok_or_eyre("failed to get maze row from vertical layout")?;

    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(row)
        .first()
        .copied()
        .ok_or_eyre("failed to get maze space from horizontal layout")
}

/// Draws walls in green and the revealed part of the solution in red, one point per cell.
fn maze_canvas(app: &App, frame: &mut Frame, space: Rect) {
    let grid = &app.maze.grid;
    let wall_screen_coords =
        animation::transform_maze_to_screen_coords(&animation::wall_cells(grid), grid);
    let path_screen_coords = animation::transform_maze_to_screen_coords(
        app.animation_manager.current_path(),
        grid,
    );

    let x_bounds = [
        f64::from(-rounded_div::i32(space.width.into(), 2)),
        f64::from(rounded_div::i32(space.width.into(), 2)),
    ];
    let y_bounds = [
        f64::from(-rounded_div::i32(space.height.into(), 2)),
        f64::from(rounded_div::i32(space.height.into(), 2)),
    ];

    let canvas = Canvas::default()
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_screen_coords,
                color: Color::Green,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &path_screen_coords,
                color: Color::Red,
            });
        });

    frame.render_widget(canvas, space);
}

/// Describes the selected solution for the footer.
pub(crate) fn solution_summary(app: &App) -> String {
    app.selected_solution().map_or_else(
        || "no solution".to_owned(),
        |solution| {
            format!(
                "solution {}/{} / length {} / exit {}",
                app.selected + 1,
                app.solutions.len(),
                solution.length,
                solution.exit
            )
        },
    )
}

/// Renders the key bindings and the selected solution's summary below the maze.
fn footer(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .title("(j) next / (k) previous / (h) restart / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let inner = block.inner(area);

    frame.render_widget(block, area);
    frame.render_widget(Line::raw(solution_summary(app)).centered(), inner);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{
        grid::{Grid, Position},
        maze::Maze,
        solver::Solver,
    };

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Creates a viewer over a maze with a single solution of length 5.
    fn create_test_app() -> App {
        let mut grid = Grid::filled(5, 5).expect("5x5 is a valid size");
        for (x, y) in [(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)] {
            grid.set_wall(x, y, false);
        }
        let maze = Maze::new(grid, Position::new(2, 0)).expect("entrance is on the border");
        App::new(maze, &Solver::new()).expect("maze has solutions")
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_draw_viewer() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing the viewer should succeed");
        let text = buffer_text(&terminal);
        assert!(text.contains("(q) quit"), "footer shows the key bindings");
        assert!(
            text.contains("solution 1/1 / length 5 / exit C5"),
            "footer shows the selected solution"
        );
    }

    #[test]
    fn test_draw_with_partial_animation() {
        let mut app = create_test_app();
        app.animation_manager.advance();
        app.animation_manager.advance();
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing a partial path should succeed");
    }

    #[test]
    fn test_draw_in_small_terminal() {
        let app = create_test_app();
        let mut terminal =
            Terminal::new(TestBackend::new(4, 4)).expect("failed to create test terminal");

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing into a tiny terminal should succeed");
    }

    #[test]
    fn test_clear_function() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            clear(frame);
        });

        assert!(result.is_ok(), "clearing screen should succeed");
    }

    #[test]
    fn test_centered_area() {
        let area = centered(Rect::new(0, 0, 20, 10), 6, 4).expect("layout splits");
        assert_eq!(area, Rect::new(7, 3, 6, 4));
    }

    #[test]
    fn test_solution_summary() {
        let mut app = create_test_app();
        assert_eq!(solution_summary(&app), "solution 1/1 / length 5 / exit C5");

        app.solutions.clear();
        assert_eq!(solution_summary(&app), "no solution");
    }
}
