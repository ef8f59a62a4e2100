//! Bit-packed grid mazes: generation, exhaustive solving and rendering.
//!
//! A [`Grid`] stores one wall bit per cell and addresses cells either by coordinates or by
//! spreadsheet-style labels such as `B3`. A [`Maze`] pairs a grid with an entrance on its border.
//! The [`generator`] carves random tree-shaped mazes, the [`Solver`] enumerates every simple path
//! from the entrance to the bottom row, and [`render`] paints a maze and a path as a PNG image.
//!
//! The binary wraps these in a command line interface ([`cli`]) with a terminal viewer that
//! animates solutions.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod animation;
mod app;
pub mod cli;
pub mod error;
mod events;
mod file_loader;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod maze;
pub mod render;
pub mod solver;
mod ui;

pub use error::MazeError;
pub use grid::{Grid, Position};
pub use maze::{Maze, MazeDocument, MazeRecord};
pub use solver::{Solution, Solver, Steps};
