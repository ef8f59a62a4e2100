//! Command line interface.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr as _};
use rand::{rngs::StdRng, SeedableRng as _};

use crate::{
    app::App,
    file_loader, generator, grid, render,
    solver::{Solver, Steps},
};

/// Bit-packed grid maze generator, exhaustive solver and renderer.
#[derive(Debug, Parser)]
#[command(name = "mazewalls", version, about, long_about = None)]
pub struct Cli {
    /// Log debug events to stderr unless `RUST_LOG` says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Action to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Actions understood by the binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a solvable maze and print or save its document
    Generate(GenerateArgs),
    /// Validate a maze document and print its exit
    Check(SearchArgs),
    /// Print the shortest, longest or every solution as JSON
    Solve(SolveArgs),
    /// Render a maze document to a PNG image
    Draw(DrawArgs),
    /// Watch solutions being walked in the terminal
    View(SearchArgs),
}

/// Options of the `generate` command.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Grid size as WIDTHxHEIGHT
    #[arg(long, default_value = "16x16", value_parser = grid::parse_grid_size)]
    pub size: (u16, u16),

    /// Random seed; a fresh one is drawn when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of mazes to try before giving up
    #[arg(long, default_value_t = 32)]
    pub attempts: u32,

    /// Abort a solver search after entering this many cells
    #[arg(long)]
    pub max_visits: Option<u64>,

    /// Opaque identifier to store in the document
    #[arg(long)]
    pub id: Option<String>,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A maze document and an optional search budget.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Maze document in JSON
    pub file: PathBuf,

    /// Abort a solver search after entering this many cells
    #[arg(long)]
    pub max_visits: Option<u64>,
}

/// Options of the `solve` command.
#[derive(Debug, Args)]
pub struct SolveArgs {
    /// Maze document and search budget
    #[command(flatten)]
    pub search: SearchArgs,

    /// Which solutions to print
    #[arg(long, value_enum, default_value_t)]
    pub steps: Selection,
}

/// Options of the `draw` command.
#[derive(Debug, Args)]
pub struct DrawArgs {
    /// Maze document and search budget
    #[command(flatten)]
    pub search: SearchArgs,

    /// PNG file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Overlay this solution when the document has no path of its own
    #[arg(long, value_enum)]
    pub steps: Option<Steps>,
}

/// Solutions printed by the `solve` command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Selection {
    /// The first shortest solution
    #[default]
    Min,
    /// The first longest solution
    Max,
    /// Every solution in discovery order
    All,
}

impl Selection {
    /// The single solution this selection picks, or `None` for all of them.
    #[must_use]
    pub const fn steps(self) -> Option<Steps> {
        match self {
            Self::Min => Some(Steps::Min),
            Self::Max => Some(Steps::Max),
            Self::All => None,
        }
    }
}

impl SearchArgs {
    /// Builds a solver honoring the visit budget.
    #[must_use]
    pub fn solver(&self) -> Solver {
        solver_with_budget(self.max_visits)
    }
}

impl Cli {
    /// Runs the selected command, printing results on stdout.
    ///
    /// # Errors
    ///
    /// Fails if a file cannot be read or written, a document is invalid or the maze is rejected.
    pub fn run(self) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        self.command.run(&mut stdout)
    }
}

impl Command {
    /// Runs the command, writing its textual output to `out`.
    ///
    /// # Errors
    ///
    /// Fails if a file cannot be read or written, a document is invalid or the maze is rejected.
    pub fn run<W: Write>(self, out: &mut W) -> Result<()> {
        match self {
            Self::Generate(args) => generate(&args, out),
            Self::Check(args) => check(&args, out),
            Self::Solve(args) => solve(&args, out),
            Self::Draw(args) => draw(&args),
            Self::View(args) => view(&args),
        }
    }
}

/// Creates a solver with an optional visit budget.
fn solver_with_budget(max_visits: Option<u64>) -> Solver {
    max_visits.map_or_else(Solver::new, |limit| Solver::new().with_max_visits(limit))
}

/// Generates a maze that passes validation and emits its document.
fn generate<W: Write>(args: &GenerateArgs, out: &mut W) -> Result<()> {
    let (width, height) = args.size;
    let mut rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let solver = solver_with_budget(args.max_visits);

    let mut maze = generator::generate_accepted(width, height, &mut rng, &solver, args.attempts)
        .wrap_err_with(|| {
            format!(
                "no acceptable {} maze in {} attempts",
                grid::format_grid_size(width, height),
                args.attempts
            )
        })?;
    if let Some(id) = &args.id {
        maze = maze.with_id(id.as_str());
    }
    let document = maze.to_document();

    match &args.output {
        Some(path) => {
            file_loader::save_document(path, &document)?;
            tracing::info!(path = %path.display(), entrance = %maze.entrance, "saved maze");
        }
        None => out.write_all(file_loader::render_document(&document)?.as_bytes())?,
    }

    Ok(())
}

/// Validates a maze and prints its exit label.
fn check<W: Write>(args: &SearchArgs, out: &mut W) -> Result<()> {
    let (maze, _) = file_loader::load_maze(&args.file)?;
    let exit = args.solver().validate(&maze)?;

    tracing::info!(%exit, "maze accepted");
    writeln!(out, "{exit}")?;
    Ok(())
}

/// Prints the selected solution, or every solution, as JSON.
fn solve<W: Write>(args: &SolveArgs, out: &mut W) -> Result<()> {
    let (maze, _) = file_loader::load_maze(&args.search.file)?;
    let solver = args.search.solver();

    match args.steps.steps() {
        Some(steps) => serde_json::to_writer_pretty(&mut *out, &solver.solve(&maze, steps)?)?,
        None => serde_json::to_writer_pretty(&mut *out, &solver.find_solutions(&maze)?)?,
    }
    writeln!(out)?;
    Ok(())
}

/// Renders the maze with the document's path, or a solved path, to a PNG file.
fn draw(args: &DrawArgs) -> Result<()> {
    let (maze, document) = file_loader::load_maze(&args.search.file)?;

    let path = if document.path.is_empty() {
        match args.steps {
            Some(steps) => args.search.solver().solve(&maze, steps)?.path,
            None => Vec::new(),
        }
    } else {
        maze.path_from_labels(&document.path)?
    };

    write_image(&args.output, &maze.grid, &path)?;
    tracing::info!(output = %args.output.display(), path = path.len(), "drew maze");
    Ok(())
}

/// Writes a PNG of `grid` with `path` highlighted to the file at `output`.
fn write_image(output: &Path, grid: &grid::Grid, path: &[grid::Position]) -> Result<()> {
    let file = File::create(output)
        .wrap_err_with(|| format!("failed to create image file {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    render::write_png(grid, path, &mut writer)?;
    writer
        .flush()
        .wrap_err_with(|| format!("failed to write image file {}", output.display()))
}

/// Opens the terminal viewer on a maze.
fn view(args: &SearchArgs) -> Result<()> {
    let (maze, _) = file_loader::load_maze(&args.file)?;
    let mut app = App::new(maze, &args.solver())?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
