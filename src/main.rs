//! Command line entry point for the mazewalls binary.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazewalls::{cli::Cli, logging};

fn main() -> Result<()> {
    install()?;

    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    cli.run()
}
