#![deny(missing_docs)]

//! # Cannery CLI
//!
//! Command Line Interface for the OpenAPI mock backend.
//!
//! Supported Commands:
//! - `serve`: answer requests with canned examples from a spec.
//! - `check`: load and build a spec, then print the operation table.

use clap::{Parser, Subcommand};

mod check;
mod error;
mod fetch;
mod serve;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Mock API server driven by OpenAPI examples")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve canned responses for every operation in the spec.
    Serve(serve::ServeArgs),
    /// Load and build the spec without serving it.
    Check(check::CheckArgs),
}

fn main() -> error::CliResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve(args) => serve::execute(args)?,
        Commands::Check(args) => check::execute(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
