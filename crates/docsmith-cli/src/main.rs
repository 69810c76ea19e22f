//! Docsmith CLI - driver for the schema-to-documentation compiler
//!
//! Entry point wiring: parse arguments, set up color and logging, run the
//! selected handler, print the end-of-run degradation report, and map
//! errors to exit codes.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let use_color = cli.use_color();
    control::set_override(use_color);

    if let Err(e) = logging::init_logging(cli.verbosity_level(), cli.quiet) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(cli, use_color).await {
        Ok(report) => {
            output::print_report(&report, use_color);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", error::format_error(&e, use_color));
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
async fn run(cli: Cli, use_color: bool) -> Result<docsmith_core::RunReport> {
    match cli.command {
        Commands::Generate(args) => {
            let config = Config::load(cli.config.as_deref())?;
            handlers::handle_generate(args, config, use_color).await
        }
        Commands::Cliref(args) => handlers::handle_cliref(args, use_color).await,
    }
}
