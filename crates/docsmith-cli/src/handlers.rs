//! Subcommand handlers

pub mod cliref;
pub mod generate;

pub use cliref::handle_cliref;
pub use generate::handle_generate;
