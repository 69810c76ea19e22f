//! Logging setup for the CLI
//!
//! Structured logging via `tracing`; the level derives from `-v` counts
//! (and the documented `DOCSMITH_VERBOSE` switch), with `RUST_LOG` taking
//! precedence when set.

use crate::error::Result;
use tracing_subscriber::EnvFilter;

/// Map verbosity to a default filter directive
fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber
pub fn init_logging(verbosity: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity, quiet)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_for(0, false), "warn");
        assert_eq!(level_for(1, false), "info");
        assert_eq!(level_for(2, false), "debug");
        assert_eq!(level_for(9, false), "trace");
        assert_eq!(level_for(3, true), "error");
    }
}
