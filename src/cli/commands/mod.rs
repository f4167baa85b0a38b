//! Command implementations for the ISD locator CLI
//!
//! This module contains the main command execution logic, progress reporting,
//! and error handling for the CLI interface. Each command is implemented in
//! its own module.

pub mod fetch;
pub mod search;
pub mod shared;

// Re-export the summary type used by every command
pub use shared::CommandStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the ISD locator
///
/// This function dispatches to the appropriate subcommand handler based on
/// CLI args:
/// - `search`: registry query with filtering, ranking and report output
/// - `fetch`: registry download and cache refresh
pub async fn run(args: Args) -> Result<CommandStats> {
    match args.get_command() {
        Commands::Search(search_args) => search::run_search(search_args).await,
        Commands::Fetch(fetch_args) => fetch::run_fetch(fetch_args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_stats_re_export() {
        // Verify that CommandStats is properly re-exported
        let stats = CommandStats::default();
        assert_eq!(stats.stations_loaded, 0);
        assert_eq!(stats.stations_reported, 0);
    }
}
