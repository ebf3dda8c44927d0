//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};

/// Market Pulse dashboard
///
/// Fetches a global market briefing and per-region insights, one call at a
/// time, and renders their status.
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh the briefing and every region, then show the dashboard
    Refresh {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Refresh only the global briefing
    Briefing {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Refresh (or retry) a single region
    Region {
        /// Region code, e.g. `germany`
        code: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List configured regions in visit order
    Regions,

    /// Refresh on an interval until interrupted
    Watch {
        /// Seconds between full refreshes (defaults to refresh.watch_interval_secs)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show version
    Version,
}
