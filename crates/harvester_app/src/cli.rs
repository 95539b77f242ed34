use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use engine_logging::LogDestination;

/// Harvest finished Woogles games into a local SQLite database.
#[derive(Debug, Parser)]
#[command(name = "game-harvester", version)]
pub struct Cli {
    /// RON settings file; flags given here take precedence over it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// SQLite database file (default: woogles.db).
    #[arg(long)]
    pub database: Option<PathBuf>,
    /// Account whose game history is harvested.
    #[arg(long)]
    pub username: Option<String>,
    /// Listing offset to start from.
    #[arg(long)]
    pub offset: Option<u64>,
    #[arg(long)]
    pub page_size: Option<u64>,
    /// Pause after each transcript fetch, in milliseconds.
    #[arg(long)]
    pub delay_ms: Option<u64>,
    /// Game metadata service prefix.
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,
    #[arg(long, default_value = "harvester.log")]
    pub log_file: PathBuf,
    /// Also log per-record skip decisions.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}
