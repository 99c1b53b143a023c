use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::report::{DEFAULT_DISK_SIZE, DEFAULT_REQUIRED_SPACE, DEFAULT_SMALL_LIMIT};

/// Rebuilds a directory tree from a terminal transcript and reports directory sizes
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Transcript of `cd` and `ls` commands together with their output
    #[clap(default_value = "input.txt")]
    pub input: PathBuf,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Print the reconstructed tree before the report
    #[clap(long)]
    pub layout: bool,

    /// Directories up to this size are summed in the report
    #[clap(long, default_value_t = DEFAULT_SMALL_LIMIT)]
    pub small_limit: u64,
    #[clap(long, default_value_t = DEFAULT_DISK_SIZE)]
    pub disk_size: u64,
    /// Free space an update needs
    #[clap(long, default_value_t = DEFAULT_REQUIRED_SPACE)]
    pub required_space: u64,
}
