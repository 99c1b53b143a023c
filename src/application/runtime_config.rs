use std::path::PathBuf;

use crate::cli::Cli;
use crate::report::ReportThresholds;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    pub print_layout: bool,
    pub thresholds: ReportThresholds,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            print_layout: cli.layout,
            thresholds: ReportThresholds {
                small_limit: cli.small_limit,
                disk_size: cli.disk_size,
                required_space: cli.required_space,
            },
        }
    }
}
