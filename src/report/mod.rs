//! Size aggregation over a reconstructed tree.

mod size_report;

pub use size_report::{
    DEFAULT_DISK_SIZE, DEFAULT_REQUIRED_SPACE, DEFAULT_SMALL_LIMIT, DirectorySize,
    ReportError, ReportThresholds, SizeReport,
};
