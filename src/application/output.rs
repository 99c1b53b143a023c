use colored::Colorize;

use crate::filesystem::FilesystemTree;
use crate::report::{ReportError, ReportThresholds, SizeReport};

/// Tree dump with directories highlighted
pub fn render_layout(tree: &FilesystemTree) -> String {
    tree.layout_with(|entry| {
        if entry.is_dir() {
            entry.to_string().blue().bold().to_string()
        } else {
            entry.to_string()
        }
    })
}

pub fn render_report(
    report: &SizeReport,
    thresholds: &ReportThresholds,
) -> Result<String, ReportError> {
    let small_sum = report.sum_at_most(thresholds.small_limit)?;
    let mut lines = vec![
        format!("Used space: {}", report.used_space().to_string().bold()),
        format!(
            "Sum of directories of at most {}: {}",
            thresholds.small_limit,
            small_sum.to_string().green()
        ),
    ];

    match report.smallest_to_free(thresholds.disk_size, thresholds.required_space) {
        Some(dir) => lines.push(format!(
            "Smallest directory to delete: {} ({})",
            dir.path.blue(),
            dir.size.to_string().green()
        )),
        None => lines.push(format!(
            "Smallest directory to delete: {}",
            "none".yellow()
        )),
    }

    Ok(lines.join("\n"))
}
