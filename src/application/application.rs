use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::application::output::{render_layout, render_report};
use crate::input::{InputError, read_transcript};
use crate::report::{ReportError, SizeReport};
use crate::transcript::{ParsedTranscript, TranscriptError};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let output = Self::render(app_config).await?;
        println!("{output}");
        Ok(())
    }

    /// Reads and parses the transcript, then renders everything `run` prints
    pub async fn render(app_config: impl Into<RuntimeConfig>) -> Result<String, ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        let contents = read_transcript(&app_config.input)
            .await
            .context(InputSnafu)?;
        let parsed = ParsedTranscript::try_from(contents.as_str()).context(TranscriptSnafu)?;
        if parsed.summary.unrecognized_lines > 0 {
            warn!(
                "Ignored {} unrecognized transcript lines",
                parsed.summary.unrecognized_lines
            );
        }

        let report = SizeReport::from_tree(&parsed.tree).context(ReportSnafu)?;
        info!(
            "Reconstructed {} directories using {} bytes",
            report.directories().len(),
            report.used_space()
        );

        let mut output = String::new();
        if app_config.print_layout {
            output.push_str(&render_layout(&parsed.tree));
        }
        output.push_str(&render_report(&report, &app_config.thresholds).context(ReportSnafu)?);
        Ok(output)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the transcript"))]
    InputError { source: InputError },
    #[snafu(display("Critical failure encountered while parsing the transcript"))]
    TranscriptError { source: TranscriptError },
    #[snafu(display("Critical failure encountered while computing the size report"))]
    ReportError { source: ReportError },
}
