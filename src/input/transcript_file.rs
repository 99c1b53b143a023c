use std::path::Path;
use std::string::FromUtf8Error;

use compio::fs;
use snafu::prelude::*;
use tracing::debug;

use crate::ext::BestEffortPathExt;

/// Reads the whole transcript at `path` as UTF-8 text
pub async fn read_transcript(path: &Path) -> Result<String, InputError> {
    debug!("Reading transcript: {}", path.best_effort_path_display());
    let bytes = fs::read(path).await.context(ReadSnafu {
        file_path: path.best_effort_path_display(),
    })?;
    debug!("Successfully read transcript: {} bytes", bytes.len());

    String::from_utf8(bytes).context(EncodingSnafu {
        file_path: path.best_effort_path_display(),
    })
}

#[derive(Debug, Snafu)]
pub enum InputError {
    #[snafu(display("Failed to read the transcript file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Transcript file is not valid UTF-8: {}", file_path))]
    EncodingError {
        file_path: String,
        source: FromUtf8Error,
    },
}
