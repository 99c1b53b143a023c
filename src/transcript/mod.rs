//! Rebuilds a [`FilesystemTree`](crate::filesystem::FilesystemTree) from a
//! transcript of `cd` and `ls` commands and their output.

mod line;
mod parser;

pub use line::TranscriptLine;
pub use parser::{ParseSummary, ParsedTranscript, TranscriptError, TranscriptParser};
