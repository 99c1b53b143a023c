//! Loading of the transcript file. The whole file is read before parsing.

mod transcript_file;

pub use transcript_file::{InputError, read_transcript};
