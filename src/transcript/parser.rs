use std::num::ParseIntError;

use snafu::{OptionExt, ResultExt, Snafu};
use tracing::{debug, info};

use crate::filesystem::{Entry, EntryId, FilesystemTree};

use super::TranscriptLine;

/// Counters describing what a parse did with its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseSummary {
    pub lines: usize,
    pub entries_added: usize,
    /// Lines that matched no rule for the mode they appeared in
    pub unrecognized_lines: usize,
}

/// Result of a successful parse: the tree plus where the cursor ended up
#[derive(Debug, Clone)]
pub struct ParsedTranscript {
    pub tree: FilesystemTree,
    pub cursor: EntryId,
    pub summary: ParseSummary,
}

/// Single forward pass over a transcript, holding the cursor and the listing
/// mode as explicit state.
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    tree: FilesystemTree,
    cursor: EntryId,
    listing: bool,
    summary: ParseSummary,
}

impl TranscriptParser {
    pub fn new() -> Self {
        let tree = FilesystemTree::new();
        let cursor = tree.root();
        Self {
            tree,
            cursor,
            listing: false,
            summary: ParseSummary::default(),
        }
    }

    /// Parses every line in order and stops at the first error
    pub fn parse<'a>(
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<ParsedTranscript, TranscriptError> {
        let mut parser = Self::new();
        for (index, line) in lines.into_iter().enumerate() {
            parser.feed(index + 1, line)?;
        }

        let parsed = parser.finish();
        info!(
            "Parsed {} lines into {} entries ({} unrecognized)",
            parsed.summary.lines, parsed.summary.entries_added, parsed.summary.unrecognized_lines
        );
        Ok(parsed)
    }

    pub fn cursor(&self) -> EntryId {
        self.cursor
    }

    pub fn is_listing(&self) -> bool {
        self.listing
    }

    pub fn tree(&self) -> &FilesystemTree {
        &self.tree
    }

    /// Processes a single line. `line_number` is only used for logs and errors.
    pub fn feed(&mut self, line_number: usize, line: &str) -> Result<(), TranscriptError> {
        debug!("Line number: {line_number}");
        self.summary.lines += 1;

        let parsed = TranscriptLine::classify(line);
        if parsed == TranscriptLine::Empty {
            return Ok(());
        }

        if self.listing && TranscriptLine::is_command(line) {
            debug!("Leaving listing mode at line {line_number}");
            self.listing = false;
        }

        if self.listing {
            self.add_listed_entry(line_number, parsed)?;
            return Ok(());
        }

        match parsed {
            TranscriptLine::List => {
                self.listing = true;
            }
            TranscriptLine::ChangeToRoot => {
                debug!("Changing directory to root");
                self.cursor = self.tree.root();
            }
            TranscriptLine::ChangeToParent => {
                self.cursor = self
                    .tree
                    .parent(self.cursor)
                    .context(AscentPastRootSnafu { line_number })?;
                debug!(
                    "Changing directory up one level ({})",
                    self.tree[self.cursor].name()
                );
            }
            TranscriptLine::ChangeTo(name) => {
                self.cursor = self
                    .tree
                    .child(self.cursor, name)
                    .filter(|id| self.tree[*id].is_dir())
                    .context(UnknownDirectorySnafu { line_number, name })?;
                debug!("Changing directory to {name}");
            }
            other if other.is_listing_output() => {
                debug!("Listing output outside of listing mode at line {line_number}");
                self.summary.unrecognized_lines += 1;
            }
            _ => self.ignore(line_number, line),
        }

        Ok(())
    }

    pub fn finish(self) -> ParsedTranscript {
        ParsedTranscript {
            tree: self.tree,
            cursor: self.cursor,
            summary: self.summary,
        }
    }

    fn add_listed_entry(
        &mut self,
        line_number: usize,
        parsed: TranscriptLine<'_>,
    ) -> Result<(), TranscriptError> {
        let entry = match parsed {
            TranscriptLine::DirectoryEntry(name) => Entry::directory(name),
            TranscriptLine::FileEntry { size, name } => {
                let size = size
                    .parse::<u64>()
                    .context(InvalidSizeSnafu { line_number, size })?;
                Entry::file(name, size)
            }
            _ => {
                self.summary.unrecognized_lines += 1;
                debug!("Ignoring unrecognized listing line {line_number}");
                return Ok(());
            }
        };

        if self.tree.add_child(self.cursor, entry).is_some() {
            self.summary.entries_added += 1;
        }
        Ok(())
    }

    fn ignore(&mut self, line_number: usize, line: &str) {
        debug!("Ignoring line {line_number}: {line:?}");
        self.summary.unrecognized_lines += 1;
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&str> for ParsedTranscript {
    type Error = TranscriptError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        TranscriptParser::parse(contents.lines())
    }
}

#[derive(Debug, Snafu)]
pub enum TranscriptError {
    #[snafu(display("Line {}: invalid ascent past root", line_number))]
    AscentPastRoot { line_number: usize },
    #[snafu(display("Line {}: unknown directory reference '{}'", line_number, name))]
    UnknownDirectory { line_number: usize, name: String },
    #[snafu(display("Line {}: file size '{}' is out of range", line_number, size))]
    InvalidSize {
        line_number: usize,
        size: String,
        source: ParseIntError,
    },
}
