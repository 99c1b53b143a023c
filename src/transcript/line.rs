use std::sync::LazyLock;

use regex::Regex;

const COMMAND_PREFIX: char = '$';
const CHANGE_TO_ROOT: &str = "$ cd /";
const LIST: &str = "$ ls";
const PARENT_MARKER: &str = "..";

static CHANGE_DIR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$ cd (?P<key>\.{2}|\w+)$").expect("change directory pattern is valid")
});
static DIR_ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^dir (?P<name>\w+)$").expect("directory entry pattern is valid")
});
static FILE_ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<size>\d+) (?P<name>\w+(\.\w+)?)$").expect("file entry pattern is valid")
});

/// Shape of a single transcript line, independent of parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptLine<'a> {
    Empty,
    ChangeToRoot,
    ChangeToParent,
    ChangeTo(&'a str),
    List,
    DirectoryEntry(&'a str),
    /// `size` is kept as text so the parser can report overflow with context
    FileEntry {
        size: &'a str,
        name: &'a str,
    },
    Unrecognized,
}

impl<'a> TranscriptLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        if line.is_empty() {
            return TranscriptLine::Empty;
        }
        if line == CHANGE_TO_ROOT {
            return TranscriptLine::ChangeToRoot;
        }
        if line == LIST {
            return TranscriptLine::List;
        }

        if let Some(caps) = CHANGE_DIR_PATTERN.captures(line) {
            return match caps.name("key").map(|key| key.as_str()) {
                Some(PARENT_MARKER) => TranscriptLine::ChangeToParent,
                Some(name) => TranscriptLine::ChangeTo(name),
                None => TranscriptLine::Unrecognized,
            };
        }

        if let Some(name) = DIR_ENTRY_PATTERN
            .captures(line)
            .and_then(|caps| caps.name("name"))
        {
            return TranscriptLine::DirectoryEntry(name.as_str());
        }

        if let Some(caps) = FILE_ENTRY_PATTERN.captures(line) {
            if let (Some(size), Some(name)) = (caps.name("size"), caps.name("name")) {
                return TranscriptLine::FileEntry {
                    size: size.as_str(),
                    name: name.as_str(),
                };
            }
        }

        TranscriptLine::Unrecognized
    }

    /// Whether the raw line starts like a shell command, recognized or not
    pub fn is_command(line: &str) -> bool {
        line.starts_with(COMMAND_PREFIX)
    }

    pub fn is_listing_output(&self) -> bool {
        matches!(
            self,
            TranscriptLine::DirectoryEntry(_) | TranscriptLine::FileEntry { .. }
        )
    }
}
