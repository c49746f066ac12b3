use thiserror::Error;

///
/// A count record that could not be turned into an observation. Line numbers
/// are 1-based and count blank lines too, so they match what an editor shows.
///
#[derive(Error, Debug)]
pub enum RecordParseError {
    #[error("File format error on line {line}, need at least {expected} columns (found {found})")]
    TooFewColumns {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid count on line {line}, column {column}: '{value}' is not a non-negative integer")]
    InvalidCount {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("Counts on line {line} are too large: {forward} + {reverse} does not fit in 64 bits")]
    CountOverflow {
        line: usize,
        forward: u64,
        reverse: u64,
    },

    #[error("Can't read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl RecordParseError {
    pub fn line(&self) -> usize {
        match self {
            RecordParseError::TooFewColumns { line, .. } => *line,
            RecordParseError::InvalidCount { line, .. } => *line,
            RecordParseError::CountOverflow { line, .. } => *line,
            RecordParseError::Io { line, .. } => *line,
        }
    }
}
