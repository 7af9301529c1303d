/*!
 * Error types for the substream application.
 *
 * This module contains custom error types for the different stages of the
 * word-to-subtitle pipeline, using the thiserror crate for ergonomic error
 * definitions. The binary and the controller wrap these with anyhow context.
 */

use thiserror::Error;

/// Errors that can occur while reading or writing line-delimited word records
#[derive(Error, Debug)]
pub enum RecordError {
    /// Error from the underlying reader or writer
    #[error("Record I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed as a word record
    #[error("Malformed word record on line {line}: {message}")]
    Malformed {
        /// 1-based line number in the record file
        line: usize,
        /// Parser message
        message: String,
    },

    /// A word could not be serialized
    #[error("Failed to serialize word record: {0}")]
    Serialize(String),
}

/// Errors that can occur while acquiring a word stream
#[derive(Error, Debug)]
pub enum SourceError {
    /// The input is neither a readable local file nor a recognizable remote reference
    #[error("{0} is not a file or a supported remote audio uri")]
    UnsupportedInput(String),

    /// Audio input was given but no recognizer command is configured
    #[error("No speech recognizer configured; set recognizer.command in the config file")]
    RecognizerNotConfigured,

    /// The recognizer process exited unsuccessfully
    #[error("Recognizer exited with {status}: {stderr}")]
    RecognizerFailed {
        /// Exit status description
        status: String,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// The recognizer did not finish in time
    #[error("Recognizer timed out after {0} seconds")]
    RecognizerTimeout(u64),

    /// The user interrupted recognition twice
    #[error("Recognition interrupted by user")]
    Interrupted,

    /// Error spawning or talking to the recognizer
    #[error("Recognizer I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The recognizer produced output that is not valid word records
    #[error("Recognizer output invalid: {0}")]
    Records(#[from] RecordError),
}

/// Errors that can occur while building and rendering subtitles
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The word stream produced no words at all
    #[error("Word stream is empty; refusing to write an empty subtitle file")]
    EmptyWordStream,

    /// Error writing to the subtitle sink
    #[error("Failed to write subtitles: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading the word records feeding the pipeline
    #[error("Word record error: {0}")]
    Records(#[from] RecordError),

    /// An SRT timestamp or cue could not be parsed
    #[error("Invalid SRT content: {0}")]
    InvalidSrt(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error acquiring the word stream
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from word record persistence
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
