/*!
 * # substream - timestamped words to SRT subtitles
 *
 * A Rust library and CLI that turns a stream of recognized words, each with a
 * start and end time, into a readable SRT subtitle file.
 *
 * ## Features
 *
 * - Cue segmentation on sentence punctuation and on pauses between words
 * - Minimum display duration for short cues without overlapping the next one
 * - Exact SRT rendering with truncated millisecond timestamps
 * - Line-delimited JSON word records so a recognition run can be replayed
 * - Pluggable speech recognizer (external command, or a mock for tests)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle`: Word and cue model plus the lazy pipeline:
 *   - `subtitle::segmenter`: Words to cues
 *   - `subtitle::timing`: Minimum-duration repair
 *   - `subtitle::srt`: SRT rendering and reading
 *   - `subtitle::pipeline`: Stage composition
 * - `word_records`: Word record persistence
 * - `providers`: Word stream sources (speech recognizers)
 * - `file_utils`: Backups, companion paths, input classification
 * - `app_controller`: Main application controller
 * - `language_utils`: Locale tag validation
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod subtitle;
pub mod word_records;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, RecordError, SourceError, SubtitleError};
pub use subtitle::{Subtitle, Word};
