/*!
 * Word stream sources.
 *
 * Speech recognition itself happens outside this crate. A `Recognizer` turns
 * an audio reference into timestamped words:
 * - `command`: runs a configured external program
 * - `mock`: returns canned words, for tests
 */

use async_trait::async_trait;
use std::fmt::{self, Debug};
use std::path::PathBuf;
use url::Url;

use crate::errors::SourceError;
use crate::subtitle::Word;

/// Audio to be recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioInput {
    /// Audio file on the local file system
    Local(PathBuf),
    /// Audio already stored remotely (e.g. `gs://bucket/file.flac`)
    Remote(Url),
}

impl fmt::Display for AudioInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioInput::Local(path) => write!(f, "{}", path.display()),
            AudioInput::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Common trait for all word stream sources
///
/// Implementations return words ordered by start time. An empty result is not
/// an error here; the pipeline rejects it.
#[async_trait]
pub trait Recognizer: Send + Sync + Debug {
    /// Recognize `audio` using the opaque language tag `language`
    async fn recognize(&self, audio: &AudioInput, language: &str) -> Result<Vec<Word>, SourceError>;

    /// Short name for log messages
    fn name(&self) -> &str;
}

pub mod command;
pub mod mock;
