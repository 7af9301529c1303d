/*!
 * Mock recognizer implementations for testing.
 *
 * - `MockRecognizer::with_words(..)` - Always returns the given words
 * - `MockRecognizer::empty()` - Returns no words, like a silent recording
 * - `MockRecognizer::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{AudioInput, Recognizer};
use crate::errors::SourceError;
use crate::subtitle::Word;

/// Behavior mode for the mock recognizer
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Return these words for every request
    Words(Vec<Word>),
    /// Always fail
    Failing,
}

/// Mock recognizer for testing controller and pipeline behavior
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
}

impl MockRecognizer {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_words(words: Vec<Word>) -> Self {
        Self::new(MockBehavior::Words(words))
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Words(Vec::new()))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of recognize calls so far (shared between clones)
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Recognizer for MockRecognizer {
    async fn recognize(&self, _audio: &AudioInput, _language: &str) -> Result<Vec<Word>, SourceError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Words(words) => Ok(words.clone()),
            MockBehavior::Failing => Err(SourceError::RecognizerFailed {
                status: "exit status: 1".to_string(),
                stderr: "mock recognizer failure".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
