use serde::{Deserialize, Serialize};

// @module: Word and subtitle data model

/// Marker appended to the last word of a cue closed by a pause
pub const PAUSE_SUFFIX: &str = " ...";

/// Marker prepended to the first word of a cue opened by a pause
pub const PAUSE_PREFIX: &str = "... ";

/// Characters that close a sentence, and therefore a cue
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

// @struct: One recognized token with timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    // @field: Spoken text, possibly with recognizer punctuation
    #[serde(rename = "word")]
    pub text: String,

    // @field: Start offset in seconds
    pub start_time: f64,

    // @field: End offset in seconds
    pub end_time: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Word {
            text: text.into(),
            start_time,
            end_time,
        }
    }

    /// Whether the word ends with sentence-closing punctuation
    pub fn ends_sentence(&self) -> bool {
        self.text.ends_with(SENTENCE_TERMINATORS)
    }

    /// Copy of this word with the pause suffix appended
    pub fn with_trailing_pause(&self) -> Self {
        Word {
            text: format!("{}{}", self.text, PAUSE_SUFFIX),
            ..self.clone()
        }
    }

    /// Copy of this word with the pause prefix prepended
    pub fn with_leading_pause(&self) -> Self {
        Word {
            text: format!("{}{}", PAUSE_PREFIX, self.text),
            ..self.clone()
        }
    }
}

/// One displayed cue: a non-empty run of words in speech order.
///
/// The displayed span is `[first.start_time, last.end_time]`. Only the end
/// time of the last word is ever changed after construction, by the
/// duration adjuster.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtitle {
    words: Vec<Word>,
}

impl Subtitle {
    /// Build a cue from buffered words, `None` when the buffer is empty
    pub fn from_words(words: Vec<Word>) -> Option<Self> {
        if words.is_empty() {
            None
        } else {
            Some(Subtitle { words })
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    // Never true; cues are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn first(&self) -> &Word {
        &self.words[0]
    }

    fn last(&self) -> &Word {
        &self.words[self.words.len() - 1]
    }

    pub fn start_time(&self) -> f64 {
        self.first().start_time
    }

    pub fn end_time(&self) -> f64 {
        self.last().end_time
    }

    /// Displayed duration in seconds
    pub fn duration(&self) -> f64 {
        self.end_time() - self.start_time()
    }

    /// Move the cue's end by rewriting the last word's end time
    pub fn set_end_time(&mut self, end_time: f64) {
        let last = self.words.len() - 1;
        self.words[last].end_time = end_time;
    }

    /// Word texts joined with single spaces
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
