/*!
 * Groups a flat word stream into subtitle cues.
 *
 * A cue closes right after a word ending in `.`, `?` or `!`, or when the
 * silence before the next word exceeds the pause threshold. Pause splits mark
 * both sides of the break with an ellipsis so the reader sees the sentence
 * continues.
 */

use log::trace;

use super::model::{Subtitle, Word};

/// Default silence, in seconds, that splits a cue
pub const DEFAULT_PAUSE_THRESHOLD: f64 = 1.0;

/// Lazy single-pass segmenter over any word iterator
#[derive(Debug)]
pub struct Segmenter<I> {
    words: I,
    pause_threshold: f64,
    // Words of the cue being built; owned exclusively by the segmenter
    current: Vec<Word>,
    // End time of the previous word, unset right after any split
    last_end: Option<f64>,
}

impl<I> Segmenter<I>
where
    I: Iterator<Item = Word>,
{
    pub fn new(words: I) -> Self {
        Self::with_pause_threshold(words, DEFAULT_PAUSE_THRESHOLD)
    }

    pub fn with_pause_threshold(words: I, pause_threshold: f64) -> Self {
        Segmenter {
            words,
            pause_threshold,
            current: Vec::new(),
            last_end: None,
        }
    }

    fn take_current(&mut self) -> Option<Subtitle> {
        Subtitle::from_words(std::mem::take(&mut self.current))
    }
}

impl<I> Iterator for Segmenter<I>
where
    I: Iterator<Item = Word>,
{
    type Item = Subtitle;

    fn next(&mut self) -> Option<Subtitle> {
        while let Some(word) = self.words.next() {
            if word.ends_sentence() {
                self.current.push(word);
                self.last_end = None;
                return self.take_current();
            }

            if let Some(last_end) = self.last_end {
                let gap = word.start_time - last_end;
                if gap > self.pause_threshold {
                    trace!("Pause of {:.3}s before '{}', splitting cue", gap, word.text);
                    let mut finished = std::mem::take(&mut self.current);
                    if let Some(tail) = finished.pop() {
                        finished.push(tail.with_trailing_pause());
                    }
                    self.current.push(word.with_leading_pause());
                    self.last_end = None;
                    return Subtitle::from_words(finished);
                }
            }

            self.last_end = Some(word.end_time);
            self.current.push(word);
        }

        self.take_current()
    }
}

/// Segment a word stream with the given pause threshold
pub fn segment<I>(words: I, pause_threshold: f64) -> Segmenter<I::IntoIter>
where
    I: IntoIterator<Item = Word>,
{
    Segmenter::with_pause_threshold(words.into_iter(), pause_threshold)
}
