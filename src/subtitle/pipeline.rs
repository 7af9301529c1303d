/*!
 * Word stream to SRT composition.
 *
 * Segmenter, duration adjuster and writer are chained as lazy iterators:
 * writing a cue pulls exactly the words it needs from the source, with one
 * cue of lookahead held by the adjuster.
 */

use std::cell::RefCell;
use std::io::{BufRead, Write};

use log::{debug, info, warn};

use super::segmenter::Segmenter;
use super::srt::write_srt;
use super::timing::DurationAdjuster;
use super::model::Word;
use crate::app_config::SegmentationConfig;
use crate::errors::{RecordError, SubtitleError};
use crate::word_records::read_words;

/// Convert a word stream to SRT, returning the number of cues written.
///
/// An empty word stream is an error and nothing is written to `sink`.
pub fn records_to_srt<I, W>(words: I, sink: W, config: &SegmentationConfig) -> Result<usize, SubtitleError>
where
    I: IntoIterator<Item = Word>,
    W: Write,
{
    try_records_to_srt(words.into_iter().map(Ok::<Word, RecordError>), sink, config)
}

/// Convert a fallible word stream to SRT.
///
/// The first `Err` from the source aborts the run. A failed source is not an
/// end of stream: the segmenter's unfinished cue and the cue still waiting on
/// its successor for clamping are dropped, so only cues that a complete stream
/// would render identically reach `sink`.
pub fn try_records_to_srt<I, E, W>(words: I, sink: W, config: &SegmentationConfig) -> Result<usize, SubtitleError>
where
    I: IntoIterator<Item = Result<Word, E>>,
    SubtitleError: From<E>,
    W: Write,
{
    let failure: RefCell<Option<E>> = RefCell::new(None);
    let mut words = words
        .into_iter()
        .map_while(|record| match record {
            Ok(word) => Some(word),
            Err(e) => {
                *failure.borrow_mut() = Some(e);
                None
            }
        })
        .peekable();

    if words.peek().is_none() {
        return Err(match failure.take() {
            Some(e) => e.into(),
            None => SubtitleError::EmptyWordStream,
        });
    }

    debug!(
        "Segmenting with pause threshold {}s and minimum duration {}s",
        config.pause_threshold_secs, config.min_duration_secs
    );

    let subtitles = Segmenter::with_pause_threshold(words, config.pause_threshold_secs);
    let subtitles = DurationAdjuster::with_min_duration(subtitles, config.min_duration_secs)
        .take_while(|_| failure.borrow().is_none());
    let written = write_srt(subtitles, sink);

    if let Some(e) = failure.into_inner() {
        warn!("Word source failed after {} subtitle cues", written.as_ref().map_or(0, |n| *n));
        return Err(e.into());
    }

    let written = written?;
    info!("Wrote {} subtitle cues", written);
    Ok(written)
}

/// Convert a line-delimited word record stream to SRT.
///
/// A malformed record stops the pipeline and is returned as the error. Cues
/// completed before it stay in the sink; the cue it interrupted is not written.
pub fn jsonl_to_srt<R, W>(reader: R, sink: W, config: &SegmentationConfig) -> Result<usize, SubtitleError>
where
    R: BufRead,
    W: Write,
{
    try_records_to_srt(read_words(reader), sink, config)
}
