/*!
 * Line-delimited JSON persistence of word streams.
 *
 * Each line holds one object `{"word": ..., "start_time": ..., "end_time": ...}`.
 * `TeeWords` records words as they flow towards the segmenter so a recognizer
 * run can be replayed later; `read_words` turns such a file back into words.
 */

use std::io::{BufRead, Write};

use log::{debug, error};

use crate::errors::RecordError;
use crate::subtitle::Word;

/// Serialize one word as a single record line
pub fn write_word<W: Write>(sink: &mut W, word: &Word) -> Result<(), RecordError> {
    let line = serde_json::to_string(word).map_err(|e| RecordError::Serialize(e.to_string()))?;
    sink.write_all(line.as_bytes())?;
    sink.write_all(b"\n")?;
    Ok(())
}

/// Parse one record line; `line_no` is 1-based and only used for errors
pub fn parse_word(line: &str, line_no: usize) -> Result<Word, RecordError> {
    serde_json::from_str(line.trim()).map_err(|e| RecordError::Malformed {
        line: line_no,
        message: e.to_string(),
    })
}

/// Lazy reader over a record file
pub struct WordRecords<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> Iterator for WordRecords<R> {
    type Item = Result<Word, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(match line {
            Ok(line) => parse_word(&line, self.line_no),
            Err(e) => Err(RecordError::Io(e)),
        })
    }
}

/// Read words from a record stream, one per line, in file order
pub fn read_words<R: BufRead>(reader: R) -> WordRecords<R> {
    WordRecords {
        lines: reader.lines(),
        line_no: 0,
    }
}

/// Passthrough that records every word it yields.
///
/// A failed write is yielded as an `Err` in place of the word, after which the
/// tee yields nothing more.
pub struct TeeWords<I, W: Write> {
    words: I,
    sink: W,
    recorded: usize,
    failed: bool,
}

impl<I, W> TeeWords<I, W>
where
    I: Iterator<Item = Word>,
    W: Write,
{
    pub fn new(words: I, sink: W) -> Self {
        TeeWords {
            words,
            sink,
            recorded: 0,
            failed: false,
        }
    }

    /// Number of words recorded so far
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Flush the side sink and hand it back
    pub fn finish(mut self) -> Result<W, RecordError> {
        self.sink.flush()?;
        debug!("Recorded {} words", self.recorded);
        Ok(self.sink)
    }
}

impl<I, W> Iterator for TeeWords<I, W>
where
    I: Iterator<Item = Word>,
    W: Write,
{
    type Item = Result<Word, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let word = self.words.next()?;
        if let Err(e) = write_word(&mut self.sink, &word) {
            error!("Failed to record word '{}': {}", word.text, e);
            self.failed = true;
            return Some(Err(e));
        }
        self.recorded += 1;
        Some(Ok(word))
    }
}
