/*!
 * Tests for line-delimited word record persistence
 */

use anyhow::Result;
use std::fs::File;
use std::io::BufReader;
use substream::errors::RecordError;
use substream::word_records::{read_words, TeeWords};
use substream::Word;
use crate::common;

#[test]
fn test_recordsFile_roundTrip_shouldReproduceWords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let words = common::sample_words();
    let path = common::create_records_file(temp_dir.path(), "talk.srt.jsonl", &words)?;

    let replayed: Vec<Word> = read_words(BufReader::new(File::open(&path)?)).collect::<Result<_, _>>()?;

    assert_eq!(replayed, words);
    Ok(())
}

#[test]
fn test_readWords_withWrongFieldType_shouldReportLine() {
    let input = concat!(
        "{\"word\": \"fine\", \"start_time\": 0.0, \"end_time\": 0.1}\n",
        "{\"word\": \"bad\", \"start_time\": \"zero\", \"end_time\": 0.1}\n",
    );
    let results: Vec<Result<Word, RecordError>> = read_words(input.as_bytes()).collect();

    assert!(results[0].is_ok());
    match &results[1] {
        Err(RecordError::Malformed { line, message }) => {
            assert_eq!(*line, 2);
            assert!(!message.is_empty());
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_readWords_withExtraFields_shouldIgnoreThem() -> Result<()> {
    let input = "{\"word\": \"hi\", \"start_time\": 1, \"end_time\": 2, \"confidence\": 0.9}\n";
    let words: Vec<Word> = read_words(input.as_bytes()).collect::<Result<_, _>>()?;
    assert_eq!(words, vec![Word::new("hi", 1.0, 2.0)]);
    Ok(())
}

#[test]
fn test_readWords_withCrlfLines_shouldParse() -> Result<()> {
    let input = "{\"word\": \"a\", \"start_time\": 0, \"end_time\": 1}\r\n{\"word\": \"b\", \"start_time\": 1, \"end_time\": 2}\r\n";
    let words: Vec<Word> = read_words(input.as_bytes()).collect::<Result<_, _>>()?;
    assert_eq!(words.len(), 2);
    Ok(())
}

#[test]
fn test_teeWords_shouldStayLazy() {
    let words = common::sample_words();
    let mut tee = TeeWords::new(words.into_iter(), Vec::new());

    let first = tee.next().unwrap().unwrap();
    assert_eq!(first.text, "Welcome");
    assert_eq!(tee.recorded(), 1);

    let recorded = tee.finish().unwrap();
    assert_eq!(String::from_utf8(recorded).unwrap().lines().count(), 1);
}
