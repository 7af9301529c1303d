/*!
 * Integration tests for the record file to subtitle workflow
 */

use anyhow::Result;
use std::fs::{self, File};
use std::io::BufReader;
use substream::app_config::SegmentationConfig;
use substream::errors::{RecordError, SubtitleError};
use substream::subtitle::{jsonl_to_srt, parse_srt, records_to_srt, try_records_to_srt};
use substream::word_records::TeeWords;
use substream::Word;
use crate::common;

#[test]
fn test_jsonlToSrt_withSampleRecords_shouldMatchExpectedSrt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let records = common::create_records_file(temp_dir.path(), "talk.jsonl", &common::sample_words())?;
    let srt_path = temp_dir.path().join("talk.srt");

    let cues = jsonl_to_srt(
        BufReader::new(File::open(&records)?),
        File::create(&srt_path)?,
        &SegmentationConfig::default(),
    )?;

    assert_eq!(cues, 5);
    assert_eq!(fs::read_to_string(&srt_path)?, common::SAMPLE_SRT);
    Ok(())
}

#[test]
fn test_teeThenReplay_shouldProduceIdenticalSubtitles() -> Result<()> {
    let config = SegmentationConfig::default();

    let mut tee = TeeWords::new(common::sample_words().into_iter(), Vec::new());
    let mut first = Vec::new();
    try_records_to_srt(&mut tee, &mut first, &config)?;
    let recorded = tee.finish()?;

    let mut replayed = Vec::new();
    jsonl_to_srt(recorded.as_slice(), &mut replayed, &config)?;

    assert_eq!(first, replayed);
    assert_eq!(String::from_utf8(first)?, common::SAMPLE_SRT);
    Ok(())
}

#[test]
fn test_jsonlToSrt_withCustomThresholds_shouldChangeSegmentation() -> Result<()> {
    let config = SegmentationConfig {
        pause_threshold_secs: 10.0,
        min_duration_secs: 0.0,
    };
    let words = vec![
        Word::new("one", 0.0, 0.25),
        Word::new("two", 5.0, 5.25),
        Word::new("three.", 9.0, 9.5),
    ];
    let mut out = Vec::new();
    records_to_srt(words, &mut out, &config)?;

    let cues = parse_srt(&String::from_utf8(out)?)?;
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "one two three.");
    assert_eq!((cues[0].start_ms, cues[0].end_ms), (0, 9_500));
    Ok(())
}

#[test]
fn test_jsonlToSrt_withEmptyFile_shouldRefuse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let records = common::create_test_file(temp_dir.path(), "empty.jsonl", "")?;
    let mut out = Vec::new();

    let result = jsonl_to_srt(BufReader::new(File::open(&records)?), &mut out, &SegmentationConfig::default());

    assert!(matches!(result, Err(SubtitleError::EmptyWordStream)));
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn test_jsonlToSrt_withCorruptMiddleLine_shouldNotSkipIt() -> Result<()> {
    let mut content = Vec::new();
    substream::word_records::write_word(&mut content, &Word::new("First.", 0.0, 1.5))?;
    content.extend_from_slice(b"{\"word\": \"oops\"\n");
    substream::word_records::write_word(&mut content, &Word::new("Third.", 3.0, 4.5))?;

    let mut out = Vec::new();
    let result = jsonl_to_srt(content.as_slice(), &mut out, &SegmentationConfig::default());

    assert!(matches!(
        result,
        Err(SubtitleError::Records(RecordError::Malformed { line: 2, .. }))
    ));
    let written = String::from_utf8(out)?;
    assert!(!written.contains("Third."));
    assert!(!written.contains("First."), "cue settled by a failed read was written");
    Ok(())
}
