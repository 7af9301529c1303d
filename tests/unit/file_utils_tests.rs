/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use substream::errors::SourceError;
use substream::file_utils::{FileManager, InputKind};
use substream::providers::AudioInput;
use url::Url;
use crate::common;

#[test]
fn test_companionRecordsPath_shouldAppendJsonl() {
    let path = FileManager::companion_records_path("/tmp/out/talk.srt");
    assert_eq!(path, Path::new("/tmp/out/talk.srt.jsonl"));
}

#[test]
fn test_backupPath_shouldAppendTimestampAndBak() {
    let path = FileManager::backup_path("/tmp/out/talk.srt", 1_700_000_000);
    assert_eq!(path, Path::new("/tmp/out/talk.srt.1700000000.bak"));
}

#[test]
fn test_backupIfExists_withExistingFile_shouldRenameIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = common::create_test_file(temp_dir.path(), "talk.srt", "old content")?;

    let backup = FileManager::backup_if_exists(&target)?.expect("a backup should be made");

    assert!(!target.exists());
    assert_eq!(fs::read_to_string(&backup)?, "old content");
    assert!(backup.to_string_lossy().ends_with(".bak"));
    Ok(())
}

#[test]
fn test_backupIfExists_withMissingFile_shouldDoNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::backup_if_exists(temp_dir.path().join("missing.srt"))?.is_none());
    Ok(())
}

#[test]
fn test_classifyInput_withJsonlFile_shouldBeWordRecords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let records = common::create_test_file(temp_dir.path(), "talk.srt.JSONL", "")?;

    let kind = FileManager::classify_input(records.to_str().unwrap())?;
    assert_eq!(kind, InputKind::WordRecords(records));
    Ok(())
}

#[test]
fn test_classifyInput_withOtherLocalFile_shouldBeAudio() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_file(temp_dir.path(), "talk.flac", "fLaC")?;

    let kind = FileManager::classify_input(audio.to_str().unwrap())?;
    assert_eq!(kind, InputKind::Audio(AudioInput::Local(audio)));
    Ok(())
}

#[test]
fn test_classifyInput_withFileUri_shouldResolveToLocalPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_file(temp_dir.path(), "talk.flac", "fLaC")?;
    let records = common::create_test_file(temp_dir.path(), "talk.jsonl", "")?;

    let audio_uri = Url::from_file_path(&audio).unwrap();
    let kind = FileManager::classify_input(audio_uri.as_str())?;
    assert_eq!(kind, InputKind::Audio(AudioInput::Local(audio)));

    let records_uri = Url::from_file_path(&records).unwrap();
    let kind = FileManager::classify_input(records_uri.as_str())?;
    assert_eq!(kind, InputKind::WordRecords(records));

    let missing = Url::from_file_path(temp_dir.path().join("gone.flac")).unwrap();
    let result = FileManager::classify_input(missing.as_str());
    assert!(matches!(result, Err(SourceError::UnsupportedInput(_))));
    Ok(())
}

#[test]
fn test_classifyInput_withGsUri_shouldBeRemoteAudio() -> Result<()> {
    let kind = FileManager::classify_input("gs://my-bucket/audio/talk.flac")?;
    match kind {
        InputKind::Audio(AudioInput::Remote(url)) => {
            assert_eq!(url.scheme(), "gs");
            assert_eq!(url.host_str(), Some("my-bucket"));
            assert_eq!(url.path(), "/audio/talk.flac");
        }
        other => panic!("unexpected kind: {:?}", other),
    }
    Ok(())
}

#[test]
fn test_classifyInput_withUnknownScheme_shouldFail() {
    let result = FileManager::classify_input("ftp://example.com/talk.flac");
    assert!(matches!(result, Err(SourceError::UnsupportedInput(_))));
}

#[test]
fn test_classifyInput_withMissingFile_shouldFail() {
    let missing = PathBuf::from("./definitely_missing_audio_12345.flac");
    let result = FileManager::classify_input(missing.to_str().unwrap());
    assert!(matches!(result, Err(SourceError::UnsupportedInput(_))));
}

#[test]
fn test_classifyInput_withDirectory_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = FileManager::classify_input(temp_dir.path().to_str().unwrap());
    assert!(matches!(result, Err(SourceError::UnsupportedInput(_))));
    Ok(())
}

#[test]
fn test_removeIfExists_shouldDeleteFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "gone.srt", "")?;
    FileManager::remove_if_exists(&file)?;
    assert!(!file.exists());
    FileManager::remove_if_exists(&file)?;
    Ok(())
}
