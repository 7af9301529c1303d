use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::SourceError;
use crate::providers::AudioInput;

// @module: File and input utilities

/// URI schemes accepted as remote audio references
pub const REMOTE_SCHEMES: [&str; 4] = ["gs", "s3", "http", "https"];

/// Extension of line-delimited word record files
pub const RECORDS_EXTENSION: &str = "jsonl";

/// What an input argument turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A previously persisted word record file
    WordRecords(PathBuf),
    /// Audio that needs speech recognition
    Audio(AudioInput),
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @creates: Parent directory of a file if needed
    pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        Ok(())
    }

    /// Path an existing file is moved to by [`FileManager::backup_if_exists`]
    pub fn backup_path<P: AsRef<Path>>(path: P, unix_seconds: i64) -> PathBuf {
        let mut name = OsString::from(path.as_ref().as_os_str());
        name.push(format!(".{}.bak", unix_seconds));
        PathBuf::from(name)
    }

    /// Rename an existing file to `<path>.<unix seconds>.bak`
    pub fn backup_if_exists<P: AsRef<Path>>(path: P) -> Result<Option<PathBuf>> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Ok(None);
        }

        let backup = Self::backup_path(path, Utc::now().timestamp());
        fs::rename(path, &backup)
            .with_context(|| format!("Failed to back up {} to {}", path.display(), backup.display()))?;
        info!("Backed up existing {} to {}", path.display(), backup.display());
        Ok(Some(backup))
    }

    /// Remove a file if present
    pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if Self::file_exists(path) {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove file: {}", path.display()))?;
            debug!("Removed {}", path.display());
        }
        Ok(())
    }

    /// Word record file written next to a subtitle file: `<srt>.jsonl`
    pub fn companion_records_path<P: AsRef<Path>>(srt_path: P) -> PathBuf {
        let mut name = OsString::from(srt_path.as_ref().as_os_str());
        name.push(".");
        name.push(RECORDS_EXTENSION);
        PathBuf::from(name)
    }

    /// Decide how an input argument should be turned into words
    pub fn classify_input(input: &str) -> Result<InputKind, SourceError> {
        let trimmed = input.trim();

        if let Some(url) = Self::parse_remote(trimmed) {
            if url.scheme() == "file" {
                let path = url
                    .to_file_path()
                    .map_err(|_| SourceError::UnsupportedInput(input.to_string()))?;
                return Self::classify_local(&path, input);
            }
            if REMOTE_SCHEMES.contains(&url.scheme()) && url.host_str().is_some_and(|h| !h.is_empty()) {
                return Ok(InputKind::Audio(AudioInput::Remote(url)));
            }
            return Err(SourceError::UnsupportedInput(input.to_string()));
        }

        Self::classify_local(Path::new(trimmed), input)
    }

    fn classify_local(path: &Path, input: &str) -> Result<InputKind, SourceError> {
        if !path.is_file() {
            return Err(SourceError::UnsupportedInput(input.to_string()));
        }

        let is_records = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(RECORDS_EXTENSION));
        if is_records {
            Ok(InputKind::WordRecords(path.to_path_buf()))
        } else {
            Ok(InputKind::Audio(AudioInput::Local(path.to_path_buf())))
        }
    }

    // Only strings spelled `scheme://...` are treated as URIs, so local paths
    // with colons (including Windows drive letters) stay paths.
    fn parse_remote(input: &str) -> Option<Url> {
        let (scheme, _) = input.split_once("://")?;
        if scheme.len() < 2 || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)) {
            return None;
        }
        Url::parse(input).ok()
    }
}
