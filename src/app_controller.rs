use anyhow::{Context, Result};
use log::{info, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::{SourceError, SubtitleError};
use crate::file_utils::{FileManager, InputKind};
use crate::language_utils;
use crate::providers::command::CommandRecognizer;
use crate::providers::{AudioInput, Recognizer};
use crate::subtitle::{jsonl_to_srt, try_records_to_srt};
use crate::word_records::TeeWords;

// @module: Application controller for subtitle generation

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of cues written to the subtitle file
    pub cues: usize,
    /// Word record file written alongside, when words came from a recognizer
    pub records_path: Option<PathBuf>,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

/// Main application controller: input in, `.srt` out
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Source for audio inputs, if one is configured
    recognizer: Option<Box<dyn Recognizer>>,
}

impl Controller {
    /// Create a controller, wiring the command recognizer when one is configured
    pub fn with_config(config: Config) -> Result<Self> {
        let recognizer: Option<Box<dyn Recognizer>> = if config.recognizer.is_configured() {
            Some(Box::new(CommandRecognizer::from_config(&config.recognizer)?))
        } else {
            None
        };

        Ok(Self { config, recognizer })
    }

    /// Create a controller with an explicit recognizer
    pub fn with_recognizer(config: Config, recognizer: Box<dyn Recognizer>) -> Self {
        Self {
            config,
            recognizer: Some(recognizer),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert `input` (audio path, remote audio URI, or `.jsonl` word records)
    /// to an SRT file at `output`.
    ///
    /// An existing file at `output` is backed up first. If the run fails before
    /// any cue is written, the empty output file is removed.
    pub async fn run(&self, input: &str, output: &Path) -> Result<RunSummary> {
        let start_time = Instant::now();

        FileManager::ensure_parent_dir(output)?;
        FileManager::backup_if_exists(output)?;
        let srt_file = File::create(output)
            .with_context(|| format!("Failed to create subtitle file: {}", output.display()))?;

        let result = match FileManager::classify_input(input) {
            Ok(InputKind::WordRecords(path)) => self
                .convert_records(&path, srt_file, output)
                .map(|cues| (cues, None)),
            Ok(InputKind::Audio(audio)) => self
                .convert_audio(&audio, srt_file, output)
                .await
                .map(|(cues, records)| (cues, Some(records))),
            Err(e) => {
                drop(srt_file);
                Err(e.into())
            }
        };

        match result {
            Ok((cues, records_path)) => {
                let elapsed = start_time.elapsed();
                info!("Write complete in {}.", Self::format_duration(elapsed));
                Ok(RunSummary {
                    cues,
                    records_path,
                    elapsed,
                })
            }
            Err(e) => {
                Self::remove_if_untouched(output);
                Err(e)
            }
        }
    }

    fn convert_records(&self, path: &Path, srt_file: File, output: &Path) -> Result<usize> {
        info!("Converting {} to {}", path.display(), output.display());
        let reader = BufReader::new(
            File::open(path).with_context(|| format!("Failed to open word records: {}", path.display()))?,
        );
        let cues = jsonl_to_srt(reader, BufWriter::new(srt_file), &self.config.segmentation)
            .with_context(|| format!("Failed to convert {}", path.display()))?;
        Ok(cues)
    }

    async fn convert_audio(&self, audio: &AudioInput, srt_file: File, output: &Path) -> Result<(usize, PathBuf)> {
        let recognizer = self
            .recognizer
            .as_deref()
            .ok_or(SourceError::RecognizerNotConfigured)?;

        match language_utils::get_language_name(&self.config.language) {
            Ok(name) => info!("Transcribing {} ({}) with {}", audio, name, recognizer.name()),
            Err(e) => warn!("Language tag issue: {}", e),
        }

        let words = recognizer
            .recognize(audio, &self.config.language)
            .await
            .with_context(|| format!("Failed to recognize {}", audio))?;

        let records_path = FileManager::companion_records_path(output);
        FileManager::backup_if_exists(&records_path)?;
        let records_file = File::create(&records_path)
            .with_context(|| format!("Failed to create word records: {}", records_path.display()))?;

        info!("Writing subtitles to {}", output.display());
        let mut tee = TeeWords::new(words.into_iter(), BufWriter::new(records_file));
        let written = try_records_to_srt(&mut tee, BufWriter::new(srt_file), &self.config.segmentation);
        tee.finish()
            .with_context(|| format!("Failed to write word records: {}", records_path.display()))?;

        match written {
            Ok(cues) => Ok((cues, records_path)),
            Err(SubtitleError::EmptyWordStream) => {
                Self::remove_if_untouched(&records_path);
                Err(anyhow::Error::new(SubtitleError::EmptyWordStream)
                    .context(format!("Got no words for {} using language {}", audio, self.config.language)))
            }
            Err(e) => Err(e.into()),
        }
    }

    // Only zero-length files are removed; partially written output is left for inspection.
    fn remove_if_untouched(path: &Path) {
        let untouched = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(false);
        if untouched {
            if let Err(e) = FileManager::remove_if_exists(path) {
                warn!("Could not remove empty file {}: {}", path.display(), e);
            }
        }
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
