use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::subtitle::segmenter::DEFAULT_PAUSE_THRESHOLD;
use crate::subtitle::timing::DEFAULT_MIN_DURATION;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language/locale tag handed to the recognizer (e.g. "en-US")
    #[serde(default = "default_language")]
    pub language: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Cue segmentation and timing settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// External speech recognizer settings
    #[serde(default)]
    pub recognizer: RecognizerConfig,
}

/// Segmentation and timing thresholds
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Silence between two words, in seconds, above which a cue is split
    #[serde(default = "default_pause_threshold_secs")]
    pub pause_threshold_secs: f64,

    /// Minimum display time of a cue in seconds (the last cue is exempt)
    #[serde(default = "default_min_duration_secs")]
    pub min_duration_secs: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            pause_threshold_secs: default_pause_threshold_secs(),
            min_duration_secs: default_min_duration_secs(),
        }
    }
}

/// External recognizer configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecognizerConfig {
    /// Program and arguments. `{input}` and `{language}` are substituted.
    /// The program must print word records (one JSON object per line) on stdout.
    #[serde(default)]
    pub command: Vec<String>,

    /// Give up on the recognizer after this many seconds
    #[serde(default = "default_recognizer_timeout_secs")]
    pub timeout_secs: u64,

    /// Interval between "still running" reports
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            timeout_secs: default_recognizer_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl RecognizerConfig {
    pub fn is_configured(&self) -> bool {
        !self.command.is_empty()
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_pause_threshold_secs() -> f64 {
    DEFAULT_PAUSE_THRESHOLD
}

fn default_min_duration_secs() -> f64 {
    DEFAULT_MIN_DURATION
}

fn default_recognizer_timeout_secs() -> u64 {
    3600 // long-running recognition of feature-length audio
}

fn default_poll_interval_secs() -> u64 {
    5
}

impl Config {
    /// Load the configuration at `path`, writing the default one there if missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::parse_language_tag(&self.language)
            .with_context(|| format!("Invalid language setting: {}", self.language))?;

        let segmentation = &self.segmentation;
        if !segmentation.pause_threshold_secs.is_finite() || segmentation.pause_threshold_secs < 0.0 {
            return Err(anyhow!(
                "pause_threshold_secs must be a non-negative number, got {}",
                segmentation.pause_threshold_secs
            ));
        }
        if !segmentation.min_duration_secs.is_finite() || segmentation.min_duration_secs < 0.0 {
            return Err(anyhow!(
                "min_duration_secs must be a non-negative number, got {}",
                segmentation.min_duration_secs
            ));
        }

        if self.recognizer.timeout_secs == 0 {
            return Err(anyhow!("recognizer.timeout_secs must be greater than zero"));
        }
        if self.recognizer.poll_interval_secs == 0 {
            return Err(anyhow!("recognizer.poll_interval_secs must be greater than zero"));
        }
        if self.recognizer.command.first().is_some_and(|program| program.trim().is_empty()) {
            return Err(anyhow!("recognizer.command must start with a program name"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            log_level: LogLevel::default(),
            segmentation: SegmentationConfig::default(),
            recognizer: RecognizerConfig::default(),
        }
    }
}
