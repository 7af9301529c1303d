// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use substream::app_config::{self, Config};
use substream::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for substream
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// substream - transcribe audio or a word record dump to .srt
#[derive(Parser, Debug)]
#[command(name = "substream")]
#[command(version)]
#[command(about = "Transcribes an audio file or .jsonl word dump to .srt")]
#[command(long_about = "Transcribes an audio file, a remote audio URI, or an intermediate .jsonl
word dump to an .srt subtitle file.

EXAMPLES:
    substream -i talk.flac -o talk.srt                  # Recognize with the configured command
    substream -i gs://bucket/talk.flac -o talk.srt      # Remote audio, passed to the recognizer
    substream -i talk.srt.jsonl -o talk.srt             # Replay a previous recognition
    substream -i talk.flac -o talk.srt --language de-DE
    substream completions bash > substream.bash

Audio inputs also write <output>.jsonl with the recognized words. Existing
outputs are renamed to <file>.<unix time>.bak before being replaced.

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. Set recognizer.command to a program printing word
    records, e.g. [\"my-asr\", \"{input}\", \"--lang\", \"{language}\"].")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Mono audio file, remote audio URI (gs://...), or intermediate .jsonl dump
    #[arg(short, long)]
    input: Option<String>,

    /// .srt filename
    #[arg(short, long = "output", value_name = "SRT_FILENAME")]
    output: Option<PathBuf>,

    /// Language tag passed to the recognizer (overrides the config file)
    #[arg(long)]
    language: Option<String>,

    /// Extra logging (same as --log-level debug)
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Stderr logger with timestamps and level colors
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}: {}\x1B[0m",
                color,
                now,
                tag,
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "substream", &mut std::io::stdout());
        return Ok(());
    }

    run(cli).await
}

async fn run(options: CommandLineOptions) -> Result<()> {
    let (Some(input), Some(output)) = (options.input, options.output) else {
        return Err(anyhow::anyhow!("--input and --output are required"));
    };

    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(language) = options.language {
        config.language = language;
    }
    if options.verbose {
        config.log_level = app_config::LogLevel::Debug;
    }
    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    config.validate()?;

    let controller = Controller::with_config(config)?;
    let summary = controller.run(&input, &output).await?;

    info!("Wrote {} cues to {}", summary.cues, output.display());
    if let Some(records) = summary.records_path {
        info!("Word records saved to {}", records.display());
    }

    Ok(())
}
