/*!
 * Recognizer backed by an external program.
 *
 * The configured command is run once per input with `{input}` and
 * `{language}` substituted into its arguments. Its standard output must be
 * word records, one JSON object per line, which makes any speech engine that
 * can print that format usable without linking it into this crate.
 */

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::future::Future;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use super::{AudioInput, Recognizer};
use crate::app_config::RecognizerConfig;
use crate::errors::SourceError;
use crate::subtitle::Word;
use crate::word_records::read_words;

/// Placeholder replaced by the audio path or URI
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Placeholder replaced by the language tag
pub const LANGUAGE_PLACEHOLDER: &str = "{language}";

#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    poll_interval: Duration,
}

impl CommandRecognizer {
    /// Build from config; fails when no command is configured
    pub fn from_config(config: &RecognizerConfig) -> Result<Self, SourceError> {
        let (program, args) = config
            .command
            .split_first()
            .ok_or(SourceError::RecognizerNotConfigured)?;

        Ok(CommandRecognizer {
            program: program.clone(),
            args: args.to_vec(),
            timeout: Duration::from_secs(config.timeout_secs),
            poll_interval: Duration::from_secs(config.poll_interval_secs.max(1)),
        })
    }

    /// Arguments with placeholders filled in
    pub fn render_args(&self, audio: &AudioInput, language: &str) -> Vec<String> {
        let input = audio.to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, &input)
                    .replace(LANGUAGE_PLACEHOLDER, language)
            })
            .collect()
    }

    /// Wait for `output` under the timeout, with a spinner.
    ///
    /// The first interrupt is only logged: the recognizer shares the terminal's
    /// process group, so it receives the same signal and gets the chance to
    /// stop on its own and print what it has. A second interrupt aborts, and
    /// the child is killed when its handle drops.
    async fn supervise<T, O, C, CF>(&self, audio: &AudioInput, output: O, mut interrupts: C) -> Result<T, SourceError>
    where
        O: Future<Output = std::io::Result<T>>,
        C: FnMut() -> CF,
        CF: Future<Output = std::io::Result<()>>,
    {
        let spinner = self.spinner(audio);
        tokio::pin!(output);
        let deadline = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);
        let mut poll = tokio::time::interval(self.poll_interval);
        poll.tick().await;

        let mut interrupt = Box::pin(interrupts());
        let mut listening = true;
        let mut cancel_requested = false;

        let result = loop {
            tokio::select! {
                result = &mut output => break result,
                _ = &mut deadline => {
                    spinner.finish_and_clear();
                    error!("Recognizer did not finish within {}s", self.timeout.as_secs());
                    return Err(SourceError::RecognizerTimeout(self.timeout.as_secs()));
                }
                signal = &mut interrupt, if listening => match signal {
                    Ok(()) if cancel_requested => {
                        spinner.finish_and_clear();
                        warn!("Interrupted again, stopping recognizer");
                        return Err(SourceError::Interrupted);
                    }
                    Ok(()) => {
                        cancel_requested = true;
                        warn!("Cancellation requested, waiting for the recognizer to stop. Interrupt again to abort.");
                        spinner.set_message(format!("Cancelling... ({})", audio));
                        interrupt = Box::pin(interrupts());
                    }
                    Err(e) => {
                        warn!("Cannot listen for interrupts: {}", e);
                        listening = false;
                    }
                },
                _ = poll.tick() => {
                    spinner.set_message(format!("Still running... ({})", audio));
                    debug!("Still running...");
                }
            }
        };
        spinner.finish_and_clear();
        Ok(result?)
    }

    fn spinner(&self, audio: &AudioInput) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(format!("Recognizing {}", audio));
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }
}

#[async_trait]
impl Recognizer for CommandRecognizer {
    async fn recognize(&self, audio: &AudioInput, language: &str) -> Result<Vec<Word>, SourceError> {
        let args = self.render_args(audio, language);
        info!("Starting transcription of {} using language {}.", audio, language);
        debug!("Running recognizer: {} {}", self.program, args.join(" "));

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = self
            .supervise(audio, child.wait_with_output(), tokio::signal::ctrl_c)
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Recognizer failed: {}", stderr);
            return Err(SourceError::RecognizerFailed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let words = read_words(output.stdout.as_slice()).collect::<Result<Vec<_>, _>>()?;
        info!("Recognition complete: {} words.", words.len());
        Ok(words)
    }

    fn name(&self) -> &str {
        &self.program
    }
}
