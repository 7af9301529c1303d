use std::fmt;
use std::io::Write;

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use super::model::Subtitle;
use crate::errors::SubtitleError;

// @module: SRT rendering and reading

// @const: SRT timing line regex (hours are unbounded)
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2,}):(\d{2}):(\d{2}),(\d{3})$")
        .expect("timing regex is valid")
});

/// Convert seconds to whole milliseconds for SRT output.
///
/// Whole seconds and the millisecond part are truncated separately, so the
/// millisecond digits are always the truncated fractional second.
pub fn seconds_to_millis(seconds: f64) -> u64 {
    let seconds = seconds.max(0.0);
    let whole = seconds.trunc() as u64;
    let millis = (seconds.fract() * 1000.0) as u64;
    whole * 1000 + millis.min(999)
}

/// Format milliseconds as `HH:MM:SS,mmm`; hours do not wrap at 24
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Parse an `HH:MM:SS,mmm` timestamp to milliseconds
pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
    let invalid = || SubtitleError::InvalidSrt(format!("invalid timestamp: {}", timestamp));

    let (clock, millis) = timestamp.trim().split_once(',').ok_or_else(invalid)?;
    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() != 3 || millis.len() != 3 {
        return Err(invalid());
    }

    let hours: u64 = parts[0].parse().map_err(|_| invalid())?;
    let minutes: u64 = parts[1].parse().map_err(|_| invalid())?;
    let seconds: u64 = parts[2].parse().map_err(|_| invalid())?;
    let millis: u64 = millis.parse().map_err(|_| invalid())?;

    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
}

// @struct: Rendered cue block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtCue {
    // @field: 1-based position in the file
    pub index: usize,

    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Cue text
    pub text: String,
}

impl SrtCue {
    pub fn from_subtitle(index: usize, subtitle: &Subtitle) -> Self {
        SrtCue {
            index,
            start_ms: seconds_to_millis(subtitle.start_time()),
            end_ms: seconds_to_millis(subtitle.end_time()),
            text: subtitle.text(),
        }
    }
}

impl fmt::Display for SrtCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(
            f,
            "{} --> {}",
            format_timestamp(self.start_ms),
            format_timestamp(self.end_ms)
        )?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Streaming SRT writer that numbers cues as they arrive
pub struct SrtWriter<W: Write> {
    sink: W,
    written: usize,
}

impl<W: Write> SrtWriter<W> {
    pub fn new(sink: W) -> Self {
        SrtWriter { sink, written: 0 }
    }

    /// Append one cue block
    pub fn write_subtitle(&mut self, subtitle: &Subtitle) -> std::io::Result<()> {
        self.written += 1;
        let cue = SrtCue::from_subtitle(self.written, subtitle);
        write!(self.sink, "{}", cue)
    }

    /// Number of cues written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> std::io::Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Drain a cue stream into `sink`, returning the number of cues written
pub fn write_srt<I, W>(subtitles: I, sink: W) -> std::io::Result<usize>
where
    I: IntoIterator<Item = Subtitle>,
    W: Write,
{
    let mut writer = SrtWriter::new(sink);
    for subtitle in subtitles {
        writer.write_subtitle(&subtitle)?;
    }
    let written = writer.written();
    writer.finish()?;
    Ok(written)
}

/// Parse SRT content as written by [`write_srt`].
///
/// The reader is strict: every block must have an index, a timing line and at
/// least one text line. Indices are kept as found; a gap is only warned about.
pub fn parse_srt(content: &str) -> Result<Vec<SrtCue>, SubtitleError> {
    let mut cues = Vec::new();
    let mut lines = content.lines().map(|line| line.trim_end_matches('\r')).enumerate().peekable();

    loop {
        // Skip blank separators
        while lines.peek().is_some_and(|(_, line)| line.trim().is_empty()) {
            lines.next();
        }
        let Some((line_no, index_line)) = lines.next() else {
            break;
        };

        let index: usize = index_line.trim().parse().map_err(|_| {
            SubtitleError::InvalidSrt(format!("line {}: expected cue index, found '{}'", line_no + 1, index_line))
        })?;

        let (timing_no, timing_line) = lines.next().ok_or_else(|| {
            SubtitleError::InvalidSrt(format!("cue {}: missing timing line", index))
        })?;
        let caps = TIMING_REGEX.captures(timing_line.trim()).ok_or_else(|| {
            SubtitleError::InvalidSrt(format!("line {}: invalid timing '{}'", timing_no + 1, timing_line))
        })?;
        let start_ms = parse_timestamp(&format!("{}:{}:{},{}", &caps[1], &caps[2], &caps[3], &caps[4]))?;
        let end_ms = parse_timestamp(&format!("{}:{}:{},{}", &caps[5], &caps[6], &caps[7], &caps[8]))?;

        let mut text_lines = Vec::new();
        while let Some((_, line)) = lines.peek() {
            if line.trim().is_empty() {
                break;
            }
            text_lines.push(line.to_string());
            lines.next();
        }
        if text_lines.is_empty() {
            return Err(SubtitleError::InvalidSrt(format!("cue {}: missing text", index)));
        }

        if index != cues.len() + 1 {
            warn!("Cue index {} found where {} was expected", index, cues.len() + 1);
        }

        cues.push(SrtCue {
            index,
            start_ms,
            end_ms,
            text: text_lines.join("\n"),
        });
    }

    Ok(cues)
}
