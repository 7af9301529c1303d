/*!
 * Subtitle construction from timestamped words.
 *
 * - `model`: `Word` and `Subtitle`
 * - `segmenter`: punctuation and pause based cue grouping
 * - `timing`: minimum-duration repair without overlap
 * - `srt`: SRT rendering and reading
 * - `pipeline`: lazy composition of the stages
 */

pub mod model;
pub mod pipeline;
pub mod segmenter;
pub mod srt;
pub mod timing;

pub use model::{Subtitle, Word};
pub use pipeline::{jsonl_to_srt, records_to_srt, try_records_to_srt};
pub use segmenter::{segment, Segmenter};
pub use srt::{format_timestamp, parse_srt, write_srt, SrtCue, SrtWriter};
pub use timing::{adjust_durations, DurationAdjuster};
