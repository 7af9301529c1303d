/*!
 * Minimum-duration repair for segmented cues.
 *
 * Short cues are stretched to the minimum display time, but never past the
 * start of the cue that follows. The final cue has nothing to clamp against
 * and is emitted exactly as recognized.
 */

use log::debug;

use super::model::Subtitle;

/// Default minimum display time of a cue, in seconds
pub const DEFAULT_MIN_DURATION: f64 = 1.0;

/// Lazy adjuster holding one cue of lookahead
#[derive(Debug)]
pub struct DurationAdjuster<I> {
    subtitles: I,
    min_duration: f64,
    // Cue read but not yet emitted
    carry: Option<Subtitle>,
    primed: bool,
}

impl<I> DurationAdjuster<I>
where
    I: Iterator<Item = Subtitle>,
{
    pub fn new(subtitles: I) -> Self {
        Self::with_min_duration(subtitles, DEFAULT_MIN_DURATION)
    }

    pub fn with_min_duration(subtitles: I, min_duration: f64) -> Self {
        DurationAdjuster {
            subtitles,
            min_duration,
            carry: None,
            primed: false,
        }
    }
}

impl<I> Iterator for DurationAdjuster<I>
where
    I: Iterator<Item = Subtitle>,
{
    type Item = Subtitle;

    fn next(&mut self) -> Option<Subtitle> {
        if !self.primed {
            self.primed = true;
            self.carry = self.subtitles.next();
        }

        let mut carry = self.carry.take()?;
        let Some(next) = self.subtitles.next() else {
            return Some(carry);
        };

        if carry.duration() < self.min_duration {
            let target_end = carry.start_time() + self.min_duration;
            let next_start = next.start_time();
            let new_end = if target_end > next_start {
                next_start
            } else {
                target_end
            };
            debug!(
                "Extending cue '{}' end from {:.3}s to {:.3}s",
                carry.text(),
                carry.end_time(),
                new_end
            );
            carry.set_end_time(new_end);
        }

        self.carry = Some(next);
        Some(carry)
    }
}

/// Apply minimum-duration repair to a cue stream
pub fn adjust_durations<I>(subtitles: I, min_duration: f64) -> DurationAdjuster<I::IntoIter>
where
    I: IntoIterator<Item = Subtitle>,
{
    DurationAdjuster::with_min_duration(subtitles.into_iter(), min_duration)
}
