use std::fmt;
use std::time::{Duration, Instant};

/// Elapsed time between the starts of two consecutive frames.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct FrameDelta(Duration);

impl FrameDelta {
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn as_duration(self) -> Duration {
        self.0
    }

    /// Whole milliseconds, truncated.
    pub fn as_millis(self) -> u128 {
        self.0.as_millis()
    }
}

/// Renders as a plain integer millisecond count, e.g. `16`.
impl fmt::Display for FrameDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_millis())
    }
}

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick (or since the clock baseline).
    pub delta: FrameDelta,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter, starting at zero.
    pub frame_index: u64,
}

/// Tracks the start of the most recent frame and produces deltas.
///
/// The baseline is supplied by the caller so that the first delta measures
/// whatever interval the caller chooses (for the driver: bootstrap completion
/// to first frame). Deltas are never clamped, only saturated at zero.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
}

impl FrameClock {
    /// Creates a clock whose first delta is measured from `baseline`.
    pub fn starting_at(baseline: Instant) -> Self {
        Self {
            last: baseline,
            frame_index: 0,
        }
    }

    /// Timestamp of the most recent tick (or the baseline before any tick).
    pub fn last(&self) -> Instant {
        self.last
    }

    /// Number of ticks taken so far.
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock to `now` and returns the frame snapshot.
    ///
    /// A timestamp earlier than the previous one yields a zero delta and
    /// leaves the baseline untouched, so the clock never moves backwards.
    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let delta = now.saturating_duration_since(self.last);
        self.last = self.last.max(now);

        let ft = FrameTime {
            delta: FrameDelta(delta),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}
