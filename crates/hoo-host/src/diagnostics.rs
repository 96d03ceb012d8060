//! Frame-delta readout.
//!
//! Every display overwrites its previous value; only the latest delta is
//! visible.

use crate::time::FrameDelta;

/// Sink for the per-frame delta.
pub trait DeltaDisplay {
    fn publish(&mut self, delta: FrameDelta);
}

impl<F: FnMut(FrameDelta)> DeltaDisplay for F {
    fn publish(&mut self, delta: FrameDelta) {
        self(delta)
    }
}

/// Writes each delta to the log at trace level.
#[derive(Debug, Default)]
pub struct LogDisplay;

impl DeltaDisplay for LogDisplay {
    fn publish(&mut self, delta: FrameDelta) {
        log::trace!("frame delta: {delta} ms");
    }
}

/// Keeps only the most recent delta.
#[derive(Debug, Default)]
pub struct LatestDelta {
    latest: Option<FrameDelta>,
}

impl LatestDelta {
    pub fn get(&self) -> Option<FrameDelta> {
        self.latest
    }
}

impl DeltaDisplay for LatestDelta {
    fn publish(&mut self, delta: FrameDelta) {
        self.latest = Some(delta);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn latest_delta_overwrites() {
        let mut display = LatestDelta::default();
        assert_eq!(display.get(), None);

        display.publish(FrameDelta::new(Duration::from_millis(30)));
        display.publish(FrameDelta::new(Duration::from_millis(16)));
        assert_eq!(display.get(), Some(FrameDelta::new(Duration::from_millis(16))));
    }

    #[test]
    fn closures_are_displays() {
        let mut shown = String::new();
        let mut display = |d: FrameDelta| shown = d.to_string();
        display.publish(FrameDelta::new(Duration::from_millis(7)));
        assert_eq!(shown, "7");
    }
}
