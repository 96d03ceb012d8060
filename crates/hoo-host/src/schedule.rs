//! Refresh-synchronized scheduling and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// "Run me once at the next display refresh."
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Outcome of waiting on a [`RefreshSource`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RefreshSignal {
    /// A refresh happened; run one iteration.
    Refresh,
    /// No further refreshes will come.
    Closed,
}

/// Scheduler that can also be waited on, for hosts that hand control to the
/// driver instead of calling back into it.
pub trait RefreshSource: FrameScheduler {
    /// Blocks until the next refresh.
    ///
    /// Sources only deliver a refresh that was requested; with no pending
    /// request they report [`RefreshSignal::Closed`].
    fn wait_for_refresh(&mut self) -> RefreshSignal;
}

/// Cloneable stop flag for a running driver.
#[derive(Debug, Clone, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Headless refresh source ticking at a fixed rate.
///
/// Sleeps until the next refresh deadline; a late iteration does not cause a
/// burst of catch-up refreshes.
#[derive(Debug)]
pub struct IntervalRefresh {
    interval: Duration,
    next_deadline: Option<Instant>,
    pending: bool,
    remaining: Option<u64>,
}

impl IntervalRefresh {
    /// Source ticking every `interval`, forever.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: None,
            pending: false,
            remaining: None,
        }
    }

    /// Source ticking `hz` times per second.
    pub fn with_rate(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }

    /// Stops delivering refreshes after `count` of them.
    pub fn limit(mut self, count: u64) -> Self {
        self.remaining = Some(count);
        self
    }

    /// Queues the first refresh.
    pub fn primed(mut self) -> Self {
        self.pending = true;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameScheduler for IntervalRefresh {
    fn request_frame(&mut self) {
        self.pending = true;
    }
}

impl RefreshSource for IntervalRefresh {
    fn wait_for_refresh(&mut self) -> RefreshSignal {
        if !self.pending {
            return RefreshSignal::Closed;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return RefreshSignal::Closed;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }

        self.next_deadline = Some(deadline.max(now) + self.interval);
        self.pending = false;
        RefreshSignal::Refresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_token_is_shared_between_clones() {
        let token = StopToken::new();
        let other = token.clone();
        assert!(!other.is_stopped());
        token.stop();
        assert!(other.is_stopped());
    }

    #[test]
    fn unrequested_source_is_closed() {
        let mut source = IntervalRefresh::new(Duration::ZERO);
        assert_eq!(source.wait_for_refresh(), RefreshSignal::Closed);
    }

    #[test]
    fn each_request_yields_one_refresh() {
        let mut source = IntervalRefresh::new(Duration::ZERO).primed();
        assert_eq!(source.wait_for_refresh(), RefreshSignal::Refresh);
        assert_eq!(source.wait_for_refresh(), RefreshSignal::Closed);

        source.request_frame();
        source.request_frame();
        assert_eq!(source.wait_for_refresh(), RefreshSignal::Refresh);
        assert_eq!(source.wait_for_refresh(), RefreshSignal::Closed);
    }

    #[test]
    fn limit_caps_delivered_refreshes() {
        let mut source = IntervalRefresh::new(Duration::ZERO).limit(2).primed();
        let mut delivered = 0;
        while source.wait_for_refresh() == RefreshSignal::Refresh {
            delivered += 1;
            source.request_frame();
        }
        assert_eq!(delivered, 2);
    }

    #[test]
    fn refreshes_are_paced_by_the_interval() {
        let interval = Duration::from_millis(5);
        let mut source = IntervalRefresh::new(interval).primed();
        let start = Instant::now();

        for _ in 0..3 {
            assert_eq!(source.wait_for_refresh(), RefreshSignal::Refresh);
            source.request_frame();
        }

        assert!(start.elapsed() >= interval * 2);
    }

    #[test]
    fn rate_is_converted_to_interval() {
        assert_eq!(IntervalRefresh::with_rate(50).interval(), Duration::from_millis(20));
        assert_eq!(IntervalRefresh::with_rate(0).interval(), Duration::from_secs(1));
    }
}
