//! Frame driver: paces the engine at the host's refresh cadence.
//!
//! One iteration takes a timestamp, publishes the delta since the previous
//! iteration, advances the engine, then asks the scheduler for the next
//! refresh. The first delta is measured from bootstrap completion, so it
//! reports startup-to-first-frame latency rather than an inter-frame interval.

use std::str::FromStr;
use std::time::Instant;

use crate::bootstrap::Bootstrapped;
use crate::diagnostics::DeltaDisplay;
use crate::engine::Engine;
use crate::error::FrameAdvanceError;
use crate::schedule::{FrameScheduler, RefreshSignal, RefreshSource, StopToken};
use crate::time::{Clock, FrameClock, FrameTime};

/// Driver lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverState {
    /// Waiting for the next refresh.
    Scheduled,
    /// Executing an iteration. Only held inside [`FrameDriver::step`], so
    /// [`FrameDriver::state`] never reports it.
    Running,
    /// No further iterations will run.
    Stopped,
}

/// What to do when [`Engine::advance_frame`] fails.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FrameErrorPolicy {
    /// Log a warning and keep scheduling frames.
    LogAndContinue,
    /// Log an error and stop the driver.
    #[default]
    LogAndHalt,
    /// Log an error, stop the driver and return the error to the caller.
    Escalate,
}

impl FromStr for FrameErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "continue" => Ok(FrameErrorPolicy::LogAndContinue),
            "halt" => Ok(FrameErrorPolicy::LogAndHalt),
            "escalate" => Ok(FrameErrorPolicy::Escalate),
            other => Err(format!(
                "unknown frame error policy `{other}` (expected `continue`, `halt` or `escalate`)"
            )),
        }
    }
}

/// Result of a single [`FrameDriver::step`].
#[derive(Debug, Copy, Clone)]
pub enum StepOutcome {
    /// The engine advanced and the next frame was requested.
    Advanced(FrameTime),
    /// The engine failed but the policy kept the loop alive.
    Failed(FrameTime),
    /// The driver is stopped; nothing was scheduled.
    Stopped,
}

/// Totals reported by [`FrameDriver::run`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RunSummary {
    /// Iterations that reached the engine call.
    pub frames: u64,
    /// Iterations whose engine call failed.
    pub failures: u64,
    pub state: DriverState,
}

/// Owns the engine instance and drives it one frame per refresh.
pub struct FrameDriver<E, C, D> {
    engine: E,
    clock: C,
    display: D,
    frame_clock: FrameClock,
    policy: FrameErrorPolicy,
    stop: StopToken,
    state: DriverState,
    failures: u64,
}

impl<E, C, D> FrameDriver<E, C, D>
where
    E: Engine,
    C: Clock,
    D: DeltaDisplay,
{
    /// Creates a driver whose first delta is measured from `baseline`.
    pub fn new(engine: E, clock: C, display: D, baseline: Instant) -> Self {
        Self {
            engine,
            clock,
            display,
            frame_clock: FrameClock::starting_at(baseline),
            policy: FrameErrorPolicy::default(),
            stop: StopToken::new(),
            state: DriverState::Scheduled,
            failures: 0,
        }
    }

    /// Creates a driver from a finished bootstrap.
    pub fn from_bootstrap(bootstrapped: Bootstrapped<E>, clock: C, display: D) -> Self {
        let Bootstrapped { engine, completed_at } = bootstrapped;
        Self::new(engine, clock, display, completed_at)
    }

    pub fn with_policy(mut self, policy: FrameErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the driver's stop token with a shared one.
    pub fn with_stop_token(mut self, stop: StopToken) -> Self {
        self.stop = stop;
        self
    }

    /// Token that stops this driver before its next iteration.
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Iterations that reached the engine call.
    pub fn frames(&self) -> u64 {
        self.frame_clock.frames()
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Runs one iteration and requests the next one from `scheduler`.
    ///
    /// Returns `Err` only under [`FrameErrorPolicy::Escalate`].
    pub fn step<S>(&mut self, scheduler: &mut S) -> Result<StepOutcome, FrameAdvanceError>
    where
        S: FrameScheduler + ?Sized,
    {
        if self.state == DriverState::Stopped || self.stop.is_stopped() {
            self.state = DriverState::Stopped;
            return Ok(StepOutcome::Stopped);
        }

        self.state = DriverState::Running;

        let ft = self.frame_clock.tick(self.clock.now());
        self.display.publish(ft.delta);

        match self.engine.advance_frame() {
            Ok(()) => {
                scheduler.request_frame();
                self.state = DriverState::Scheduled;
                Ok(StepOutcome::Advanced(ft))
            }
            Err(err) => {
                self.failures += 1;
                self.handle_failure(ft, err, scheduler)
            }
        }
    }

    fn handle_failure<S>(
        &mut self,
        ft: FrameTime,
        err: FrameAdvanceError,
        scheduler: &mut S,
    ) -> Result<StepOutcome, FrameAdvanceError>
    where
        S: FrameScheduler + ?Sized,
    {
        match self.policy {
            FrameErrorPolicy::LogAndContinue => {
                log::warn!("frame {} failed, continuing: {err}", ft.frame_index);
                scheduler.request_frame();
                self.state = DriverState::Scheduled;
                Ok(StepOutcome::Failed(ft))
            }
            FrameErrorPolicy::LogAndHalt => {
                log::error!("frame {} failed, halting frame loop: {err}", ft.frame_index);
                self.state = DriverState::Stopped;
                Ok(StepOutcome::Stopped)
            }
            FrameErrorPolicy::Escalate => {
                log::error!("frame {} failed: {err}", ft.frame_index);
                self.state = DriverState::Stopped;
                Err(err)
            }
        }
    }

    /// Drives iterations from `refresh` until it closes or the driver stops.
    pub fn run<R>(&mut self, refresh: &mut R) -> Result<RunSummary, FrameAdvanceError>
    where
        R: RefreshSource + ?Sized,
    {
        while self.state != DriverState::Stopped {
            if refresh.wait_for_refresh() == RefreshSignal::Closed {
                log::debug!("refresh source closed after {} frames", self.frames());
                break;
            }
            if let StepOutcome::Stopped = self.step(refresh)? {
                break;
            }
        }

        Ok(RunSummary {
            frames: self.frames(),
            failures: self.failures,
            state: self.state,
        })
    }
}
