//! Drives the defense simulator once per interval
//!
//! The stop flag and the simulator state are both checked before every
//! tick, so once either says stop no further tick touches the session.

use super::defense::{DefenseSimulator, TickReport};
use super::random::RandomSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Source of waiting between ticks
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Real wall-clock sleeping
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records requested sleeps without waiting. Used for fast-forward runs.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pub slept: Duration,
}

impl Clock for ManualClock {
    fn sleep(&mut self, duration: Duration) {
        self.slept += duration;
    }
}

/// Cancels a running ticker. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerExit {
    /// The stop handle was triggered
    Cancelled,
    /// The simulator was stopped (or never started)
    SimulatorIdle,
    /// The tick budget ran out
    Exhausted,
    /// The observer asked to end the run
    Finished,
}

/// What the observer wants after seeing a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Break,
}

/// Periodic driver for a [`DefenseSimulator`]
pub struct DefenseTicker<C: Clock> {
    interval: Duration,
    clock: C,
    stop: StopHandle,
}

impl<C: Clock> DefenseTicker<C> {
    pub fn new(interval: Duration, clock: C) -> Self {
        Self {
            interval,
            clock,
            stop: StopHandle::new(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Tick `sim` up to `max_ticks` times, waiting one interval before
    /// each. `observe` sees the simulator after every tick and may block
    /// attacks, stop the simulator, or end the run.
    pub fn run<F>(
        &mut self,
        sim: &mut DefenseSimulator,
        rng: &mut dyn RandomSource,
        max_ticks: u32,
        mut observe: F,
    ) -> TickerExit
    where
        F: FnMut(&mut DefenseSimulator, &TickReport) -> Flow,
    {
        for _ in 0..max_ticks {
            self.clock.sleep(self.interval);

            if self.stop.is_stopped() {
                debug!("Ticker cancelled");
                return TickerExit::Cancelled;
            }
            let Some(report) = sim.tick(rng) else {
                debug!("Ticker found simulator idle");
                return TickerExit::SimulatorIdle;
            };
            if observe(sim, &report) == Flow::Break {
                return TickerExit::Finished;
            }
        }
        TickerExit::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefenseConfig;
    use crate::game::random::ScriptedSource;

    fn ticker() -> DefenseTicker<ManualClock> {
        DefenseTicker::new(Duration::from_secs(1), ManualClock::default())
    }

    #[test]
    fn runs_until_budget_exhausted() {
        let mut sim = DefenseSimulator::new(DefenseConfig::default());
        sim.start();
        let mut ticker = ticker();
        let exit = ticker.run(&mut sim, &mut ScriptedSource::new(), 5, |_, _| Flow::Continue);
        assert_eq!(exit, TickerExit::Exhausted);
        assert_eq!(sim.session().unwrap().elapsed_seconds, 5);
        assert_eq!(ticker.clock().slept, Duration::from_secs(5));
    }

    #[test]
    fn idle_simulator_is_never_ticked() {
        let mut sim = DefenseSimulator::default();
        let exit = ticker().run(&mut sim, &mut ScriptedSource::new(), 5, |_, _| Flow::Continue);
        assert_eq!(exit, TickerExit::SimulatorIdle);
    }

    #[test]
    fn stopping_the_simulator_halts_ticks() {
        let mut sim = DefenseSimulator::default();
        sim.start();
        let mut seen = 0;
        let exit = ticker().run(&mut sim, &mut ScriptedSource::new(), 10, |sim, report| {
            seen += 1;
            if report.elapsed_seconds == 3 {
                sim.stop();
            }
            Flow::Continue
        });
        assert_eq!(exit, TickerExit::SimulatorIdle);
        assert_eq!(seen, 3);
        assert!(sim.session().is_none());
    }

    #[test]
    fn stop_handle_cancels_before_next_tick() {
        let mut sim = DefenseSimulator::default();
        sim.start();
        let mut ticker = ticker();
        let handle = ticker.stop_handle();
        let exit = ticker.run(&mut sim, &mut ScriptedSource::new(), 10, |_, report| {
            if report.elapsed_seconds == 2 {
                handle.stop();
            }
            Flow::Continue
        });
        assert_eq!(exit, TickerExit::Cancelled);
        assert_eq!(sim.session().unwrap().elapsed_seconds, 2);
    }

    #[test]
    fn observer_can_finish_early() {
        let mut sim = DefenseSimulator::default();
        sim.start();
        let exit = ticker().run(&mut sim, &mut ScriptedSource::new(), 10, |_, _| Flow::Break);
        assert_eq!(exit, TickerExit::Finished);
        assert_eq!(sim.session().unwrap().elapsed_seconds, 1);
    }
}
