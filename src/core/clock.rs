//! Time sources for the engine loop.
//!
//! The engine samples the clock once per loop iteration and then calls
//! [`Clock::wait`]. A [`VirtualClock`] makes every iteration exactly one tick,
//! which keeps runs deterministic. A [`WallClock`] reproduces real time passing:
//! ticks are derived from elapsed wall time and the loop polls at a shorter
//! interval, so several iterations may observe the same tick.

use std::time::{Duration, Instant};

use super::Ticks;
use crate::error::{Error, Result};

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

pub trait Clock {
    /// Reset the origin. Called once when a run begins.
    fn start(&mut self);

    /// Whole ticks elapsed since [`Clock::start`].
    fn now(&self) -> Ticks;

    /// Suspend until the next sampling point.
    fn wait(&mut self);
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn start(&mut self) {
        (**self).start();
    }

    fn now(&self) -> Ticks {
        (**self).now()
    }

    fn wait(&mut self) {
        (**self).wait();
    }
}

/// Deterministic clock advancing one tick per wait.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Ticks,
}

impl VirtualClock {
    #[must_use]
    pub const fn new() -> Self {
        Self { now: 0 }
    }

    pub const fn advance(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }
}

impl Clock for VirtualClock {
    fn start(&mut self) {
        self.now = 0;
    }

    fn now(&self) -> Ticks {
        self.now
    }

    fn wait(&mut self) {
        self.advance(1);
    }
}

/// Real-time clock: one tick per `tick` of wall time, polled every `sample`.
#[derive(Debug, Clone)]
pub struct WallClock {
    started: Instant,
    tick: Duration,
    sample: Duration,
}

impl WallClock {
    pub fn new(tick: Duration, sample: Duration) -> Result<Self> {
        if tick.is_zero() {
            return Err(Error::invalid("tick duration must be positive"));
        }
        if sample.is_zero() || sample > tick {
            return Err(Error::invalid(
                "sample interval must be positive and no longer than a tick",
            ));
        }
        Ok(Self {
            started: Instant::now(),
            tick,
            sample,
        })
    }

    #[must_use]
    pub const fn tick(&self) -> Duration {
        self.tick
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self {
            started: Instant::now(),
            tick: DEFAULT_TICK,
            sample: DEFAULT_SAMPLE_INTERVAL,
        }
    }
}

impl Clock for WallClock {
    fn start(&mut self) {
        self.started = Instant::now();
    }

    fn now(&self) -> Ticks {
        let ticks = self.started.elapsed().as_nanos() / self.tick.as_nanos();
        Ticks::try_from(ticks).unwrap_or(Ticks::MAX)
    }

    fn wait(&mut self) {
        std::thread::sleep(self.sample);
    }
}

/// Either clock, chosen at runtime.
#[derive(Debug, Clone)]
pub enum SimClock {
    Virtual(VirtualClock),
    Wall(WallClock),
}

impl Clock for SimClock {
    fn start(&mut self) {
        match self {
            Self::Virtual(clock) => clock.start(),
            Self::Wall(clock) => clock.start(),
        }
    }

    fn now(&self) -> Ticks {
        match self {
            Self::Virtual(clock) => clock.now(),
            Self::Wall(clock) => clock.now(),
        }
    }

    fn wait(&mut self) {
        match self {
            Self::Virtual(clock) => clock.wait(),
            Self::Wall(clock) => clock.wait(),
        }
    }
}
