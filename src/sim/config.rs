use std::time::Duration;

use crate::{
    core::{DEFAULT_QUEUE_CAPACITY, SimClock, VirtualClock, WallClock},
    error::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// One tick per loop iteration, no sleeping.
    Virtual,
    /// Real time: a tick lasts `tick`, the loop polls every `sample`.
    Realtime { tick: Duration, sample: Duration },
}

impl ClockMode {
    /// A fresh clock for one run.
    pub fn clock(self) -> Result<SimClock> {
        Ok(match self {
            Self::Virtual => SimClock::Virtual(VirtualClock::new()),
            Self::Realtime { tick, sample } => SimClock::Wall(WallClock::new(tick, sample)?),
        })
    }
}

/// Settings shared by every engine run of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub capacity: usize,
    pub clock: ClockMode,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::invalid("ready queue capacity must be positive"));
        }
        self.clock.clock().map(|_| ())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
            clock: ClockMode::Virtual,
        }
    }
}
