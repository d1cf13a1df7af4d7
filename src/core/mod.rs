pub mod clock;
pub mod driver;
pub mod event;
pub mod observer;
pub mod state;
pub mod stats;

pub use clock::{Clock, SimClock, VirtualClock, WallClock};
pub use driver::{RunReport, SchedCore};
pub use event::{DispatchOutcome, SchedEvent, Summary};
pub use state::{DEFAULT_QUEUE_CAPACITY, EngineState, Job, JobId, ReadyQueue, Ticks};
pub use stats::{JobOutcome, RunStats};
