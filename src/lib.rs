pub mod cli;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Job, RunReport, SchedCore, SchedEvent, Summary};
pub use crate::error::{Error, Result};
pub use crate::scheduler::{Algorithm, AlgorithmConfig, OrderingPolicy};
pub use crate::sim::{JobSpec, Sim};
