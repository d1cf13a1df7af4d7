pub mod config;
pub mod driver;
pub mod job;
pub mod loader;
pub mod report;
pub mod workload;

pub use config::{ClockMode, EngineConfig};
pub use driver::Sim;
pub use job::{JobSpec, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
pub use loader::{load_workload, parse_workload};
pub use report::ConsoleReport;
pub use workload::{WorkloadParams, bernoulli_jobs, to_csv};
