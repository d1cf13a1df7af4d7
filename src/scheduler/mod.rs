pub mod config;
pub mod policy;

pub use config::{
    ALGORITHM_FCFS, ALGORITHM_PRIORITY, ALGORITHM_RR, ALGORITHM_SJF, Algorithm, AlgorithmConfig,
    AlgorithmConfigBuilder, ReportKind, standard_suite,
};
pub use policy::OrderingPolicy;
