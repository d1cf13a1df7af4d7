use tracing::info;

use super::{config::EngineConfig, job::JobSpec};
use crate::{
    core::{Clock, DEFAULT_QUEUE_CAPACITY, Job, RunReport, SchedCore, SchedEvent},
    error::Result,
    scheduler::AlgorithmConfig,
};

/// A frozen workload that any number of algorithms can be run against.
///
/// Every run gets its own copy of the jobs and its own engine, so runs never
/// observe each other's mutations.
#[derive(Debug, Clone)]
pub struct Sim {
    jobs: Vec<Job>,
    capacity: usize,
}

impl Sim {
    pub fn new(specs: &[JobSpec]) -> Self {
        let jobs = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| spec.instantiate(index))
            .collect();
        Self::from_jobs(jobs)
    }

    pub fn from_jobs(mut jobs: Vec<Job>) -> Self {
        jobs.sort_by(|a, b| {
            a.arrival_time
                .cmp(&b.arrival_time)
                .then_with(|| a.original_index.cmp(&b.original_index))
        });
        Self {
            jobs,
            capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn run<C: Clock>(
        &self,
        config: &AlgorithmConfig,
        clock: C,
        sink: impl FnMut(&SchedEvent),
    ) -> Result<RunReport> {
        SchedCore::new(config.clone(), self.jobs.clone(), self.capacity, clock)?.run(sink)
    }

    /// Run every config in turn, each with a clock from `make_clock`.
    pub fn run_suite<C: Clock>(
        &self,
        configs: &[AlgorithmConfig],
        mut make_clock: impl FnMut() -> Result<C>,
        mut sink: impl FnMut(&SchedEvent),
    ) -> Result<Vec<RunReport>> {
        let mut reports = Vec::with_capacity(configs.len());
        for config in configs {
            let report = self.run(config, make_clock()?, &mut sink)?;
            info!(
                algorithm = config.name(),
                dispatches = report.stats.dispatches,
                idle = report.stats.idle_time,
                "suite run done"
            );
            reports.push(report);
        }
        Ok(reports)
    }

    /// [`Sim::run_suite`] with capacity and clocks taken from `engine`.
    pub fn run_configured(
        &self,
        configs: &[AlgorithmConfig],
        engine: &EngineConfig,
        sink: impl FnMut(&SchedEvent),
    ) -> Result<Vec<RunReport>> {
        engine.validate()?;
        self.clone()
            .with_capacity(engine.capacity)
            .run_suite(configs, || engine.clock.clock(), sink)
    }
}
