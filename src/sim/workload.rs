use rand::prelude::*;

use super::job::JobSpec;
use crate::{
    core::Ticks,
    error::{Error, Result},
};

/// Parameters of a seeded Bernoulli arrival process.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadParams {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
    pub max_priority: i32,
    pub seed: u64,
}

impl Default for WorkloadParams {
    fn default() -> Self {
        Self {
            ticks: 50,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            max_priority: 5,
            seed: 0,
        }
    }
}

/// At every tick a job arrives with probability `p_arrival`; it is short with
/// probability `p_short`. The same parameters always produce the same jobs.
pub fn bernoulli_jobs(params: &WorkloadParams) -> Result<Vec<JobSpec>> {
    for (label, p) in [("p_arrival", params.p_arrival), ("p_short", params.p_short)] {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::invalid(format!("{label} must lie in [0, 1], got {p}")));
        }
    }
    if params.short_burst == 0 || params.long_burst == 0 {
        return Err(Error::invalid("burst lengths must be positive"));
    }
    if params.max_priority < 0 {
        return Err(Error::invalid("max priority must not be negative"));
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut jobs = Vec::new();

    for t in 0..params.ticks {
        if rng.random::<f64>() < params.p_arrival {
            let (burst_time, kind) = if rng.random::<f64>() < params.p_short {
                (params.short_burst, "short")
            } else {
                (params.long_burst, "long")
            };
            let priority = rng.random_range(0..=params.max_priority);

            jobs.push(JobSpec::new(
                format!("P{}", jobs.len() + 1),
                format!("{kind} job"),
                t,
                burst_time,
                priority,
            ));
        }
    }

    Ok(jobs)
}

#[must_use]
pub fn to_csv(jobs: &[JobSpec]) -> String {
    jobs.iter().fold(String::new(), |mut csv, job| {
        csv.push_str(&job.to_csv_line());
        csv.push('\n');
        csv
    })
}
