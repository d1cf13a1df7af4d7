use average::{Estimate, Mean};
use rustc_hash::FxHashMap;

use super::{Job, JobId, Summary, Ticks};
use crate::scheduler::ReportKind;

/// What happened to one job during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub job: JobId,
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub first_start: Option<Ticks>,
    pub completion: Option<Ticks>,
    pub dispatches: u32,
}

impl JobOutcome {
    fn new(job: &Job) -> Self {
        Self {
            job: job.original_index,
            name: job.name.clone(),
            arrival_time: job.arrival_time,
            burst_time: job.burst_time,
            first_start: None,
            completion: None,
            dispatches: 0,
        }
    }

    #[must_use]
    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.completion
            .map(|done| done.saturating_sub(self.arrival_time))
    }

    /// Time spent admitted but not running.
    #[must_use]
    pub fn waiting_time(&self) -> Option<Ticks> {
        self.turnaround_time()
            .map(|turnaround| turnaround.saturating_sub(self.burst_time))
    }

    /// Time from arrival to first dispatch.
    #[must_use]
    pub fn response_time(&self) -> Option<Ticks> {
        self.first_start
            .map(|start| start.saturating_sub(self.arrival_time))
    }
}

/// Aggregate statistics of one finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub job_count: usize,
    pub total_waiting_time: Ticks,
    pub average_waiting_time: f64,
    pub average_response_time: f64,
    pub total_turnaround_time: Ticks,
    pub idle_time: Ticks,
    pub dispatches: u64,
    pub preemptions: u64,
    // Ordered by JobId
    pub jobs: Vec<JobOutcome>,
}

impl RunStats {
    #[must_use]
    pub fn summary(&self, kind: ReportKind) -> Summary {
        match kind {
            ReportKind::AverageWaitingTime => Summary::AverageWaitingTime(self.average_waiting_time),
            ReportKind::TotalTurnaroundTime => {
                Summary::TotalTurnaroundTime(self.total_turnaround_time)
            }
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatsCollector {
    outcomes: FxHashMap<JobId, JobOutcome>,
    total_waiting_time: Ticks,
    total_turnaround_time: Ticks,
    idle_time: Ticks,
    dispatches: u64,
    preemptions: u64,
}

impl StatsCollector {
    pub fn admitted(&mut self, job: &Job) {
        self.outcomes
            .entry(job.original_index)
            .or_insert_with(|| JobOutcome::new(job));
    }

    pub fn dispatched(&mut self, job: &Job, now: Ticks) {
        self.dispatches += 1;
        let outcome = self
            .outcomes
            .entry(job.original_index)
            .or_insert_with(|| JobOutcome::new(job));
        outcome.dispatches += 1;
        outcome.first_start.get_or_insert(now);
    }

    pub fn preempted(&mut self) {
        self.preemptions += 1;
    }

    pub fn completed(&mut self, job: &Job, now: Ticks) {
        self.total_waiting_time += now.saturating_sub(job.burst_time + job.arrival_time);
        if let Some(outcome) = self.outcomes.get_mut(&job.original_index) {
            outcome.completion = Some(now);
        }
    }

    pub fn idled(&mut self, start: Ticks, end: Ticks) {
        self.idle_time += end.saturating_sub(start);
    }

    pub fn finished_at(&mut self, now: Ticks) {
        self.total_turnaround_time = now;
    }

    pub fn finish(self, job_count: usize) -> RunStats {
        let mut jobs: Vec<JobOutcome> = self.outcomes.into_values().collect();
        jobs.sort_by_key(|outcome| outcome.job);

        let (average_waiting_time, average_response_time) = if job_count == 0 {
            (0.0, 0.0)
        } else {
            let response: Mean = jobs
                .iter()
                .filter_map(JobOutcome::response_time)
                .map(|t| t as f64)
                .collect();
            (
                self.total_waiting_time as f64 / job_count as f64,
                response.estimate(),
            )
        };

        RunStats {
            job_count,
            total_waiting_time: self.total_waiting_time,
            average_waiting_time,
            average_response_time,
            total_turnaround_time: self.total_turnaround_time,
            idle_time: self.idle_time,
            dispatches: self.dispatches,
            preemptions: self.preemptions,
            jobs,
        }
    }
}
