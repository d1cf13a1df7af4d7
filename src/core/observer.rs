use rustc_hash::FxHashSet;

use super::state::{Job, JobId, ReadyQueue};

/// Per-step invariant checks over the engine's state.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    admitted: FxHashSet<JobId>,
    finished: FxHashSet<JobId>,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admitted(&mut self, job: JobId) {
        let fresh = self.admitted.insert(job);
        debug_assert!(fresh, "Job {job} admitted twice");
    }

    pub fn finished(&mut self, job: JobId) {
        let fresh = self.finished.insert(job);
        debug_assert!(fresh, "Job {job} finished twice");
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, queue: &ReadyQueue, running: Option<&Job>) {
        self.step += 1;

        if let Some(job) = running {
            debug_assert!(
                job.remaining_burst > 0,
                "Running job {} has no burst left",
                job.original_index
            );
            debug_assert!(
                !self.finished.contains(&job.original_index),
                "Finished job {} is running again",
                job.original_index
            );
            debug_assert!(
                !queue.contains(job.original_index),
                "Running job {} must not appear in the ready queue",
                job.original_index
            );
        }

        for job in queue.as_slice() {
            debug_assert!(
                job.remaining_burst > 0,
                "Queued job {} has no burst left",
                job.original_index
            );
            debug_assert!(
                self.admitted.contains(&job.original_index),
                "Queued job {} was never admitted",
                job.original_index
            );
            debug_assert!(
                !self.finished.contains(&job.original_index),
                "Finished job {} still present in the ready queue",
                job.original_index
            );
        }

        if let Some(policy) = queue.policy() {
            debug_assert!(
                policy.is_sorted(queue.as_slice()),
                "Ready queue out of order under {policy:?}"
            );
        }
    }
}
