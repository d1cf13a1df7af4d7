use crate::{
    error::{Error, Result},
    scheduler::OrderingPolicy,
};

pub type Ticks = u64;
// Position of the job in the loaded workload
pub type JobId = usize;

/// Upper bound on simultaneously queued jobs unless configured otherwise.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Dispatching,
    Running,
    Completing,
    Preempting,
}

/// One schedulable unit of work, as owned by a single engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub original_index: JobId,
    pub name: String,
    pub description: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining_burst: Ticks,
    pub priority: i32,
    // Last time the job became ready; differs from arrival_time after preemption
    pub ready_since: Ticks,
}

impl Job {
    pub fn new(
        original_index: JobId,
        name: impl Into<String>,
        description: impl Into<String>,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: i32,
    ) -> Self {
        Self {
            original_index,
            name: name.into(),
            description: description.into(),
            arrival_time,
            burst_time,
            remaining_burst: burst_time,
            priority,
            ready_since: arrival_time,
        }
    }

    /// Charge `quantum` ticks of service and mark the job ready again at `now`.
    pub fn requeue(&mut self, now: Ticks, quantum: Ticks) {
        debug_assert!(
            quantum < self.remaining_burst,
            "Job {} preempted with {} ticks left but charged {quantum}",
            self.original_index,
            self.remaining_burst
        );
        self.remaining_burst = self.remaining_burst.saturating_sub(quantum);
        self.ready_since = now;
    }
}

/// Admitted, unfinished jobs kept in dispatch order.
///
/// Every insertion re-sorts the whole sequence with a stable sort, so jobs
/// that compare equal under the policy keep their insertion order.
#[derive(Debug, Clone)]
pub struct ReadyQueue {
    jobs: Vec<Job>,
    capacity: usize,
    policy: Option<OrderingPolicy>,
}

impl ReadyQueue {
    #[must_use]
    pub fn new(policy: OrderingPolicy, capacity: usize) -> Self {
        Self {
            jobs: Vec::with_capacity(capacity.min(DEFAULT_QUEUE_CAPACITY)),
            capacity,
            policy: Some(policy),
        }
    }

    /// A queue that refuses insertions until a policy is set.
    #[must_use]
    pub const fn unordered(capacity: usize) -> Self {
        Self {
            jobs: Vec::new(),
            capacity,
            policy: None,
        }
    }

    pub fn set_policy(&mut self, policy: OrderingPolicy) {
        self.policy = Some(policy);
        self.jobs.sort_by(|a, b| policy.compare(a, b));
    }

    #[must_use]
    pub const fn policy(&self) -> Option<OrderingPolicy> {
        self.policy
    }

    pub fn enqueue(&mut self, job: Job) -> Result<()> {
        if self.jobs.len() >= self.capacity {
            return Err(Error::ResourceExhausted {
                capacity: self.capacity,
            });
        }
        let policy = self
            .policy
            .ok_or_else(|| Error::invalid("ready queue has no ordering policy"))?;

        self.jobs.push(job);
        self.jobs.sort_by(|a, b| policy.compare(a, b));
        Ok(())
    }

    pub fn dequeue(&mut self) -> Result<Job> {
        if self.jobs.is_empty() {
            return Err(Error::EmptyQueue);
        }
        Ok(self.jobs.remove(0))
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Job> {
        self.jobs.first()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Job] {
        &self.jobs
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.jobs.iter().any(|job| job.original_index == id)
    }
}
