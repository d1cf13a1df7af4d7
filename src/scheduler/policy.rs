use std::cmp::Ordering;

use crate::core::Job;

/// Comparator selecting the order in which queued jobs are dispatched.
///
/// Every variant is a total order. `Null` treats all jobs as equal, so the
/// ready queue falls back to insertion order; this is what FCFS and
/// Round-Robin rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderingPolicy {
    Null,
    ShortestBurst,
    LowerPriorityValue,
}

impl OrderingPolicy {
    #[must_use]
    pub fn compare(self, a: &Job, b: &Job) -> Ordering {
        match self {
            Self::Null => Ordering::Equal,
            Self::ShortestBurst => a.remaining_burst.cmp(&b.remaining_burst),
            Self::LowerPriorityValue => a.priority.cmp(&b.priority),
        }
    }

    /// True when `jobs` is already in dispatch order under this policy.
    #[must_use]
    pub fn is_sorted(self, jobs: &[Job]) -> bool {
        jobs.windows(2)
            .all(|pair| self.compare(&pair[0], &pair[1]) != Ordering::Greater)
    }
}
