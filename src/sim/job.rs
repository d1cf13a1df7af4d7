use crate::core::{Job, JobId, Ticks};

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// A workload record as read from input, before it is handed to an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub name: String,
    pub description: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: i32,
}

impl JobSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arrival_time,
            burst_time,
            priority,
        }
    }

    #[must_use]
    pub fn instantiate(&self, index: JobId) -> Job {
        Job::new(
            index,
            self.name.clone(),
            self.description.clone(),
            self.arrival_time,
            self.burst_time,
            self.priority,
        )
    }

    #[must_use]
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.name, self.description, self.arrival_time, self.burst_time, self.priority
        )
    }
}
