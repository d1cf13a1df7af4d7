use crate::core::{JobId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Completed,
    // Quantum expired with burst left over; the job went back to the queue
    Preempted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Summary {
    AverageWaitingTime(f64),
    TotalTurnaroundTime(Ticks),
}

/// Emitted by the engine in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedEvent {
    RunStarted {
        algorithm: String,
    },
    // A stint on the CPU ended, either by completion or by preemption
    Dispatch {
        start: Ticks,
        end: Ticks,
        job: JobId,
        name: String,
        description: String,
        outcome: DispatchOutcome,
    },
    // Emitted only when the idle span closes
    Idle {
        start: Ticks,
        end: Ticks,
    },
    RunFinished {
        summary: Summary,
    },
}
