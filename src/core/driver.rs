use tracing::{debug, info, trace};

use super::{
    clock::Clock,
    event::{DispatchOutcome, SchedEvent, Summary},
    observer::Observer,
    state::{EngineState, Job, ReadyQueue, Ticks},
    stats::{RunStats, StatsCollector},
};
use crate::{
    error::{Error, Result},
    scheduler::AlgorithmConfig,
};

/// Everything one engine run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub algorithm: String,
    pub events: Vec<SchedEvent>,
    pub stats: RunStats,
    pub summary: Summary,
}

#[derive(Debug)]
struct Stint {
    job: Job,
    started: Ticks,
}

/// Discrete-time simulation of a single CPU under one algorithm.
///
/// Each loop iteration samples the clock and then, in order:
/// 1. admits every pending job whose arrival time has been reached,
/// 2. completes or preempts the running job,
/// 3. dispatches the head of the ready queue if the CPU is free,
/// 4. opens an idle interval if nothing can run yet.
///
/// The run ends when the last job completes with nothing pending or queued.
pub struct SchedCore<C: Clock> {
    config: AlgorithmConfig,
    clock: C,
    queue: ReadyQueue,
    // Sorted by arrival; `cursor` marks the first job not yet admitted
    pending: Vec<Job>,
    cursor: usize,
    running: Option<Stint>,
    idle_since: Option<Ticks>,
    state: EngineState,
    // States passed through during the latest step, in order
    transitions: Vec<EngineState>,
    stats: StatsCollector,
    observer: Observer,
    finished: bool,
}

impl<C: Clock> SchedCore<C> {
    /// Build an engine over a private copy of the workload. Starts the clock.
    pub fn new(
        config: AlgorithmConfig,
        mut jobs: Vec<Job>,
        capacity: usize,
        mut clock: C,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid("ready queue capacity must be positive"));
        }
        if let Some(job) = jobs.iter().find(|job| job.remaining_burst == 0) {
            return Err(Error::invalid(format!(
                "job '{}' has no burst time",
                job.name
            )));
        }
        jobs.sort_by_key(|job| job.arrival_time);
        clock.start();

        Ok(Self {
            queue: ReadyQueue::new(config.policy(), capacity),
            config,
            clock,
            pending: jobs,
            cursor: 0,
            running: None,
            idle_since: None,
            state: EngineState::Idle,
            transitions: Vec::new(),
            stats: StatsCollector::default(),
            observer: Observer::new(),
            finished: false,
        })
    }

    pub fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    pub fn now(&self) -> Ticks {
        self.clock.now()
    }

    /// The state the latest step ended in.
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Every state the latest step went through, e.g. `[Preempting, Dispatching]`.
    pub fn transitions(&self) -> &[EngineState] {
        &self.transitions
    }

    fn enter(&mut self, state: EngineState) {
        self.state = state;
        self.transitions.push(state);
    }

    pub const fn queue(&self) -> &ReadyQueue {
        &self.queue
    }

    pub fn running(&self) -> Option<&Job> {
        self.running.as_ref().map(|stint| &stint.job)
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    fn has_pending(&self) -> bool {
        self.cursor < self.pending.len()
    }

    /// Run one loop iteration at the clock's current tick.
    pub fn step(&mut self) -> Result<Vec<SchedEvent>> {
        let mut events = Vec::new();
        if self.finished {
            return Ok(events);
        }
        self.transitions.clear();
        let now = self.clock.now();

        self.admit_arrivals(now)?;

        if let Some(stint) = self.running.take() {
            let elapsed = now.saturating_sub(stint.started);
            if elapsed >= stint.job.remaining_burst {
                self.enter(EngineState::Completing);
                self.complete(stint, now, &mut events);

                if !self.has_pending() && self.queue.is_empty() {
                    self.stats.finished_at(now);
                    self.finished = true;
                    self.observer.observe(&self.queue, None);
                    return Ok(events);
                }
            } else if let Some(quantum) = self.config.quantum().filter(|&q| elapsed >= q) {
                self.enter(EngineState::Preempting);
                self.preempt(stint, quantum, now, &mut events)?;
            } else {
                self.enter(EngineState::Running);
                self.running = Some(stint);
            }
        }

        if self.running.is_none() && !self.queue.is_empty() {
            if let Some(start) = self.idle_since.take() {
                debug!(start, end = now, "idle interval closed");
                self.stats.idled(start, now);
                events.push(SchedEvent::Idle { start, end: now });
            }
            let job = self.queue.dequeue()?;
            debug!(job = %job.name, remaining = job.remaining_burst, now, "dispatch");
            self.stats.dispatched(&job, now);
            self.running = Some(Stint { job, started: now });
            self.enter(EngineState::Dispatching);
        }

        if self.running.is_none() && self.queue.is_empty() {
            if self.has_pending() {
                self.idle_since.get_or_insert(now);
                self.enter(EngineState::Idle);
            } else {
                // Only reachable with an empty workload
                self.stats.finished_at(now);
                self.finished = true;
            }
        }

        let running = self.running.as_ref().map(|stint| &stint.job);
        self.observer.observe(&self.queue, running);
        Ok(events)
    }

    fn admit_arrivals(&mut self, now: Ticks) -> Result<()> {
        while let Some(job) = self.pending.get(self.cursor) {
            if job.arrival_time > now {
                break;
            }
            let job = job.clone();
            trace!(job = %job.name, arrival = job.arrival_time, now, "admit");
            let id = job.original_index;
            self.stats.admitted(&job);
            self.queue.enqueue(job)?;
            self.observer.admitted(id);
            self.cursor += 1;
        }
        Ok(())
    }

    fn complete(&mut self, stint: Stint, now: Ticks, events: &mut Vec<SchedEvent>) {
        let Stint { job, started } = stint;
        debug!(job = %job.name, start = started, end = now, "completed");
        self.stats.completed(&job, now);
        self.observer.finished(job.original_index);
        events.push(SchedEvent::Dispatch {
            start: started,
            end: now,
            job: job.original_index,
            name: job.name,
            description: job.description,
            outcome: DispatchOutcome::Completed,
        });
    }

    fn preempt(
        &mut self,
        stint: Stint,
        quantum: Ticks,
        now: Ticks,
        events: &mut Vec<SchedEvent>,
    ) -> Result<()> {
        let Stint { mut job, started } = stint;
        debug!(
            job = %job.name,
            start = started,
            end = now,
            remaining = job.remaining_burst - quantum,
            "preempted"
        );
        events.push(SchedEvent::Dispatch {
            start: started,
            end: now,
            job: job.original_index,
            name: job.name.clone(),
            description: job.description.clone(),
            outcome: DispatchOutcome::Preempted,
        });
        self.stats.preempted();
        job.requeue(now, quantum);
        self.queue.enqueue(job)
    }

    /// Drive the loop to its terminal condition, forwarding each event to
    /// `sink` as it is emitted. Blocks the caller for the whole run.
    pub fn run(mut self, mut sink: impl FnMut(&SchedEvent)) -> Result<RunReport> {
        let algorithm = self.config.name().to_owned();
        let job_count = self.pending.len();
        info!(algorithm = %algorithm, jobs = job_count, "run started");

        let mut events = Vec::new();
        let mut emit = |event: SchedEvent, events: &mut Vec<SchedEvent>| {
            sink(&event);
            events.push(event);
        };

        emit(
            SchedEvent::RunStarted {
                algorithm: algorithm.clone(),
            },
            &mut events,
        );

        loop {
            for event in self.step()? {
                emit(event, &mut events);
            }
            if self.finished {
                break;
            }
            self.clock.wait();
        }

        let stats = self.stats.finish(job_count);
        let summary = stats.summary(self.config.report());
        info!(
            algorithm = %algorithm,
            steps = self.observer.steps(),
            ?summary,
            "run finished"
        );
        emit(SchedEvent::RunFinished { summary }, &mut events);

        Ok(RunReport {
            algorithm,
            events,
            stats,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::VirtualClock,
        scheduler::{Algorithm, ReportKind},
    };

    fn workload() -> Vec<Job> {
        vec![
            Job::new(0, "A", "alpha", 0, 5, 3),
            Job::new(1, "B", "bravo", 1, 3, 1),
            Job::new(2, "C", "charlie", 2, 1, 2),
        ]
    }

    fn engine(algorithm: Algorithm, quantum: Ticks) -> SchedCore<VirtualClock> {
        SchedCore::new(
            algorithm.config(quantum).unwrap(),
            workload(),
            16,
            VirtualClock::new(),
        )
        .unwrap()
    }

    fn stints(report: &RunReport) -> Vec<(Ticks, Ticks, &str)> {
        report
            .events
            .iter()
            .filter_map(|event| match event {
                SchedEvent::Dispatch {
                    start, end, name, ..
                } => Some((*start, *end, name.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn admission_precedes_dispatch_in_the_same_tick() {
        let mut engine = engine(Algorithm::Fcfs, 1);
        let events = engine.step().unwrap();
        assert!(events.is_empty());
        assert_eq!(engine.state(), EngineState::Dispatching);
        assert_eq!(engine.running().map(|j| j.name.as_str()), Some("A"));
        assert!(engine.queue().is_empty());
    }

    #[test]
    fn running_job_stays_on_cpu_until_its_burst_is_served() {
        let mut engine = engine(Algorithm::Fcfs, 1);
        engine.step().unwrap();
        for _ in 0..4 {
            engine.clock_mut().wait();
            assert!(engine.step().unwrap().is_empty());
            assert_eq!(engine.state(), EngineState::Running);
        }
        engine.clock_mut().wait();
        let events = engine.step().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(engine.running().map(|j| j.name.as_str()), Some("B"));
    }

    #[test]
    fn fcfs_runs_in_arrival_order() {
        let report = engine(Algorithm::Fcfs, 1).run(|_| {}).unwrap();
        assert_eq!(stints(&report), vec![(0, 5, "A"), (5, 8, "B"), (8, 9, "C")]);
        assert_eq!(report.stats.total_waiting_time, 10);
    }

    #[test]
    fn sjf_prefers_the_shortest_queued_job() {
        let report = engine(Algorithm::Sjf, 1).run(|_| {}).unwrap();
        assert_eq!(stints(&report), vec![(0, 5, "A"), (5, 6, "C"), (6, 9, "B")]);
        assert_eq!(report.summary, Summary::AverageWaitingTime(8.0 / 3.0));
    }

    #[test]
    fn priority_prefers_the_lowest_value() {
        let report = engine(Algorithm::Priority, 1).run(|_| {}).unwrap();
        assert_eq!(stints(&report), vec![(0, 5, "A"), (5, 8, "B"), (8, 9, "C")]);
    }

    #[test]
    fn round_robin_rotates_on_quantum_expiry() {
        let report = engine(Algorithm::RoundRobin, 2).run(|_| {}).unwrap();
        assert_eq!(
            stints(&report),
            vec![
                (0, 2, "A"),
                (2, 4, "B"),
                (4, 5, "C"),
                (5, 7, "A"),
                (7, 8, "B"),
                (8, 9, "A"),
            ]
        );
        assert_eq!(report.summary, Summary::TotalTurnaroundTime(9));
        assert_eq!(report.stats.preemptions, 3);
    }

    #[test]
    fn idle_gap_is_reported_when_it_closes() {
        let jobs = vec![Job::new(0, "A", "", 0, 2, 0), Job::new(1, "B", "", 5, 1, 0)];
        let config = Algorithm::RoundRobin.config(4).unwrap();
        let report = SchedCore::new(config, jobs, 4, VirtualClock::new())
            .unwrap()
            .run(|_| {})
            .unwrap();

        let idle: Vec<_> = report
            .events
            .iter()
            .filter(|e| matches!(e, SchedEvent::Idle { .. }))
            .collect();
        assert_eq!(idle, vec![&SchedEvent::Idle { start: 2, end: 5 }]);
        assert_eq!(report.stats.idle_time, 3);
        assert_eq!(report.stats.total_turnaround_time, 6);
    }

    #[test]
    fn leading_idle_before_first_arrival() {
        let jobs = vec![Job::new(0, "late", "", 3, 2, 0)];
        let config = Algorithm::Fcfs.config(1).unwrap();
        let report = SchedCore::new(config, jobs, 4, VirtualClock::new())
            .unwrap()
            .run(|_| {})
            .unwrap();

        assert_eq!(report.events[1], SchedEvent::Idle { start: 0, end: 3 });
        assert_eq!(report.stats.total_waiting_time, 0);
        assert_eq!(report.stats.total_turnaround_time, 5);
    }

    #[test]
    fn empty_workload_finishes_immediately() {
        let config = Algorithm::Fcfs.config(1).unwrap();
        let report = SchedCore::new(config, Vec::new(), 4, VirtualClock::new())
            .unwrap()
            .run(|_| {})
            .unwrap();

        assert_eq!(report.events.len(), 2);
        assert_eq!(report.summary, Summary::AverageWaitingTime(0.0));
    }

    #[test]
    fn queue_overflow_aborts_the_run() {
        let jobs = (0..4).map(|i| Job::new(i, "J", "", 0, 1, 0)).collect();
        let config = Algorithm::Fcfs.config(1).unwrap();
        let err = SchedCore::new(config, jobs, 2, VirtualClock::new())
            .unwrap()
            .run(|_| {})
            .unwrap_err();
        assert!(matches!(err, Error::ResourceExhausted { capacity: 2 }));
    }

    #[test]
    fn rejects_zero_capacity_and_zero_bursts() {
        let config = Algorithm::Fcfs.config(1).unwrap();
        assert!(SchedCore::new(config.clone(), workload(), 0, VirtualClock::new()).is_err());

        let jobs = vec![Job::new(0, "empty", "", 0, 0, 0)];
        assert!(SchedCore::new(config, jobs, 4, VirtualClock::new()).is_err());
    }

    #[test]
    fn sink_sees_events_in_emission_order() {
        let mut seen = Vec::new();
        let report = engine(Algorithm::Sjf, 1)
            .run(|event| seen.push(event.clone()))
            .unwrap();
        assert_eq!(seen, report.events);
        assert!(matches!(seen.first(), Some(SchedEvent::RunStarted { algorithm }) if algorithm == "SJF"));
        assert!(matches!(seen.last(), Some(SchedEvent::RunFinished { .. })));
    }

    #[test]
    fn step_records_every_transition() {
        let mut engine = engine(Algorithm::RoundRobin, 2);
        engine.step().unwrap();
        assert_eq!(engine.transitions(), [EngineState::Dispatching]);

        engine.clock_mut().wait();
        engine.step().unwrap();
        assert_eq!(engine.transitions(), [EngineState::Running]);

        engine.clock_mut().wait();
        engine.step().unwrap();
        assert_eq!(
            engine.transitions(),
            [EngineState::Preempting, EngineState::Dispatching]
        );
        assert_eq!(engine.state(), EngineState::Dispatching);
    }

    #[test]
    fn terminal_step_ends_in_completing() {
        let jobs = vec![Job::new(0, "A", "", 0, 1, 0), Job::new(1, "B", "", 3, 1, 0)];
        let config = Algorithm::Fcfs.config(1).unwrap();
        let mut engine = SchedCore::new(config, jobs, 4, VirtualClock::new()).unwrap();

        engine.step().unwrap();
        engine.clock_mut().wait();
        engine.step().unwrap();
        assert_eq!(engine.transitions(), [EngineState::Completing, EngineState::Idle]);

        while !engine.is_finished() {
            engine.clock_mut().wait();
            engine.step().unwrap();
        }
        assert_eq!(engine.transitions(), [EngineState::Completing]);
        assert_eq!(engine.state(), EngineState::Completing);
    }

    #[test]
    fn preempted_job_keeps_its_true_arrival() {
        let mut engine = engine(Algorithm::RoundRobin, 2);
        for _ in 0..2 {
            engine.step().unwrap();
            engine.clock_mut().wait();
        }
        let events = engine.step().unwrap();
        assert!(matches!(
            events.as_slice(),
            [SchedEvent::Dispatch { outcome: DispatchOutcome::Preempted, .. }]
        ));
        let requeued = engine
            .queue()
            .as_slice()
            .iter()
            .find(|job| job.name == "A")
            .unwrap();
        assert_eq!(requeued.arrival_time, 0);
        assert_eq!(requeued.ready_since, 2);
        assert_eq!(requeued.remaining_burst, 3);
        assert_eq!(engine.config().report(), ReportKind::TotalTurnaroundTime);
    }
}
