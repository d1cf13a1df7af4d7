use std::fmt;

use super::OrderingPolicy;
use crate::{
    core::Ticks,
    error::{Error, Result},
};

pub const ALGORITHM_FCFS: &str = "FCFS";
pub const ALGORITHM_SJF: &str = "SJF";
pub const ALGORITHM_PRIORITY: &str = "Priority";
pub const ALGORITHM_RR: &str = "Round Robin";

/// Which aggregate statistic a run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    AverageWaitingTime,
    TotalTurnaroundTime,
}

/// The four classical algorithms, each a preset [`AlgorithmConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin,
}

impl Algorithm {
    pub const ALL: [Self; 4] = [Self::Fcfs, Self::Sjf, Self::Priority, Self::RoundRobin];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fcfs => ALGORITHM_FCFS,
            Self::Sjf => ALGORITHM_SJF,
            Self::Priority => ALGORITHM_PRIORITY,
            Self::RoundRobin => ALGORITHM_RR,
        }
    }

    /// Build the preset. `quantum` is only consulted by Round-Robin.
    pub fn config(self, quantum: Ticks) -> Result<AlgorithmConfig> {
        let builder = AlgorithmConfig::builder(self.name());
        let builder = match self {
            Self::Fcfs => builder.policy(OrderingPolicy::Null),
            Self::Sjf => builder.policy(OrderingPolicy::ShortestBurst),
            Self::Priority => builder.policy(OrderingPolicy::LowerPriorityValue),
            Self::RoundRobin => builder
                .policy(OrderingPolicy::Null)
                .quantum(quantum)
                .report(ReportKind::TotalTurnaroundTime),
        };
        builder.build()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// FCFS, SJF, Priority and Round-Robin, in that order.
pub fn standard_suite(quantum: Ticks) -> Result<Vec<AlgorithmConfig>> {
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| algorithm.config(quantum))
        .collect()
}

/// Immutable per-run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmConfig {
    name: String,
    policy: OrderingPolicy,
    quantum: Option<Ticks>,
    report: ReportKind,
}

impl AlgorithmConfig {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AlgorithmConfigBuilder {
        AlgorithmConfigBuilder {
            name: name.into(),
            policy: None,
            quantum: None,
            report: ReportKind::AverageWaitingTime,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    /// `None` means jobs run to completion once dispatched.
    #[must_use]
    pub const fn quantum(&self) -> Option<Ticks> {
        self.quantum
    }

    #[must_use]
    pub const fn report(&self) -> ReportKind {
        self.report
    }
}

#[derive(Debug, Clone)]
pub struct AlgorithmConfigBuilder {
    name: String,
    policy: Option<OrderingPolicy>,
    quantum: Option<Ticks>,
    report: ReportKind,
}

impl AlgorithmConfigBuilder {
    #[must_use]
    pub fn policy(mut self, policy: OrderingPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    #[must_use]
    pub fn quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = Some(quantum);
        self
    }

    #[must_use]
    pub fn report(mut self, report: ReportKind) -> Self {
        self.report = report;
        self
    }

    pub fn build(self) -> Result<AlgorithmConfig> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("algorithm name must not be empty"));
        }
        let policy = self.policy.ok_or_else(|| {
            Error::invalid(format!("algorithm '{}' has no ordering policy", self.name))
        })?;
        if self.quantum == Some(0) {
            return Err(Error::invalid(format!(
                "algorithm '{}' has a zero time quantum",
                self.name
            )));
        }

        Ok(AlgorithmConfig {
            name: self.name,
            policy,
            quantum: self.quantum,
            report: self.report,
        })
    }
}
