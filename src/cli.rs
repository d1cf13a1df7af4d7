use std::{io::Write, path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::{
    core::{DEFAULT_QUEUE_CAPACITY, Ticks},
    error::Result,
    scheduler::{Algorithm, AlgorithmConfig},
    sim::{
        ClockMode, ConsoleReport, EngineConfig, Sim, WorkloadParams, bernoulli_jobs,
        load_workload, to_csv,
    },
};

#[derive(Debug, Parser)]
#[command(name = "sched-model", version, about = "Simulate classical CPU scheduling algorithms")]
pub struct Cli {
    /// Log filter, e.g. `debug` or `sched_model=trace` (defaults to RUST_LOG, then `warn`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run FCFS, SJF, Priority and Round-Robin over a workload file
    Schedule(ScheduleArgs),
    /// Print a random workload in the format `schedule` reads
    Generate(GenerateArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Fcfs,
    Sjf,
    Priority,
    Rr,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Fcfs => Self::Fcfs,
            AlgorithmArg::Sjf => Self::Sjf,
            AlgorithmArg::Priority => Self::Priority,
            AlgorithmArg::Rr => Self::RoundRobin,
        }
    }
}

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// CSV file with `name,description,arrival,burst,priority` per line
    pub workload: PathBuf,

    /// Round-Robin time quantum in ticks
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub quantum: Ticks,

    /// Let real time pass instead of stepping a virtual clock
    #[arg(long)]
    pub realtime: bool,

    /// Length of one tick in realtime mode
    #[arg(long, default_value_t = 1000)]
    pub tick_ms: u64,

    /// How often the realtime loop samples the clock
    #[arg(long, default_value_t = 100)]
    pub sample_ms: u64,

    /// Maximum number of simultaneously queued jobs
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub capacity: usize,

    /// Run only these algorithms, in the given order
    #[arg(long = "only", value_enum, value_delimiter = ',')]
    pub only: Vec<AlgorithmArg>,
}

impl ScheduleArgs {
    pub fn engine_config(&self) -> EngineConfig {
        let clock = if self.realtime {
            ClockMode::Realtime {
                tick: Duration::from_millis(self.tick_ms),
                sample: Duration::from_millis(self.sample_ms),
            }
        } else {
            ClockMode::Virtual
        };
        EngineConfig {
            capacity: self.capacity,
            clock,
        }
    }

    pub fn algorithms(&self) -> Result<Vec<AlgorithmConfig>> {
        let selected: Vec<Algorithm> = if self.only.is_empty() {
            Algorithm::ALL.to_vec()
        } else {
            self.only.iter().copied().map(Algorithm::from).collect()
        };
        selected
            .into_iter()
            .map(|algorithm| algorithm.config(self.quantum))
            .collect()
    }
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Number of ticks during which jobs may arrive
    #[arg(long, default_value_t = 50)]
    pub ticks: Ticks,

    /// Probability that a job arrives at a given tick
    #[arg(long, default_value_t = 0.3)]
    pub p_arrival: f64,

    /// Probability that an arriving job is short
    #[arg(long, default_value_t = 0.3)]
    pub p_short: f64,

    #[arg(long, default_value_t = 2)]
    pub short: Ticks,

    #[arg(long, default_value_t = 6)]
    pub long: Ticks,

    /// Priorities are drawn uniformly from 0..=max-priority
    #[arg(long, default_value_t = 5)]
    pub max_priority: i32,

    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl From<&GenerateArgs> for WorkloadParams {
    fn from(args: &GenerateArgs) -> Self {
        Self {
            ticks: args.ticks,
            p_arrival: args.p_arrival,
            p_short: args.p_short,
            short_burst: args.short,
            long_burst: args.long,
            max_priority: args.max_priority,
            seed: args.seed,
        }
    }
}

pub fn run(command: &Command, out: impl Write) -> Result<()> {
    match command {
        Command::Schedule(args) => schedule(args, out),
        Command::Generate(args) => generate(args, out),
    }
}

fn schedule(args: &ScheduleArgs, out: impl Write) -> Result<()> {
    let specs = load_workload(&args.workload)?;
    debug!(jobs = specs.len(), path = %args.workload.display(), "workload loaded");

    let configs = args.algorithms()?;
    let engine = args.engine_config();
    let sim = Sim::new(&specs);

    // Nothing is printed until every run has succeeded
    let runs = sim.run_configured(&configs, &engine, |_| {})?;

    let mut report = ConsoleReport::new(out);
    for run in &runs {
        report.write_report(run)?;
    }
    Ok(())
}

fn generate(args: &GenerateArgs, mut out: impl Write) -> Result<()> {
    let jobs = bernoulli_jobs(&WorkloadParams::from(args))?;
    out.write_all(to_csv(&jobs).as_bytes())?;
    out.flush()?;
    Ok(())
}
