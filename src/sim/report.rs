use std::io::{self, Write};

use crate::core::{RunReport, SchedEvent, Summary};

const HEAVY_RULE: &str = "══════════════════════════════════════════════";
const LIGHT_RULE: &str = "──────────────────────────────────────────────";

/// Renders engine events as a human-readable console report.
pub struct ConsoleReport<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReport<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_report(&mut self, run: &RunReport) -> io::Result<()> {
        run.events
            .iter()
            .try_for_each(|event| self.write_event(event))
    }

    pub fn write_event(&mut self, event: &SchedEvent) -> io::Result<()> {
        match event {
            SchedEvent::RunStarted { algorithm } => {
                writeln!(self.out, "{HEAVY_RULE}")?;
                writeln!(self.out, ">> Scheduler Mode : {algorithm}")?;
                writeln!(self.out, ">> Engine Status  : Initialized")?;
                writeln!(self.out, "{LIGHT_RULE}")?;
                writeln!(self.out)
            }
            SchedEvent::Dispatch {
                start,
                end,
                name,
                description,
                ..
            } => writeln!(self.out, "{start} → {end}: {name} Running {description}."),
            SchedEvent::Idle { start, end } => writeln!(self.out, "{start} → {end}: Idle."),
            SchedEvent::RunFinished { summary } => {
                writeln!(self.out)?;
                writeln!(self.out, "{LIGHT_RULE}")?;
                writeln!(self.out, ">> Engine Status  : Completed")?;
                writeln!(self.out, ">> Summary        :")?;
                match summary {
                    Summary::AverageWaitingTime(avg) => {
                        writeln!(self.out, "   └─ Average Waiting Time : {avg:.2} time units")?;
                    }
                    Summary::TotalTurnaroundTime(total) => {
                        writeln!(self.out, "   └─ Total Turnaround Time : {total} time units")?;
                    }
                }
                writeln!(self.out, ">> End of Report")?;
                writeln!(self.out, "{HEAVY_RULE}")?;
                writeln!(self.out)?;
                self.out.flush()
            }
        }
    }
}
