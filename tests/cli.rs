use std::io::Write;

use clap::Parser;
use sched_model::{
    Error,
    cli::{self, Cli},
};

fn schedule(args: &[&str]) -> Result<String, Error> {
    let cli = Cli::try_parse_from(args).expect("valid arguments");
    let mut out = Vec::new();
    cli::run(&cli.command, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 report"))
}

#[test]
fn schedule_prints_a_report_per_algorithm() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "P1,Compile kernel,0,5,2").unwrap();
    writeln!(file, "P2,Render frame,1,3,1").unwrap();
    writeln!(file, "P3,Flush cache,6,1,3").unwrap();
    writeln!(file, "P4,Late arrival,12,2,0").unwrap();
    let path = file.path().to_str().unwrap();

    let report = schedule(&["sched-model", "schedule", path, "2"]).unwrap();

    for mode in ["FCFS", "SJF", "Priority", "Round Robin"] {
        assert!(report.contains(&format!(">> Scheduler Mode : {mode}\n")), "{report}");
    }
    assert_eq!(report.matches("Average Waiting Time").count(), 3);
    assert_eq!(report.matches("Total Turnaround Time").count(), 1);
    assert!(report.contains("0 → 5: P1 Running Compile kernel.\n"), "{report}");
    assert!(report.contains("9 → 12: Idle.\n"), "{report}");
}

#[test]
fn schedule_rejects_malformed_workload_before_reporting() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "P1,ok,0,5,2").unwrap();
    writeln!(file, "P2,broken,1,three,1").unwrap();
    let path = file.path().to_str().unwrap();

    let err = schedule(&["sched-model", "schedule", path, "2"]).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, .. }), "{err}");
    assert_ne!(err.exit_code(), 0);
}

#[test]
fn schedule_reports_queue_exhaustion() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..3 {
        writeln!(file, "P{i},burst,0,1,0").unwrap();
    }
    let path = file.path().to_str().unwrap();

    let err = schedule(&["sched-model", "schedule", path, "2", "--capacity", "2"]).unwrap_err();
    assert!(matches!(err, Error::ResourceExhausted { capacity: 2 }), "{err}");
}

#[test]
fn failure_in_a_later_run_prints_nothing() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "A,alpha,0,5,0").unwrap();
    writeln!(file, "B,bravo,1,5,0").unwrap();
    let path = file.path().to_str().unwrap();

    let cli = Cli::try_parse_from(["sched-model", "schedule", path, "2", "--capacity", "1"]).unwrap();
    let mut out = Vec::new();
    // FCFS, SJF and Priority fit; Round-Robin's re-enqueue overflows
    let err = cli::run(&cli.command, &mut out).unwrap_err();

    assert!(matches!(err, Error::ResourceExhausted { capacity: 1 }), "{err}");
    assert!(out.is_empty(), "{}", String::from_utf8_lossy(&out));
}

#[test]
fn generated_workload_can_be_scheduled() {
    let cli = Cli::try_parse_from(["sched-model", "generate", "--ticks", "30", "--seed", "3"]).unwrap();
    let mut csv = Vec::new();
    cli::run(&cli.command, &mut csv).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&csv).unwrap();
    let path = file.path().to_str().unwrap();

    let report = schedule(&["sched-model", "schedule", path, "3", "--only", "rr"]).unwrap();
    assert_eq!(report.matches(">> End of Report").count(), 1);
}

#[test]
fn missing_arguments_are_usage_errors() {
    assert!(Cli::try_parse_from(["sched-model"]).is_err());
    assert!(Cli::try_parse_from(["sched-model", "schedule"]).is_err());
    assert!(Cli::try_parse_from(["sched-model", "focus-mode", "3", "1"]).is_err());
}
