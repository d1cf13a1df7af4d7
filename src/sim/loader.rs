//! Reads workloads from comma-separated text.
//!
//! One job per line: `name,description,arrival_time,burst_time,priority`.
//! Blank lines are skipped and fields are trimmed. A single malformed line
//! rejects the whole workload.

use std::path::Path;

use super::job::{JobSpec, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::{
    core::Ticks,
    error::{Error, Result},
};

const FIELD_COUNT: usize = 5;

pub fn load_workload(path: impl AsRef<Path>) -> Result<Vec<JobSpec>> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_workload(&input)
}

pub fn parse_workload(input: &str) -> Result<Vec<JobSpec>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_record(index + 1, line))
        .collect()
}

fn parse_record(line: usize, record: &str) -> Result<JobSpec> {
    let fields: Vec<&str> = record.split(',').map(str::trim).collect();
    let [name, description, arrival, burst, priority] = fields[..] else {
        return Err(Error::parse(
            line,
            format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        ));
    };

    if name.is_empty() {
        return Err(Error::parse(line, "job name is empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::parse(
            line,
            format!("job name longer than {MAX_NAME_LEN} characters"),
        ));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(Error::parse(
            line,
            format!("description longer than {MAX_DESCRIPTION_LEN} characters"),
        ));
    }

    let arrival_time: Ticks = arrival.parse().map_err(|_| {
        Error::parse(
            line,
            format!("arrival time '{arrival}' is not a non-negative integer"),
        )
    })?;
    let burst_time: Ticks = burst.parse().map_err(|_| {
        Error::parse(line, format!("burst time '{burst}' is not a non-negative integer"))
    })?;
    if burst_time == 0 {
        return Err(Error::parse(line, "burst time must be positive"));
    }
    let priority: i32 = priority
        .parse()
        .map_err(|_| Error::parse(line, format!("priority '{priority}' is not an integer")))?;

    Ok(JobSpec::new(
        name,
        description,
        arrival_time,
        burst_time,
        priority,
    ))
}
