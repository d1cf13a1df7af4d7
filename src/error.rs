use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("ready queue is full (capacity {capacity})")]
    ResourceExhausted { capacity: usize },

    #[error("dequeue on an empty ready queue")]
    EmptyQueue,

    #[error("failed to read workload {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed workload record on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } | Self::Parse { .. } | Self::Output(_) => 1,
            Self::InvalidConfiguration { .. } => 2,
            Self::ResourceExhausted { .. } | Self::EmptyQueue => 3,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
