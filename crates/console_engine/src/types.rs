use std::fmt;
use std::path::PathBuf;

use console_core::{Bootstrap, JobRecord, RequestId};

use crate::bootstrap::BootstrapError;
use crate::persist::PersistError;

/// Results reported back by the engine thread, one per command.
#[derive(Debug)]
pub enum EngineEvent {
    DirectoryLoaded(Result<Bootstrap, BootstrapError>),
    JobsLoaded(Result<Vec<JobRecord>, FetchError>),
    TextLoaded {
        request_id: RequestId,
        result: Result<String, FetchError>,
    },
    Downloaded(Result<PathBuf, DownloadError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// The body was not the JSON shape the endpoint promises.
    InvalidBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("download failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("could not save download: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("could not start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("could not create http client: {0}")]
    Client(#[from] FetchError),
}
