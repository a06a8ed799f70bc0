use std::fmt;

/// Epoch timestamp in milliseconds, as the backend reports it.
pub type Millis = i64;

/// Lifecycle state of a backend job.
///
/// States are only reported here, never driven. Values the console does not
/// know are kept verbatim in [`JobState::Other`] so that formatting can fall
/// back to a neutral presentation instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobState {
    Created,
    InQueue,
    InProgress,
    Completed,
    Published,
    Canceled,
    Unavailable,
    Other(String),
}

impl JobState {
    pub const KNOWN: [JobState; 7] = [
        JobState::Created,
        JobState::InQueue,
        JobState::InProgress,
        JobState::Completed,
        JobState::Published,
        JobState::Canceled,
        JobState::Unavailable,
    ];

    /// Parses the backend's SCREAMING_SNAKE_CASE spelling. Never fails.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "CREATED" => JobState::Created,
            "IN_QUEUE" => JobState::InQueue,
            "IN_PROGRESS" => JobState::InProgress,
            "COMPLETED" => JobState::Completed,
            "PUBLISHED" => JobState::Published,
            "CANCELED" => JobState::Canceled,
            "UNAVAILABLE" => JobState::Unavailable,
            other => JobState::Other(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            JobState::Created => "CREATED",
            JobState::InQueue => "IN_QUEUE",
            JobState::InProgress => "IN_PROGRESS",
            JobState::Completed => "COMPLETED",
            JobState::Published => "PUBLISHED",
            JobState::Canceled => "CANCELED",
            JobState::Unavailable => "UNAVAILABLE",
            JobState::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, JobState::Other(_))
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A job as the backend reports it. Enrichment never mutates this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub uuid: String,
    pub name: String,
    pub provider_class: String,
    pub publisher_class: Option<String>,
    pub created: Option<Millis>,
    pub started: Option<Millis>,
    pub completed: Option<Millis>,
    pub state: JobState,
    pub success: Option<bool>,
}

impl JobRecord {
    /// Minimal record in the `Created` state; mostly useful for fixtures.
    pub fn new(uuid: impl Into<String>, provider_class: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: String::new(),
            provider_class: provider_class.into(),
            publisher_class: None,
            created: None,
            started: None,
            completed: None,
            state: JobState::Created,
            success: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationInfo {
    pub application_name: String,
    pub version: String,
}
