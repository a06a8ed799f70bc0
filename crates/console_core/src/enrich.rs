use crate::format::{format_duration, format_timestamp_in};
use crate::status::{status_badge, StatusBadge};
use crate::{JobRecord, JobState, PluginDirectory, PluginKind, PluginName};

/// A job row ready for display: plugin names resolved, times formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedJobRow {
    pub uuid: String,
    pub name: String,
    pub provider: PluginName,
    /// `None` when the job has no publisher at all.
    pub publisher: Option<PluginName>,
    pub created: Option<String>,
    pub started: Option<String>,
    pub completed: Option<String>,
    pub duration: Option<String>,
    pub state: JobState,
    pub success: Option<bool>,
    pub status: StatusBadge,
}

/// Enriches rows in the viewer's local time zone.
pub fn enrich(directory: &PluginDirectory, rows: &[JobRecord]) -> Vec<EnrichedJobRow> {
    enrich_in(directory, rows, &chrono::Local)
}

pub fn enrich_in<Tz: chrono::TimeZone>(
    directory: &PluginDirectory,
    rows: &[JobRecord],
    tz: &Tz,
) -> Vec<EnrichedJobRow> {
    rows.iter().map(|row| enrich_row(directory, row, tz)).collect()
}

pub fn enrich_row<Tz: chrono::TimeZone>(
    directory: &PluginDirectory,
    row: &JobRecord,
    tz: &Tz,
) -> EnrichedJobRow {
    let publisher = row
        .publisher_class
        .as_deref()
        .filter(|class| !class.is_empty())
        .map(|class| PluginName::lookup(directory, PluginKind::Publisher, class));

    EnrichedJobRow {
        uuid: row.uuid.clone(),
        name: row.name.clone(),
        provider: PluginName::lookup(directory, PluginKind::Provider, &row.provider_class),
        publisher,
        created: format_timestamp_in(row.created, tz),
        started: format_timestamp_in(row.started, tz),
        completed: format_timestamp_in(row.completed, tz),
        duration: format_duration(row.created, row.completed),
        state: row.state.clone(),
        success: row.success,
        status: status_badge(row.success, &row.state),
    }
}
