//! JSON shapes returned by the backend and their conversion into core types.
use console_core::{ApplicationInfo, JobRecord, JobState, Millis, PluginDescriptor, PluginKind};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct AboutDto {
    #[serde(rename = "applicationName", alias = "application")]
    application_name: String,
    version: String,
}

impl From<AboutDto> for ApplicationInfo {
    fn from(dto: AboutDto) -> Self {
        Self {
            application_name: dto.application_name,
            version: dto.version,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PluginDto {
    class: String,
    name: String,
}

impl PluginDto {
    pub(crate) fn into_descriptor(self, kind: PluginKind) -> PluginDescriptor {
        PluginDescriptor::new(kind, self.class, self.name)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobDto {
    uuid: String,
    name: Option<String>,
    provider: String,
    publisher: Option<String>,
    created: Option<Millis>,
    started: Option<Millis>,
    completed: Option<Millis>,
    state: String,
    success: Option<bool>,
}

impl From<JobDto> for JobRecord {
    fn from(dto: JobDto) -> Self {
        Self {
            uuid: dto.uuid,
            name: dto.name.unwrap_or_default(),
            provider_class: dto.provider,
            publisher_class: dto.publisher,
            created: dto.created,
            started: dto.started,
            completed: dto.completed,
            state: JobState::from_wire(&dto.state),
            success: dto.success,
        }
    }
}
