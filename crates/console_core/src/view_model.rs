use crate::enrich::EnrichedJobRow;
use crate::status::StatusBadge;
use crate::{ApplicationInfo, DownloadStatus, Layout, Lifecycle, ModalContent};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub lifecycle: Lifecycle,
    pub about: Option<ApplicationInfo>,
    pub jobs: Vec<EnrichedJobRow>,
    pub jobs_loading: bool,
    pub jobs_error: Option<String>,
    pub layout: Layout,
    pub selected_uuid: Option<String>,
    pub detail: Option<DetailPanel>,
    pub modal: Option<ModalView>,
    pub download: Option<DownloadStatus>,
    pub dirty: bool,
}

/// Field names shown in the detail sidebar, in display order.
pub const DETAIL_FIELDS: [&str; 11] = [
    "uuid",
    "name",
    "provider",
    "publisher",
    "created",
    "started",
    "completed",
    "duration",
    "state",
    "success",
    "successLabel",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub fields: Vec<DetailField>,
    pub status: StatusBadge,
}

impl DetailPanel {
    pub fn from_row(row: &EnrichedJobRow) -> Self {
        let fields = DETAIL_FIELDS
            .iter()
            .map(|&name| DetailField {
                name,
                value: detail_value(row, name),
            })
            .collect();
        Self {
            fields,
            status: row.status.clone(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

fn detail_value(row: &EnrichedJobRow, name: &str) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    match name {
        "uuid" => row.uuid.clone(),
        "name" => row.name.clone(),
        "provider" => row.provider.to_string(),
        "publisher" => row
            .publisher
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        "created" => text(&row.created),
        "started" => text(&row.started),
        "completed" => text(&row.completed),
        "duration" => text(&row.duration),
        "state" => row.state.to_string(),
        "success" => row.success.map(|s| s.to_string()).unwrap_or_default(),
        "successLabel" => row.status.label.text.clone(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub api: String,
    /// `None` when the decode toggle is hidden.
    pub decode_toggle: Option<bool>,
    pub content: ModalContent,
}
