use chrono::FixedOffset;

use crate::enrich::{enrich_in, EnrichedJobRow};
use crate::view_model::{AppViewModel, DetailPanel, ModalView};
use crate::{ApplicationInfo, JobRecord, PluginDirectory};

pub type RequestId = u64;

/// Everything the startup fetches produce. Only built when all of them succeed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bootstrap {
    pub about: ApplicationInfo,
    pub directory: PluginDirectory,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Loading,
    Ready,
    Failed {
        reason: String,
    },
}

/// Page layout: the job table alone, or the table next to the detail sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Full,
    Split,
}

impl Layout {
    pub fn main_columns(self) -> u8 {
        match self {
            Layout::Full => 12,
            Layout::Split => 9,
        }
    }

    pub fn sidebar_columns(self) -> u8 {
        match self {
            Layout::Full => 0,
            Layout::Split => 3,
        }
    }
}

/// Time zone used when formatting timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

/// A plain-text fetch for `{uuid}{suffix}`, optionally the decoded variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    pub request_id: RequestId,
    pub uuid: String,
    pub suffix: String,
    pub decoded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContent {
    Loading,
    Loaded(String),
    /// The fetch failed; the user can retry.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModalState {
    pub(crate) title: String,
    pub(crate) api: String,
    /// `None` hides the decode toggle; otherwise its on/off position.
    pub(crate) decode: Option<bool>,
    pub(crate) content: ModalContent,
    pub(crate) request: TextRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    InFlight { uuid: String, api: String },
    Saved { location: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    lifecycle: Lifecycle,
    bootstrap: Option<Bootstrap>,
    zone: DisplayZone,
    jobs: Vec<EnrichedJobRow>,
    jobs_loading: bool,
    jobs_error: Option<String>,
    selected: Option<EnrichedJobRow>,
    layout: Layout,
    modal: Option<ModalState>,
    download: Option<DownloadStatus>,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State that formats timestamps in `zone` instead of the viewer's local time.
    pub fn with_zone(zone: DisplayZone) -> Self {
        Self {
            zone,
            ..Self::default()
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn about(&self) -> Option<&ApplicationInfo> {
        self.bootstrap.as_ref().map(|bootstrap| &bootstrap.about)
    }

    pub fn directory(&self) -> Option<&PluginDirectory> {
        self.bootstrap.as_ref().map(|bootstrap| &bootstrap.directory)
    }

    pub fn selected_job(&self) -> Option<&EnrichedJobRow> {
        self.selected.as_ref()
    }

    pub fn jobs_loading(&self) -> bool {
        self.jobs_loading
    }

    /// Request id the open modal is waiting on, if any.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.modal.as_ref().map(|modal| modal.request.request_id)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            lifecycle: self.lifecycle.clone(),
            about: self.about().cloned(),
            jobs: self.jobs.clone(),
            jobs_loading: self.jobs_loading,
            jobs_error: self.jobs_error.clone(),
            layout: self.layout,
            selected_uuid: self.selected.as_ref().map(|row| row.uuid.clone()),
            detail: self.selected.as_ref().map(DetailPanel::from_row),
            modal: self.modal.as_ref().map(|modal| ModalView {
                title: modal.title.clone(),
                api: modal.api.clone(),
                decode_toggle: modal.decode,
                content: modal.content.clone(),
            }),
            download: self.download.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn start_loading(&mut self) {
        self.lifecycle = Lifecycle::Loading;
        self.mark_dirty();
    }

    pub(crate) fn apply_bootstrap(&mut self, result: Result<Bootstrap, String>) {
        match result {
            Ok(bootstrap) => {
                self.bootstrap = Some(bootstrap);
                self.lifecycle = Lifecycle::Ready;
            }
            Err(reason) => {
                self.bootstrap = None;
                self.lifecycle = Lifecycle::Failed { reason };
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn begin_jobs_load(&mut self) {
        self.jobs_loading = true;
        self.mark_dirty();
    }

    pub(crate) fn apply_jobs(&mut self, result: Result<Vec<JobRecord>, String>) {
        self.jobs_loading = false;
        match result {
            Ok(records) => {
                let directory = self.directory().cloned().unwrap_or_default();
                self.jobs = match self.zone {
                    DisplayZone::Local => enrich_in(&directory, &records, &chrono::Local),
                    DisplayZone::Fixed(offset) => enrich_in(&directory, &records, &offset),
                };
                self.jobs_error = None;
                // Keep the selection pointing at the refreshed copy of the row.
                if let Some(selected) = self.selected.take() {
                    self.selected = self
                        .jobs
                        .iter()
                        .find(|row| row.uuid == selected.uuid)
                        .cloned()
                        .or(Some(selected));
                }
            }
            Err(message) => {
                self.jobs_error = Some(message);
            }
        }
        self.mark_dirty();
    }

    /// Selects the row with `uuid`. Returns `false` if no such row is shown.
    pub(crate) fn select(&mut self, uuid: &str) -> bool {
        let Some(row) = self.jobs.iter().find(|row| row.uuid == uuid) else {
            return false;
        };
        self.selected = Some(row.clone());
        self.layout = Layout::Split;
        self.mark_dirty();
        true
    }

    fn next_request(&mut self, uuid: String, suffix: String, decoded: bool) -> TextRequest {
        self.next_request_id += 1;
        TextRequest {
            request_id: self.next_request_id,
            uuid,
            suffix,
            decoded,
        }
    }

    pub(crate) fn open_modal(&mut self, title: String, api: String) -> Option<TextRequest> {
        let uuid = self.selected.as_ref()?.uuid.clone();
        let decode = api.starts_with("/result").then_some(false);
        let request = self.next_request(uuid, api.clone(), false);
        self.modal = Some(ModalState {
            title,
            api,
            decode,
            content: ModalContent::Loading,
            request: request.clone(),
        });
        self.mark_dirty();
        Some(request)
    }

    pub(crate) fn close_modal(&mut self) {
        if self.modal.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Flips the decode toggle and issues a fresh request for the result.
    ///
    /// Ignored when no modal is open or the open modal has no toggle.
    pub(crate) fn toggle_decode(&mut self, enabled: bool) -> Option<TextRequest> {
        let uuid = {
            let modal = self.modal.as_ref()?;
            modal.decode?;
            modal.request.uuid.clone()
        };
        let request = self.next_request(uuid, "/result".to_string(), enabled);
        let modal = self.modal.as_mut()?;
        modal.decode = Some(enabled);
        modal.content = ModalContent::Loading;
        modal.request = request.clone();
        self.mark_dirty();
        Some(request)
    }

    pub(crate) fn retry_modal(&mut self) -> Option<TextRequest> {
        let previous = self.modal.as_ref()?.request.clone();
        let request = self.next_request(previous.uuid, previous.suffix, previous.decoded);
        let modal = self.modal.as_mut()?;
        modal.content = ModalContent::Loading;
        modal.request = request.clone();
        self.mark_dirty();
        Some(request)
    }

    /// Applies a text response if it answers the modal's current request.
    /// Returns `false` for superseded or orphaned responses.
    pub(crate) fn apply_text(&mut self, request_id: RequestId, result: Result<String, String>) -> bool {
        let Some(modal) = self.modal.as_mut() else {
            return false;
        };
        if modal.request.request_id != request_id {
            return false;
        }
        modal.content = match result {
            Ok(text) => ModalContent::Loaded(text),
            Err(message) => ModalContent::Failed { message },
        };
        self.mark_dirty();
        true
    }

    pub(crate) fn begin_download(&mut self, api: String) -> Option<(String, String)> {
        let uuid = self.selected.as_ref()?.uuid.clone();
        self.download = Some(DownloadStatus::InFlight {
            uuid: uuid.clone(),
            api: api.clone(),
        });
        self.mark_dirty();
        Some((uuid, api))
    }

    pub(crate) fn finish_download(&mut self, result: Result<String, String>) {
        self.download = Some(match result {
            Ok(location) => DownloadStatus::Saved { location },
            Err(message) => DownloadStatus::Failed { message },
        });
        self.mark_dirty();
    }
}
