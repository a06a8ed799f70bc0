//! Job console core: pure formatting, enrichment and the view state machine.
mod effect;
mod enrich;
mod format;
mod job;
mod msg;
mod plugin;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::Effect;
pub use enrich::{enrich, enrich_in, enrich_row, EnrichedJobRow};
pub use format::{
    duration_minutes, format_duration, format_timestamp, format_timestamp_in,
    MINUTES_DISPLAY_LIMIT,
};
pub use job::{ApplicationInfo, JobRecord, JobState, Millis};
pub use msg::Msg;
pub use plugin::{PluginDescriptor, PluginDirectory, PluginKind, PluginName};
pub use state::{
    AppState, Bootstrap, DisplayZone, DownloadStatus, Layout, Lifecycle, ModalContent, RequestId,
    TextRequest,
};
pub use status::{
    pretty_state, status_badge, LabelKind, StatusBadge, StatusIcon, StatusLabel, FAILED_TEXT,
    UNKNOWN_STATE_TEXT,
};
pub use update::update;
pub use view_model::{AppViewModel, DetailField, DetailPanel, ModalView, DETAIL_FIELDS};
