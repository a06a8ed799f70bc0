#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application start, or the user asked to retry a failed startup.
    AppStarted,
    /// Startup fetches finished; `Err` carries the first failure.
    DirectoryLoaded(Result<crate::Bootstrap, String>),
    /// User asked for a fresh job list.
    RefreshClicked,
    /// Job list fetch finished.
    JobsLoaded(Result<Vec<crate::JobRecord>, String>),
    /// User clicked a row of the job table.
    RowClicked { uuid: String },
    /// User opened the text viewer for `api` (e.g. `/result`, `/artifact`).
    ModalOpened { title: String, api: String },
    /// User closed the text viewer.
    ModalClosed,
    /// User flipped the decode toggle of the result viewer.
    DecodeToggled(bool),
    /// User asked to retry a failed text fetch.
    RetryClicked,
    /// Text fetch finished.
    TextLoaded {
        request_id: crate::RequestId,
        result: Result<String, String>,
    },
    /// User asked to download `api` for the selected job.
    DownloadClicked { api: String },
    /// Download finished; `Ok` carries where it was saved.
    DownloadFinished(Result<String, String>),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
