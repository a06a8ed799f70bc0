#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch about, providers and publishers together.
    LoadDirectory,
    LoadJobs,
    FetchJobText(crate::TextRequest),
    Download { uuid: String, api: String },
}
