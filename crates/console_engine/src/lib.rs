//! Job console engine: REST client, startup loader and effect execution.
mod api;
mod bootstrap;
mod engine;
mod filename;
mod persist;
mod types;
mod wire;

pub use api::{job_url, ClientSettings, ConsoleApi, ReqwestApi, DECODED_QUERY};
pub use bootstrap::{load_directory, BootstrapError};
pub use engine::EngineHandle;
pub use filename::download_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{DownloadError, EngineError, EngineEvent, FailureKind, FetchError};
