use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use console_core::TextRequest;
use console_logging::{console_info, console_warn};

use crate::bootstrap::load_directory;
use crate::filename::download_filename;
use crate::persist::AtomicFileWriter;
use crate::{ClientSettings, ConsoleApi, DownloadError, EngineError, EngineEvent, ReqwestApi};

enum EngineCommand {
    LoadDirectory,
    LoadJobs,
    FetchText(TextRequest),
    Download { uuid: String, api: String },
}

/// Runs backend requests on a background tokio runtime.
///
/// Commands are fire-and-forget; every command produces exactly one
/// [`EngineEvent`], in completion order rather than submission order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, download_dir: PathBuf) -> Result<Self, EngineError> {
        let api = ReqwestApi::new(settings)?;
        Self::with_api(Arc::new(api), download_dir)
    }

    pub fn with_api(api: Arc<dyn ConsoleApi>, download_dir: PathBuf) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let writer = AtomicFileWriter::new(download_dir);

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let writer = writer.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(api.as_ref(), &writer, command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load_directory(&self) {
        self.send(EngineCommand::LoadDirectory);
    }

    pub fn load_jobs(&self) {
        self.send(EngineCommand::LoadJobs);
    }

    pub fn fetch_text(&self, request: TextRequest) {
        self.send(EngineCommand::FetchText(request));
    }

    pub fn download(&self, uuid: impl Into<String>, api: impl Into<String>) {
        self.send(EngineCommand::Download {
            uuid: uuid.into(),
            api: api.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            console_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    api: &dyn ConsoleApi,
    writer: &AtomicFileWriter,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::LoadDirectory => EngineEvent::DirectoryLoaded(load_directory(api).await),
        EngineCommand::LoadJobs => EngineEvent::JobsLoaded(api.jobs().await),
        EngineCommand::FetchText(request) => {
            let result = api
                .job_text(&request.uuid, &request.suffix, request.decoded)
                .await;
            EngineEvent::TextLoaded {
                request_id: request.request_id,
                result,
            }
        }
        EngineCommand::Download { uuid, api: suffix } => {
            EngineEvent::Downloaded(download(api, writer, &uuid, &suffix).await)
        }
    }
}

async fn download(
    api: &dyn ConsoleApi,
    writer: &AtomicFileWriter,
    uuid: &str,
    suffix: &str,
) -> Result<PathBuf, DownloadError> {
    let bytes = api.job_bytes(uuid, suffix).await?;
    let filename = download_filename(uuid, suffix);
    let path = writer.write(&filename, &bytes)?;
    console_info!("Saved {} bytes to {:?}", bytes.len(), path);
    Ok(path)
}
