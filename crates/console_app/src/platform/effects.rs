use std::time::Duration;

use console_core::{Effect, Msg};
use console_engine::{EngineEvent, EngineHandle};
use console_logging::{console_debug, console_warn};

/// Executes core effects on the engine and turns engine events back into
/// messages for `update`.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadDirectory => {
                    console_debug!("LoadDirectory");
                    self.engine.load_directory();
                }
                Effect::LoadJobs => {
                    console_debug!("LoadJobs");
                    self.engine.load_jobs();
                }
                Effect::FetchJobText(request) => {
                    console_debug!(
                        "FetchJobText request_id={} uuid={} suffix={} decoded={}",
                        request.request_id,
                        request.uuid,
                        request.suffix,
                        request.decoded
                    );
                    self.engine.fetch_text(request);
                }
                Effect::Download { uuid, api } => {
                    console_debug!("Download uuid={} api={}", uuid, api);
                    self.engine.download(uuid, api);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine result.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(to_msg)
    }
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DirectoryLoaded(result) => Msg::DirectoryLoaded(result.map_err(|err| {
            console_warn!("Startup failed: {}", err);
            err.to_string()
        })),
        EngineEvent::JobsLoaded(result) => Msg::JobsLoaded(result.map_err(|err| {
            console_warn!("Job list failed: {}", err);
            err.to_string()
        })),
        EngineEvent::TextLoaded { request_id, result } => Msg::TextLoaded {
            request_id,
            result: result.map_err(|err| {
                console_warn!("Text request {} failed: {}", request_id, err);
                err.to_string()
            }),
        },
        EngineEvent::Downloaded(result) => Msg::DownloadFinished(
            result
                .map(|path| path.display().to_string())
                .map_err(|err| {
                    console_warn!("Download failed: {}", err);
                    err.to_string()
                }),
        ),
    }
}
