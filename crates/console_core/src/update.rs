use crate::{AppState, Effect, Lifecycle, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Until the startup fetches have all succeeded only lifecycle messages are
/// honoured; every UI action is dropped.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::AppStarted => {
            if state.is_ready() {
                Vec::new()
            } else {
                state.start_loading();
                vec![Effect::LoadDirectory]
            }
        }
        Msg::DirectoryLoaded(result) => {
            if *state.lifecycle() != Lifecycle::Loading {
                return (state, Vec::new());
            }
            state.apply_bootstrap(result);
            if state.is_ready() {
                state.begin_jobs_load();
                vec![Effect::LoadJobs]
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
        _ if !state.is_ready() => Vec::new(),
        Msg::RefreshClicked => {
            state.begin_jobs_load();
            vec![Effect::LoadJobs]
        }
        Msg::JobsLoaded(result) => {
            state.apply_jobs(result);
            Vec::new()
        }
        Msg::RowClicked { uuid } => {
            state.select(&uuid);
            Vec::new()
        }
        Msg::ModalOpened { title, api } => state
            .open_modal(title, api)
            .map(Effect::FetchJobText)
            .into_iter()
            .collect(),
        Msg::ModalClosed => {
            state.close_modal();
            Vec::new()
        }
        Msg::DecodeToggled(enabled) => state
            .toggle_decode(enabled)
            .map(Effect::FetchJobText)
            .into_iter()
            .collect(),
        Msg::RetryClicked => state
            .retry_modal()
            .map(Effect::FetchJobText)
            .into_iter()
            .collect(),
        Msg::TextLoaded { request_id, result } => {
            // Superseded responses are dropped so a slow reply never
            // overwrites the content of a newer request.
            state.apply_text(request_id, result);
            Vec::new()
        }
        Msg::DownloadClicked { api } => state
            .begin_download(api)
            .map(|(uuid, api)| Effect::Download { uuid, api })
            .into_iter()
            .collect(),
        Msg::DownloadFinished(result) => {
            state.finish_download(result);
            Vec::new()
        }
    };

    (state, effects)
}
