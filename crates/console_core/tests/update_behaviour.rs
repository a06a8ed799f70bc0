use std::sync::Once;

use chrono::FixedOffset;
use console_core::{
    update, AppState, ApplicationInfo, Bootstrap, DisplayZone, DownloadStatus, Effect, JobRecord,
    JobState, Layout, Lifecycle, ModalContent, Msg, PluginDescriptor, PluginDirectory, PluginKind,
    TextRequest,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(console_logging::initialize_for_tests);
}

fn bootstrap() -> Bootstrap {
    Bootstrap {
        about: ApplicationInfo {
            application_name: "Job Controller".into(),
            version: "1.2.0".into(),
        },
        directory: PluginDirectory::new(
            vec![PluginDescriptor::new(PluginKind::Provider, "p1", "Provider One")],
            vec![PluginDescriptor::new(PluginKind::Publisher, "pub1", "Publisher One")],
        ),
    }
}

fn job(uuid: &str) -> JobRecord {
    JobRecord {
        uuid: uuid.into(),
        name: format!("job {uuid}"),
        provider_class: "p1".into(),
        publisher_class: Some("pub1".into()),
        created: Some(1000),
        started: Some(2000),
        completed: Some(1000 + 5 * 60_000),
        state: JobState::Published,
        success: Some(true),
    }
}

fn utc_state() -> AppState {
    AppState::with_zone(DisplayZone::Fixed(FixedOffset::east_opt(0).unwrap()))
}

fn ready_state() -> AppState {
    let (state, _) = update(utc_state(), Msg::AppStarted);
    let (state, _) = update(state, Msg::DirectoryLoaded(Ok(bootstrap())));
    let (state, _) = update(state, Msg::JobsLoaded(Ok(vec![job("a"), job("b")])));
    state
}

fn selected_state(uuid: &str) -> AppState {
    let (state, _) = update(ready_state(), Msg::RowClicked { uuid: uuid.into() });
    state
}

fn text_request(effects: &[Effect]) -> TextRequest {
    match effects {
        [Effect::FetchJobText(request)] => request.clone(),
        other => panic!("expected a single text fetch, got {other:?}"),
    }
}

#[test]
fn startup_requests_directory_then_jobs() {
    init_logging();
    let (state, effects) = update(utc_state(), Msg::AppStarted);
    assert_eq!(*state.lifecycle(), Lifecycle::Loading);
    assert_eq!(effects, vec![Effect::LoadDirectory]);

    let (state, effects) = update(state, Msg::DirectoryLoaded(Ok(bootstrap())));
    assert!(state.is_ready());
    assert!(state.jobs_loading());
    assert_eq!(effects, vec![Effect::LoadJobs]);
    assert_eq!(state.about().unwrap().version, "1.2.0");
}

#[test]
fn failed_startup_blocks_every_action() {
    init_logging();
    let (state, _) = update(utc_state(), Msg::AppStarted);
    let (state, effects) = update(
        state,
        Msg::DirectoryLoaded(Err("publishers: http status 500".into())),
    );
    assert!(effects.is_empty());
    assert_eq!(
        *state.lifecycle(),
        Lifecycle::Failed {
            reason: "publishers: http status 500".into()
        }
    );

    for msg in [
        Msg::RefreshClicked,
        Msg::JobsLoaded(Ok(vec![job("a")])),
        Msg::RowClicked { uuid: "a".into() },
        Msg::DownloadClicked {
            api: "/artifact".into(),
        },
    ] {
        let (next, effects) = update(state.clone(), msg);
        assert!(effects.is_empty());
        assert_eq!(next, state);
    }
    assert!(state.view().jobs.is_empty());

    // Retrying startup goes back to loading.
    let (state, effects) = update(state, Msg::AppStarted);
    assert_eq!(*state.lifecycle(), Lifecycle::Loading);
    assert_eq!(effects, vec![Effect::LoadDirectory]);
}

#[test]
fn jobs_are_enriched_when_loaded() {
    init_logging();
    let mut state = ready_state();
    let view = state.view();

    assert_eq!(view.jobs.len(), 2);
    assert_eq!(view.jobs[0].provider.to_string(), "Provider One");
    assert_eq!(view.jobs[0].duration.as_deref(), Some("5 min"));
    assert_eq!(view.jobs[0].created.as_deref(), Some("1 Jan 1970 0:0:1"));
    assert!(!view.jobs_loading);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn failed_job_list_keeps_previous_rows() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::RefreshClicked);
    assert_eq!(effects, vec![Effect::LoadJobs]);

    let (state, _) = update(state, Msg::JobsLoaded(Err("network error".into())));
    let view = state.view();
    assert_eq!(view.jobs.len(), 2);
    assert_eq!(view.jobs_error.as_deref(), Some("network error"));
}

#[test]
fn row_click_selects_and_splits_layout() {
    init_logging();
    let state = ready_state();
    assert_eq!(state.view().layout, Layout::Full);

    let (state, effects) = update(state, Msg::RowClicked { uuid: "b".into() });
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.layout, Layout::Split);
    assert_eq!(view.layout.main_columns(), 9);
    assert_eq!(view.layout.sidebar_columns(), 3);
    assert_eq!(view.selected_uuid.as_deref(), Some("b"));

    let detail = view.detail.expect("detail panel");
    assert_eq!(detail.get("uuid"), Some("b"));
    assert_eq!(detail.get("provider"), Some("Provider One"));
    assert_eq!(detail.get("publisher"), Some("Publisher One"));
    assert_eq!(detail.get("duration"), Some("5 min"));
    assert_eq!(detail.get("state"), Some("PUBLISHED"));
    assert_eq!(detail.get("success"), Some("true"));
    assert_eq!(detail.get("successLabel"), Some("Published"));
    assert_eq!(detail.fields.len(), 11);
}

#[test]
fn clicking_unknown_row_changes_nothing() {
    init_logging();
    let state = ready_state();
    let (next, effects) = update(state.clone(), Msg::RowClicked { uuid: "zzz".into() });
    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn result_modal_shows_decode_toggle_and_fetches() {
    init_logging();
    let (state, effects) = update(
        selected_state("a"),
        Msg::ModalOpened {
            title: "Result".into(),
            api: "/result".into(),
        },
    );
    let request = text_request(&effects);
    assert_eq!(request.uuid, "a");
    assert_eq!(request.suffix, "/result");
    assert!(!request.decoded);

    let modal = state.view().modal.expect("modal open");
    assert_eq!(modal.title, "Result");
    assert_eq!(modal.decode_toggle, Some(false));
    assert_eq!(modal.content, ModalContent::Loading);
}

#[test]
fn artifact_modal_hides_decode_toggle() {
    init_logging();
    let (state, effects) = update(
        selected_state("a"),
        Msg::ModalOpened {
            title: "Artifact".into(),
            api: "/artifact".into(),
        },
    );
    assert_eq!(text_request(&effects).suffix, "/artifact");
    assert_eq!(state.view().modal.unwrap().decode_toggle, None);

    // Without a toggle, toggle events are ignored.
    let (_, effects) = update(state, Msg::DecodeToggled(true));
    assert!(effects.is_empty());
}

#[test]
fn modal_needs_a_selected_job() {
    init_logging();
    let (state, effects) = update(
        ready_state(),
        Msg::ModalOpened {
            title: "Result".into(),
            api: "/result".into(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().modal.is_none());
}

#[test]
fn decode_toggle_refetches_and_replaces_content() {
    init_logging();
    let (state, effects) = update(
        selected_state("a"),
        Msg::ModalOpened {
            title: "Result".into(),
            api: "/result".into(),
        },
    );
    let plain = text_request(&effects);
    let (state, _) = update(
        state,
        Msg::TextLoaded {
            request_id: plain.request_id,
            result: Ok("raw".into()),
        },
    );
    assert_eq!(
        state.view().modal.unwrap().content,
        ModalContent::Loaded("raw".into())
    );

    let (state, effects) = update(state, Msg::DecodeToggled(true));
    let decoded = text_request(&effects);
    assert_eq!(decoded.suffix, "/result");
    assert!(decoded.decoded);
    assert_ne!(decoded.request_id, plain.request_id);
    assert_eq!(state.view().modal.unwrap().decode_toggle, Some(true));

    let (state, _) = update(
        state,
        Msg::TextLoaded {
            request_id: decoded.request_id,
            result: Ok("decoded".into()),
        },
    );
    assert_eq!(
        state.view().modal.unwrap().content,
        ModalContent::Loaded("decoded".into())
    );

    let (state, effects) = update(state, Msg::DecodeToggled(false));
    let plain_again = text_request(&effects);
    assert!(!plain_again.decoded);
    let (state, _) = update(
        state,
        Msg::TextLoaded {
            request_id: plain_again.request_id,
            result: Ok("raw".into()),
        },
    );
    assert_eq!(
        state.view().modal.unwrap().content,
        ModalContent::Loaded("raw".into())
    );
}

#[test]
fn stale_response_does_not_overwrite_newer_request() {
    init_logging();
    let (state, effects) = update(
        selected_state("a"),
        Msg::ModalOpened {
            title: "Result".into(),
            api: "/result".into(),
        },
    );
    let first = text_request(&effects);
    let (state, effects) = update(state, Msg::DecodeToggled(true));
    let second = text_request(&effects);

    let (state, _) = update(
        state,
        Msg::TextLoaded {
            request_id: second.request_id,
            result: Ok("new".into()),
        },
    );
    let (state, _) = update(
        state,
        Msg::TextLoaded {
            request_id: first.request_id,
            result: Ok("old".into()),
        },
    );

    assert_eq!(
        state.view().modal.unwrap().content,
        ModalContent::Loaded("new".into())
    );
}

#[test]
fn failed_fetch_is_retryable() {
    init_logging();
    let (state, effects) = update(
        selected_state("a"),
        Msg::ModalOpened {
            title: "Artifact".into(),
            api: "/artifact".into(),
        },
    );
    let first = text_request(&effects);
    let (state, _) = update(
        state,
        Msg::TextLoaded {
            request_id: first.request_id,
            result: Err("http status 503".into()),
        },
    );
    assert_eq!(
        state.view().modal.unwrap().content,
        ModalContent::Failed {
            message: "http status 503".into()
        }
    );

    let (state, effects) = update(state, Msg::RetryClicked);
    let retry = text_request(&effects);
    assert_eq!(retry.suffix, "/artifact");
    assert_eq!(retry.uuid, "a");
    assert_ne!(retry.request_id, first.request_id);
    assert_eq!(state.view().modal.unwrap().content, ModalContent::Loading);
}

#[test]
fn closed_modal_ignores_late_responses() {
    init_logging();
    let (state, effects) = update(
        selected_state("a"),
        Msg::ModalOpened {
            title: "Result".into(),
            api: "/result".into(),
        },
    );
    let request = text_request(&effects);
    let (state, _) = update(state, Msg::ModalClosed);
    let (state, _) = update(
        state,
        Msg::TextLoaded {
            request_id: request.request_id,
            result: Ok("late".into()),
        },
    );
    assert!(state.view().modal.is_none());
}

#[test]
fn download_targets_selected_job() {
    init_logging();
    let (state, effects) = update(
        selected_state("b"),
        Msg::DownloadClicked {
            api: "/artifact".into(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Download {
            uuid: "b".into(),
            api: "/artifact".into()
        }]
    );

    let (state, _) = update(state, Msg::DownloadFinished(Ok("out/b-artifact".into())));
    assert_eq!(
        state.view().download,
        Some(DownloadStatus::Saved {
            location: "out/b-artifact".into()
        })
    );
}

#[test]
fn refreshed_rows_replace_the_selection_copy() {
    init_logging();
    let state = selected_state("a");
    let mut updated = job("a");
    updated.name = "renamed".into();

    let (state, _) = update(state, Msg::JobsLoaded(Ok(vec![updated])));
    assert_eq!(state.selected_job().unwrap().name, "renamed");
}
