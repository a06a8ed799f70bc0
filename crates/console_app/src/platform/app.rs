use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use console_core::{update, AppState, AppViewModel, DownloadStatus, Lifecycle, ModalContent, Msg};
use console_engine::EngineHandle;
use console_logging::{console_debug, console_info};

use super::cli::{Cli, Command};
use super::config::ConsoleConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ConsoleConfig::load(&cli.config)?;
    if let Some(base_url) = cli.base_url.clone() {
        config.base_url = base_url;
    }
    if let Some(download_dir) = cli.download_dir.clone() {
        config.download_dir = download_dir;
    }
    if let Some(log_file) = cli.log_file.clone() {
        config.log_file = Some(log_file);
    }

    logging::initialize(cli.verbose, config.log_file.as_deref());
    console_info!("Using backend {}", config.base_url);

    let engine = EngineHandle::new(config.client_settings(), config.download_dir.clone())
        .context("failed to start engine")?;
    let mut app = App::new(EffectRunner::new(engine), config.wait());

    app.dispatch(Msg::AppStarted);
    app.settle()?;

    let view = app.view();
    if let Lifecycle::Failed { reason } = &view.lifecycle {
        eprintln!("{}", ui::render::startup_failure(reason));
        bail!("console is not ready");
    }

    match cli.command {
        Command::About => println!("{}", ui::render::about(&view)),
        Command::Jobs => println!("{}", ui::render::jobs_table(&view)),
        Command::Show { uuid } => {
            app.select(&uuid)?;
            println!("{}", ui::render::detail(&app.view()));
        }
        Command::Result { uuid, decode } => {
            app.select(&uuid)?;
            app.open_modal("Result", "/result")?;
            if decode {
                app.dispatch(Msg::DecodeToggled(true));
                app.settle()?;
            }
            app.retry_failed_modal(config.retries)?;
            app.print_modal()?;
        }
        Command::Artifact { uuid } => {
            app.select(&uuid)?;
            app.open_modal("Artifact", "/artifact")?;
            app.retry_failed_modal(config.retries)?;
            app.print_modal()?;
        }
        Command::Download { uuid, api } => {
            app.select(&uuid)?;
            app.dispatch(Msg::DownloadClicked { api });
            app.settle()?;
            let view = app.view();
            println!("{}", ui::render::download(&view));
            if let Some(DownloadStatus::Failed { .. }) = view.download {
                bail!("download failed");
            }
        }
    }
    Ok(())
}

/// Drives the pure state machine: every effect handed to the runner answers
/// with exactly one message, so the app is settled once nothing is in flight.
struct App {
    state: AppState,
    runner: EffectRunner,
    in_flight: usize,
    wait: Duration,
}

impl App {
    fn new(runner: EffectRunner, wait: Duration) -> Self {
        Self {
            state: AppState::new(),
            runner,
            in_flight: 0,
            wait,
        }
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    fn dispatch(&mut self, msg: Msg) {
        console_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.in_flight += effects.len();
        self.runner.enqueue(effects);
    }

    fn settle(&mut self) -> anyhow::Result<()> {
        while self.in_flight > 0 {
            let msg = self
                .runner
                .next_msg(self.wait)
                .ok_or_else(|| anyhow!("no answer from backend within {:?}", self.wait))?;
            self.in_flight -= 1;
            self.dispatch(msg);
        }
        if self.state.consume_dirty() {
            console_debug!("state settled");
        }
        Ok(())
    }

    fn select(&mut self, uuid: &str) -> anyhow::Result<()> {
        self.dispatch(Msg::RowClicked {
            uuid: uuid.to_string(),
        });
        match self.state.selected_job() {
            Some(row) if row.uuid == uuid => Ok(()),
            _ => bail!("no job with uuid {uuid}"),
        }
    }

    fn open_modal(&mut self, title: &str, api: &str) -> anyhow::Result<()> {
        self.dispatch(Msg::ModalOpened {
            title: title.to_string(),
            api: api.to_string(),
        });
        self.settle()
    }

    fn modal_failed(&self) -> bool {
        matches!(
            self.view().modal.map(|modal| modal.content),
            Some(ModalContent::Failed { .. })
        )
    }

    fn retry_failed_modal(&mut self, retries: u32) -> anyhow::Result<()> {
        for attempt in 1..=retries {
            if !self.modal_failed() {
                break;
            }
            console_info!("Retrying text fetch, attempt {}", attempt);
            self.dispatch(Msg::RetryClicked);
            self.settle()?;
        }
        Ok(())
    }

    fn print_modal(&self) -> anyhow::Result<()> {
        println!("{}", ui::render::modal(&self.view()));
        if self.modal_failed() {
            bail!("fetch failed; run the command again to retry");
        }
        Ok(())
    }
}
