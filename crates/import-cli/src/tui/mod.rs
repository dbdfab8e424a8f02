use crate::logging::LogBuffer;
use crate::page::{AdminPage, delete_prompt};
use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use import_api::HttpAdminClient;
use import_core::api::AdminApi;
use import_core::audit::{AuditContext, AuditLogger, AuditStatus};
use import_core::config::AdminConfig;
use import_core::model::RepoDescriptor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

const LOG_PANEL_HEIGHT: u16 = 7;
const FORM_LABELS: [&str; 4] = ["Import root", "VCS root", "VCS", "Suffix (optional)"];

mod app_core;
mod draw;
mod handle;
mod jobs;
#[cfg(test)]
mod tests;

pub fn run_tui(
    config: AdminConfig,
    audit: &AuditLogger,
    log_buffer: LogBuffer,
    runtime: Handle,
) -> anyhow::Result<()> {
    let client = HttpAdminClient::from_config(&config)?;
    let api_base = client.base().to_string();

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    info!(api = %api_base, "Starting TUI");
    audit.record(
        "tui.start",
        AuditStatus::Ok,
        AuditContext::empty(),
        None,
        None,
    )?;
    let app = TuiApp::load(
        &config,
        api_base,
        Arc::new(client),
        runtime,
        audit.clone(),
        log_buffer,
    );
    let result = run_app(&mut terminal, app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    match result {
        Ok(()) => {
            let _ = audit.record(
                "tui.exit",
                AuditStatus::Ok,
                AuditContext::empty(),
                None,
                None,
            );
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "TUI exited with error");
            Err(err)
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: TuiApp,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();
    debug!(
        tick_rate_ms = tick_rate.as_millis(),
        "TUI event loop started"
    );

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && app.handle_key(key)?
        {
            return Ok(());
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        app.poll_jobs()?;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Mode {
    Browse,
    Filter,
    Create,
    ConfirmDelete(String),
}

enum MutationOutcome {
    Created {
        import_root: String,
        result: Result<(), String>,
    },
    Deleted {
        id: String,
        result: Result<(), String>,
    },
}

struct TuiApp {
    page: AdminPage,
    api_base: String,
    client: Arc<dyn AdminApi>,
    runtime: Handle,
    audit: AuditLogger,
    log_buffer: LogBuffer,
    mode: Mode,
    filter_input: String,
    input_index: usize,
    scroll: usize,
    list_rx: Option<mpsc::Receiver<Result<Vec<RepoDescriptor>, String>>>,
    mutation_rx: Option<mpsc::Receiver<MutationOutcome>>,
}
