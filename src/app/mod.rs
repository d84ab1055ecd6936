mod state;
mod event_loop;
mod render;
mod input;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, Clear, ClearType},
};
use tracing::info;

use crate::api::Backend;
use crate::config::Config;
use crate::controller::Dashboard;
use crate::dispatcher::Dispatcher;
use crate::executor::ActionKind;
use crate::export;
use crate::model::{CursorState, Focus};

pub use input::{handle_key, InputResult};
pub use state::{CountPrompt, PendingAction, PendingActionKind, CONFIRM_TIMEOUT};

/// Restore the terminal to normal mode. Safe to call multiple times.
pub fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Main application state and event loop.
pub struct App {
    pub dashboard: Dashboard,
    pub dispatcher: Dispatcher,
    pub focus: Focus,
    pub cursor: CursorState,
    pub pending_action: Option<PendingAction>,
    pub count_prompt: Option<CountPrompt>,
    pub export_dir: PathBuf,
    pub backend_label: String,
    pub last_clock: Instant,
    pub tick_rate: Duration,
}

impl App {
    pub fn new(rt: Arc<tokio::runtime::Runtime>, backend: Backend, config: &Config) -> Self {
        let backend_label = backend.describe();
        let mut dashboard = Dashboard::new();
        if let Some(seal) = &config.initial_seal {
            dashboard.seal_input = seal.clone();
        }

        Self {
            dashboard,
            dispatcher: Dispatcher::new(rt, backend),
            focus: Focus::SealInput,
            cursor: CursorState::default(),
            pending_action: None,
            count_prompt: None,
            export_dir: config.export_dir.clone(),
            backend_label,
            last_clock: Instant::now(),
            tick_rate: Duration::from_secs(1),
        }
    }

    /// Validate the typed seal id and start the lookup.
    pub fn start_lookup(&mut self) {
        match self.dashboard.begin_lookup() {
            Ok(req) => {
                self.cursor = CursorState::default();
                self.pending_action = None;
                self.count_prompt = None;
                self.dispatcher.fetch_applications(req);
                self.focus = Focus::Applications;
            }
            Err(e) => {
                info!(error = %e, "Lookup not started");
            }
        }
    }

    /// Open the application under the cursor and load its pools.
    pub fn open_application(&mut self) {
        let Some(id) = self
            .dashboard
            .applications()
            .items()
            .get(self.cursor.app_index)
            .map(|a| a.id.clone())
        else {
            return;
        };
        if let Some(req) = self.dashboard.select_application(&id) {
            self.cursor.pool_index = 0;
            self.pending_action = None;
            self.dispatcher.fetch_pools(req);
            self.focus = Focus::Pools;
        }
    }

    /// Re-fetch the pools of the chosen application.
    pub fn reload_pools(&mut self) {
        let Some(id) = self.dashboard.selected_application().map(|a| a.id.clone()) else { return };
        if let Some(req) = self.dashboard.select_application(&id) {
            self.cursor.pool_index = 0;
            self.dispatcher.fetch_pools(req);
        }
    }

    /// Toggle the pool under the cursor.
    pub fn toggle_pool_at_cursor(&mut self) {
        let Some(id) = self
            .dashboard
            .pools()
            .items()
            .get(self.cursor.pool_index)
            .map(|p| p.id.clone())
        else {
            return;
        };
        self.dashboard.toggle_pool(&id);
    }

    /// Ask for confirmation before running `kind` on the selection.
    pub fn request_action(&mut self, kind: ActionKind) {
        if self.dashboard.is_processing() {
            self.dashboard.set_info("An action is already in progress...");
            return;
        }
        let selected = self.dashboard.selection().len();
        if selected == 0 {
            return;
        }
        let Some(app) = self.dashboard.selected_application() else { return };
        self.pending_action = Some(PendingAction::bulk(kind, selected, &app.name));
    }

    /// Confirmed: hand the action to the dispatcher.
    pub fn confirm_action(&mut self, kind: ActionKind) {
        if let Some(req) = self.dashboard.perform_action(kind) {
            self.dispatcher.perform_action(req);
        }
    }

    /// Export the application under the cursor (or the chosen one) as CSV.
    pub fn export_application(&mut self) {
        let app = match self.focus {
            Focus::Applications => self.dashboard.applications().items().get(self.cursor.app_index),
            _ => self.dashboard.selected_application(),
        };
        let Some(app) = app.cloned() else { return };
        match export::write_application_csv(&app, &self.export_dir) {
            Ok(path) => self.dashboard.set_info(format!("Exported {}", path.display())),
            Err(e) => self.dashboard.set_error(format!("Export failed: {}", e)),
        }
    }
}

/// Run the application. Sets up terminal, runs the main loop, restores terminal on exit.
pub fn run(backend: Backend, config: &Config, should_quit: Arc<AtomicBool>) -> io::Result<()> {
    let rt = Arc::new(
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(2)
            .build()?,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Clear(ClearType::All))?;

    let mut app = App::new(Arc::clone(&rt), backend, config);
    if config.initial_seal.is_some() {
        app.start_lookup();
    }
    let mut needs_render = true;

    loop {
        if should_quit.load(Ordering::Relaxed) {
            info!("Quit signal received");
            break;
        }

        if app.expire_pending_action() {
            needs_render = true;
        }
        if app.poll_completions() {
            needs_render = true;
        }
        if app.tick_clock() {
            needs_render = true;
        }

        if needs_render {
            if render::render_size_guard()? {
                needs_render = false;
                if crossterm::event::poll(Duration::from_millis(100))? {
                    let _ = crossterm::event::read()?;
                }
                continue;
            }

            render::render(&app)?;
            needs_render = false;
        }

        if crossterm::event::poll(Duration::from_millis(100))? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key_event) => {
                    match input::handle_key(&mut app, key_event) {
                        Some(InputResult::Quit) => break,
                        Some(InputResult::Consumed) => needs_render = true,
                        None => {}
                    }
                }
                crossterm::event::Event::Resize(_, _) => needs_render = true,
                _ => {}
            }
        }
    }

    restore_terminal();
    Ok(())
}
