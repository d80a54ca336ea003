use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use unicode_segmentation::UnicodeSegmentation;

use crate::{features, shared, ui};
use features::todos::{FailureKind, StoreError, TodoItem, TodoStore};
use shared::{logging, Config, FileStorage, I18n, KeyValueStorage, ModernTheme};

/// Which part of the screen receives key presses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Input,
    List,
}

/// Status message for user feedback
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub timestamp: Instant,
    pub message_type: StatusType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Info,
    Success,
    Warning,
    Error,
}

/// Main application state
pub struct App {
    /// Flag to indicate if the app should quit
    pub should_quit: bool,
    /// Application configuration
    pub config: Config,
    /// Where `config` is saved, `None` to keep it in memory only
    config_path: Option<PathBuf>,
    /// Application theme
    pub theme: ModernTheme,
    /// Internationalization
    pub i18n: I18n,
    /// The todo list and its persistence
    pub store: TodoStore,
    /// Text typed into the input line
    pub input: String,
    pub focus: Focus,
    /// Selected row in the list
    pub selected: usize,
    /// Current status message
    pub status_message: Option<StatusMessage>,
    /// Flag to indicate if UI needs redraw
    needs_redraw: bool,
}

impl App {
    /// Create the application from the on-disk configuration
    pub async fn new() -> Result<Self> {
        let config_path = Config::default_path()?;
        let (config, config_warning) = Config::load_from(&config_path);
        let data_dir = config.data_dir()?;

        match logging::init(&data_dir) {
            Ok(log_path) => tracing::info!(log = %log_path.display(), "todo-tui starting"),
            Err(e) => eprintln!("Warning: Failed to initialize logging: {e}"),
        }

        // Config is read before the subscriber exists, so its problems are logged here
        if let Some(e) = config_warning {
            tracing::warn!(error = %format!("{e:#}"), "config problem, using defaults");
        }

        let storage = FileStorage::new(data_dir);
        tracing::info!(dir = %storage.root().display(), "using todo storage");

        Ok(Self::with_storage(config, Some(config_path), Arc::new(storage)).await)
    }

    /// Create the application on top of any storage backend and load the list.
    ///
    /// A failed load leaves the list empty and shows a load-failure notice.
    pub async fn with_storage(
        config: Config,
        config_path: Option<PathBuf>,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Self {
        let theme = ModernTheme::for_mode(&config.theme_mode);
        let i18n = I18n::new(config.language.clone());

        let mut store = TodoStore::new(storage);
        let load_result = store.load().await;

        let mut app = Self {
            should_quit: false,
            config,
            config_path,
            theme,
            i18n,
            store,
            input: String::new(),
            focus: Focus::Input,
            selected: 0,
            status_message: None,
            needs_redraw: true,
        };

        if let Err(e) = load_result {
            app.report_failure(&e);
        }

        app
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        if !IsTty::is_tty(&io::stdout()) {
            eprintln!("This application requires a TTY terminal to run.");
            self.cleanup().await;
            return Ok(());
        }

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let loop_result = self.event_loop(&mut terminal);
        let restore_result = restore_terminal(&mut terminal);

        // Pending todos are flushed even when the terminal could not be restored
        self.cleanup().await;

        restore_result?;
        loop_result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while !self.should_quit {
            self.process_store_reports();

            // Update status message (auto-clear after the configured timeout)
            self.update_status_message(self.config.status_timeout());

            // Only redraw if something changed
            if self.needs_redraw {
                terminal.draw(|f| ui::draw(f, &*self))?;
                self.needs_redraw = false;
            }

            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key);
                        self.needs_redraw = true;
                    }
                    Event::Resize(_, _) => self.needs_redraw = true,
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Pick up finished background writes and surface any failures
    pub fn process_store_reports(&mut self) {
        let was_synced = self.store.is_synced();

        for failure in self.store.poll_reports() {
            self.report_failure(&failure);
        }

        if was_synced != self.store.is_synced() {
            self.needs_redraw = true;
        }
    }

    /// Show the generic notice for a persistence failure
    fn report_failure(&mut self, error: &StoreError) {
        let mut chain = vec![error.to_string()];
        chain.extend(source_chain(error));
        tracing::error!(kind = ?error.kind(), error = %chain.join(": "), "persistence failure");

        let key = match error.kind() {
            FailureKind::Load => "notice.load_failed",
            FailureKind::Save => "notice.save_failed",
        };
        let text = self.i18n.t(key).to_string();
        self.show_status(&text, StatusType::Error);
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Help overlay swallows everything but its own close keys
        if self.config.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.toggle_help();
            }
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key.code),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.add_from_input(),
            KeyCode::Backspace => {
                if let Some((index, _)) = self.input.grapheme_indices(true).next_back() {
                    self.input.truncate(index);
                }
            }
            KeyCode::Esc | KeyCode::Tab | KeyCode::Down => self.focus = Focus::List,
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_selection_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection_up(),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('i') => self.focus = Focus::Input,
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('l') => self.cycle_language(),
            KeyCode::Char('?') => self.toggle_help(),
            _ => {}
        }
    }

    /// "Add current input text" intent
    pub fn add_from_input(&mut self) {
        if self.store.add(&self.input) {
            self.input.clear();
            self.selected = 0;
            let text = self.i18n.t("notice.added").to_string();
            self.show_status(&text, StatusType::Success);
        }
    }

    /// "Toggle item by id" intent for the selected row
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_item().map(|item| item.id.clone()) {
            self.store.toggle(&id);
        }
    }

    /// Get the currently selected todo
    pub fn selected_item(&self) -> Option<&TodoItem> {
        self.store.items().get(self.selected)
    }

    /// Move selection down in the list
    fn move_selection_down(&mut self) {
        let len = self.store.items().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection up in the list
    fn move_selection_up(&mut self) {
        let len = self.store.items().len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Cycle theme mode
    fn cycle_theme(&mut self) {
        self.config.cycle_theme();
        self.theme = ModernTheme::for_mode(&self.config.theme_mode);
        self.save_config();

        let text = format!(
            "{} {}",
            self.i18n.t("notice.theme_changed"),
            self.config.theme_mode.display_name()
        );
        self.show_status(&text, StatusType::Info);
    }

    /// Cycle UI language
    fn cycle_language(&mut self) {
        self.config.cycle_language();
        self.i18n.set_language(self.config.language.clone());
        self.save_config();
    }

    /// Toggle help overlay
    fn toggle_help(&mut self) {
        self.config.toggle_help();
        self.save_config();
    }

    fn save_config(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            tracing::warn!(error = %e, path = %path.display(), "failed to save config");
            let text = self.i18n.t("notice.config_failed").to_string();
            self.show_status(&text, StatusType::Warning);
        }
    }

    /// Get current theme instance
    pub fn current_theme(&self) -> &ModernTheme {
        &self.theme
    }

    /// Show a status message to the user
    pub fn show_status(&mut self, text: &str, status_type: StatusType) {
        self.status_message = Some(StatusMessage {
            text: text.to_string(),
            timestamp: Instant::now(),
            message_type: status_type,
        });
        self.needs_redraw = true;
    }

    /// Clear status message if it's older than the specified duration
    pub fn update_status_message(&mut self, max_age: Duration) {
        if let Some(ref msg) = self.status_message {
            if msg.timestamp.elapsed() > max_age {
                self.status_message = None;
                self.needs_redraw = true;
            }
        }
    }

    /// Flush pending writes and save configuration before exiting
    async fn cleanup(&mut self) {
        let failures = self.store.shutdown().await;
        for failure in &failures {
            tracing::error!(error = %failure, "todos not saved at exit");
        }
        if !failures.is_empty() {
            eprintln!("{}", self.i18n.t("notice.save_failed"));
        }

        self.save_config();
        tracing::info!("todo-tui stopped");
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Messages of every underlying cause, outermost first
fn source_chain(error: &StoreError) -> Vec<String> {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes
}
