//! Application state for the mangalag terminal UI
//!
//! Holds the rendered snapshot of the reading list, selection and overlay
//! state, and drives background refreshes. While a refresh runs the
//! `ReadingList` lives in the refresh task, which is what makes the UI show
//! its loading indicator and ignore further refresh requests.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;
use tracing::debug;

use mangalag::data::OutdatedEntry;
use mangalag::refresh::{ReadingList, RefreshMessage};

/// Main application struct managing state and data
pub struct App {
    /// User whose list is shown
    pub username: String,
    /// Index of currently selected entry
    pub selected_index: usize,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Refresh requested by a key press, `Some(force_clear)`
    pub refresh_requested: Option<bool>,
    /// Entries currently on screen
    entries: Vec<OutdatedEntry>,
    /// Time of the last successful refresh
    last_refresh: Option<DateTime<Local>>,
    /// The list, or `None` while a refresh task owns it
    list: Option<ReadingList>,
    sender: mpsc::Sender<RefreshMessage>,
    receiver: mpsc::Receiver<RefreshMessage>,
}

impl App {
    /// Creates a new App around `list`
    pub fn new(list: ReadingList, username: impl Into<String>) -> Self {
        let (sender, receiver) = mpsc::channel(4);
        Self {
            username: username.into(),
            selected_index: 0,
            should_quit: false,
            show_help: false,
            refresh_requested: None,
            entries: Vec::new(),
            last_refresh: None,
            list: Some(list),
            sender,
            receiver,
        }
    }

    /// Entries currently on screen
    pub fn entries(&self) -> &[OutdatedEntry] {
        &self.entries
    }

    /// Time of the last successful refresh
    pub fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }

    /// Whether a refresh is in flight
    pub fn is_loading(&self) -> bool {
        self.list.is_none()
    }

    /// Sum of chapters left across all entries
    pub fn chapters_behind(&self) -> f64 {
        self.entries.iter().map(|e| e.chapters_left).sum()
    }

    /// Shows the cached list. Returns `false` if there was nothing cached.
    pub fn load_cache(&mut self) -> bool {
        if let Some(list) = self.list.as_mut() {
            self.entries = list.load_cache().to_vec();
            self.clamp_selection();
        }
        !self.entries.is_empty()
    }

    /// Starts a background refresh unless one is already running
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_refresh(&mut self, force_clear: bool) {
        let Some(list) = self.list.take() else {
            debug!("refresh already in flight, ignoring request");
            return;
        };

        if force_clear {
            self.entries.clear();
            self.selected_index = 0;
        }

        let sender = self.sender.clone();
        tokio::spawn(async move {
            let message = list.refresh_into_message(force_clear).await;
            let _ = sender.send(message).await;
        });
    }

    /// Starts the refresh requested by a key press, if any
    pub fn process_refresh_request(&mut self) {
        if let Some(force_clear) = self.refresh_requested.take() {
            self.start_refresh(force_clear);
        }
    }

    /// Applies any finished refresh without blocking
    pub fn poll_refresh(&mut self) {
        while let Ok(message) = self.receiver.try_recv() {
            self.handle_refresh_message(message);
        }
    }

    /// Waits for the in-flight refresh, if any, and applies it
    #[cfg(test)]
    pub async fn wait_for_refresh(&mut self) {
        if !self.is_loading() {
            return;
        }
        if let Some(message) = self.receiver.recv().await {
            self.handle_refresh_message(message);
        }
    }

    fn handle_refresh_message(&mut self, message: RefreshMessage) {
        match message {
            RefreshMessage::Completed { list, result } => {
                if result.is_ok() {
                    self.last_refresh = list.last_refresh();
                }
                self.entries = list.entries().to_vec();
                self.list = Some(list);
                self.clamp_selection();
            }
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q` or `Esc`: Quit the application
    /// - `Up`/`k`, `Down`/`j`: Move selection
    /// - `g`/`G`: Jump to first/last entry
    /// - `r`: Refresh from the API
    /// - `R`: Discard the cached list and refresh
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection_down();
            }
            KeyCode::Char('g') => {
                self.selected_index = 0;
            }
            KeyCode::Char('G') => {
                self.selected_index = self.entries.len().saturating_sub(1);
            }
            KeyCode::Char('r') => {
                self.refresh_requested = Some(false);
            }
            KeyCode::Char('R') => {
                self.refresh_requested = Some(true);
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    /// Moves the selection up in the list, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.entries.len();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down in the list, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.entries.len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self
            .selected_index
            .min(self.entries.len().saturating_sub(1));
    }
}
