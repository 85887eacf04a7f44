//! Application state for the location screen.
//!
//! [`App`] holds everything the UI renders: the saved records, the busy flag,
//! the theme, the permission alert and transient status messages. It never
//! touches storage itself; user actions return a [`Command`] for the worker,
//! and [`ScreenEvent`]s from the worker are folded back in with
//! [`App::handle_event`].

use std::time::Instant;

use ratatui::layout::{Position, Rect};

use mylocation_core::{CaptureOutcome, Command, LocationRecord, ScreenEvent, ThemeMode};

use super::errors::format_error_with_guidance;
use super::ui::theme::AppTheme;

/// Alert shown when location access is refused.
pub const PERMISSION_DENIED_MESSAGE: &str = "Permissão negada.";

/// Terminal rows per record: title, then timestamp.
pub const LIST_ITEM_HEIGHT: u16 = 2;

/// Most status messages kept at once.
const MAX_STATUS_MESSAGES: usize = 5;

/// An action waiting for a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete every saved location.
    ClearLocations,
}

/// Screen regions recorded by the last draw, used for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub dark_mode_switch: Rect,
    pub capture_button: Rect,
    pub clear_button: Rect,
    /// Inner area of the record list (inside the border).
    pub list: Rect,
    /// Index of the first visible record.
    pub list_offset: usize,
}

/// Main application state for the TUI.
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Saved records, newest first.
    pub locations: Vec<LocationRecord>,
    /// Index of the highlighted record.
    pub selected: usize,
    /// A capture is running.
    pub is_loading: bool,
    pub dark_mode: bool,
    /// Blocking alert; dismissed with Enter or Esc.
    pub alert: Option<String>,
    /// Action awaiting confirmation.
    pub pending_confirmation: Option<PendingAction>,
    /// Queue of status messages with their creation time.
    pub status_messages: Vec<(String, Instant)>,
    /// How long to show each status message (in seconds).
    pub status_message_timeout: u64,
    /// Whether to show the help overlay.
    pub show_help: bool,
    /// Current spinner animation frame.
    pub spinner_frame: usize,
    /// Name of the position source, shown in the header.
    pub provider_name: String,
    pub layout: ScreenLayout,
}

impl App {
    pub fn new(provider_name: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            locations: Vec::new(),
            selected: 0,
            is_loading: false,
            dark_mode: false,
            alert: None,
            pending_confirmation: None,
            status_messages: Vec::new(),
            status_message_timeout: 5,
            show_help: false,
            spinner_frame: 0,
            provider_name: provider_name.into(),
            layout: ScreenLayout::default(),
        }
    }

    /// Whether the application should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn theme_mode(&self) -> ThemeMode {
        ThemeMode::from_dark(self.dark_mode)
    }

    /// Palette for the current theme.
    pub fn app_theme(&self) -> AppTheme {
        if self.dark_mode {
            AppTheme::dark()
        } else {
            AppTheme::light()
        }
    }

    /// Add a status message to the queue.
    pub fn push_status_message(&mut self, message: String) {
        self.status_messages.push((message, Instant::now()));
        while self.status_messages.len() > MAX_STATUS_MESSAGES {
            self.status_messages.remove(0);
        }
    }

    /// Remove expired status messages.
    pub fn clean_expired_messages(&mut self) {
        let timeout = std::time::Duration::from_secs(self.status_message_timeout);
        self.status_messages
            .retain(|(_, created)| created.elapsed() < timeout);
    }

    /// Get the current status message to display.
    pub fn current_status_message(&self) -> Option<&str> {
        self.status_messages.last().map(|(msg, _)| msg.as_str())
    }

    /// Advance the spinner animation.
    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 10;
    }

    /// Get the current spinner character.
    pub fn spinner_char(&self) -> &'static str {
        const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        SPINNER[self.spinner_frame]
    }

    pub fn selected_location(&self) -> Option<&LocationRecord> {
        self.locations.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.locations.is_empty() {
            self.selected = (self.selected + 1).min(self.locations.len() - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Start a capture unless one is already running.
    pub fn request_capture(&mut self) -> Option<Command> {
        if self.is_loading {
            self.push_status_message("Capture already in progress".to_string());
            return None;
        }
        self.is_loading = true;
        Some(Command::Capture)
    }

    /// Ask before deleting everything.
    pub fn request_clear(&mut self) {
        self.request_confirmation(PendingAction::ClearLocations);
    }

    /// Empty the list right away and tell the worker to delete the rows.
    pub fn clear_locations(&mut self) -> Command {
        self.locations.clear();
        self.selected = 0;
        self.push_status_message("Locations cleared".to_string());
        Command::Clear
    }

    /// Flip the theme; the worker persists it.
    pub fn toggle_dark_mode(&mut self) -> Command {
        self.dark_mode = !self.dark_mode;
        self.push_status_message(format!("Theme: {}", self.theme_mode().label()));
        Command::SetDarkMode(self.dark_mode)
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Request confirmation for an action.
    pub fn request_confirmation(&mut self, action: PendingAction) {
        self.pending_confirmation = Some(action);
    }

    /// Confirm the pending action.
    pub fn confirm_action(&mut self) -> Option<Command> {
        match self.pending_confirmation.take()? {
            PendingAction::ClearLocations => Some(self.clear_locations()),
        }
    }

    /// Cancel the pending action.
    pub fn cancel_confirmation(&mut self) {
        self.pending_confirmation = None;
        self.push_status_message("Cancelled".to_string());
    }

    /// Handle a click at screen coordinates using the last drawn layout.
    pub fn handle_click(&mut self, x: u16, y: u16) -> Option<Command> {
        if self.alert.is_some() || self.pending_confirmation.is_some() {
            return None;
        }

        let pos = Position::new(x, y);
        if self.layout.capture_button.contains(pos) {
            return self.request_capture();
        }
        if self.layout.clear_button.contains(pos) {
            self.request_clear();
            return None;
        }
        if self.layout.dark_mode_switch.contains(pos) {
            return Some(self.toggle_dark_mode());
        }
        if self.layout.list.contains(pos) {
            let row = self.layout.list_offset
                + usize::from((y - self.layout.list.y) / LIST_ITEM_HEIGHT);
            if row < self.locations.len() {
                self.selected = row;
            }
        }
        None
    }

    /// Handle an incoming worker event and update state accordingly.
    pub fn handle_event(&mut self, event: ScreenEvent) {
        match event {
            ScreenEvent::LocationsLoaded(locations) => {
                self.locations = locations;
                if self.selected >= self.locations.len() {
                    self.selected = self.locations.len().saturating_sub(1);
                }
            }
            ScreenEvent::DarkModeLoaded(dark) => {
                self.dark_mode = dark;
            }
            ScreenEvent::CaptureStarted => {
                self.is_loading = true;
            }
            ScreenEvent::CaptureFinished(outcome) => {
                self.is_loading = false;
                self.handle_capture_outcome(outcome);
            }
            ScreenEvent::StorageFailed { operation, error } => {
                let (message, _) = format_error_with_guidance(&error);
                self.push_status_message(format!("Could not {} locations: {}", operation, message));
            }
            ScreenEvent::PreferenceFailed { error } => {
                let (message, suggestion) = format_error_with_guidance(&error);
                self.push_status_message(match suggestion {
                    Some(hint) => format!("{}. {}", message, hint),
                    None => message,
                });
            }
        }
    }

    fn handle_capture_outcome(&mut self, outcome: CaptureOutcome) {
        match outcome {
            CaptureOutcome::Saved(record) => {
                self.selected = 0;
                self.push_status_message(format!("Saved {}", record.title()));
            }
            CaptureOutcome::PermissionDenied => {
                self.alert = Some(PERMISSION_DENIED_MESSAGE.to_string());
            }
            CaptureOutcome::Failed(error) => {
                let (message, suggestion) = format_error_with_guidance(&error);
                self.push_status_message(match suggestion {
                    Some(hint) => format!("{}. {}", message, hint),
                    None => message,
                });
            }
            CaptureOutcome::Cancelled => {
                self.push_status_message("Capture cancelled".to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> LocationRecord {
        LocationRecord {
            id,
            latitude: -23.55052,
            longitude: -46.633308,
            captured_at: "07/03/2024, 09:05:02".to_string(),
        }
    }

    #[test]
    fn test_new_app_defaults() {
        let app = App::new("mock");
        assert!(!app.is_loading);
        assert!(!app.dark_mode);
        assert!(app.locations.is_empty());
        assert!(app.alert.is_none());
        assert_eq!(app.theme_mode(), ThemeMode::Light);
    }

    #[test]
    fn test_request_capture_sets_busy_once() {
        let mut app = App::new("mock");
        assert_eq!(app.request_capture(), Some(Command::Capture));
        assert!(app.is_loading);
        assert_eq!(app.request_capture(), None);
        assert_eq!(
            app.current_status_message(),
            Some("Capture already in progress")
        );
    }

    #[test]
    fn test_permission_denied_shows_alert_and_resets_busy() {
        let mut app = App::new("mock");
        app.handle_event(ScreenEvent::LocationsLoaded(vec![record(1)]));
        app.request_capture();
        app.handle_event(ScreenEvent::CaptureStarted);

        app.handle_event(ScreenEvent::CaptureFinished(
            CaptureOutcome::PermissionDenied,
        ));

        assert!(!app.is_loading);
        assert_eq!(app.alert.as_deref(), Some(PERMISSION_DENIED_MESSAGE));
        assert_eq!(app.locations, vec![record(1)]);

        app.dismiss_alert();
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_saved_capture_selects_newest() {
        let mut app = App::new("mock");
        app.handle_event(ScreenEvent::LocationsLoaded(vec![record(1)]));
        app.selected = 0;
        app.handle_event(ScreenEvent::LocationsLoaded(vec![record(2), record(1)]));
        app.handle_event(ScreenEvent::CaptureFinished(CaptureOutcome::Saved(
            record(2),
        )));

        assert!(!app.is_loading);
        assert_eq!(app.selected_location().map(|r| r.id), Some(2));
        assert_eq!(
            app.current_status_message(),
            Some("Saved Lat: -23.55052, Lon: -46.63331")
        );
    }

    #[test]
    fn test_failed_capture_uses_guidance() {
        let mut app = App::new("mock");
        app.is_loading = true;
        app.handle_event(ScreenEvent::CaptureFinished(CaptureOutcome::Failed(
            "Operation 'gpsd fix' timed out after 30s".to_string(),
        )));
        assert!(!app.is_loading);
        assert!(app.current_status_message().unwrap().starts_with("No fix in time"));
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let mut app = App::new("mock");
        app.handle_event(ScreenEvent::LocationsLoaded(vec![record(2), record(1)]));

        app.request_clear();
        assert_eq!(app.pending_confirmation, Some(PendingAction::ClearLocations));
        assert_eq!(app.locations.len(), 2);

        app.cancel_confirmation();
        assert!(app.pending_confirmation.is_none());
        assert_eq!(app.locations.len(), 2);

        app.request_clear();
        assert_eq!(app.confirm_action(), Some(Command::Clear));
        assert!(app.locations.is_empty());
        assert_eq!(app.confirm_action(), None);
    }

    #[test]
    fn test_toggle_dark_mode() {
        let mut app = App::new("mock");
        assert_eq!(app.toggle_dark_mode(), Command::SetDarkMode(true));
        assert!(app.dark_mode);
        assert_eq!(app.toggle_dark_mode(), Command::SetDarkMode(false));
    }

    #[test]
    fn test_dark_mode_loaded() {
        let mut app = App::new("mock");
        app.handle_event(ScreenEvent::DarkModeLoaded(true));
        assert!(app.dark_mode);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = App::new("mock");
        app.handle_event(ScreenEvent::LocationsLoaded(vec![record(3), record(2), record(1)]));
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 2);

        app.handle_event(ScreenEvent::LocationsLoaded(vec![record(3)]));
        assert_eq!(app.selected, 0);
        app.select_previous();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_status_messages_are_bounded() {
        let mut app = App::new("mock");
        for i in 0..8 {
            app.push_status_message(format!("message {}", i));
        }
        assert_eq!(app.status_messages.len(), MAX_STATUS_MESSAGES);
        assert_eq!(app.current_status_message(), Some("message 7"));
    }

    #[test]
    fn test_click_hits_buttons() {
        let mut app = App::new("mock");
        app.layout = ScreenLayout {
            dark_mode_switch: Rect::new(0, 1, 40, 3),
            capture_button: Rect::new(0, 4, 40, 3),
            clear_button: Rect::new(0, 7, 40, 3),
            list: Rect::new(1, 11, 38, 6),
            list_offset: 0,
        };
        app.handle_event(ScreenEvent::LocationsLoaded(vec![record(2), record(1)]));

        assert_eq!(app.handle_click(5, 5), Some(Command::Capture));
        assert_eq!(app.handle_click(5, 8), None);
        assert_eq!(app.pending_confirmation, Some(PendingAction::ClearLocations));

        // Clicks are ignored while the dialog is open.
        assert_eq!(app.handle_click(5, 2), None);
        app.cancel_confirmation();

        assert_eq!(app.handle_click(5, 2), Some(Command::SetDarkMode(true)));
        app.handle_click(5, 13);
        assert_eq!(app.selected, 1);
        app.handle_click(5, 12);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_storage_failure_message() {
        let mut app = App::new("mock");
        app.handle_event(ScreenEvent::StorageFailed {
            operation: "save".to_string(),
            error: "Database error: disk I/O error".to_string(),
        });
        assert_eq!(
            app.current_status_message(),
            Some("Could not save locations: Storage error")
        );
    }

    #[test]
    fn test_spinner_cycles() {
        let mut app = App::new("mock");
        let first = app.spinner_char();
        for _ in 0..10 {
            app.tick_spinner();
        }
        assert_eq!(app.spinner_char(), first);
    }
}
