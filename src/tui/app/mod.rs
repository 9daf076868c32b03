//! Application state and core logic for the TUI
//!
//! The App owns the cached list, the filter inputs, and the modal state.
//! Input events mutate state synchronously; network work runs in spawned
//! tasks that report back through the data channel, so the UI never blocks
//! on the backend.

mod state;

pub use state::{
    DataCache, FeedbackState, FormField, FormState, ListState, ModalState, StatusMenuState, Toast,
};

use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::filter::{filter_indices, StatusFilter};
use crate::models::{AppConfig, JobApplication, JobDraft};
use crate::tui::event::{DataEvent, EventResult, InputEvent, KeyAction};

/// Main application state
pub struct App {
    // Lifecycle
    pub running: bool,

    // Modal State
    pub modal: ModalState,

    // Data
    pub data: DataCache,

    // Filter inputs (recomputed against the cache on every change)
    pub query: String,
    pub status_filter: StatusFilter,

    // Table selection
    pub list_state: ListState,

    // Feedback
    pub feedback: FeedbackState,

    // Configuration
    pub config: AppConfig,

    // Communication
    pub client: ApiClient,
    pub data_tx: mpsc::Sender<DataEvent>,
}

impl App {
    /// Create a new App instance with the required data channel sender.
    ///
    /// The `data_tx` channel carries fetch results and mutation outcomes
    /// back from spawned network tasks.
    pub fn new(
        config: AppConfig,
        config_warnings: Vec<String>,
        client: ApiClient,
        data_tx: mpsc::Sender<DataEvent>,
    ) -> Self {
        Self {
            running: true,
            modal: ModalState::None,
            data: DataCache::default(),
            query: String::new(),
            status_filter: StatusFilter::All,
            list_state: ListState {
                // Refined by the first Resize event
                visible_count: 20,
                ..ListState::default()
            },
            feedback: FeedbackState::new(config_warnings),
            config,
            client,
            data_tx,
        }
    }

    /// Indices into the cache that survive the current filters, in order.
    #[must_use]
    pub fn visible_indices(&self) -> Vec<usize> {
        filter_indices(&self.data.applications, &self.query, &self.status_filter)
    }

    /// The record under the cursor, if any.
    #[must_use]
    pub fn selected_application(&self) -> Option<&JobApplication> {
        let visible = self.visible_indices();
        visible
            .get(self.list_state.selected)
            .map(|&i| &self.data.applications[i])
    }

    #[must_use]
    pub fn has_active_filter(&self) -> bool {
        !self.query.trim().is_empty() || self.status_filter != StatusFilter::All
    }

    /// Handle an input event
    pub fn handle_input(&mut self, event: InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key_event) => {
                let action = KeyAction::from_key_event(key_event, self.modal.is_editing());
                self.handle_action(action)
            }
            InputEvent::Resize(_, height) => {
                // Rows available to the table: total minus chrome (title,
                // filter bar, status bar, table border, header)
                self.list_state.visible_count = height.saturating_sub(7) as usize;
                self.clamp_selection();
                EventResult::Continue
            }
        }
    }

    /// Handle a key action
    fn handle_action(&mut self, action: KeyAction) -> EventResult {
        // Modal modes take priority over normal navigation
        match &self.modal {
            ModalState::Help => return self.handle_help_action(action),
            ModalState::Search => return self.handle_search_action(action),
            ModalState::StatusMenu { .. } => return self.handle_status_menu_action(action),
            ModalState::Form(_) => return self.handle_form_action(action),
            ModalState::ConfirmDelete { .. } => return self.handle_confirm_action(action),
            ModalState::Detail => return self.handle_detail_action(action),
            ModalState::None => {}
        }

        if let Some(result) = self.handle_navigation(&action) {
            return result;
        }

        match action {
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }

            KeyAction::Select => {
                if self.selected_application().is_some() {
                    self.modal = ModalState::Detail;
                }
                EventResult::Continue
            }
            KeyAction::Refresh => {
                self.spawn_reload();
                EventResult::Continue
            }
            KeyAction::OpenSearch => {
                self.modal = ModalState::Search;
                EventResult::Continue
            }
            KeyAction::OpenStatusMenu => {
                self.modal = ModalState::StatusMenu {
                    menu: StatusMenuState::new(&self.status_filter),
                };
                EventResult::Continue
            }
            KeyAction::OpenNew => {
                self.modal = ModalState::Form(FormState::open_new());
                EventResult::Continue
            }
            KeyAction::OpenEdit => {
                if let Some(app) = self.selected_application().cloned() {
                    self.modal = ModalState::Form(FormState::open_edit(&app));
                }
                EventResult::Continue
            }
            KeyAction::DeleteSelected => {
                if let Some(app) = self.selected_application() {
                    let id = app.id;
                    let company = app.company_name.clone();
                    if self.config.behavior.confirm_delete {
                        self.modal = ModalState::ConfirmDelete { id, company };
                    } else {
                        self.execute_delete(id);
                    }
                }
                EventResult::Continue
            }
            KeyAction::ClearFilters => {
                if self.has_active_filter() {
                    self.query.clear();
                    self.status_filter = StatusFilter::All;
                    self.clamp_selection();
                }
                EventResult::Continue
            }
            KeyAction::ShowHelp => {
                self.modal = ModalState::Help;
                EventResult::Continue
            }
            KeyAction::Escape => EventResult::Unchanged,
            _ => EventResult::Unchanged,
        }
    }

    /// Common list navigation. Returns None when the action is not a
    /// navigation action.
    fn handle_navigation(&mut self, action: &KeyAction) -> Option<EventResult> {
        let len = self.visible_indices().len();
        match action {
            KeyAction::MoveUp => self.list_state.move_up(len),
            KeyAction::MoveDown => self.list_state.move_down(len),
            KeyAction::MoveToTop => self.list_state.move_to_top(),
            KeyAction::MoveToBottom => self.list_state.move_to_bottom(len),
            KeyAction::PageUp => self.list_state.page_up(len),
            KeyAction::PageDown => self.list_state.page_down(len),
            _ => return None,
        }
        Some(EventResult::Continue)
    }

    fn handle_help_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::ShowHelp | KeyAction::Quit | KeyAction::Select => {
                self.modal = ModalState::None;
                EventResult::Continue
            }
            _ => EventResult::Unchanged,
        }
    }

    /// Live search: every keystroke edits the active query, so the table
    /// recomputes immediately (no debouncing, no apply step).
    fn handle_search_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::InputChar(c) => {
                self.query.push(c);
                self.clamp_selection();
                EventResult::Continue
            }
            KeyAction::InputBackspace => {
                self.query.pop();
                self.clamp_selection();
                EventResult::Continue
            }
            KeyAction::InputClear => {
                self.query.clear();
                self.clamp_selection();
                EventResult::Continue
            }
            // Enter and Esc both leave search mode; the query stays applied
            KeyAction::Select | KeyAction::Escape => {
                self.modal = ModalState::None;
                EventResult::Continue
            }
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }
            _ => EventResult::Unchanged,
        }
    }

    fn handle_status_menu_action(&mut self, action: KeyAction) -> EventResult {
        let ModalState::StatusMenu { menu } = &mut self.modal else {
            return EventResult::Unchanged;
        };
        match action {
            KeyAction::MoveUp => {
                menu.move_up();
                EventResult::Continue
            }
            KeyAction::MoveDown => {
                menu.move_down();
                EventResult::Continue
            }
            KeyAction::Select => {
                let chosen = menu.selected_option().cloned();
                self.modal = ModalState::None;
                if let Some(option) = chosen {
                    self.status_filter = option;
                    self.clamp_selection();
                }
                EventResult::Continue
            }
            KeyAction::Escape => {
                self.modal = ModalState::None;
                EventResult::Continue
            }
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }
            _ => EventResult::Unchanged,
        }
    }

    fn handle_form_action(&mut self, action: KeyAction) -> EventResult {
        let ModalState::Form(form) = &mut self.modal else {
            return EventResult::Unchanged;
        };
        match action {
            KeyAction::InputChar(c) => {
                form.insert_char(c);
                EventResult::Continue
            }
            KeyAction::InputBackspace => {
                form.backspace();
                EventResult::Continue
            }
            KeyAction::InputClear => {
                form.clear_focused();
                EventResult::Continue
            }
            KeyAction::NextField | KeyAction::MoveDown => {
                form.focus_next();
                EventResult::Continue
            }
            KeyAction::PrevField | KeyAction::MoveUp => {
                form.focus_prev();
                EventResult::Continue
            }
            KeyAction::CycleRight => {
                form.cycle_status(true);
                EventResult::Continue
            }
            KeyAction::CycleLeft => {
                form.cycle_status(false);
                EventResult::Continue
            }
            KeyAction::Select => {
                self.submit_form();
                EventResult::Continue
            }
            // Cancel discards edits from either open state
            KeyAction::Escape => {
                self.modal = ModalState::None;
                EventResult::Continue
            }
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }
            _ => EventResult::Unchanged,
        }
    }

    fn handle_confirm_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::ConfirmYes | KeyAction::Select => {
                if let ModalState::ConfirmDelete { id, .. } = &self.modal {
                    let id = *id;
                    self.execute_delete(id);
                }
                self.modal = ModalState::None;
                EventResult::Continue
            }
            KeyAction::ConfirmNo | KeyAction::Escape => {
                self.modal = ModalState::None;
                EventResult::Continue
            }
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }
            _ => EventResult::Unchanged,
        }
    }

    fn handle_detail_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::Select => {
                self.modal = ModalState::None;
                EventResult::Continue
            }
            KeyAction::OpenEdit => {
                if let Some(app) = self.selected_application().cloned() {
                    self.modal = ModalState::Form(FormState::open_edit(&app));
                }
                EventResult::Continue
            }
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }
            _ => EventResult::Unchanged,
        }
    }

    /// Handle a data event
    pub fn handle_data(&mut self, event: DataEvent) -> EventResult {
        match event {
            DataEvent::Tick => {
                if self.feedback.expire_toast() {
                    EventResult::Continue
                } else {
                    EventResult::Unchanged
                }
            }
            DataEvent::ApplicationsUpdated(applications) => {
                self.data.replace(applications);
                self.feedback.load_error = None;
                self.clamp_selection();
                EventResult::Continue
            }
            DataEvent::FetchError(message) => {
                tracing::debug!("list fetch failed: {}", message);
                self.feedback.load_error = Some(message);
                EventResult::Continue
            }
            DataEvent::MutationResult { success, message } => {
                if success {
                    // Close the form if this was its in-flight submission
                    if matches!(&self.modal, ModalState::Form(form) if form.submitting) {
                        self.modal = ModalState::None;
                    }
                    self.feedback.set_toast(Toast::success(message));
                } else {
                    // The form stays open on failure so edits are not lost
                    if let ModalState::Form(form) = &mut self.modal {
                        form.submitting = false;
                        form.error = Some(message.clone());
                    }
                    self.feedback.set_toast(Toast::failure(message));
                }
                EventResult::Continue
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_indices().len();
        self.list_state.clamp(len);
    }

    /// Validate and dispatch the form. Validation failures never reach the
    /// network; they surface inside the modal.
    fn submit_form(&mut self) {
        let ModalState::Form(form) = &mut self.modal else {
            return;
        };
        if form.submitting {
            return;
        }

        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(err) => {
                form.error = Some(err.to_string());
                return;
            }
        };

        form.submitting = true;
        form.error = None;
        let editing_id = form.editing_id;
        match editing_id {
            Some(id) => self.execute_update(id, draft),
            None => self.execute_create(draft),
        }
    }

    /// Run a create in the background, then reload the list.
    fn execute_create(&self, draft: JobDraft) {
        let client = self.client.clone();
        let data_tx = self.data_tx.clone();
        let company = draft.company_name.clone();

        tokio::spawn(async move {
            let result = client.create(&draft).await;
            let (success, message) = match result {
                Ok(()) => (true, format!("Added application for {}", company)),
                Err(e) => (false, format!("Create failed: {}", e)),
            };
            finish_mutation(&client, &data_tx, success, message).await;
        });
    }

    /// Run an update in the background, then reload the list. The PUT always
    /// targets the id the form was opened with.
    fn execute_update(&self, id: u64, draft: JobDraft) {
        let client = self.client.clone();
        let data_tx = self.data_tx.clone();

        tokio::spawn(async move {
            let result = client.update(id, &draft).await;
            let (success, message) = match result {
                Ok(()) => (true, format!("Updated application #{}", id)),
                Err(e) => (false, format!("Update failed: {}", e)),
            };
            finish_mutation(&client, &data_tx, success, message).await;
        });
    }

    /// Run a delete in the background, then reload the list.
    fn execute_delete(&self, id: u64) {
        let client = self.client.clone();
        let data_tx = self.data_tx.clone();

        tokio::spawn(async move {
            let result = client.remove(id).await;
            let (success, message) = match result {
                Ok(()) => (true, format!("Deleted application #{}", id)),
                Err(e) => (false, format!("Delete failed: {}", e)),
            };
            finish_mutation(&client, &data_tx, success, message).await;
        });
    }

    /// Fetch the list in the background (manual refresh and initial load).
    pub fn spawn_reload(&self) {
        let client = self.client.clone();
        let data_tx = self.data_tx.clone();

        tokio::spawn(async move {
            let event = match client.list().await {
                Ok(applications) => DataEvent::ApplicationsUpdated(applications),
                Err(e) => DataEvent::FetchError(e.to_string()),
            };
            let _ = data_tx.send(event).await;
        });
    }
}

/// Report a mutation outcome, then make the displayed state
/// backend-authoritative again with a full reload.
async fn finish_mutation(
    client: &ApiClient,
    data_tx: &mpsc::Sender<DataEvent>,
    success: bool,
    message: String,
) {
    let _ = data_tx
        .send(DataEvent::MutationResult { success, message })
        .await;

    if success {
        let event = match client.list().await {
            Ok(applications) => DataEvent::ApplicationsUpdated(applications),
            Err(e) => DataEvent::FetchError(e.to_string()),
        };
        let _ = data_tx.send(event).await;
    }
}
