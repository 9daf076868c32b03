//! Application state types for the TUI
//!
//! This module contains the state management types:
//! - Modal states (Help, Search, StatusMenu, Form, ConfirmDelete, Detail)
//! - Form field state for the add/edit modal
//! - Selection and navigation state (ListState)
//! - Data caching with staleness tracking (DataCache)
//! - Feedback state for errors and toasts

use std::time::{Duration, Instant};

use crate::filter::StatusFilter;
use crate::models::{
    parse_form_date, ApplicationStatus, JobApplication, JobDraft, ValidationError,
};

// ============================================================================
// Modal State
// ============================================================================

/// Exclusive modal overlays. `Search` and `Form` put the key mapping into
/// editing mode.
#[derive(Debug, Default)]
pub enum ModalState {
    #[default]
    None,
    Help,
    /// Live search: keystrokes edit the active query directly, the table
    /// recomputes on every character
    Search,
    StatusMenu {
        menu: StatusMenuState,
    },
    Form(FormState),
    ConfirmDelete {
        id: u64,
        company: String,
    },
    /// Read-only record inspector for the selected row
    Detail,
}

impl ModalState {
    /// Whether keystrokes should be routed to a text input
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self, ModalState::Search | ModalState::Form(_))
    }

    #[must_use]
    pub fn form(&self) -> Option<&FormState> {
        match self {
            ModalState::Form(form) => Some(form),
            _ => None,
        }
    }

    #[must_use]
    pub fn status_menu(&self) -> Option<&StatusMenuState> {
        match self {
            ModalState::StatusMenu { menu } => Some(menu),
            _ => None,
        }
    }
}

// ============================================================================
// Status Menu State
// ============================================================================

/// Status selector menu state
#[derive(Debug)]
pub struct StatusMenuState {
    pub selected: usize,
    pub options: Vec<StatusFilter>,
}

impl StatusMenuState {
    /// Open the menu with the cursor on the currently active selection.
    #[must_use]
    pub fn new(active: &StatusFilter) -> Self {
        let options = StatusFilter::options();
        let selected = options.iter().position(|o| o == active).unwrap_or(0);
        Self { selected, options }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected < self.options.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<&StatusFilter> {
        self.options.get(self.selected)
    }
}

// ============================================================================
// Form State
// ============================================================================

/// Fields of the add/edit form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Company,
    Title,
    Date,
    Status,
    Location,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Company,
        FormField::Title,
        FormField::Date,
        FormField::Status,
        FormField::Location,
        FormField::Notes,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Company => "Company",
            FormField::Title => "Job Title",
            FormField::Date => "Date (YYYY-MM-DD)",
            FormField::Status => "Status",
            FormField::Location => "Location",
            FormField::Notes => "Notes",
        }
    }

    #[must_use]
    pub fn next(&self) -> FormField {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(&self) -> FormField {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Add/edit form state. An unbound id means create (POST); a bound id means
/// the submission goes to PUT on exactly that record.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub editing_id: Option<u64>,
    pub company_name: String,
    pub job_title: String,
    pub date_input: String,
    pub status: ApplicationStatus,
    pub location: String,
    pub notes: String,
    pub focused: FormField,
    /// Validation message shown inside the modal; cleared on next edit
    pub error: Option<String>,
    /// A submission is in flight; further submits are ignored until the
    /// mutation result comes back
    pub submitting: bool,
}

impl FormState {
    /// Blank form for a new application. Status defaults to APPLIED.
    #[must_use]
    pub fn open_new() -> Self {
        Self {
            status: ApplicationStatus::Applied,
            ..Self::default()
        }
    }

    /// Form pre-filled from an existing record, id bound.
    #[must_use]
    pub fn open_edit(app: &JobApplication) -> Self {
        Self {
            editing_id: Some(app.id),
            company_name: app.company_name.clone(),
            job_title: app.job_title.clone(),
            date_input: app.date_display(),
            status: app.status.clone(),
            location: app.location.clone().unwrap_or_default(),
            notes: app.notes.clone().unwrap_or_default(),
            focused: FormField::Company,
            error: None,
            submitting: false,
        }
    }

    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Application"
        } else {
            "Add Application"
        }
    }

    /// Buffer of the focused text field, if the focused field is textual.
    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focused {
            FormField::Company => Some(&mut self.company_name),
            FormField::Title => Some(&mut self.job_title),
            FormField::Date => Some(&mut self.date_input),
            FormField::Location => Some(&mut self.location),
            FormField::Notes => Some(&mut self.notes),
            FormField::Status => None,
        }
    }

    /// Read-only view of a field's display value.
    #[must_use]
    pub fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::Company => &self.company_name,
            FormField::Title => &self.job_title,
            FormField::Date => &self.date_input,
            FormField::Status => self.status.label(),
            FormField::Location => &self.location,
            FormField::Notes => &self.notes,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.error = None;
        if let Some(buffer) = self.focused_buffer() {
            buffer.push(c);
        } else if self.focused == FormField::Status && c == ' ' {
            self.status = self.status.cycle();
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        if let Some(buffer) = self.focused_buffer() {
            buffer.pop();
        }
    }

    pub fn clear_focused(&mut self) {
        self.error = None;
        if let Some(buffer) = self.focused_buffer() {
            buffer.clear();
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Left/Right cycle the status when its field is focused.
    pub fn cycle_status(&mut self, forward: bool) {
        if self.focused == FormField::Status {
            self.status = if forward {
                self.status.cycle()
            } else {
                self.status.cycle_back()
            };
        }
    }

    /// Build the submission payload. Required-field and date validation
    /// happen here, before any network activity.
    pub fn to_draft(&self) -> Result<JobDraft, ValidationError> {
        let application_date = parse_form_date(&self.date_input)?;
        let draft = JobDraft {
            company_name: self.company_name.trim().to_string(),
            job_title: self.job_title.trim().to_string(),
            application_date,
            status: self.status.clone(),
            location: non_empty(&self.location),
            notes: non_empty(&self.notes),
        };
        draft.validate()?;
        Ok(draft)
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// List Navigation State
// ============================================================================

/// List state with selection and scroll tracking
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub selected: usize,
    pub scroll_offset: usize,
    pub visible_count: usize,
}

impl ListState {
    pub fn clamp(&mut self, list_len: usize) {
        if list_len == 0 {
            self.selected = 0;
            self.scroll_offset = 0;
        } else {
            self.selected = self.selected.min(list_len - 1);
            if self.selected < self.scroll_offset {
                self.scroll_offset = self.selected;
            } else if self.visible_count > 0
                && self.selected >= self.scroll_offset + self.visible_count
            {
                self.scroll_offset = self.selected.saturating_sub(self.visible_count - 1);
            }
        }
    }

    pub fn move_up(&mut self, list_len: usize) {
        if self.selected > 0 {
            self.selected -= 1;
            self.clamp(list_len);
        }
    }

    pub fn move_down(&mut self, list_len: usize) {
        if list_len > 0 && self.selected < list_len - 1 {
            self.selected += 1;
            self.clamp(list_len);
        }
    }

    pub fn move_to_top(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn move_to_bottom(&mut self, list_len: usize) {
        if list_len > 0 {
            self.selected = list_len - 1;
            if self.visible_count > 0 {
                self.scroll_offset = list_len.saturating_sub(self.visible_count);
            }
        }
    }

    pub fn page_up(&mut self, list_len: usize) {
        let jump = self.visible_count.max(1) / 2;
        self.selected = self.selected.saturating_sub(jump);
        self.clamp(list_len);
    }

    pub fn page_down(&mut self, list_len: usize) {
        let jump = self.visible_count.max(1) / 2;
        self.selected = self.selected.saturating_add(jump);
        self.clamp(list_len);
    }
}

// ============================================================================
// Data Cache
// ============================================================================

/// The cached collection, replaced wholesale after each successful load.
#[derive(Debug, Default)]
pub struct DataCache {
    pub applications: Vec<JobApplication>,
    pub last_updated: Option<Instant>,
}

impl DataCache {
    pub fn replace(&mut self, applications: Vec<JobApplication>) {
        self.applications = applications;
        self.last_updated = Some(Instant::now());
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.last_updated.is_some()
    }

    #[must_use]
    pub fn by_id(&self, id: u64) -> Option<&JobApplication> {
        self.applications.iter().find(|app| app.id == id)
    }
}

// ============================================================================
// Feedback State
// ============================================================================

/// How long a toast stays visible
const TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Transient mutation feedback
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub success: bool,
    pub timestamp: Instant,
}

impl Toast {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
            timestamp: Instant::now(),
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
            timestamp: Instant::now(),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.timestamp.elapsed() < TOAST_DURATION
    }
}

/// Grouped feedback state: a sticky load error plus a transient toast.
#[derive(Debug, Default)]
pub struct FeedbackState {
    /// Last list-fetch error; cleared by the next successful load
    pub load_error: Option<String>,
    toast: Option<Toast>,
    /// Warnings collected while loading configuration
    pub config_warnings: Vec<String>,
}

impl FeedbackState {
    #[must_use]
    pub fn new(config_warnings: Vec<String>) -> Self {
        Self {
            config_warnings,
            ..Self::default()
        }
    }

    pub fn set_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    #[must_use]
    pub fn current_toast(&self) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_visible())
    }

    /// Drop an expired toast. Returns true if one was dropped (the UI needs
    /// a redraw to remove it).
    pub fn expire_toast(&mut self) -> bool {
        if let Some(toast) = &self.toast
            && !toast.is_visible()
        {
            self.toast = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_app() -> JobApplication {
        JobApplication {
            id: 7,
            company_name: "Acme".to_string(),
            job_title: "Eng".to_string(),
            application_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 14),
            status: ApplicationStatus::Interview,
            location: Some("Berlin".to_string()),
            notes: Some("referral".to_string()),
        }
    }

    #[test]
    fn test_list_state_navigation() {
        let mut state = ListState::default();
        state.visible_count = 10;

        state.move_down(5);
        assert_eq!(state.selected, 1);

        state.move_to_bottom(5);
        assert_eq!(state.selected, 4);

        state.move_to_top();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_list_state_clamp_after_shrink() {
        let mut state = ListState {
            selected: 9,
            scroll_offset: 5,
            visible_count: 5,
        };
        state.clamp(3);
        assert_eq!(state.selected, 2);
        assert!(state.scroll_offset <= state.selected);

        state.clamp(0);
        assert_eq!(state.selected, 0);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_form_open_new_defaults() {
        let form = FormState::open_new();
        assert_eq!(form.editing_id, None);
        assert_eq!(form.status, ApplicationStatus::Applied);
        assert!(form.company_name.is_empty());
        assert!(form.job_title.is_empty());
        assert!(form.date_input.is_empty());
        assert_eq!(form.title(), "Add Application");
    }

    #[test]
    fn test_form_open_edit_prefills_and_binds_id() {
        let form = FormState::open_edit(&sample_app());
        assert_eq!(form.editing_id, Some(7));
        assert_eq!(form.company_name, "Acme");
        assert_eq!(form.date_input, "2025-03-14");
        assert_eq!(form.status, ApplicationStatus::Interview);
        assert_eq!(form.location, "Berlin");
        assert_eq!(form.notes, "referral");
        assert_eq!(form.title(), "Edit Application");
    }

    #[test]
    fn test_form_to_draft_validates_required_fields() {
        let mut form = FormState::open_new();
        assert!(matches!(
            form.to_draft(),
            Err(ValidationError::MissingField("company name"))
        ));

        form.company_name = "Acme".to_string();
        assert!(matches!(
            form.to_draft(),
            Err(ValidationError::MissingField("job title"))
        ));

        form.job_title = "Eng".to_string();
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.company_name, "Acme");
        assert_eq!(draft.application_date, None);
        assert_eq!(draft.location, None);
    }

    #[test]
    fn test_form_to_draft_rejects_bad_date() {
        let mut form = FormState::open_new();
        form.company_name = "Acme".to_string();
        form.job_title = "Eng".to_string();
        form.date_input = "next week".to_string();
        assert!(matches!(
            form.to_draft(),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_form_editing_routes_to_focused_field() {
        let mut form = FormState::open_new();
        form.insert_char('A');
        assert_eq!(form.company_name, "A");

        form.focus_next();
        form.insert_char('E');
        assert_eq!(form.job_title, "E");
        assert_eq!(form.company_name, "A");

        form.backspace();
        assert!(form.job_title.is_empty());
    }

    #[test]
    fn test_form_status_cycling() {
        let mut form = FormState::open_new();
        form.focused = FormField::Status;
        form.cycle_status(true);
        assert_eq!(form.status, ApplicationStatus::Interview);
        form.cycle_status(false);
        assert_eq!(form.status, ApplicationStatus::Applied);

        // Cycling is a no-op when a text field is focused
        form.focused = FormField::Company;
        form.cycle_status(true);
        assert_eq!(form.status, ApplicationStatus::Applied);
    }

    #[test]
    fn test_form_field_order_wraps() {
        assert_eq!(FormField::Company.next(), FormField::Title);
        assert_eq!(FormField::Notes.next(), FormField::Company);
        assert_eq!(FormField::Company.prev(), FormField::Notes);
    }

    #[test]
    fn test_data_cache_replace_wholesale() {
        let mut cache = DataCache::default();
        assert!(!cache.is_loaded());

        cache.replace(vec![sample_app()]);
        assert!(cache.is_loaded());
        assert_eq!(cache.applications.len(), 1);
        assert!(cache.by_id(7).is_some());
        assert!(cache.by_id(8).is_none());

        cache.replace(Vec::new());
        assert!(cache.applications.is_empty());
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_status_menu_opens_on_active_selection() {
        let menu = StatusMenuState::new(&StatusFilter::Only(ApplicationStatus::Offered));
        assert_eq!(
            menu.selected_option(),
            Some(&StatusFilter::Only(ApplicationStatus::Offered))
        );

        let menu = StatusMenuState::new(&StatusFilter::All);
        assert_eq!(menu.selected, 0);
    }
}
