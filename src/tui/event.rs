//! Event types for the TUI
//!
//! This module implements a dual-channel event architecture:
//! - InputEvent: Priority channel for user input (never dropped)
//! - DataEvent: Data channel for fetch results and mutation outcomes

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::JobApplication;

/// Input events from the terminal (priority channel - never dropped)
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Data and control events (data channel)
#[derive(Debug)]
pub enum DataEvent {
    /// Coarse tick used to expire transient feedback (toasts)
    Tick,

    /// A fresh copy of the backend's collection. The cache is replaced
    /// wholesale, never patched.
    ApplicationsUpdated(Vec<JobApplication>),

    /// A list fetch failed (transport or HTTP)
    FetchError(String),

    /// A create/update/delete finished (success or failure). On success the
    /// follow-up reload arrives as a separate `ApplicationsUpdated`.
    MutationResult { success: bool, message: String },
}

/// Result of processing an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running, UI needs redraw
    Continue,
    /// Continue running, no UI change needed
    Unchanged,
    /// Quit the application
    Quit,
}

/// Key action mappings for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    PageUp,
    PageDown,

    // Actions
    Select,
    Refresh,
    OpenSearch,
    OpenStatusMenu,
    OpenNew,
    OpenEdit,
    DeleteSelected,
    ClearFilters,
    ConfirmYes,
    ConfirmNo,

    // UI
    ShowHelp,
    Escape,
    Quit,

    // Editing mode specific (search input and form fields)
    InputChar(char),
    InputBackspace,
    InputClear,
    NextField,
    PrevField,
    CycleLeft,
    CycleRight,

    // Unknown/unhandled
    Unknown,
}

impl KeyAction {
    /// Map a key event to an action based on current mode
    pub fn from_key_event(event: KeyEvent, editing: bool) -> Self {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        // Editing mode (search input, form fields) has different mappings
        if editing {
            return match code {
                KeyCode::Esc => KeyAction::Escape,
                KeyCode::Enter => KeyAction::Select,
                KeyCode::Backspace => KeyAction::InputBackspace,
                KeyCode::Tab => KeyAction::NextField,
                KeyCode::BackTab => KeyAction::PrevField,
                KeyCode::Up => KeyAction::MoveUp,
                KeyCode::Down => KeyAction::MoveDown,
                KeyCode::Left => KeyAction::CycleLeft,
                KeyCode::Right => KeyAction::CycleRight,
                KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                    KeyAction::InputClear
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
                KeyCode::Char(c) => KeyAction::InputChar(c),
                _ => KeyAction::Unknown,
            };
        }

        // Normal mode mappings
        match code {
            // Quit
            KeyCode::Char('q') => KeyAction::Quit,

            // Ctrl+ combinations must come before bare character matches
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::PageDown,
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::PageUp,

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => KeyAction::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => KeyAction::MoveUp,
            KeyCode::Char('g') | KeyCode::Home => KeyAction::MoveToTop,
            KeyCode::Char('G') | KeyCode::End => KeyAction::MoveToBottom,
            KeyCode::PageDown => KeyAction::PageDown,
            KeyCode::PageUp => KeyAction::PageUp,

            // Actions
            KeyCode::Enter => KeyAction::Select,
            KeyCode::Char('r') => KeyAction::Refresh,
            KeyCode::Char('/') => KeyAction::OpenSearch,
            KeyCode::Char('s') => KeyAction::OpenStatusMenu,
            KeyCode::Char('a') => KeyAction::OpenNew,
            KeyCode::Char('e') => KeyAction::OpenEdit,
            KeyCode::Char('d') | KeyCode::Delete => KeyAction::DeleteSelected,
            KeyCode::Char('c') => KeyAction::ClearFilters,
            KeyCode::Char('y') => KeyAction::ConfirmYes,
            KeyCode::Char('n') => KeyAction::ConfirmNo,

            // Help
            KeyCode::Char('?') | KeyCode::F(1) => KeyAction::ShowHelp,
            KeyCode::Esc => KeyAction::Escape,

            _ => KeyAction::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_action_quit() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::Quit);
    }

    #[test]
    fn test_key_action_navigation() {
        let event = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::MoveDown);

        let event = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::MoveUp);
    }

    #[test]
    fn test_editing_mode_captures_characters() {
        // In editing mode, plain characters feed the focused input
        let event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(
            KeyAction::from_key_event(event, true),
            KeyAction::InputChar('a')
        );

        // In normal mode, 'a' opens the add form
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::OpenNew);
    }

    #[test]
    fn test_editing_mode_ctrl_u() {
        // In editing mode, Ctrl+U clears input
        let event = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(
            KeyAction::from_key_event(event, true),
            KeyAction::InputClear
        );

        // In normal mode, Ctrl+U is page up
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::PageUp);
    }

    #[test]
    fn test_ctrl_c_quits_in_both_modes() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::Quit);
        assert_eq!(KeyAction::from_key_event(event, true), KeyAction::Quit);
    }

    #[test]
    fn test_form_field_navigation_keys() {
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(tab, true), KeyAction::NextField);

        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(
            KeyAction::from_key_event(back_tab, true),
            KeyAction::PrevField
        );
    }
}
