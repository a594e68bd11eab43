//! Event handling system for gradebook-tui
//!
//! This module processes user input and translates it into state-changing actions.
//! It handles multiple input modes:
//! - Normal: tab switching, selection and commands
//! - StudentForm / GradeForm: modal forms
//! - GradeFilter: the two grade filter selectors
//! - ConfirmDelete: Y/N before deleting a student
//! - EnteringUrl: modal for the API base URL
//!
//! # Architecture
//!
//! Key presses generate AppActions that are applied to AppState via
//! `apply_action` in actions.rs. Anything that needs the network is returned
//! as a [`Command`] for the app loop to spawn.
//!
//! # Lock Management
//!
//! Handlers take the state lock only for the duration of one action and never
//! hold it across a call that takes it again.

mod forms;
mod helpers;
mod modals;

use crate::actions::AppAction;
use crate::state::SharedState;
use crate::types::{Command, InputMode, Tab};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use helpers::{apply, apply_many};
use std::time::Duration;

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll for one key press and dispatch it on the current input mode
    pub fn handle_events(&mut self, state: &SharedState, base_url: &str) -> Result<Option<Command>> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(self.handle_key(key, state, base_url))
            }
            _ => Ok(None),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, state: &SharedState, base_url: &str) -> Option<Command> {
        let mode = state.read().ok()?.input.mode.clone();

        match mode {
            InputMode::Normal => self.handle_normal_key(key, state, base_url),
            InputMode::StudentForm => forms::handle_student_form(key, state),
            InputMode::GradeForm => forms::handle_grade_form(key, state),
            InputMode::GradeFilter => forms::handle_filter(key, state),
            InputMode::ConfirmDelete => modals::handle_confirm_delete(key, state),
            InputMode::EnteringUrl => modals::handle_url_input(key, state),
        }
    }

    fn handle_normal_key(
        &mut self,
        key: KeyEvent,
        state: &SharedState,
        base_url: &str,
    ) -> Option<Command> {
        let tab = state.read().ok()?.ui.active_tab;

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            // tabs
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(tab) = Tab::from_digit(c) {
                    apply(state, AppAction::SelectTab(tab));
                }
            }
            KeyCode::Tab => apply(state, AppAction::NextTab),
            KeyCode::BackTab => apply(state, AppAction::PrevTab),

            // selection
            KeyCode::Char('j') | KeyCode::Down => apply(state, AppAction::SelectDown),
            KeyCode::Char('k') | KeyCode::Up => apply(state, AppAction::SelectUp),

            // forms
            KeyCode::Char('n') => match tab {
                Tab::Students => apply(state, AppAction::OpenStudentForm),
                Tab::Grades => apply(state, AppAction::OpenGradeForm),
                Tab::Dashboard | Tab::Reports => {}
            },
            KeyCode::Char('d') if tab == Tab::Students => {
                apply(state, AppAction::RequestDeleteSelected)
            }

            // grade filter
            KeyCode::Char('f') => apply_many(
                state,
                vec![AppAction::SelectTab(Tab::Grades), AppAction::OpenFilter],
            ),
            KeyCode::Char('c') => return Some(Command::ClearFilters),

            // server
            KeyCode::Char('r') => return Some(Command::Reload),
            KeyCode::Char('R') => return Some(Command::Reconnect),
            KeyCode::Char(',') => modals::handle_url_dialog(state, base_url),

            KeyCode::Esc => apply(state, AppAction::DismissNotice),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Student;
    use crate::state::AppState;
    use crossterm::event::KeyModifiers;
    use std::sync::{Arc, RwLock};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shared() -> SharedState {
        let mut state = AppState::default();
        state.data.students = vec![Student {
            id: 4,
            name: "Davi".to_string(),
            email: String::new(),
            age: 16,
            class_name: "1A".to_string(),
            average_grade: 0.0,
            status: None,
        }];
        Arc::new(RwLock::new(state))
    }

    #[test]
    fn test_digit_and_tab_keys_switch_tabs() {
        let state = shared();
        let mut handler = EventHandler::new();

        handler.handle_key(key(KeyCode::Char('3')), &state, "");
        assert_eq!(state.read().unwrap().ui.active_tab, Tab::Grades);

        handler.handle_key(key(KeyCode::Tab), &state, "");
        assert_eq!(state.read().unwrap().ui.active_tab, Tab::Reports);

        handler.handle_key(key(KeyCode::BackTab), &state, "");
        assert_eq!(state.read().unwrap().ui.active_tab, Tab::Grades);
    }

    #[test]
    fn test_new_opens_form_for_active_tab() {
        let state = shared();
        let mut handler = EventHandler::new();

        handler.handle_key(key(KeyCode::Char('n')), &state, "");
        assert_eq!(state.read().unwrap().input.mode, InputMode::Normal);

        handler.handle_key(key(KeyCode::Char('2')), &state, "");
        handler.handle_key(key(KeyCode::Char('n')), &state, "");
        assert_eq!(state.read().unwrap().input.mode, InputMode::StudentForm);

        handler.handle_key(key(KeyCode::Esc), &state, "");
        handler.handle_key(key(KeyCode::Char('3')), &state, "");
        handler.handle_key(key(KeyCode::Char('n')), &state, "");
        assert_eq!(state.read().unwrap().input.mode, InputMode::GradeForm);
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let state = shared();
        let mut handler = EventHandler::new();

        handler.handle_key(key(KeyCode::Char('2')), &state, "");
        handler.handle_key(key(KeyCode::Char('d')), &state, "");
        {
            let s = state.read().unwrap();
            assert_eq!(s.input.mode, InputMode::ConfirmDelete);
            assert_eq!(s.input.pending_delete.as_ref().map(|p| p.student_id), Some(4));
        }

        let command = handler.handle_key(key(KeyCode::Char('y')), &state, "");
        assert_eq!(command, Some(Command::DeleteStudent(4)));
    }

    #[test]
    fn test_server_commands_and_quit() {
        let state = shared();
        let mut handler = EventHandler::new();

        assert_eq!(handler.handle_key(key(KeyCode::Char('r')), &state, ""), Some(Command::Reload));
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('R')), &state, ""),
            Some(Command::Reconnect)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('c')), &state, ""),
            Some(Command::ClearFilters)
        );
        assert!(!handler.should_quit);

        handler.handle_key(key(KeyCode::Char('q')), &state, "");
        assert!(handler.should_quit);
    }

    #[test]
    fn test_filter_key_jumps_to_grades() {
        let state = shared();
        let mut handler = EventHandler::new();

        handler.handle_key(key(KeyCode::Char('f')), &state, "");
        let s = state.read().unwrap();
        assert_eq!(s.ui.active_tab, Tab::Grades);
        assert_eq!(s.input.mode, InputMode::GradeFilter);
    }
}
