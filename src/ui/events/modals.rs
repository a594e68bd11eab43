//! Modal dialog handlers
//!
//! This module handles user input for modal dialogs:
//! - API base URL configuration
//! - Delete confirmation

use super::helpers::{apply, collect_paste_batch, reject};
use crate::actions::AppAction;
use crate::config;
use crate::state::SharedState;
use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

/// Open the URL modal pre-filled with the current base URL
pub fn handle_url_dialog(state: &SharedState, base_url: &str) {
    apply(
        state,
        AppAction::EnterUrlInputMode {
            base_url: base_url.to_string(),
        },
    );
    debug!("entering URL input mode");
}

/// Handle URL input modal (with paste batching support)
pub fn handle_url_input(key: KeyEvent, state: &SharedState) -> Option<Command> {
    match key.code {
        KeyCode::Enter => {
            let base_url = state.read().ok()?.input.url_input.trim().to_string();

            match config::validate_url(&base_url) {
                Ok(()) => {
                    info!(%base_url, "base URL submitted");
                    apply(state, AppAction::ExitUrlInputMode);
                    return Some(Command::ChangeBaseUrl(base_url));
                }
                Err(e) => {
                    debug!(error = %e, "invalid base URL");
                    reject(state, e);
                }
            }
        }
        KeyCode::Esc => {
            apply(state, AppAction::ExitUrlInputMode);
            debug!("URL input cancelled");
        }
        KeyCode::Backspace => apply(state, AppAction::BackspaceUrlInput),
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::DeleteWordUrlInput)
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearUrlInput)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::AppendToUrlInput(collect_paste_batch(c)))
        }
        _ => {}
    }
    None
}

/// Handle the Y/N delete confirmation
pub fn handle_confirm_delete(key: KeyEvent, state: &SharedState) -> Option<Command> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let student_id = state
                .read()
                .ok()?
                .input
                .pending_delete
                .as_ref()
                .map(|p| p.student_id);
            apply(state, AppAction::CloseModal);
            student_id.map(Command::DeleteStudent)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            apply(state, AppAction::CancelDelete);
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::types::{InputMode, PendingDelete};
    use std::sync::{Arc, RwLock};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shared() -> SharedState {
        Arc::new(RwLock::new(AppState::default()))
    }

    #[test]
    fn test_url_dialog_prefills_and_submits() {
        let state = shared();
        handle_url_dialog(&state, "http://escola.local:5000/api");
        assert_eq!(state.read().unwrap().input.mode, InputMode::EnteringUrl);

        let command = handle_url_input(key(KeyCode::Enter), &state);
        assert_eq!(
            command,
            Some(Command::ChangeBaseUrl("http://escola.local:5000/api".to_string()))
        );
        let s = state.read().unwrap();
        assert_eq!(s.input.mode, InputMode::Normal);
        assert!(s.input.url_input.is_empty());
    }

    #[test]
    fn test_invalid_url_keeps_modal_open() {
        let state = shared();
        handle_url_dialog(&state, "localhost:5000");

        assert_eq!(handle_url_input(key(KeyCode::Enter), &state), None);
        let s = state.read().unwrap();
        assert_eq!(s.input.mode, InputMode::EnteringUrl);
        assert!(s.notice.is_some());
    }

    #[test]
    fn test_confirm_delete_yes_and_no() {
        let state = shared();
        {
            let mut s = state.write().unwrap();
            s.input.mode = InputMode::ConfirmDelete;
            s.input.pending_delete = Some(PendingDelete {
                student_id: 3,
                name: "Bruno".to_string(),
            });
        }
        assert_eq!(
            handle_confirm_delete(key(KeyCode::Char('y')), &state),
            Some(Command::DeleteStudent(3))
        );
        assert!(state.read().unwrap().input.pending_delete.is_none());

        {
            let mut s = state.write().unwrap();
            s.input.mode = InputMode::ConfirmDelete;
            s.input.pending_delete = Some(PendingDelete {
                student_id: 3,
                name: "Bruno".to_string(),
            });
        }
        assert_eq!(handle_confirm_delete(key(KeyCode::Char('n')), &state), None);
        let s = state.read().unwrap();
        assert_eq!(s.input.mode, InputMode::Normal);
        assert!(s.input.pending_delete.is_none());
    }
}
