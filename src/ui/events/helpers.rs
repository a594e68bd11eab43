//! Helper functions for event handling
//!
//! This module contains utility functions used across event handlers:
//! - State locking helpers (apply actions)
//! - Paste batching

use crate::actions::{apply_action, AppAction};
use crate::state::SharedState;
use crate::types::NoticeKind;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use tracing::error;

/// Apply a single action to state
pub fn apply(state: &SharedState, action: AppAction) {
    match state.write() {
        Ok(mut s) => apply_action(action, &mut s),
        Err(_) => error!(?action, "state lock poisoned, dropping action"),
    }
}

/// Apply multiple actions to state under one lock
pub fn apply_many(state: &SharedState, actions: Vec<AppAction>) {
    match state.write() {
        Ok(mut s) => {
            for action in actions {
                apply_action(action, &mut s);
            }
        }
        Err(_) => error!("state lock poisoned, dropping actions"),
    }
}

/// Show an error notice for input the form could not coerce
pub fn reject(state: &SharedState, message: impl Into<String>) {
    apply(
        state,
        AppAction::ShowNotice {
            message: message.into(),
            kind: NoticeKind::Error,
        },
    );
}

/// Collect a batch of characters for paste support
///
/// When a character is typed, this function checks for any immediately available
/// character events and batches them together, so a paste lands as one append.
pub fn collect_paste_batch(initial_char: char) -> String {
    let mut batch = String::from(initial_char);

    while let Ok(true) = event::poll(std::time::Duration::from_millis(0)) {
        match event::read() {
            Ok(Event::Key(next_key)) => match next_key.code {
                KeyCode::Char(c) if !next_key.modifiers.contains(KeyModifiers::CONTROL) => {
                    batch.push(c);
                }
                _ => break,
            },
            _ => break,
        }
    }

    batch
}
