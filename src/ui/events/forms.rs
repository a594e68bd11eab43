//! Form and filter input handlers
//!
//! Each handler returns the command to run when the user submits.

use super::helpers::{apply, apply_many, collect_paste_batch, reject};
use crate::actions::AppAction;
use crate::state::SharedState;
use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

/// Keys shared by both forms
fn handle_field_key(key: KeyEvent, state: &SharedState) {
    let action = match key.code {
        KeyCode::Esc => AppAction::CloseModal,
        KeyCode::Tab | KeyCode::Down => AppAction::NextField,
        KeyCode::BackTab | KeyCode::Up => AppAction::PrevField,
        KeyCode::Backspace => AppAction::BackspaceField,
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            AppAction::ClearField
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            AppAction::AppendToField(collect_paste_batch(c))
        }
        _ => return,
    };
    apply(state, action);
}

/// Handle input in the new student form
pub fn handle_student_form(key: KeyEvent, state: &SharedState) -> Option<Command> {
    if key.code != KeyCode::Enter {
        handle_field_key(key, state);
        return None;
    }

    let draft = state.read().ok()?.input.student_form.to_request();
    match draft {
        Ok(student) => {
            debug!(name = %student.name, "student form submitted");
            apply(state, AppAction::CloseModal);
            Some(Command::CreateStudent(student))
        }
        Err(message) => {
            reject(state, message);
            None
        }
    }
}

/// Handle input in the new grade form
pub fn handle_grade_form(key: KeyEvent, state: &SharedState) -> Option<Command> {
    match key.code {
        KeyCode::Left => {
            apply(state, AppAction::CycleOption { forward: false });
            None
        }
        KeyCode::Right => {
            apply(state, AppAction::CycleOption { forward: true });
            None
        }
        KeyCode::Enter => {
            let draft = state.read().ok()?.input.grade_form.to_request();
            match draft {
                Ok(grade) => {
                    debug!(?grade, "grade form submitted");
                    apply(state, AppAction::CloseModal);
                    Some(Command::CreateGrade(grade))
                }
                Err(message) => {
                    reject(state, message);
                    None
                }
            }
        }
        _ => {
            handle_field_key(key, state);
            None
        }
    }
}

/// Handle input in the grade filter selectors
pub fn handle_filter(key: KeyEvent, state: &SharedState) -> Option<Command> {
    match key.code {
        KeyCode::Esc => apply(state, AppAction::CloseModal),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            apply(state, AppAction::ToggleFilterField)
        }
        KeyCode::Left | KeyCode::Char('h') => {
            apply(state, AppAction::CycleFilterOption { forward: false })
        }
        KeyCode::Right | KeyCode::Char('l') => {
            apply(state, AppAction::CycleFilterOption { forward: true })
        }
        KeyCode::Enter => {
            let filter = state.read().ok()?.input.filter.to_filter();
            apply(state, AppAction::CloseModal);
            return Some(Command::FilterGrades(filter));
        }
        KeyCode::Char('c') => {
            apply_many(
                state,
                vec![AppAction::ResetFilterSelection, AppAction::CloseModal],
            );
            return Some(Command::ClearFilters);
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{GradeFilter, NewGrade, NewStudent, Student, Subject};
    use crate::forms::GradeField;
    use crate::state::AppState;
    use crate::types::{InputMode, NoticeKind};
    use std::sync::{Arc, RwLock};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shared(mode: InputMode) -> SharedState {
        let mut state = AppState::default();
        state.input.mode = mode;
        state.data.students = vec![Student {
            id: 7,
            name: "Ana".to_string(),
            email: String::new(),
            age: 15,
            class_name: "9A".to_string(),
            average_grade: 0.0,
            status: None,
        }];
        state.data.subjects = vec![Subject {
            id: "MAT".to_string(),
            name: "Matemática".to_string(),
            teacher: None,
        }];
        Arc::new(RwLock::new(state))
    }

    #[test]
    fn test_student_submit_closes_and_emits_command() {
        let state = shared(InputMode::StudentForm);
        {
            let mut s = state.write().unwrap();
            s.input.student_form.name = "Carla".to_string();
            s.input.student_form.email = "carla@escola.com".to_string();
            s.input.student_form.age = "14".to_string();
            s.input.student_form.class_name = "8B".to_string();
        }

        let command = handle_student_form(key(KeyCode::Enter), &state);

        assert_eq!(
            command,
            Some(Command::CreateStudent(NewStudent {
                name: "Carla".to_string(),
                email: "carla@escola.com".to_string(),
                age: 14,
                class_name: "8B".to_string(),
            }))
        );
        let s = state.read().unwrap();
        assert_eq!(s.input.mode, InputMode::Normal);
        // draft is kept until the server accepts it
        assert_eq!(s.input.student_form.name, "Carla");
    }

    #[test]
    fn test_student_bad_age_keeps_form_open() {
        let state = shared(InputMode::StudentForm);
        state.write().unwrap().input.student_form.age = "fifteen".to_string();

        assert_eq!(handle_student_form(key(KeyCode::Enter), &state), None);

        let s = state.read().unwrap();
        assert_eq!(s.input.mode, InputMode::StudentForm);
        assert_eq!(s.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn test_grade_form_selectors_and_submit() {
        let state = shared(InputMode::GradeForm);

        handle_grade_form(key(KeyCode::Right), &state);
        handle_grade_form(key(KeyCode::Tab), &state);
        handle_grade_form(key(KeyCode::Right), &state);
        handle_grade_form(key(KeyCode::Tab), &state);
        handle_grade_form(key(KeyCode::Right), &state);
        {
            let mut s = state.write().unwrap();
            assert_eq!(s.input.grade_form.active, GradeField::Period);
            s.input.grade_form.grade = "8,5".to_string();
        }

        let command = handle_grade_form(key(KeyCode::Enter), &state);
        assert_eq!(
            command,
            Some(Command::CreateGrade(NewGrade {
                student_id: 7,
                subject_id: "MAT".to_string(),
                period: 2,
                grade: 8.5,
            }))
        );
    }

    #[test]
    fn test_grade_without_student_is_rejected() {
        let state = shared(InputMode::GradeForm);
        state.write().unwrap().input.grade_form.grade = "7".to_string();

        assert_eq!(handle_grade_form(key(KeyCode::Enter), &state), None);
        let s = state.read().unwrap();
        assert_eq!(s.input.mode, InputMode::GradeForm);
        assert_eq!(
            s.notice.as_ref().map(|n| n.message.as_str()),
            Some("Select a student")
        );
    }

    #[test]
    fn test_filter_apply_and_escape() {
        let state = shared(InputMode::GradeFilter);

        handle_filter(key(KeyCode::Right), &state);
        let command = handle_filter(key(KeyCode::Enter), &state);
        assert_eq!(
            command,
            Some(Command::FilterGrades(GradeFilter {
                student_id: Some(7),
                subject_id: None,
            }))
        );
        assert_eq!(state.read().unwrap().input.mode, InputMode::Normal);

        state.write().unwrap().input.mode = InputMode::GradeFilter;
        assert_eq!(handle_filter(key(KeyCode::Esc), &state), None);
        assert_eq!(state.read().unwrap().input.mode, InputMode::Normal);
    }
}
