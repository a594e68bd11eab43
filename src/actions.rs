use crate::forms::{FilterSelection, GradeDraft, StudentDraft};
use crate::state::AppState;
use crate::types::{InputMode, NoticeKind, PendingDelete, Tab};

/// Represents all state-changing actions triggered by input
/// Network calls are not actions; they are spawned by the event handlers
/// and write their results back through `sync`.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Navigation actions
    SelectTab(Tab),
    NextTab,
    PrevTab,
    SelectUp,
    SelectDown,

    // Student form
    OpenStudentForm,
    ResetStudentForm,

    // Grade form
    OpenGradeForm,
    ResetGradeForm,

    // Shared by both forms
    CloseModal,
    NextField,
    PrevField,
    AppendToField(String),
    BackspaceField,
    ClearField,
    CycleOption { forward: bool },

    // Grade filter
    OpenFilter,
    ToggleFilterField,
    CycleFilterOption { forward: bool },
    ResetFilterSelection,

    // Delete confirmation
    RequestDeleteSelected,
    CancelDelete,

    // API URL modal
    EnterUrlInputMode { base_url: String },
    ExitUrlInputMode,
    AppendToUrlInput(String),
    BackspaceUrlInput,
    ClearUrlInput,
    DeleteWordUrlInput,

    // Notices
    ShowNotice { message: String, kind: NoticeKind },
    DismissNotice,
}

/// Apply an action to the application state
/// All input-driven mutations go through here
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        // Navigation
        AppAction::SelectTab(tab) => {
            state.ui.active_tab = tab;
        }
        AppAction::NextTab => {
            state.ui.active_tab = state.ui.active_tab.next();
        }
        AppAction::PrevTab => {
            state.ui.active_tab = state.ui.active_tab.prev();
        }
        AppAction::SelectUp => match state.ui.active_tab {
            Tab::Students => {
                state.ui.student_selected = state.ui.student_selected.saturating_sub(1);
            }
            Tab::Grades => {
                state.ui.grade_selected = state.ui.grade_selected.saturating_sub(1);
            }
            Tab::Reports => {
                state.ui.report_scroll = state.ui.report_scroll.saturating_sub(1);
            }
            Tab::Dashboard => {}
        },
        AppAction::SelectDown => match state.ui.active_tab {
            Tab::Students => {
                let max = state.data.students.len().saturating_sub(1);
                state.ui.student_selected = (state.ui.student_selected + 1).min(max);
            }
            Tab::Grades => {
                let max = state.grade_row_count().saturating_sub(1);
                state.ui.grade_selected = (state.ui.grade_selected + 1).min(max);
            }
            Tab::Reports => {
                let max = state.data.student_report.len().saturating_sub(1);
                state.ui.report_scroll = (state.ui.report_scroll + 1).min(max);
            }
            Tab::Dashboard => {}
        },

        // Forms
        AppAction::OpenStudentForm => {
            state.input.mode = InputMode::StudentForm;
        }
        AppAction::ResetStudentForm => {
            state.input.student_form = StudentDraft::default();
        }
        AppAction::OpenGradeForm => {
            state.input.mode = InputMode::GradeForm;
        }
        AppAction::ResetGradeForm => {
            state.input.grade_form = GradeDraft::default();
        }
        AppAction::CloseModal => {
            state.input.mode = InputMode::Normal;
            state.input.pending_delete = None;
        }
        AppAction::NextField => match state.input.mode {
            InputMode::StudentForm => {
                let form = &mut state.input.student_form;
                form.active = form.active.next();
            }
            InputMode::GradeForm => {
                let form = &mut state.input.grade_form;
                form.active = form.active.next();
            }
            _ => {}
        },
        AppAction::PrevField => match state.input.mode {
            InputMode::StudentForm => {
                let form = &mut state.input.student_form;
                form.active = form.active.prev();
            }
            InputMode::GradeForm => {
                let form = &mut state.input.grade_form;
                form.active = form.active.prev();
            }
            _ => {}
        },
        AppAction::AppendToField(text) => {
            if let Some(field) = active_text_field(state) {
                field.push_str(&text);
            }
        }
        AppAction::BackspaceField => {
            if let Some(field) = active_text_field(state) {
                field.pop();
            }
        }
        AppAction::ClearField => {
            if let Some(field) = active_text_field(state) {
                field.clear();
            }
        }
        AppAction::CycleOption { forward } => {
            if state.input.mode == InputMode::GradeForm {
                let AppState { data, input, .. } = state;
                input
                    .grade_form
                    .cycle_selection(&data.students, &data.subjects, forward);
            }
        }

        // Filter
        AppAction::OpenFilter => {
            state.input.mode = InputMode::GradeFilter;
        }
        AppAction::ToggleFilterField => {
            state.input.filter.toggle_field();
        }
        AppAction::CycleFilterOption { forward } => {
            let AppState { data, input, .. } = state;
            input
                .filter
                .cycle_selection(&data.students, &data.subjects, forward);
        }
        AppAction::ResetFilterSelection => {
            state.input.filter = FilterSelection::default();
        }

        // Delete
        AppAction::RequestDeleteSelected => {
            let pending = state.selected_student().map(|s| PendingDelete {
                student_id: s.id,
                name: s.name.clone(),
            });
            if let Some(pending) = pending {
                state.input.pending_delete = Some(pending);
                state.input.mode = InputMode::ConfirmDelete;
            }
        }
        AppAction::CancelDelete => {
            state.input.pending_delete = None;
            state.input.mode = InputMode::Normal;
        }

        // URL modal
        AppAction::EnterUrlInputMode { base_url } => {
            state.input.mode = InputMode::EnteringUrl;
            state.input.url_input = base_url;
        }
        AppAction::ExitUrlInputMode => {
            state.input.mode = InputMode::Normal;
            state.input.url_input.clear();
        }
        AppAction::AppendToUrlInput(text) => {
            state.input.url_input.push_str(&text);
        }
        AppAction::BackspaceUrlInput => {
            state.input.url_input.pop();
        }
        AppAction::ClearUrlInput => {
            state.input.url_input.clear();
        }
        AppAction::DeleteWordUrlInput => {
            delete_word(&mut state.input.url_input);
        }

        // Notices
        AppAction::ShowNotice { message, kind } => {
            state.show_notice(message, kind);
        }
        AppAction::DismissNotice => {
            state.notice = None;
        }
    }
}

/// Text buffer of the focused form field, if it is a typed field
fn active_text_field(state: &mut AppState) -> Option<&mut String> {
    match state.input.mode {
        InputMode::StudentForm => Some(state.input.student_form.active_text_mut()),
        InputMode::GradeForm if !state.input.grade_form.active.is_selector() => {
            Some(&mut state.input.grade_form.grade)
        }
        _ => None,
    }
}

/// Delete back to the previous URL separator (Ctrl+W)
fn delete_word(s: &mut String) {
    let trimmed_len = s.trim_end_matches(['/', ':', '.', ' ']).len();
    s.truncate(trimmed_len);

    if let Some(pos) = s.rfind(['/', ':', '.', ' ']) {
        s.truncate(pos + 1);
    } else {
        s.clear();
    }
}
