//! Modal dialog rendering
//!
//! This module contains rendering functions for modal dialogs:
//! - New student form
//! - New grade form
//! - Grade filter selectors
//! - Delete confirmation
//! - API URL input

use super::styling;
use crate::api::models::Subject;
use crate::forms::{FilterField, GradeField, StudentField};
use crate::state::AppState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Centered rectangle of the given width ratio (capped) and fixed height
fn centered_rect(area: Rect, ratio: f32, max_width: f32, height: u16) -> Rect {
    let width = (area.width as f32 * ratio).min(max_width) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Clear the area, draw the modal frame and return its inner area
fn open_modal(frame: &mut Frame, area: Rect, title: &str, border: Color) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).add_modifier(Modifier::BOLD))
        .style(styling::modal_style());

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// One `label: value` line, marked when active
fn field_line(label: &str, value: String, active: bool) -> Line<'static> {
    let marker = if active { "► " } else { "  " };
    let label_style = Style::default().fg(if active { Color::Yellow } else { Color::LightCyan });
    let value_style = if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(format!("{marker}{label:<10}"), label_style),
        Span::styled(value, value_style),
    ])
}

fn help_line(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center)
}

/// Render the new student form
pub fn render_student_form_modal(frame: &mut Frame, state: &AppState) {
    let modal_area = centered_rect(frame.area(), 0.6, 70.0, 10);
    let inner = open_modal(frame, modal_area, "New Student", Color::Cyan);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Fields
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let draft = &state.input.student_form;
    let lines: Vec<Line> = StudentField::ALL
        .iter()
        .map(|field| {
            let mut value = draft.value(*field).to_string();
            if *field == draft.active {
                value.push('_');
            }
            field_line(field.label(), value, *field == draft.active)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    frame.render_widget(
        help_line("Tab: Next field  |  Ctrl+L: Clear  |  Enter: Save  |  Esc: Cancel"),
        chunks[2],
    );
}

fn selector_value(name: Option<String>, active: bool) -> String {
    let text = name.unwrap_or_else(|| "(none)".to_string());
    if active {
        format!("◄ {text} ►")
    } else {
        text
    }
}

fn student_label(state: &AppState, id: i64) -> String {
    state
        .student_name(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{id}"))
}

/// Subject name with its teacher when the server sent one
fn subject_label(state: &AppState, id: &str) -> String {
    match state.data.subjects.iter().find(|s| s.id == id) {
        Some(Subject {
            name,
            teacher: Some(teacher),
            ..
        }) => format!("{name} ({teacher})"),
        Some(subject) => subject.name.clone(),
        None => id.to_string(),
    }
}

/// Render the new grade form
pub fn render_grade_form_modal(frame: &mut Frame, state: &AppState) {
    let modal_area = centered_rect(frame.area(), 0.6, 70.0, 10);
    let inner = open_modal(frame, modal_area, "New Grade", Color::Cyan);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Fields
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let draft = &state.input.grade_form;
    let lines: Vec<Line> = GradeField::ALL
        .iter()
        .map(|field| {
            let active = *field == draft.active;
            let value = match field {
                GradeField::Student => selector_value(
                    draft.student_id.map(|id| student_label(state, id)),
                    active,
                ),
                GradeField::Subject => selector_value(
                    draft.subject_id.as_deref().map(|id| subject_label(state, id)),
                    active,
                ),
                GradeField::Period => selector_value(Some(format!("{}º", draft.period)), active),
                GradeField::Grade if active => format!("{}_", draft.grade),
                GradeField::Grade => draft.grade.clone(),
            };
            field_line(field.label(), value, active)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    frame.render_widget(
        help_line("Tab: Next field  |  ←/→: Choose  |  Enter: Save  |  Esc: Cancel"),
        chunks[2],
    );
}

/// Render the grade filter selectors
pub fn render_filter_modal(frame: &mut Frame, state: &AppState) {
    let modal_area = centered_rect(frame.area(), 0.5, 60.0, 8);
    let inner = open_modal(frame, modal_area, "Filter Grades", Color::Yellow);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Selectors
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let filter = &state.input.filter;
    let student = filter
        .student_id
        .map(|id| student_label(state, id))
        .unwrap_or_else(|| "All students".to_string());
    let subject = filter
        .subject_id
        .as_deref()
        .map(|id| state.subject_name(id).unwrap_or(id).to_string())
        .unwrap_or_else(|| "All subjects".to_string());

    let student_active = filter.active == FilterField::Student;
    let lines = vec![
        field_line("Student", selector_value(Some(student), student_active), student_active),
        field_line("Subject", selector_value(Some(subject), !student_active), !student_active),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    frame.render_widget(
        help_line("Tab: Switch  |  ←/→: Choose  |  Enter: Apply  |  Esc: Cancel"),
        chunks[2],
    );
}

/// Render the student delete confirmation
pub fn render_confirm_delete_modal(frame: &mut Frame, state: &AppState) {
    let Some(pending) = &state.input.pending_delete else {
        return;
    };

    let modal_area = centered_rect(frame.area(), 0.5, 60.0, 7);
    let inner = open_modal(frame, modal_area, "Delete Student?", Color::Red);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let message = Paragraph::new(format!(
        "Delete {} (#{}) and all of their grades?",
        pending.name, pending.student_id
    ))
    .style(Style::default().fg(Color::White))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let actions = Paragraph::new("[Y] Yes, delete  |  [N] Cancel")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(actions, chunks[2]);
}

/// Render the API base URL input
pub fn render_url_input_modal(frame: &mut Frame, state: &AppState) {
    let modal_area = centered_rect(frame.area(), 0.7, 90.0, 8);
    let inner = open_modal(frame, modal_area, "Configure API URL", Color::Yellow);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(1), // Label
            Constraint::Length(1), // Input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let desc = Paragraph::new("Base URL of the gradebook API, e.g. http://localhost:5000/api")
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(desc, chunks[0]);

    let label = Paragraph::new("API Base URL:").style(Style::default().fg(Color::LightCyan));
    frame.render_widget(label, chunks[1]);

    let input = Paragraph::new(format!("{}_", state.input.url_input)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[2]);

    frame.render_widget(
        help_line("Enter: Confirm  |  Ctrl+W: Delete word  |  Ctrl+L: Clear  |  Esc: Cancel"),
        chunks[4],
    );
}
