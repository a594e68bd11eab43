//! Main panel rendering
//!
//! One body panel per tab:
//! - Dashboard counters
//! - Students table
//! - Grades table (grouped by student and subject)
//! - Reports (general stats, per student, per subject)

use super::components::{render_empty_message, render_error_message, render_loading_spinner};
use super::styling;
use crate::api::models::GradeFilter;
use crate::grading::{format_average, Status};
use crate::rows::{self, period_cell};
use crate::state::AppState;
use crate::types::{LoadingState, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Render the body of the active tab
pub fn render_body(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    table_state: &mut TableState,
) {
    let tab = state.ui.active_tab;
    let title = format!("[{}] {}", tab.index() + 1, tab.title());

    match &state.data.loading_state {
        LoadingState::Checking | LoadingState::Loading => {
            render_loading_spinner(frame, area, &state.data.loading_state, spinner_index, &title);
            return;
        }
        LoadingState::Error(error) => {
            render_error_message(frame, area, error, state.data.retry_count, &title);
            return;
        }
        LoadingState::Idle | LoadingState::Complete => {}
    }

    match tab {
        Tab::Dashboard => render_dashboard(frame, area, state, &title),
        Tab::Students => render_students_panel(frame, area, state, &title, table_state),
        Tab::Grades => render_grades_panel(frame, area, state, &title, table_state),
        Tab::Reports => render_reports_panel(frame, area, state, &title),
    }
}

fn panel_block(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .title(title.into())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(styling::focused_border()))
}

fn header_row(labels: &[&'static str]) -> Row<'static> {
    Row::new(labels.iter().map(|l| Cell::from(*l))).style(styling::header_style())
}

fn counter_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<22}"), Style::default().fg(Color::Cyan)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState, title: &str) {
    let stats = &state.data.dashboard;

    let lines = vec![
        Line::from(""),
        counter_line("Students", stats.total_students.to_string(), Color::White),
        counter_line("Subjects", stats.total_subjects.to_string(), Color::White),
        counter_line("Passing students", stats.passed_students.to_string(), Color::Green),
        Line::from(vec![
            Span::styled(format!("{:<22}", "Overall average"), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{:.1}", stats.average_grade),
                styling::grade_style(stats.average_grade).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(panel_block(title)), area);
}

fn render_students_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    title: &str,
    table_state: &mut TableState,
) {
    let students = rows::student_rows(&state.data.students);
    if students.is_empty() {
        render_empty_message(frame, area, "No students registered", title);
        return;
    }

    let body = students.into_iter().map(|s| {
        let status_style = s.status().map(styling::status_color).unwrap_or_default();
        Row::new(vec![
            Cell::from(s.id.to_string()),
            Cell::from(s.name),
            Cell::from(s.email),
            Cell::from(s.age.to_string()),
            Cell::from(s.class_name),
            Cell::from(format!("{:.1}", s.average)).style(styling::grade_style(s.average)),
            Cell::from(s.status_label).style(status_style),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(5),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(12),
        ],
    )
    .header(header_row(&["ID", "Name", "Email", "Age", "Class", "Average", "Status"]))
    .block(panel_block(format!("{title} ({})", state.data.students.len())))
    .row_highlight_style(styling::highlight_style())
    .highlight_symbol("> ");

    table_state.select(Some(state.ui.student_selected));
    frame.render_stateful_widget(table, area, table_state);
}

/// Title suffix naming the filter the grades list was fetched with
fn filter_description(state: &AppState, filter: &GradeFilter) -> String {
    let mut parts = Vec::new();
    if let Some(id) = filter.student_id {
        let name = state
            .student_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{id}"));
        parts.push(format!("student: {name}"));
    }
    if let Some(id) = &filter.subject_id {
        let name = state.subject_name(id).unwrap_or(id);
        parts.push(format!("subject: {name}"));
    }
    format!(" [filtered by {}]", parts.join(", "))
}

fn render_grades_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    title: &str,
    table_state: &mut TableState,
) {
    let suffix = state
        .input
        .applied_filter
        .as_ref()
        .map(|f| filter_description(state, f))
        .unwrap_or_default();
    let title = format!("{title}{suffix}");

    let grade_rows = rows::grade_rows(&state.data.grades, &state.data.students, &state.data.subjects);
    if grade_rows.is_empty() {
        render_empty_message(frame, area, "No grades recorded", &title);
        return;
    }

    let body = grade_rows.into_iter().map(|row| {
        let mut cells = vec![Cell::from(row.student_name), Cell::from(row.subject_name)];
        cells.extend(row.periods.iter().map(|p| {
            let style = p.map(styling::grade_style).unwrap_or_default();
            Cell::from(period_cell(*p)).style(style)
        }));
        cells.push(Cell::from(format_average(row.average)).style(styling::grade_style(row.average)));
        cells.push(Cell::from(row.status.label()).style(styling::status_color(row.status)));
        Row::new(cells)
    });

    let table = Table::new(
        body,
        [
            Constraint::Percentage(25),
            Constraint::Percentage(20),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Min(12),
        ],
    )
    .header(header_row(&[
        "Student", "Subject", "1st", "2nd", "3rd", "4th", "Average", "Status",
    ]))
    .block(panel_block(title))
    .row_highlight_style(styling::highlight_style())
    .highlight_symbol("> ");

    table_state.select(Some(state.ui.grade_selected));
    frame.render_stateful_widget(table, area, table_state);
}

fn render_reports_panel(frame: &mut Frame, area: Rect, state: &AppState, title: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),      // General stats
            Constraint::Percentage(55), // Per student
            Constraint::Min(5),         // Per subject
        ])
        .split(area);

    render_general_report(frame, chunks[0], state, title);
    render_student_report(frame, chunks[1], state);
    render_subject_report(frame, chunks[2], state);
}

fn render_general_report(frame: &mut Frame, area: Rect, state: &AppState, title: &str) {
    let report = &state.data.general_report;

    let line = Line::from(vec![
        Span::styled("Approved: ", Style::default().fg(Color::Cyan)),
        Span::styled(report.approved.to_string(), styling::status_color(Status::Approved)),
        Span::raw("   "),
        Span::styled("Recovery: ", Style::default().fg(Color::Cyan)),
        Span::styled(report.recovery.to_string(), styling::status_color(Status::Recovery)),
        Span::raw("   "),
        Span::styled("Failed: ", Style::default().fg(Color::Cyan)),
        Span::styled(report.failed.to_string(), styling::status_color(Status::Failed)),
        Span::raw("   "),
        Span::styled("Approval rate: ", Style::default().fg(Color::Cyan)),
        Span::styled(
            rows::format_rate(report.approval_rate),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(panel_block(title)), area);
}

fn render_student_report(frame: &mut Frame, area: Rect, state: &AppState) {
    let report_rows = rows::student_report_rows(&state.data.student_report, &state.data.subjects);
    let title = "Per student";
    if report_rows.is_empty() {
        render_empty_message(frame, area, "No student report available", title);
        return;
    }

    let mut labels: Vec<String> = vec!["Student".to_string(), "Class".to_string()];
    labels.extend(state.data.subjects.iter().map(|s| s.name.clone()));
    labels.push("Average".to_string());
    labels.push("Status".to_string());

    let mut widths = vec![Constraint::Percentage(20), Constraint::Length(7)];
    widths.extend(state.data.subjects.iter().map(|_| Constraint::Length(10)));
    widths.push(Constraint::Length(8));
    widths.push(Constraint::Min(12));

    let offset = state.ui.report_scroll.min(report_rows.len().saturating_sub(1));

    let body = report_rows.into_iter().skip(offset).map(|row| {
        let mut cells = vec![Cell::from(row.name), Cell::from(row.class_name)];
        cells.extend(
            row.subject_averages
                .iter()
                .map(|avg| Cell::from(format_average(*avg)).style(styling::grade_style(*avg))),
        );
        cells.push(
            Cell::from(format_average(row.general_average))
                .style(styling::grade_style(row.general_average)),
        );
        let status_style = styling::status_style(&row.status_label);
        cells.push(Cell::from(row.status_label).style(status_style));
        Row::new(cells)
    });

    let table = Table::new(body, widths)
        .header(Row::new(labels).style(styling::header_style()))
        .block(panel_block(title));

    frame.render_widget(table, area);
}

fn render_subject_report(frame: &mut Frame, area: Rect, state: &AppState) {
    let report_rows = rows::subject_report_rows(&state.data.subject_report);
    let title = "Per subject";
    if report_rows.is_empty() {
        render_empty_message(frame, area, "No subject report available", title);
        return;
    }

    let body = report_rows.into_iter().map(|row| {
        Row::new(vec![
            Cell::from(row.name),
            Cell::from(row.teacher),
            Cell::from(row.total_students.to_string()),
            Cell::from(row.approved.to_string()),
            Cell::from(row.failed.to_string()),
            Cell::from(format_average(row.class_average))
                .style(styling::grade_style(row.class_average)),
            Cell::from(row.approval_rate),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Percentage(25),
            Constraint::Percentage(20),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Min(8),
        ],
    )
    .header(header_row(&[
        "Subject", "Teacher", "Students", "Approved", "Failed", "Average", "Rate",
    ]))
    .block(panel_block(title));

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Student;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_tab(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let mut table_state = TableState::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_body(frame, area, state, 0, &mut table_state);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn state_with_ungraded_student(tab: Tab) -> AppState {
        let mut state = AppState::default();
        state.ui.active_tab = tab;
        state.data.students = vec![Student {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@escola.com".to_string(),
            age: 15,
            class_name: "9A".to_string(),
            average_grade: 0.0,
            status: None,
        }];
        state
    }

    #[test]
    fn test_students_table_shows_zero_average() {
        let text = render_tab(&state_with_ungraded_student(Tab::Students));
        assert!(text.contains("Ana"));
        assert!(text.contains("0.0"));
    }

    #[test]
    fn test_dashboard_shows_zero_average() {
        let text = render_tab(&state_with_ungraded_student(Tab::Dashboard));
        assert!(text.contains("Overall average"));
        assert!(text.contains("0.0"));
    }
}
