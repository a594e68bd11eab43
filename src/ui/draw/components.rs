//! Reusable UI components
//!
//! This module contains shared UI components used throughout the application:
//! - Header (title, connection status, date)
//! - Tab bar
//! - Notice banner
//! - Footer (command help)
//! - Loading spinners and error/empty states

use super::styling;
use crate::state::AppState;
use crate::types::{LoadingState, NoticeKind, Tab};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Render the application header with status and current date
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    base_url: &str,
    spinner_index: usize,
) {
    let status_text = match &state.data.loading_state {
        LoadingState::Idle => "Idle".to_string(),
        LoadingState::Checking => "Checking server...".to_string(),
        LoadingState::Loading => "Loading...".to_string(),
        LoadingState::Complete => format!(
            "{} students, {} subjects",
            state.data.students.len(),
            state.data.subjects.len()
        ),
        LoadingState::Error(_) => "Error".to_string(),
    };

    let activity = if state.data.in_flight > 0 {
        format!(" {}", SPINNER[spinner_index % SPINNER.len()])
    } else {
        String::new()
    };

    let date = chrono::Local::now().format("%d/%m/%Y");
    let header_text = format!("gradebook - {base_url} [{status_text}]{activity} | {date}");

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

pub fn render_tab_bar(frame: &mut Frame, area: Rect, active: Tab) {
    let titles = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("[{}] {}", i + 1, tab.title())));

    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(styling::focused_border())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );

    frame.render_widget(tabs, area);
}

/// Render the transient notice, or nothing
pub fn render_notice(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(notice) = &state.notice else {
        return;
    };

    let (icon, color) = match notice.kind {
        NoticeKind::Success => ("✔", Color::Green),
        NoticeKind::Error => ("✖", Color::Red),
    };

    let banner = Paragraph::new(format!(" {icon} {}", notice.message)).style(
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    );

    frame.render_widget(banner, area);
}

/// Render the footer with command help for the active tab
pub fn render_footer(frame: &mut Frame, area: Rect, tab: Tab) {
    let footer_text = match tab {
        Tab::Dashboard => "Tab/1-4:Tabs r:Reload R:Reconnect ,:URL q:Quit",
        Tab::Students => "j/k:Nav n:New student d:Delete | Tab/1-4:Tabs r:Reload ,:URL q:Quit",
        Tab::Grades => "j/k:Nav n:New grade f:Filter c:Clear filters | Tab/1-4:Tabs r:Reload q:Quit",
        Tab::Reports => "j/k:Scroll | Tab/1-4:Tabs r:Reload ,:URL q:Quit",
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

/// Render loading spinner animation
pub fn render_loading_spinner(
    frame: &mut Frame,
    area: Rect,
    loading_state: &LoadingState,
    spinner_index: usize,
    title: &str,
) {
    let progress_text = match loading_state {
        LoadingState::Checking => "Checking server health",
        LoadingState::Loading => "Loading students, subjects and grades",
        _ => "",
    };

    let loading_text = format!(
        "{} {}\n\nPlease wait...",
        SPINNER[spinner_index % SPINNER.len()],
        progress_text
    );

    let loading = Paragraph::new(loading_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    frame.render_widget(loading, area);
}

/// Render error message with retry instructions
pub fn render_error_message(frame: &mut Frame, area: Rect, error: &str, retry_count: u32, title: &str) {
    let retry_text = if retry_count > 0 {
        format!("\n\nRetry attempt: {retry_count}")
    } else {
        String::new()
    };

    let error_msg = format!("✖ {error}{retry_text}\n\nPress [R] to reconnect\nPress [,] to change the API URL");

    let error_widget = Paragraph::new(error_msg)
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    frame.render_widget(error_widget, area);
}

/// Render empty state message
pub fn render_empty_message(frame: &mut Frame, area: Rect, message: &str, title: &str) {
    let empty = Paragraph::new(format!("{message}\n\nPress [r] to reload"))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    frame.render_widget(empty, area);
}
