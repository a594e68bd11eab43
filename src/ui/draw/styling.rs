//! Styling utilities and color schemes
//!
//! Color helpers for grade classes and approval statuses.

use crate::grading::{GradeClass, Status};
use ratatui::style::{Color, Modifier, Style};

/// Color for a grade or average; unclassified values stay default
pub fn grade_style(grade: f64) -> Style {
    match GradeClass::of(grade) {
        Some(GradeClass::Excellent) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Some(GradeClass::Good) => Style::default().fg(Color::LightGreen),
        Some(GradeClass::Average) => Style::default().fg(Color::Yellow),
        Some(GradeClass::Poor) => Style::default().fg(Color::Red),
        None => Style::default(),
    }
}

/// Color for a status label; unknown labels stay default
pub fn status_style(label: &str) -> Style {
    match Status::from_label(label) {
        Some(status) => status_color(status),
        None => Style::default(),
    }
}

pub fn status_color(status: Status) -> Style {
    match status {
        Status::Approved => Style::default().fg(Color::Green),
        Status::Recovery => Style::default().fg(Color::Yellow),
        Status::Failed => Style::default().fg(Color::Red),
        Status::NoGrades => Style::default().fg(Color::DarkGray),
    }
}

pub fn focused_border() -> Color {
    Color::Cyan
}

pub fn header_style() -> Style {
    Style::default()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

pub fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Background of modal dialogs
pub fn modal_style() -> Style {
    Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_style_by_class() {
        assert_eq!(grade_style(9.5).fg, Some(Color::Green));
        assert_eq!(grade_style(7.5).fg, Some(Color::LightGreen));
        assert_eq!(grade_style(6.0).fg, Some(Color::Yellow));
        assert_eq!(grade_style(2.0).fg, Some(Color::Red));
        assert_eq!(grade_style(0.0), Style::default());
    }

    #[test]
    fn test_status_style_unknown_label() {
        assert_eq!(status_style("Aprovado").fg, Some(Color::Green));
        assert_eq!(status_style("Recuperação").fg, Some(Color::Yellow));
        assert_eq!(status_style("???"), Style::default());
    }
}
