use crate::api::models::{GradeFilter, NewGrade, NewStudent};
use std::time::{Duration, Instant};

/// Top-level tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Students,
    Grades,
    Reports,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Students, Tab::Grades, Tab::Reports];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Students => "Students",
            Tab::Grades => "Grades",
            Tab::Reports => "Reports",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Tab for a number key ('1'..='4')
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState {
    Idle,
    /// Waiting on the health endpoint
    Checking,
    /// Waiting on the first load-all
    Loading,
    Complete,
    /// Initialization halted; nothing was loaded
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    StudentForm,
    GradeForm,
    GradeFilter,
    ConfirmDelete,
    EnteringUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient banner message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub shown_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}

/// Student awaiting delete confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub student_id: i64,
    pub name: String,
}

/// Network work requested by a key press, run by the app loop
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Reload,
    Reconnect,
    CreateStudent(NewStudent),
    CreateGrade(NewGrade),
    DeleteStudent(i64),
    FilterGrades(GradeFilter),
    ClearFilters,
    /// Validated base URL from the URL modal
    ChangeBaseUrl(String),
}
