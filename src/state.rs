use crate::api::models::{
    DashboardStats, GeneralReport, Grade, GradeFilter, Student, StudentReport, Subject,
    SubjectReport,
};
use crate::forms::{FilterSelection, GradeDraft, StudentDraft};
use crate::types::{InputMode, LoadingState, Notice, NoticeKind, PendingDelete, Tab};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

pub type SharedState = Arc<RwLock<AppState>>;

/// The three lists from one successful load-all
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub students: Vec<Student>,
    pub subjects: Vec<Subject>,
    pub grades: Vec<Grade>,
}

/// Server data held in memory
#[derive(Debug, Clone)]
pub struct DataState {
    pub students: Vec<Student>,
    pub subjects: Vec<Subject>,
    pub grades: Vec<Grade>,
    pub dashboard: DashboardStats,
    pub general_report: GeneralReport,
    pub student_report: Vec<StudentReport>,
    pub subject_report: Vec<SubjectReport>,
    pub loading_state: LoadingState,
    pub retry_count: u32,
    /// Background calls currently running
    pub in_flight: usize,
}

impl Default for DataState {
    fn default() -> Self {
        Self {
            students: Vec::new(),
            subjects: Vec::new(),
            grades: Vec::new(),
            dashboard: DashboardStats::default(),
            general_report: GeneralReport::default(),
            student_report: Vec::new(),
            subject_report: Vec::new(),
            loading_state: LoadingState::Idle,
            retry_count: 0,
            in_flight: 0,
        }
    }
}

/// Navigation and selection
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub active_tab: Tab,
    pub student_selected: usize,
    pub grade_selected: usize,
    /// First visible line of the reports tab
    pub report_scroll: usize,
}

/// Modal inputs and drafts
#[derive(Debug, Clone)]
pub struct InputState {
    pub mode: InputMode,
    pub student_form: StudentDraft,
    pub grade_form: GradeDraft,
    pub filter: FilterSelection,
    /// Filter the grades list was last fetched with, `None` when unfiltered
    pub applied_filter: Option<GradeFilter>,
    pub pending_delete: Option<PendingDelete>,
    pub url_input: String,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            mode: InputMode::Normal,
            student_form: StudentDraft::default(),
            grade_form: GradeDraft::default(),
            filter: FilterSelection::default(),
            applied_filter: None,
            pending_delete: None,
            url_input: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub data: DataState,
    pub ui: UiState,
    pub input: InputState,
    pub notice: Option<Notice>,
}

impl AppState {
    /// Replace all three lists at once
    pub fn commit_snapshot(&mut self, snapshot: Snapshot) {
        self.data.students = snapshot.students;
        self.data.subjects = snapshot.subjects;
        self.data.grades = snapshot.grades;
        self.input.applied_filter = None;
        self.clamp_selection();
    }

    /// Replace only the grades list, as a filter or clear does
    pub fn replace_grades(&mut self, grades: Vec<Grade>, filter: &GradeFilter) {
        self.data.grades = grades;
        self.input.applied_filter = if filter.is_empty() {
            None
        } else {
            Some(filter.clone())
        };
        self.clamp_selection();
    }

    pub fn show_notice(&mut self, message: impl Into<String>, kind: NoticeKind) {
        self.notice = Some(Notice::new(message, kind));
    }

    pub fn expire_notice(&mut self, now: Instant, ttl: Duration) {
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.is_expired(now, ttl))
        {
            self.notice = None;
        }
    }

    pub fn selected_student(&self) -> Option<&Student> {
        self.data.students.get(self.ui.student_selected)
    }

    pub fn student_name(&self, id: i64) -> Option<&str> {
        self.data
            .students
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
    }

    pub fn subject_name(&self, id: &str) -> Option<&str> {
        self.data
            .subjects
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
    }

    /// Number of grade table rows (grouped by student and subject)
    pub fn grade_row_count(&self) -> usize {
        crate::rows::grade_rows(&self.data.grades, &self.data.students, &self.data.subjects).len()
    }

    /// Keep selections inside the lists after they change
    pub fn clamp_selection(&mut self) {
        self.ui.student_selected = self
            .ui
            .student_selected
            .min(self.data.students.len().saturating_sub(1));
        self.ui.grade_selected = self
            .ui
            .grade_selected
            .min(self.grade_row_count().saturating_sub(1));
    }
}
