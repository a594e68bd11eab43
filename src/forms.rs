//! Form drafts and their coercion into request bodies
//!
//! Drafts hold raw text exactly as typed. Coercion only parses numbers and
//! trims text; everything else is left for the server to judge.

use crate::api::models::{GradeFilter, NewGrade, NewStudent, Student, Subject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentField {
    #[default]
    Name,
    Email,
    Age,
    Class,
}

impl StudentField {
    pub const ALL: [StudentField; 4] = [Self::Name, Self::Email, Self::Age, Self::Class];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Age => "Age",
            Self::Class => "Class",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, true)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, false)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
    pub age: String,
    pub class_name: String,
    pub active: StudentField,
}

impl StudentDraft {
    pub fn value(&self, field: StudentField) -> &str {
        match field {
            StudentField::Name => &self.name,
            StudentField::Email => &self.email,
            StudentField::Age => &self.age,
            StudentField::Class => &self.class_name,
        }
    }

    pub fn active_text_mut(&mut self) -> &mut String {
        match self.active {
            StudentField::Name => &mut self.name,
            StudentField::Email => &mut self.email,
            StudentField::Age => &mut self.age,
            StudentField::Class => &mut self.class_name,
        }
    }

    pub fn to_request(&self) -> Result<NewStudent, String> {
        let age = self
            .age
            .trim()
            .parse::<u32>()
            .map_err(|_| "Age must be a whole number".to_string())?;

        Ok(NewStudent {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            age,
            class_name: self.class_name.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradeField {
    #[default]
    Student,
    Subject,
    Period,
    Grade,
}

impl GradeField {
    pub const ALL: [GradeField; 4] = [Self::Student, Self::Subject, Self::Period, Self::Grade];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Subject => "Subject",
            Self::Period => "Period",
            Self::Grade => "Grade",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, true)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, false)
    }

    /// Fields chosen with Left/Right rather than typed
    pub fn is_selector(&self) -> bool {
        !matches!(self, Self::Grade)
    }
}

pub const PERIODS: [u8; 4] = [1, 2, 3, 4];

#[derive(Debug, Clone, PartialEq)]
pub struct GradeDraft {
    pub student_id: Option<i64>,
    pub subject_id: Option<String>,
    pub period: u8,
    pub grade: String,
    pub active: GradeField,
}

impl Default for GradeDraft {
    fn default() -> Self {
        Self {
            student_id: None,
            subject_id: None,
            period: PERIODS[0],
            grade: String::new(),
            active: GradeField::Student,
        }
    }
}

impl GradeDraft {
    /// Step the active selector through its options
    pub fn cycle_selection(&mut self, students: &[Student], subjects: &[Subject], forward: bool) {
        match self.active {
            GradeField::Student => {
                let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
                self.student_id = step_required(&ids, self.student_id, forward);
            }
            GradeField::Subject => {
                let ids: Vec<String> = subjects.iter().map(|s| s.id.clone()).collect();
                self.subject_id = step_required(&ids, self.subject_id.clone(), forward);
            }
            GradeField::Period => {
                self.period = cycle(&PERIODS, self.period, forward);
            }
            GradeField::Grade => {}
        }
    }

    pub fn to_request(&self) -> Result<NewGrade, String> {
        let student_id = self.student_id.ok_or("Select a student")?;
        let subject_id = self.subject_id.clone().ok_or("Select a subject")?;
        let grade = parse_decimal(&self.grade).ok_or("Grade must be a number")?;

        Ok(NewGrade {
            student_id,
            subject_id,
            period: self.period,
            grade,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Student,
    Subject,
}

/// The two grade-filter selectors. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub student_id: Option<i64>,
    pub subject_id: Option<String>,
    pub active: FilterField,
}

impl FilterSelection {
    pub fn toggle_field(&mut self) {
        self.active = match self.active {
            FilterField::Student => FilterField::Subject,
            FilterField::Subject => FilterField::Student,
        };
    }

    /// Step the active selector; "all" sits before the first option
    pub fn cycle_selection(&mut self, students: &[Student], subjects: &[Subject], forward: bool) {
        match self.active {
            FilterField::Student => {
                let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
                self.student_id = step_optional(&ids, self.student_id, forward);
            }
            FilterField::Subject => {
                let ids: Vec<String> = subjects.iter().map(|s| s.id.clone()).collect();
                self.subject_id = step_optional(&ids, self.subject_id.clone(), forward);
            }
        }
    }

    pub fn to_filter(&self) -> GradeFilter {
        GradeFilter {
            student_id: self.student_id,
            subject_id: self.subject_id.clone(),
        }
    }
}

/// Parse a decimal typed with either `.` or `,` as separator
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    let pos = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    options[next]
}

/// Selector without an empty choice: wraps around the options
fn step_required<T: Clone + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match current.and_then(|c| options.iter().position(|o| *o == c)) {
        Some(pos) if forward => (pos + 1) % len,
        Some(pos) => (pos + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    Some(options[next].clone())
}

/// Selector with a leading "all" choice (`None`)
fn step_optional<T: Clone + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let pos = current.and_then(|c| options.iter().position(|o| *o == c));
    match (pos, forward) {
        (None, true) => options.first().cloned(),
        (None, false) => options.last().cloned(),
        (Some(p), true) => options.get(p + 1).cloned(),
        (Some(0), false) => None,
        (Some(p), false) => options.get(p - 1).cloned(),
    }
}
