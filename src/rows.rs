//! Table row projections
//!
//! Pure functions from the in-memory lists to the rows the tables display.
//! Nothing here touches the terminal, so the same lists always give the
//! same rows.

use crate::api::models::{Grade, Student, StudentReport, Subject, SubjectReport};
use crate::grading::{self, Status};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: u64,
    pub class_name: String,
    pub average: f64,
    pub status_label: String,
}

impl StudentRow {
    pub fn status(&self) -> Option<Status> {
        Status::from_label(&self.status_label)
    }
}

pub fn student_rows(students: &[Student]) -> Vec<StudentRow> {
    students
        .iter()
        .map(|s| StudentRow {
            id: s.id,
            name: s.name.clone(),
            email: s.email.clone(),
            age: s.age,
            class_name: s.class_name.clone(),
            average: s.average_grade,
            status_label: s
                .status
                .clone()
                .filter(|st| !st.trim().is_empty())
                .unwrap_or_else(|| Status::NoGrades.label().to_string()),
        })
        .collect()
}

/// One (student, subject) pair of the grades table
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRow {
    pub student_id: i64,
    pub subject_id: String,
    pub student_name: String,
    pub subject_name: String,
    /// Periods 1 to 4
    pub periods: [Option<f64>; 4],
    pub average: f64,
    pub status: Status,
}

/// Group grade records by (student, subject), in order of first appearance
///
/// A later record for the same period replaces the earlier one; periods
/// outside 1-4 are skipped. Names come from the record when the server
/// joined them, otherwise from the loaded lists, otherwise the raw id.
pub fn grade_rows(grades: &[Grade], students: &[Student], subjects: &[Subject]) -> Vec<GradeRow> {
    let mut rows: Vec<GradeRow> = Vec::new();
    let mut index: HashMap<(i64, &str), usize> = HashMap::new();

    for grade in grades {
        let slot = match usize::from(grade.period).checked_sub(1) {
            Some(i) if i < 4 => i,
            _ => continue,
        };

        let key = (grade.student_id, grade.subject_id.as_str());
        let row_idx = *index.entry(key).or_insert_with(|| {
            rows.push(GradeRow {
                student_id: grade.student_id,
                subject_id: grade.subject_id.clone(),
                student_name: student_name(grade, students),
                subject_name: subject_name(grade, subjects),
                periods: [None; 4],
                average: 0.0,
                status: Status::NoGrades,
            });
            rows.len() - 1
        });

        rows[row_idx].periods[slot] = Some(grade.grade);
    }

    for row in &mut rows {
        row.average = grading::average(row.periods.iter().flatten().copied());
        row.status = Status::from_average(row.average);
    }

    rows
}

fn student_name(grade: &Grade, students: &[Student]) -> String {
    grade
        .student_name
        .clone()
        .or_else(|| {
            students
                .iter()
                .find(|s| s.id == grade.student_id)
                .map(|s| s.name.clone())
        })
        .unwrap_or_else(|| format!("#{}", grade.student_id))
}

fn subject_name(grade: &Grade, subjects: &[Subject]) -> String {
    grade
        .subject_name
        .clone()
        .or_else(|| {
            subjects
                .iter()
                .find(|s| s.id == grade.subject_id)
                .map(|s| s.name.clone())
        })
        .unwrap_or_else(|| grade.subject_id.clone())
}

/// Cell text for a single period
///
/// A recorded 0 is a real grade and prints as `0.0`; only a missing period prints `-`.
pub fn period_cell(grade: Option<f64>) -> String {
    match grade {
        Some(g) => format!("{g:.1}"),
        None => "-".to_string(),
    }
}

/// Per-student report row with one average per loaded subject
#[derive(Debug, Clone, PartialEq)]
pub struct StudentReportRow {
    pub name: String,
    pub class_name: String,
    /// Same order as the subjects list
    pub subject_averages: Vec<f64>,
    pub general_average: f64,
    pub status_label: String,
}

pub fn student_report_rows(report: &[StudentReport], subjects: &[Subject]) -> Vec<StudentReportRow> {
    report
        .iter()
        .map(|r| StudentReportRow {
            name: r.name.clone(),
            class_name: r.class_name.clone(),
            subject_averages: subjects
                .iter()
                .map(|s| r.subjects.get(&s.id).map(|a| a.average).unwrap_or(0.0))
                .collect(),
            general_average: r.general_average,
            status_label: if r.status.trim().is_empty() {
                Status::NoGrades.label().to_string()
            } else {
                r.status.clone()
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectReportRow {
    pub name: String,
    pub teacher: String,
    pub total_students: u64,
    pub approved: u64,
    pub failed: u64,
    pub class_average: f64,
    pub approval_rate: String,
}

pub fn subject_report_rows(report: &[SubjectReport]) -> Vec<SubjectReportRow> {
    report
        .iter()
        .map(|r| SubjectReportRow {
            name: r.name.clone(),
            teacher: r.teacher.clone().unwrap_or_else(|| "-".to_string()),
            total_students: r.total_students,
            approved: r.approved,
            failed: r.failed,
            class_average: r.class_average,
            approval_rate: format_rate(r.approval_rate),
        })
        .collect()
}

/// Percentage as the server rounds it (one decimal at most)
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{rate:.0}%")
    } else {
        format!("{rate:.1}%")
    }
}
