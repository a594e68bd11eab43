//! Grade classification and approval status
//!
//! Both scales are fixed. A value of 0 means "no grade yet" and is never
//! classified.

use std::fmt;

/// Minimum average for approval
pub const PASSING_AVERAGE: f64 = 6.0;

/// Minimum average for recovery (below this the student fails)
pub const RECOVERY_AVERAGE: f64 = 4.0;

/// Visual class of a single grade or average
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeClass {
    Excellent,
    Good,
    Average,
    Poor,
}

impl GradeClass {
    /// Classify a grade. Returns `None` for 0 (no grade yet) and below.
    pub fn of(grade: f64) -> Option<Self> {
        if grade <= 0.0 {
            None
        } else if grade >= 9.0 {
            Some(Self::Excellent)
        } else if grade >= 7.0 {
            Some(Self::Good)
        } else if grade >= PASSING_AVERAGE {
            Some(Self::Average)
        } else {
            Some(Self::Poor)
        }
    }
}

/// Approval status derived from an average
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Approved,
    Recovery,
    Failed,
    NoGrades,
}

impl Status {
    pub fn from_average(average: f64) -> Self {
        if average >= PASSING_AVERAGE {
            Self::Approved
        } else if average >= RECOVERY_AVERAGE {
            Self::Recovery
        } else if average > 0.0 {
            Self::Failed
        } else {
            Self::NoGrades
        }
    }

    /// Label as sent by the server and shown in the tables
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approved => "Aprovado",
            Self::Recovery => "Recuperação",
            Self::Failed => "Reprovado",
            Self::NoGrades => "Sem Notas",
        }
    }

    /// Parse a server-supplied label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Aprovado" => Some(Self::Approved),
            "Recuperação" => Some(Self::Recovery),
            "Reprovado" => Some(Self::Failed),
            "Sem Notas" => Some(Self::NoGrades),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mean of the given grades, 0 when there are none
pub fn average<I>(grades: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = grades
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), g| (sum + g, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// One-decimal rendering, `-` for "no grade yet"
pub fn format_average(average: f64) -> String {
    if average > 0.0 {
        format!("{average:.1}")
    } else {
        "-".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_class_boundaries() {
        assert_eq!(GradeClass::of(10.0), Some(GradeClass::Excellent));
        assert_eq!(GradeClass::of(9.0), Some(GradeClass::Excellent));
        assert_eq!(GradeClass::of(8.99), Some(GradeClass::Good));
        assert_eq!(GradeClass::of(7.0), Some(GradeClass::Good));
        assert_eq!(GradeClass::of(6.99), Some(GradeClass::Average));
        assert_eq!(GradeClass::of(6.0), Some(GradeClass::Average));
        assert_eq!(GradeClass::of(5.99), Some(GradeClass::Poor));
        assert_eq!(GradeClass::of(0.5), Some(GradeClass::Poor));
    }

    #[test]
    fn test_grade_class_zero_is_unclassified() {
        assert_eq!(GradeClass::of(0.0), None);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(Status::from_average(10.0), Status::Approved);
        assert_eq!(Status::from_average(6.0), Status::Approved);
        assert_eq!(Status::from_average(5.99), Status::Recovery);
        assert_eq!(Status::from_average(4.0), Status::Recovery);
        assert_eq!(Status::from_average(3.99), Status::Failed);
        assert_eq!(Status::from_average(0.1), Status::Failed);
        assert_eq!(Status::from_average(0.0), Status::NoGrades);
    }

    #[test]
    fn test_status_labels_round_trip() {
        for status in [
            Status::Approved,
            Status::Recovery,
            Status::Failed,
            Status::NoGrades,
        ] {
            assert_eq!(Status::from_label(status.label()), Some(status));
        }
        assert_eq!(Status::from_label("Transferido"), None);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(std::iter::empty()), 0.0);
        assert_eq!(average([8.0]), 8.0);
        assert_eq!(average([6.0, 7.0, 8.0, 9.0]), 7.5);
    }

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(7.24), "7.2");
        assert_eq!(format_average(7.26), "7.3");
        assert_eq!(format_average(0.0), "-");
    }
}
