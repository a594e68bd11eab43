//! Wire types for the gradebook API
//!
//! Numeric fields coming out of SQL aggregates may arrive either as JSON
//! numbers or as numeric strings, and are sometimes missing or `null`.
//! Those fields go through [`lenient_f64`] / [`lenient_u64`] and default to 0.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub age: u64,
    #[serde(rename = "class", alias = "student_class", default)]
    pub class_name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_grade: f64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub teacher: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Grade {
    pub student_id: i64,
    pub subject_id: String,
    pub period: u8,
    #[serde(deserialize_with = "lenient_f64")]
    pub grade: f64,
    /// Joined by the server on the list endpoint
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub subject_name: Option<String>,
}

/// Body of `POST /students`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: u32,
    #[serde(rename = "class")]
    pub class_name: String,
}

/// Body of `POST /grades`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGrade {
    pub student_id: i64,
    pub subject_id: String,
    pub period: u8,
    pub grade: f64,
}

/// Optional filters for `GET /grades`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeFilter {
    pub student_id: Option<i64>,
    pub subject_id: Option<String>,
}

impl GradeFilter {
    pub fn is_empty(&self) -> bool {
        self.student_id.is_none() && self.subject_id.is_none()
    }

    /// Query pairs in a stable order, empty values skipped
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.student_id {
            pairs.push(("student_id", id.to_string()));
        }
        if let Some(id) = self.subject_id.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("subject_id", id.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Health {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
}

impl Health {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_students: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_subjects: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub passed_students: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_grade: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeneralReport {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub approved: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub failed: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub recovery: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub approval_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubjectAverage {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudentReport {
    pub name: String,
    #[serde(rename = "class", default)]
    pub class_name: String,
    /// Keyed by subject id
    #[serde(default)]
    pub subjects: HashMap<String, SubjectAverage>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub general_average: f64,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubjectReport {
    pub name: String,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_students: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub approved: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub failed: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub class_average: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub approval_rate: f64,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Success body of mutating endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => n,
        Some(NumberOrText::Text(s)) => s.trim().parse().unwrap_or(0.0),
        None => 0.0,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    Ok(if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_student_accepts_decimal_strings_and_nulls() {
        let student: Student = serde_json::from_value(json!({
            "id": 3,
            "name": "Ana Souza",
            "email": "ana@escola.com",
            "age": 15,
            "class": "9A",
            "average_grade": "7.50",
            "status": "Aprovado"
        }))
        .unwrap();

        assert_eq!(student.class_name, "9A");
        assert_eq!(student.average_grade, 7.5);
        assert_eq!(student.status.as_deref(), Some("Aprovado"));

        let student: Student = serde_json::from_value(json!({
            "id": 4,
            "name": "Bruno Lima",
            "email": "bruno@escola.com",
            "age": 16,
            "class": "1B",
            "average_grade": null
        }))
        .unwrap();

        assert_eq!(student.average_grade, 0.0);
        assert_eq!(student.status, None);
    }

    #[test]
    fn test_student_class_alias() {
        let student: Student = serde_json::from_value(json!({
            "id": 1,
            "name": "Carla",
            "student_class": "2C"
        }))
        .unwrap();
        assert_eq!(student.class_name, "2C");
        assert_eq!(student.age, 0);
    }

    #[test]
    fn test_new_student_serializes_class_key() {
        let body = serde_json::to_value(NewStudent {
            name: "Davi".to_string(),
            email: "davi@escola.com".to_string(),
            age: 14,
            class_name: "8A".to_string(),
        })
        .unwrap();

        assert_eq!(
            body,
            json!({"name": "Davi", "email": "davi@escola.com", "age": 14, "class": "8A"})
        );
    }

    #[test]
    fn test_dashboard_defaults_missing_fields_to_zero() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "total_students": 12,
            "total_subjects": 6
        }))
        .unwrap();

        assert_eq!(stats.total_students, 12);
        assert_eq!(stats.passed_students, 0);
        assert_eq!(stats.average_grade, 0.0);
    }

    #[test]
    fn test_grade_filter_query_pairs() {
        let filter = GradeFilter::default();
        assert!(filter.is_empty());
        assert!(filter.query_pairs().is_empty());

        let filter = GradeFilter {
            student_id: Some(7),
            subject_id: Some("MAT".to_string()),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("student_id", "7".to_string()), ("subject_id", "MAT".to_string())]
        );

        let filter = GradeFilter {
            student_id: None,
            subject_id: Some(String::new()),
        };
        assert!(filter.query_pairs().is_empty());
    }

    #[test]
    fn test_student_report_subject_map() {
        let report: StudentReport = serde_json::from_value(json!({
            "id": 1,
            "name": "Ana",
            "class": "9A",
            "subjects": {
                "MAT": {"name": "Matemática", "average": "8.25"},
                "POR": {"name": "Português", "average": null}
            },
            "general_average": 8.25,
            "status": "Aprovado"
        }))
        .unwrap();

        assert_eq!(report.subjects["MAT"].average, 8.25);
        assert_eq!(report.subjects["POR"].average, 0.0);
        assert_eq!(report.status, "Aprovado");
    }

    #[test]
    fn test_health_status() {
        let health: Health = serde_json::from_value(json!({
            "status": "OK",
            "message": "API funcionando corretamente",
            "database": "Conectado"
        }))
        .unwrap();
        assert!(health.is_ok());

        let health: Health = serde_json::from_value(json!({"status": "ERROR"})).unwrap();
        assert!(!health.is_ok());
    }
}
