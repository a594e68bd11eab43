use super::error::ApiError;
use super::models::{
    DashboardStats, ErrorBody, GeneralReport, Grade, GradeFilter, Health, MessageBody, NewGrade,
    NewStudent, Student, StudentReport, Subject, SubjectReport,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// HTTP client for the gradebook API
///
/// Every call resolves to either the decoded body or an [`ApiError`]. There
/// is no retry and no timeout: a call lasts as long as the server takes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        self.get("/health", &[]).await
    }

    pub async fn students(&self) -> Result<Vec<Student>, ApiError> {
        self.get("/students", &[]).await
    }

    pub async fn subjects(&self) -> Result<Vec<Subject>, ApiError> {
        self.get("/subjects", &[]).await
    }

    pub async fn grades(&self, filter: &GradeFilter) -> Result<Vec<Grade>, ApiError> {
        self.get("/grades", &filter.query_pairs()).await
    }

    pub async fn create_student(&self, student: &NewStudent) -> Result<MessageBody, ApiError> {
        let url = self.url("/students", &[])?;
        self.send(self.client.request(Method::POST, url).json(student))
            .await
    }

    pub async fn delete_student(&self, student_id: i64) -> Result<MessageBody, ApiError> {
        let url = self.url(&format!("/students/{student_id}"), &[])?;
        self.send(self.client.request(Method::DELETE, url)).await
    }

    pub async fn create_grade(&self, grade: &NewGrade) -> Result<MessageBody, ApiError> {
        let url = self.url("/grades", &[])?;
        self.send(self.client.request(Method::POST, url).json(grade))
            .await
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        self.get("/dashboard", &[]).await
    }

    pub async fn general_report(&self) -> Result<GeneralReport, ApiError> {
        self.get("/reports/general", &[]).await
    }

    pub async fn student_report(&self) -> Result<Vec<StudentReport>, ApiError> {
        self.get("/reports/students", &[]).await
    }

    pub async fn subject_report(&self) -> Result<Vec<SubjectReport>, ApiError> {
        self.get("/reports/subjects", &[]).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path, query)?;
        self.send(self.client.request(Method::GET, url)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await?;

        if !status.is_success() {
            // The error body is optional and may not even be JSON
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            warn!(%url, status = status.as_u16(), ?message, "api call failed");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        debug!(%url, status = status.as_u16(), bytes = body.len(), "api call ok");
        Ok(serde_json::from_str(&body)?)
    }

    fn url(&self, path: &str, query: &[(&'static str, String)]) -> Result<Url, ApiError> {
        build_url(&self.base_url, path, query)
    }
}

/// Join base URL and path, then append the non-empty query pairs
pub(crate) fn build_url(
    base_url: &str,
    path: &str,
    query: &[(&'static str, String)],
) -> Result<Url, ApiError> {
    let full = format!("{}{}", base_url.trim_end_matches('/'), path);
    let mut url = Url::parse(&full)?;

    for (key, value) in query {
        if !value.is_empty() {
            url.query_pairs_mut().append_pair(key, value);
        }
    }

    Ok(url)
}
