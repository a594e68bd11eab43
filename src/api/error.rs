use thiserror::Error;

/// Failure of a single API call
#[derive(Debug, Error)]
pub enum ApiError {
    /// No HTTP response (connection refused, DNS, reset...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response, with the server's `message` field when it sent one
    #[error("server returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// 2xx response whose body did not match the expected shape
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Text for the on-screen notice. The server's message wins when present.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::Server {
            status: 400,
            message: Some("Email já está em uso".to_string()),
        };
        assert_eq!(err.user_message("Failed to create student"), "Email já está em uso");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Request failed"), "Request failed");

        let err = ApiError::Server {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(err.user_message("Request failed"), "Request failed");
    }

    #[test]
    fn test_display_includes_status() {
        let err = ApiError::Server {
            status: 404,
            message: Some("Estudante não encontrado".to_string()),
        };
        assert_eq!(err.to_string(), "server returned 404: Estudante não encontrado");
    }
}
