use reqwest::Client as HttpClient;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Payload(String),
    #[error("SMS credentials are not configured")]
    MissingCredentials,
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Shared HTTP plumbing for the geolocation and SMS clients.
#[derive(Clone)]
pub struct ApiClient {
    pub http: HttpClient,
}

impl ApiClient {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Turn a non-success response into `ApiError::Status`, pulling the
    /// provider's `message` field out of a JSON error body when there is one.
    pub async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let text = resp.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&text).unwrap_or_else(|| status.to_string()),
        })
    }
}

pub(crate) fn error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("message")
        .or_else(|| json.get("error"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_provider_error_message() {
        let body = r#"{"code": 20003, "message": "Authenticate", "status": 401}"#;
        assert_eq!(error_message(body).as_deref(), Some("Authenticate"));
        assert_eq!(error_message(r#"{"error": "rate limited"}"#).as_deref(), Some("rate limited"));
        assert_eq!(error_message("<html>502</html>"), None);
    }
}
