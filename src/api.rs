//! HTTP interface to the tracker backend.
//!
//! This module provides a thin typed wrapper over the backend's JSON CRUD
//! endpoints. Every non-2xx response is treated uniformly as an HTTP error;
//! there is no per-status-code branching, no retry, and no client-side
//! timeout beyond the transport defaults. Callers are expected to follow
//! every successful mutation with a full `list()` so displayed state stays
//! backend-authoritative.

use reqwest::StatusCode;

use crate::models::{JobApplication, JobDraft};

/// Errors from talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (DNS, connect, TLS, broken transfer).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {status}")]
    Http { status: StatusCode },

    /// The response body was not the expected JSON.
    #[error("could not decode backend response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Client for the job-application collection.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (no trailing slash; config
    /// normalizes this).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the collection endpoint.
    #[must_use]
    pub fn jobs_url(&self) -> String {
        format!("{}/jobs", self.base_url)
    }

    /// URL of a single record.
    #[must_use]
    pub fn job_url(&self, id: u64) -> String {
        format!("{}/jobs/{}", self.base_url, id)
    }

    /// Fetch the full collection.
    ///
    /// A 204 or empty body decodes as the empty list.
    pub async fn list(&self) -> Result<Vec<JobApplication>, ApiError> {
        let url = self.jobs_url();
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http { status });
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let body = response.text().await.map_err(ApiError::Network)?;
        decode_list(&body)
    }

    /// Create a new record. The backend assigns the id; the caller reloads
    /// the list to observe it.
    pub async fn create(&self, draft: &JobDraft) -> Result<(), ApiError> {
        let url = self.jobs_url();
        tracing::debug!("POST {} ({})", url, draft.company_name);

        let response = self
            .http
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(ApiError::Network)?;

        check_status(response.status())
    }

    /// Replace the mutable fields of an existing record.
    pub async fn update(&self, id: u64, draft: &JobDraft) -> Result<(), ApiError> {
        let url = self.job_url(id);
        tracing::debug!("PUT {}", url);

        let response = self
            .http
            .put(&url)
            .json(draft)
            .send()
            .await
            .map_err(ApiError::Network)?;

        check_status(response.status())
    }

    /// Delete a record by id.
    pub async fn remove(&self, id: u64) -> Result<(), ApiError> {
        let url = self.job_url(id);
        tracing::debug!("DELETE {}", url);

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(ApiError::Network)?;

        check_status(response.status())
    }
}

fn check_status(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Http { status })
    }
}

/// Decode a list response body. Empty and `null` bodies count as "no
/// content" rather than decode failures.
fn decode_list(body: &str) -> Result<Vec<JobApplication>, ApiError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApplicationStatus;

    #[test]
    fn test_url_construction() {
        let client = ApiClient::new("http://localhost:8080");
        assert_eq!(client.jobs_url(), "http://localhost:8080/jobs");
        assert_eq!(client.job_url(7), "http://localhost:8080/jobs/7");
    }

    #[test]
    fn test_url_construction_tolerates_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.jobs_url(), "http://localhost:8080/jobs");
    }

    #[test]
    fn test_decode_list_empty_body() {
        assert!(decode_list("").unwrap().is_empty());
        assert!(decode_list("  ").unwrap().is_empty());
        assert!(decode_list("null").unwrap().is_empty());
        assert!(decode_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_list_records() {
        let body = r#"[
            {"id": 1, "companyName": "Acme", "jobTitle": "Eng", "status": "APPLIED"},
            {"id": 2, "companyName": "Initech", "jobTitle": "QA", "status": "REJECTED"}
        ]"#;
        let list = decode_list(body).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].company_name, "Acme");
        assert_eq!(list[1].status, ApplicationStatus::Rejected);
    }

    #[test]
    fn test_decode_list_malformed_is_decode_error() {
        assert!(matches!(
            decode_list("{\"not\": \"a list\"}"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(check_status(StatusCode::CREATED).is_ok());
        let err = check_status(StatusCode::INTERNAL_SERVER_ERROR).unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}
