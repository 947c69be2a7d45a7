use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::models::*;

// ─── Error types ────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            FetchError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// ─── Source seam ────────────────────────────────────────────────────────────

/// Anything that can hand the view controller course and assignment data.
pub trait ClassroomSource: Clone + Send + Sync + 'static {
    fn fetch_courses(&self) -> impl Future<Output = Result<Vec<Course>, FetchError>> + Send;

    fn fetch_assignments(
        &self,
    ) -> impl Future<Output = Result<Vec<AssignmentGroup>, FetchError>> + Send;
}

// ─── Client ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct OpenClassClient {
    client: Client,
    base_url: Url,
}

impl OpenClassClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid OpenClass URL: {base_url}"))?;

        // Without a trailing slash `join` would replace the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder().user_agent("openclass/0.1.0");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        Ok(self.base_url.join(path)?)
    }

    async fn check_status(resp: Response) -> Result<Response, FetchError> {
        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");

        let resp = self.client.get(url.clone()).send().await?;
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await?;
        tracing::debug!(%url, bytes = body.len(), "response received");

        Ok(serde_json::from_str(&body)?)
    }

    // ── Courses ─────────────────────────────────────────────────────────

    pub async fn list_courses(&self) -> Result<Vec<Course>, FetchError> {
        let body: CoursesResponse = self.get_json("home").await?;
        if let Some(message) = &body.message {
            tracing::debug!(message = %message, "/home");
        }
        Ok(body.courses.unwrap_or_default())
    }

    // ── Assignments ─────────────────────────────────────────────────────

    pub async fn list_assignments(&self) -> Result<Vec<AssignmentGroup>, FetchError> {
        let body: AssignmentsResponse = self.get_json("assignments").await?;
        if let Some(message) = &body.message {
            tracing::debug!(message = %message, "/assignments");
        }
        let groups = body.assignments_by_course.unwrap_or_default();
        for group in &groups {
            if let Some(err) = &group.error {
                tracing::warn!(
                    course = group.course_name.as_deref().unwrap_or("?"),
                    course_id = group.course_id.as_deref().unwrap_or("?"),
                    "backend could not list assignments: {err}"
                );
            } else if let Some(message) = &group.message {
                tracing::debug!(message = %message, "assignment group");
            }
        }
        Ok(groups)
    }
}

impl ClassroomSource for OpenClassClient {
    async fn fetch_courses(&self) -> Result<Vec<Course>, FetchError> {
        self.list_courses().await
    }

    async fn fetch_assignments(&self) -> Result<Vec<AssignmentGroup>, FetchError> {
        self.list_assignments().await
    }
}
