//! HTTP client for the assessment service.
//!
//! One submission is one `POST /api/assess` carrying the image as a multipart
//! part named `file`. There is no retry and no auth: every failure is terminal
//! for that attempt and the caller decides whether to start a new one.

use reqwest::{multipart, Client, StatusCode};
use shared::protocol::AssessmentResponse;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-2xx status. `message` is the response
    /// body text, or `"Server error"` when the body was empty.
    #[error("assessment rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
    /// The request never produced a usable response: connect/send failure or
    /// an undecodable success body.
    #[error("assessment transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

/// An image staged for submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

pub struct AssessmentClient {
    http: Client,
    base_url: String,
}

impl AssessmentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submits one image for assessment.
    pub async fn assess(&self, upload: ImageUpload) -> Result<AssessmentResponse, ClientError> {
        debug!(
            filename = %upload.filename,
            mime_type = %upload.mime_type,
            size_bytes = upload.bytes.len(),
            "submitting image for assessment"
        );

        let part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(&upload.mime_type)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/api/assess", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                "Server error".to_string()
            } else {
                body
            };
            return Err(ClientError::Rejected { status, message });
        }

        Ok(response.json().await?)
    }

    /// Fetches a result image the service published under its static
    /// `/uploads/...` route.
    pub async fn fetch_result_image(&self, public_path: &str) -> Result<Vec<u8>, ClientError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, public_path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
