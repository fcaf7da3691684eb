use super::request::build_form;
use super::types::{FileResult, SubmissionRequest};
use crate::config::Config;
use crate::error::UploadError;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The remote side of a submission: OCR, prompt handling and extraction.
#[async_trait]
pub trait DocumentProcessor: Send + Sync {
    /// One exchange per call. No retries.
    async fn process(&self, request: SubmissionRequest) -> Result<Vec<FileResult>, UploadError>;
}

/// Posts submissions to the processing endpoint as multipart forms.
#[derive(Clone)]
pub struct HttpProcessor {
    client: reqwest::Client,
    endpoint_url: String,
    timeout: Duration,
}

impl HttpProcessor {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint_url: config.endpoint_url.clone(),
            timeout: config.request_timeout,
        }
    }

    async fn exchange(&self, request: &SubmissionRequest) -> Result<Vec<FileResult>, UploadError> {
        let form = build_form(request).await?;

        let response = self
            .client
            .post(&self.endpoint_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!("endpoint answered {} with {} bytes", status, body.len());

        map_response(status, &body)
    }
}

#[async_trait]
impl DocumentProcessor for HttpProcessor {
    async fn process(&self, request: SubmissionRequest) -> Result<Vec<FileResult>, UploadError> {
        info!(
            "uploading {} file(s) as '{}' to {}",
            request.files().len(),
            request.document_type(),
            self.endpoint_url
        );

        // The deadline covers reading the files, sending, and reading the body.
        match tokio::time::timeout(self.timeout, self.exchange(&request)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!("upload to {} timed out after {:?}", self.endpoint_url, self.timeout);
                Err(UploadError::Timeout(self.timeout))
            }
        }
    }
}

/// Turns an HTTP status and body into results or a single user-facing error.
///
/// A 2xx body with a truthy `success` is a success even if it also carries an
/// `error` field. Otherwise a string `error` wins, whatever the status.
pub fn map_response(status: StatusCode, body: &[u8]) -> Result<Vec<FileResult>, UploadError> {
    let parsed = serde_json::from_slice::<Value>(body);

    if let Ok(value) = &parsed {
        if status.is_success() && value.get("success").is_some_and(is_truthy) {
            let files = value
                .get("files")
                .cloned()
                .ok_or_else(|| UploadError::transport("Malformed response: missing files"))?;
            return serde_json::from_value::<Vec<FileResult>>(files)
                .map_err(|e| UploadError::transport(format!("Malformed response: {e}")));
        }

        if let Some(message) = value.get("error").and_then(Value::as_str) {
            if !message.is_empty() {
                return Err(UploadError::Application(message.to_string()));
            }
        }
    }

    if !status.is_success() {
        return Err(UploadError::transport(format!(
            "Request failed with status code {}",
            status.as_u16()
        )));
    }

    match parsed {
        Ok(_) => Err(UploadError::Unknown),
        Err(e) => Err(UploadError::transport(format!("Malformed response: {e}"))),
    }
}

/// JavaScript truthiness, which is how the processing endpoint's own UI reads `success`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
