use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use shared::{
    domain::CaseScope,
    error::ApiError,
    protocol::{
        CaseQuery, CasesResponse, ChatRequest, ChatResponse, TimelineItem, TimelineResponse,
        TraceResponse,
    },
};
use tracing::debug;
use url::Url;

pub const PLAIN_TEXT_MIME: &str = "text/plain";

/// A local evidence file queued for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn declared_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or("application/octet-stream")
    }

    /// Accepts `text/plain` with optional parameters such as `charset`.
    pub fn is_plain_text(&self) -> bool {
        self.declared_type()
            .split(';')
            .next()
            .map(|essence| essence.trim().eq_ignore_ascii_case(PLAIN_TEXT_MIME))
            .unwrap_or(false)
    }
}

#[async_trait]
pub trait CaseBackend: Send + Sync {
    async fn health(&self) -> Result<()>;
    async fn list_cases(&self) -> Result<Vec<String>>;
    async fn timeline(&self, scope: &CaseScope) -> Result<Vec<TimelineItem>>;
    async fn trace(&self, scope: &CaseScope) -> Result<TraceResponse>;
    async fn chat(&self, message: &str) -> Result<ChatResponse>;
    async fn ingest(&self) -> Result<()>;
    async fn upload(&self, file: UploadFile) -> Result<()>;
}

pub struct HttpBackend {
    http: Client,
    server_url: String,
}

impl HttpBackend {
    pub fn new(server_url: &str, request_timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(server_url.trim())
            .with_context(|| format!("invalid backend url '{server_url}'"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!(
                "backend url must use http or https, got '{}'",
                parsed.scheme()
            ));
        }
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            server_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

/// Like `error_for_status`, but keeps the backend's `detail` text in the error.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match ApiError::from_body(&body) {
        Some(api_error) => Err(anyhow!("{status}: {api_error}")),
        None if body.trim().is_empty() => Err(anyhow!("{status}")),
        None => Err(anyhow!("{status}: {}", body.trim())),
    }
}

#[async_trait]
impl CaseBackend for HttpBackend {
    async fn health(&self) -> Result<()> {
        let server_url = &self.server_url;
        let response = self.http.get(format!("{server_url}/health")).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn list_cases(&self) -> Result<Vec<String>> {
        let server_url = &self.server_url;
        let response = self.http.get(format!("{server_url}/cases")).send().await?;
        let body: CasesResponse = ensure_success(response).await?.json().await?;
        Ok(body.cases)
    }

    async fn timeline(&self, scope: &CaseScope) -> Result<Vec<TimelineItem>> {
        let server_url = &self.server_url;
        debug!(case_id = %scope, "fetching timeline");
        let response = self
            .http
            .get(format!("{server_url}/timeline"))
            .query(&CaseQuery::from(scope))
            .send()
            .await?;
        let body: TimelineResponse = ensure_success(response).await?.json().await?;
        Ok(body.timeline)
    }

    async fn trace(&self, scope: &CaseScope) -> Result<TraceResponse> {
        let server_url = &self.server_url;
        debug!(case_id = %scope, "fetching trace");
        let response = self
            .http
            .get(format!("{server_url}/trace"))
            .query(&CaseQuery::from(scope))
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn chat(&self, message: &str) -> Result<ChatResponse> {
        let server_url = &self.server_url;
        let response = self
            .http
            .post(format!("{server_url}/chat"))
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn ingest(&self) -> Result<()> {
        let server_url = &self.server_url;
        let response = self.http.post(format!("{server_url}/ingest")).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn upload(&self, file: UploadFile) -> Result<()> {
        let server_url = &self.server_url;
        let mime = file.declared_type().to_string();
        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&mime)
            .with_context(|| format!("invalid upload content type '{mime}'"))?;
        let response = self
            .http
            .post(format!("{server_url}/upload"))
            .multipart(Form::new().part("file", part))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/backend_tests.rs"]
mod tests;
