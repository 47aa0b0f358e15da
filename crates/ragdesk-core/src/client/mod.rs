//! HTTP client for the document question-answering backend.
//!
//! Authenticated calls send HTTP Basic credentials on every request; the
//! backend keeps no session.

mod error;

use std::path::Path;
use std::time::Duration;

use base64::prelude::*;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::{ClientError, ClientErrorKind};

use crate::config::Config;

/// Username and password pair used for Basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value for the `Authorization` header.
    pub fn basic_header(&self) -> String {
        let joined = format!("{}:{}", self.username, self.password);
        format!("Basic {}", BASE64_STANDARD.encode(joined))
    }
}

// Passwords never end up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Canned insight extractions run against the selected document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    Summary,
    ImportantInformation,
}

impl Extraction {
    pub fn prompt(self) -> &'static str {
        match self {
            Extraction::Summary => "Summarize the document",
            Extraction::ImportantInformation => {
                "Extract the important information from the document"
            }
        }
    }
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    answer: Option<String>,
}

/// Backend API client.
#[derive(Debug, Clone)]
pub struct RagClient {
    base_url: String,
    http: reqwest::Client,
}

impl RagClient {
    /// Creates a client for `base_url` with an optional request timeout.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            ClientError::invalid_input(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(&config.api_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks that the backend is up. Returns the reported status.
    pub async fn health(&self) -> Result<String, ClientError> {
        let response = self.send(self.http.get(self.url("/check")), "GET /check").await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::new(ClientErrorKind::Parse, format!("Invalid health response: {e}")))?;
        Ok(body
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string())
    }

    /// Verifies credentials against the login endpoint.
    pub async fn login(&self, creds: &Credentials) -> Result<(), ClientError> {
        let request = self
            .http
            .get(self.url("/auth/login"))
            .header(AUTHORIZATION, creds.basic_header());
        self.send(request, "GET /auth/login").await?;
        Ok(())
    }

    /// Creates a new account.
    pub async fn signup(&self, creds: &Credentials) -> Result<(), ClientError> {
        if creds.username.trim().is_empty() || creds.password.is_empty() {
            return Err(ClientError::invalid_input(
                "Username and password are required",
            ));
        }
        let request = self.http.post(self.url("/auth/signup")).json(&SignupRequest {
            username: &creds.username,
            password: &creds.password,
        });
        self.send(request, "POST /auth/signup").await?;
        Ok(())
    }

    /// Uploads a PDF for indexing. Returns the file name sent to the backend.
    pub async fn upload(&self, creds: &Credentials, path: &Path) -> Result<String, ClientError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ClientError::invalid_input(format!("Not a file path: {}", path.display()))
            })?
            .to_string();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ClientError::invalid_input(format!("Failed to read {}: {e}", path.display()))
        })?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str("application/pdf")
            .map_err(|e| ClientError::invalid_input(format!("Invalid mime type: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let request = self
            .http
            .post(self.url("/docs/upload_docs"))
            .header(AUTHORIZATION, creds.basic_header())
            .multipart(form);
        self.send(request, "POST /docs/upload_docs").await?;
        Ok(file_name)
    }

    /// Asks a question and returns the raw answer text.
    pub async fn ask(&self, creds: &Credentials, message: &str) -> Result<String, ClientError> {
        if message.trim().is_empty() {
            return Err(ClientError::invalid_input("Please enter a question"));
        }
        let request = self
            .http
            .post(self.url("/chat"))
            .header(AUTHORIZATION, creds.basic_header())
            .form(&[("message", message)]);
        let response = self.send(request, "POST /chat").await?;

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::from_reqwest(&e))?;
        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            let mut err =
                ClientError::new(ClientErrorKind::Parse, format!("Invalid answer payload: {e}"));
            err.details = Some(body.clone());
            err
        })?;
        Ok(parsed.answer.unwrap_or_default())
    }

    /// Runs a canned extraction prompt.
    pub async fn extract(
        &self,
        creds: &Credentials,
        extraction: Extraction,
    ) -> Result<String, ClientError> {
        self.ask(creds, extraction.prompt()).await
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        label: &str,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::debug!(request = label, base_url = %self.base_url, "sending request");
        let response = request.send().await.map_err(|e| {
            let err = ClientError::from_reqwest(&e);
            tracing::warn!(request = label, error = %err, "request failed");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::http_status(status.as_u16(), &body);
            tracing::warn!(request = label, status = status.as_u16(), "backend rejected request");
            return Err(err);
        }
        Ok(response)
    }
}
