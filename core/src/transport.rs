//! HTTP transport against the remote notes authority.
//!
//! Thin reqwest wrapper: one method per server endpoint, bearer token
//! attached per request. Non-success responses collapse into a single
//! [`ApiError`] class carrying the status and a body preview; no structured
//! error parsing is attempted.

use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};

use crate::notes::models::{Note, NoteDraft, NotePatch};

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Status,
    Unknown,
}

impl ApiErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Status => "status",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct ApiError {
    kind: ApiErrorKind,
    status: Option<u16>,
    url: Option<String>,
    message: String,
    source: Option<anyhow::Error>,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn from_reqwest(err: reqwest::Error, url: String) -> Self {
        let kind = if err.is_timeout() {
            ApiErrorKind::Timeout
        } else if err.is_connect() {
            ApiErrorKind::Connect
        } else if err.is_request() {
            ApiErrorKind::Request
        } else if err.is_body() {
            ApiErrorKind::Body
        } else if err.is_decode() {
            ApiErrorKind::Decode
        } else {
            ApiErrorKind::Unknown
        };
        let status = err.status().map(|s| s.as_u16());
        let message = err.to_string();
        ApiError {
            kind,
            status,
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }

    fn status_error(status: u16, reason: &str, url: String, preview: String) -> Self {
        ApiError {
            kind: ApiErrorKind::Status,
            status: Some(status),
            url: Some(url),
            message: format!("{} {}", reason, preview),
            source: None,
        }
    }

    fn decode_error(status: u16, url: String, err: serde_json::Error, preview: String) -> Self {
        let message = format!("failed to decode response body: {} | body={}", err, preview);
        ApiError {
            kind: ApiErrorKind::Decode,
            status: Some(status),
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "api error kind={}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={}", status)?;
        }
        if let Some(url) = &self.url {
            write!(f, " url={}", url)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

async fn parse_json_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ApiError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let reason = status.canonical_reason().unwrap_or("").to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| ApiError::from_reqwest(err, url.clone()))?;

    if !status.is_success() {
        let preview = preview_body(&body);
        return Err(ApiError::status_error(
            status.as_u16(),
            &reason,
            url,
            preview,
        ));
    }

    serde_json::from_str::<T>(&body).map_err(|err| {
        let preview = preview_body(&body);
        ApiError::decode_error(status.as_u16(), url, err, preview)
    })
}

/// Like [`parse_json_response`] but tolerates a no-content success (the
/// DELETE endpoint answers 204 with an empty body).
async fn ensure_success(resp: reqwest::Response) -> Result<(), ApiError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let reason = status.canonical_reason().unwrap_or("").to_string();

    if status.is_success() {
        return Ok(());
    }

    let body = resp
        .text()
        .await
        .map_err(|err| ApiError::from_reqwest(err, url.clone()))?;
    let preview = preview_body(&body);
    Err(ApiError::status_error(
        status.as_u16(),
        &reason,
        url,
        preview,
    ))
}

#[derive(Debug, Clone, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Response body of the register/login endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    // Pre-built URL endpoints for the fixed paths (per-id paths are formatted)
    url_register: String,
    url_login: String,
    url_notes: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/').to_string();
        Ok(Self {
            url_register: format!("{}/auth/register", normalized),
            url_login: format!("{}/auth/login", normalized),
            url_notes: format!("{}/notes", normalized),
            base_url: normalized,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public read URL for a published note's share token.
    pub fn share_url(&self, share_token: &str) -> String {
        format!("{}/share/{}", self.base_url, share_token)
    }

    fn auth(&self, req: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
        match token {
            Some(tok) if !tok.trim().is_empty() => req.bearer_auth(tok),
            _ => req,
        }
    }

    async fn send(
        &self,
        req: reqwest::RequestBuilder,
        token: Option<&str>,
        url: &str,
    ) -> Result<reqwest::Response, ApiError> {
        self.auth(req, token)
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(err, url.to_string()))
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let url = &self.url_register;
        tracing::debug!(target: "noted.http", stage = "auth.register.in", url = %url);
        let req = self.http.post(url).json(&Credentials { email, password });
        let resp = self.send(req, None, url).await?;
        let status = resp.status();
        let tok = parse_json_response::<TokenResponse>(resp).await?;
        tracing::debug!(target: "noted.http", stage = "auth.register.out", status = %status);
        Ok(tok)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let url = &self.url_login;
        tracing::debug!(target: "noted.http", stage = "auth.login.in", url = %url);
        let req = self.http.post(url).json(&Credentials { email, password });
        let resp = self.send(req, None, url).await?;
        let status = resp.status();
        let tok = parse_json_response::<TokenResponse>(resp).await?;
        tracing::debug!(target: "noted.http", stage = "auth.login.out", status = %status);
        Ok(tok)
    }

    pub async fn list_notes(&self, token: &str) -> Result<Vec<Note>, ApiError> {
        let url = &self.url_notes;
        tracing::debug!(target: "noted.http", stage = "notes.list.in", url = %url);
        let req = self.http.get(url);
        let resp = self.send(req, Some(token), url).await?;
        let status = resp.status();
        let notes = parse_json_response::<Vec<Note>>(resp).await?;
        tracing::debug!(
            target: "noted.http",
            stage = "notes.list.out",
            status = %status,
            count = notes.len()
        );
        Ok(notes)
    }

    pub async fn create_note(&self, token: &str, draft: &NoteDraft) -> Result<Note, ApiError> {
        let url = &self.url_notes;
        tracing::debug!(
            target: "noted.http",
            stage = "notes.create.in",
            url = %url,
            title_len = draft.title.len()
        );
        let req = self.http.post(url).json(draft);
        let resp = self.send(req, Some(token), url).await?;
        let status = resp.status();
        let note = parse_json_response::<Note>(resp).await?;
        tracing::debug!(target: "noted.http", stage = "notes.create.out", status = %status);
        Ok(note)
    }

    pub async fn update_note(
        &self,
        token: &str,
        id: &str,
        patch: &NotePatch,
    ) -> Result<Note, ApiError> {
        let url = format!("{}/{}", self.url_notes, id);
        tracing::debug!(target: "noted.http", stage = "notes.update.in", url = %url, id = %id);
        let req = self.http.patch(&url).json(patch);
        let resp = self.send(req, Some(token), &url).await?;
        let status = resp.status();
        let note = parse_json_response::<Note>(resp).await?;
        tracing::debug!(target: "noted.http", stage = "notes.update.out", status = %status);
        Ok(note)
    }

    pub async fn delete_note(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.url_notes, id);
        tracing::debug!(target: "noted.http", stage = "notes.delete.in", url = %url, id = %id);
        let req = self.http.delete(&url);
        let resp = self.send(req, Some(token), &url).await?;
        let status = resp.status();
        ensure_success(resp).await?;
        tracing::debug!(target: "noted.http", stage = "notes.delete.out", status = %status);
        Ok(())
    }

    pub async fn share_note(&self, token: &str, id: &str) -> Result<Note, ApiError> {
        let url = format!("{}/{}/share", self.url_notes, id);
        tracing::debug!(target: "noted.http", stage = "notes.share.in", url = %url, id = %id);
        let req = self.http.post(&url);
        let resp = self.send(req, Some(token), &url).await?;
        let status = resp.status();
        let note = parse_json_response::<Note>(resp).await?;
        tracing::debug!(target: "noted.http", stage = "notes.share.out", status = %status);
        Ok(note)
    }
}
