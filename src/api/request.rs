//! Wire-format model for submissions
//!
//! Wizards describe what they want to send as an [`ApiRequest`]; the client
//! turns it into an HTTP call. Keeping the request as plain data lets the UI be
//! tested against a mocked client without touching the network.

use super::error::GENERIC_ERROR;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// HTTP method for an [`ApiRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A binary attachment read from disk at send time
#[derive(Debug, Clone, PartialEq)]
pub struct FileAttachment {
    pub field: String,
    pub path: PathBuf,
}

impl FileAttachment {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.field.clone())
    }

    /// MIME type guessed from the file extension
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            "pdf" => "application/pdf",
            "ppt" => "application/vnd.ms-powerpoint",
            "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            _ => "application/octet-stream",
        }
    }
}

/// `multipart/form-data` body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FileAttachment>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text field; empty values are skipped
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.fields.push((name.to_string(), value));
        }
        self
    }

    /// Grouped values serialised as one JSON string field
    pub fn json<T: Serialize>(mut self, name: &str, value: &T) -> Result<Self, serde_json::Error> {
        self.fields
            .push((name.to_string(), serde_json::to_string(value)?));
        Ok(self)
    }

    /// Attach `path` under `name` when given, otherwise keep `stored_url`
    pub fn file_or_url(mut self, name: &str, path: Option<&Path>, stored_url: Option<&str>) -> Self {
        match (path, stored_url) {
            (Some(path), _) => self.files.push(FileAttachment {
                field: name.to_string(),
                path: path.to_path_buf(),
            }),
            (None, Some(url)) if !url.is_empty() => {
                self.fields.push((name.to_string(), url.to_string()));
            }
            _ => {}
        }
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn file(&self, name: &str) -> Option<&FileAttachment> {
        self.files.iter().find(|f| f.field == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartBody),
}

/// A single call to the marketplace API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Sent as the `user_id` header when present
    pub user_id: Option<String>,
    /// Fail with `MissingIdentity` instead of sending without `user_id`
    pub requires_identity: bool,
    pub body: RequestBody,
    /// Message used when a failed response carries none
    pub fallback_error: String,
    /// Status-specific messages that take precedence over `fallback_error`
    pub status_hints: Vec<(u16, String)>,
}

impl ApiRequest {
    fn new(method: Method, path: &str, body: RequestBody) -> Self {
        Self {
            method,
            path: path.to_string(),
            user_id: None,
            requires_identity: false,
            body,
            fallback_error: GENERIC_ERROR.to_string(),
            status_hints: Vec::new(),
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path, RequestBody::Empty)
    }

    pub fn post_json(path: &str, body: Value) -> Self {
        Self::new(Method::Post, path, RequestBody::Json(body))
    }

    pub fn post_multipart(path: &str, body: MultipartBody) -> Self {
        Self::new(Method::Post, path, RequestBody::Multipart(body))
    }

    /// Attach the caller's identity and require it to be present
    pub fn identified(mut self, user_id: Option<&str>) -> Self {
        self.user_id = user_id.filter(|id| !id.is_empty()).map(str::to_string);
        self.requires_identity = true;
        self
    }

    pub fn with_fallback(mut self, message: &str) -> Self {
        self.fallback_error = message.to_string();
        self
    }

    pub fn with_status_hint(mut self, status: u16, message: &str) -> Self {
        self.status_hints.push((status, message.to_string()));
        self
    }

    /// Message for a failed response: server message, then status hint, then fallback
    pub fn failure_message(&self, status: u16, body: &str) -> String {
        extract_error_message(body)
            .or_else(|| {
                self.status_hints
                    .iter()
                    .find(|(s, _)| *s == status)
                    .map(|(_, m)| m.clone())
            })
            .unwrap_or_else(|| self.fallback_error.clone())
    }
}

/// Successful response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body, `Value::Null` when empty or not JSON
    pub body: Value,
}

/// Pull a human-readable message out of an error body, if it has one
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let candidates = [
        value.get("message"),
        value.get("error").filter(|e| e.is_string()),
        value.get("error").and_then(|e| e.get("message")),
        value.get("detail"),
    ];
    let message = candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string);
    message
}
