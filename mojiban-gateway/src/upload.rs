//! Multipart upload to a Gyazo-style image host.
//!
//! The host takes a `multipart/form-data` POST with an `id` text field and an
//! `imagedata` file part, and answers with a bare URL in the response body,
//! usually without a file extension.

use std::time::Duration;

use chrono::Local;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

/// Client for the image host.
#[derive(Debug, Clone)]
pub struct Uploader {
    client: reqwest::Client,
    endpoint: String,
}

/// Errors that can occur when talking to the image host.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl Uploader {
    /// Create an uploader for the given endpoint.
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Upload PNG bytes, returning the hosted image URL.
    ///
    /// `Ok(None)` means the host answered but without a usable URL (non-2xx
    /// status or an unexpected body); only transport failures are errors.
    pub async fn upload(&self, png: Vec<u8>) -> Result<Option<String>, UploadError> {
        let id = upload_id();
        let part = Part::bytes(png).file_name("foo").mime_str("image/png")?;
        let form = Form::new().text("id", id).part("imagedata", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            warn!("Image host answered {} for upload", status);
            return Ok(None);
        }

        let body = response.text().await?;
        debug!("Image host response: {}", body);
        Ok(normalize_url(body.trim()))
    }
}

/// Upload id sent alongside the image, a local `%Y%m%d%H%M%S` timestamp.
pub(crate) fn upload_id() -> String {
    Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// Turn the host's response body into a usable image URL.
///
/// The host replies with a bare absolute URL; when the last path segment has
/// no extension, `.png` is appended so chat clients inline the image.
pub(crate) fn normalize_url(body: &str) -> Option<String> {
    if !body.starts_with("http") {
        return None;
    }
    let has_extension = body
        .rsplit('/')
        .next()
        .is_some_and(|segment| segment.contains('.'));
    if has_extension {
        Some(body.to_string())
    } else {
        Some(format!("{body}.png"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensionless_url_gets_png_suffix() {
        assert_eq!(
            normalize_url("http://gyazo.com/abc123").as_deref(),
            Some("http://gyazo.com/abc123.png")
        );
    }

    #[test]
    fn url_with_extension_is_kept() {
        assert_eq!(
            normalize_url("https://i.example/pic.png").as_deref(),
            Some("https://i.example/pic.png")
        );
        assert_eq!(
            normalize_url("https://i.example/pic.jpeg").as_deref(),
            Some("https://i.example/pic.jpeg")
        );
    }

    #[test]
    fn non_url_bodies_are_rejected() {
        assert_eq!(normalize_url(""), None);
        assert_eq!(normalize_url("error: quota exceeded"), None);
        assert_eq!(normalize_url("<html>busy</html>"), None);
    }

    #[test]
    fn https_counts_as_http_prefix() {
        assert!(normalize_url("https://gyazo.com/xyz").is_some());
    }

    #[test]
    fn upload_id_is_a_local_second_timestamp() {
        let id = upload_id();
        assert_eq!(id.len(), 14);
        assert!(id.chars().all(|c| c.is_ascii_digit()));

        let parsed = chrono::NaiveDateTime::parse_from_str(&id, "%Y%m%d%H%M%S")
            .expect("id round-trips through the timestamp format");
        let now = Local::now().naive_local();
        assert!((now - parsed).num_seconds().abs() < 60);
    }
}
