//! Binary fetch of attachments and stickers.
//!
//! Disabled by default. When enabled, the bytes behind every attachment and sticker URL
//! of a message are downloaded and stored base64-encoded in the item's `data` field.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;

use crate::server::{error::AppError, model::snapshot::MessageRecord};

/// Message fields holding lists of downloadable items.
const BINARY_FIELDS: &[&str] = &["attachments", "stickers"];

pub struct AttachmentFetcher {
    client: reqwest::Client,
}

impl AttachmentFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Downloads a file and returns its base64 encoding.
    ///
    /// # Returns
    /// - `Ok(String)` - Base64-encoded file contents
    /// - `Err(AppError::ReqwestErr)` - Request failed or returned a non-success status
    pub async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(STANDARD.encode(&bytes))
    }

    /// Fills the `data` field of every attachment and sticker of a message.
    ///
    /// A failed download leaves `data` as `null`.
    pub async fn fill(&self, record: &mut MessageRecord) {
        for field in BINARY_FIELDS {
            let Some(Value::Array(items)) = record.get_mut(*field) else {
                continue;
            };

            for item in items.iter_mut() {
                let Some(url) = item.get("url").and_then(Value::as_str).map(str::to_string)
                else {
                    continue;
                };

                match self.fetch(&url).await {
                    Ok(data) => item["data"] = Value::String(data),
                    Err(e) => tracing::warn!("Failed to fetch {}: {}", url, e),
                }
            }
        }
    }
}
