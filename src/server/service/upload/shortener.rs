use reqwest::StatusCode;
use serde::Serialize;

use crate::server::config::ShortenerConfig;

/// Request body of the Polr shorten action.
#[derive(Debug, Serialize)]
struct ShortenRequest<'a> {
    key: &'a str,
    url: &'a str,
    is_secret: bool,
}

/// Polr link shortener.
pub struct LinkShortener {
    client: reqwest::Client,
    config: ShortenerConfig,
}

impl LinkShortener {
    pub fn new(client: reqwest::Client, config: ShortenerConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/v2/action/shorten",
            self.config.server_url.trim_end_matches('/')
        )
    }

    /// Shortens `long_url`.
    ///
    /// Never fails: when the shortener cannot be reached or answers with anything other
    /// than 200, `long_url` is returned unchanged.
    pub async fn shorten(&self, long_url: &str) -> String {
        let request = ShortenRequest {
            key: &self.config.api_key,
            url: long_url,
            is_secret: false,
        };

        let response = match self.client.post(self.endpoint()).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Link shortener unreachable, keeping long URL: {}", e);
                return long_url.to_string();
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Failed to read link shortener response: {}", e);
                return long_url.to_string();
            }
        };

        resolve_short_link(long_url, status, body)
    }
}

/// Picks the link to share from a shortener response.
///
/// # Returns
/// - The response body when the status is 200
/// - `long_url` unchanged for any other status
pub fn resolve_short_link(long_url: &str, status: StatusCode, body: String) -> String {
    if status == StatusCode::OK {
        body
    } else {
        tracing::debug!("Link shortener answered {}, keeping long URL", status);
        long_url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESIGNED: &str =
        "https://s3.example.com/backups/Guild_data.json.zip?X-Amz-Expires=604800&X-Amz-Signature=abc";

    #[test]
    fn uses_short_link_on_success() {
        let link = resolve_short_link(PRESIGNED, StatusCode::OK, "https://polr.example.com/x1".into());

        assert_eq!(link, "https://polr.example.com/x1");
    }

    /// Tests any non-200 status falls back to the presigned URL.
    ///
    /// Expected: presigned URL returned byte-for-byte
    #[test]
    fn falls_back_to_long_url() {
        for status in [
            StatusCode::CREATED,
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let link = resolve_short_link(PRESIGNED, status, "error".into());
            assert_eq!(link.as_bytes(), PRESIGNED.as_bytes());
        }
    }

    /// Tests an unreachable shortener falls back to the presigned URL.
    ///
    /// Expected: presigned URL returned unchanged
    #[tokio::test]
    async fn falls_back_when_unreachable() {
        let shortener = LinkShortener::new(
            reqwest::Client::new(),
            ShortenerConfig {
                api_key: "key".to_string(),
                server_url: "http://127.0.0.1:1".to_string(),
            },
        );

        assert_eq!(shortener.shorten(PRESIGNED).await, PRESIGNED);
    }

    #[test]
    fn builds_endpoint_without_double_slash() {
        let shortener = LinkShortener::new(
            reqwest::Client::new(),
            ShortenerConfig {
                api_key: "key".to_string(),
                server_url: "https://polr.example.com/".to_string(),
            },
        );

        assert_eq!(
            shortener.endpoint(),
            "https://polr.example.com/api/v2/action/shorten"
        );
    }
}
