use reqwest::{
    multipart::{Form, Part},
    StatusCode,
};
use serde::Deserialize;

use crate::server::{error::AppError, service::package::Artifact};

/// Successful file host response.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    link: String,
}

/// Anonymous single-use file host such as file.io.
pub struct FileHostUploader {
    client: reqwest::Client,
    url: String,
}

impl FileHostUploader {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }

    /// Posts the archive as multipart field `file`.
    ///
    /// # Returns
    /// - `Ok(Some(link))` - The host accepted the file
    /// - `Ok(None)` - The host answered with a status other than 200
    /// - `Err(AppError::ReqwestErr)` - The request failed or the response was malformed
    pub async fn upload(&self, artifact: &Artifact) -> Result<Option<String>, AppError> {
        let part = Part::bytes(artifact.bytes.clone())
            .file_name(artifact.name.clone())
            .mime_str("application/zip")?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&self.url).multipart(form).send().await?;

        if response.status() != StatusCode::OK {
            tracing::warn!("File host answered {}", response.status());
            return Ok(None);
        }

        let body: UploadResponse = response.json().await?;
        Ok(Some(body.link))
    }
}
