//! Archive upload strategies.
//!
//! Two mutually exclusive strategies are selected once at startup:
//! - File host (default) - the archive is posted to an anonymous single-use file host
//!   and its share link returned, or no link if the host reports a failure
//! - All services - the archive is stored in an S3-compatible object store, a presigned
//!   read URL is created and shortened; a failing shortener yields the presigned URL
//!
//! Neither strategy retries. A failing object store or file host request ends the run.

pub mod file_host;
pub mod object_store;
pub mod shortener;

use serenity::async_trait;

use crate::server::{config::UploadConfig, error::AppError};

use self::{file_host::FileHostUploader, object_store::ObjectStoreUploader, shortener::LinkShortener};
use super::package::Artifact;

#[async_trait]
pub trait ArtifactUploader: Send + Sync {
    /// Uploads the archive.
    ///
    /// # Returns
    /// - `Ok(Some(link))` - Share link of the uploaded archive
    /// - `Ok(None)` - The upload finished without producing a link
    /// - `Err(AppError)` - The upload failed
    async fn upload(&self, artifact: &Artifact) -> Result<Option<String>, AppError>;
}

pub enum UploadPipeline {
    FileHost(FileHostUploader),
    AllServices {
        object_store: ObjectStoreUploader,
        shortener: LinkShortener,
    },
}

impl UploadPipeline {
    /// Builds the strategy selected by the configuration.
    ///
    /// # Returns
    /// - `Ok(UploadPipeline)` - The selected strategy
    /// - `Err(AppError::UrlErr)` - The object store endpoint is not a valid URL
    /// - `Err(AppError::StorageErr)` - The object store bucket could not be set up
    pub fn from_config(config: &UploadConfig, client: reqwest::Client) -> Result<Self, AppError> {
        let pipeline = match config {
            UploadConfig::FileHost { url } => {
                Self::FileHost(FileHostUploader::new(client, url.clone()))
            }
            UploadConfig::AllServices {
                object_store,
                shortener,
            } => Self::AllServices {
                object_store: ObjectStoreUploader::new(object_store)?,
                shortener: LinkShortener::new(client, shortener.clone()),
            },
        };

        Ok(pipeline)
    }

    pub fn strategy_name(&self) -> &'static str {
        match self {
            Self::FileHost(_) => "file host",
            Self::AllServices { .. } => "object store + link shortener",
        }
    }
}

#[async_trait]
impl ArtifactUploader for UploadPipeline {
    async fn upload(&self, artifact: &Artifact) -> Result<Option<String>, AppError> {
        match self {
            Self::FileHost(file_host) => file_host.upload(artifact).await,
            Self::AllServices {
                object_store,
                shortener,
            } => {
                let presigned_url = object_store.upload(artifact).await?;
                Ok(Some(shortener.shorten(&presigned_url).await))
            }
        }
    }
}
