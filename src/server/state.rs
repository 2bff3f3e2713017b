//! State shared by every backup run of the process.
//!
//! Built once at startup from the configuration and handed to the bot's event handler.

use std::sync::Arc;

use crate::server::{
    config::Config,
    error::AppError,
    model::backup::BackupOptions,
    service::{fetch::AttachmentFetcher, upload::UploadPipeline},
    util::pacer::TokioPacer,
};

pub struct BackupState {
    /// Prefix of the `backup` command.
    pub command_prefix: String,
    pub options: BackupOptions,
    /// Upload strategy selected at startup.
    pub uploader: Arc<UploadPipeline>,
    /// Downloads attachment bytes when `options.fetch_attachments` is set.
    pub fetcher: AttachmentFetcher,
    pub pacer: TokioPacer,
}

impl BackupState {
    /// Creates the shared state.
    ///
    /// # Arguments
    /// - `config` - Application configuration
    /// - `http_client` - HTTP client for the upload services and attachment downloads
    ///
    /// # Returns
    /// - `Ok(BackupState)` - State ready for the event handler
    /// - `Err(AppError)` - The upload strategy could not be set up
    pub fn new(config: &Config, http_client: reqwest::Client) -> Result<Self, AppError> {
        let uploader = UploadPipeline::from_config(&config.upload, http_client.clone())?;

        Ok(Self {
            command_prefix: config.command_prefix.clone(),
            options: BackupOptions::from_config(config),
            uploader: Arc::new(uploader),
            fetcher: AttachmentFetcher::new(http_client),
            pacer: TokioPacer,
        })
    }
}
