//! Error types for the backup bot.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and the errors of the
//! external services the backup pipeline talks to (Discord, the object store, the link
//! shortener and the file host).

pub mod argument;
pub mod config;

use serenity::http::HttpError;
use serenity::model::ModelError;
use thiserror::Error;

use crate::server::error::{argument::ArgumentError, config::ConfigError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most variants
/// use `#[from]` for automatic error conversion. Large foreign error types are boxed to
/// keep the size of `AppError` small.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// The `backup` command argument was rejected.
    #[error(transparent)]
    ArgumentErr(#[from] ArgumentError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// HTTP client request error from reqwest (shortener, file host, attachment fetch).
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Snapshot serialization error.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Archive creation error.
    #[error(transparent)]
    ZipErr(#[from] zip::result::ZipError),

    /// I/O error while writing the in-memory archive.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Object store error from rust-s3.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    StorageErr(#[from] Box<s3::error::S3Error>),

    /// Invalid URL in the configuration of an external service.
    #[error(transparent)]
    UrlErr(#[from] url::ParseError),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Internal error with custom message.
    ///
    /// # Fields
    /// - Detailed error message for logging
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// Returns whether the error means the bot lacks access to the requested resource.
    ///
    /// Recognises Discord HTTP 403 responses and missing-permission errors raised by
    /// Serenity before a request is sent.
    ///
    /// # Returns
    /// - `true` - Access was denied
    /// - `false` - Any other failure
    pub fn is_forbidden(&self) -> bool {
        match self {
            Self::DiscordErr(err) => match err.as_ref() {
                serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
                    response.status_code.as_u16() == 403
                }
                serenity::Error::Model(ModelError::InvalidPermissions { .. }) => true,
                _ => false,
            },
            _ => false,
        }
    }
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

/// Manual conversion from S3Error to AppError, boxing the error.
impl From<s3::error::S3Error> for AppError {
    fn from(err: s3::error::S3Error) -> Self {
        AppError::StorageErr(Box::new(err))
    }
}
