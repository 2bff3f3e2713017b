use s3::{creds::Credentials, error::S3Error, Bucket, Region};
use url::Url;

use crate::server::{config::ObjectStoreConfig, error::AppError, service::package::Artifact};

const CONTENT_TYPE: &str = "application/zip";

/// Lifetime of presigned download URLs, 7 days.
pub const PRESIGN_EXPIRY_SECS: u32 = 7 * 24 * 60 * 60;

/// S3-compatible object store holding uploaded archives.
pub struct ObjectStoreUploader {
    bucket: Box<Bucket>,
}

impl ObjectStoreUploader {
    /// Sets up the bucket handle. No request is sent.
    pub fn new(config: &ObjectStoreConfig) -> Result<Self, AppError> {
        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: endpoint_url(&config.endpoint)?,
        };
        let credentials = Credentials::new(
            Some(config.access_key.as_str()),
            Some(config.secret_key.as_str()),
            None,
            None,
            None,
        )
        .map_err(S3Error::from)?;

        let bucket = Bucket::new(&config.bucket_name, region, credentials)?.with_path_style();

        Ok(Self { bucket })
    }

    /// Stores the archive under its filename and returns a presigned read URL.
    ///
    /// # Returns
    /// - `Ok(String)` - Presigned URL valid for [`PRESIGN_EXPIRY_SECS`]
    /// - `Err(AppError::StorageErr)` - The object store request failed
    /// - `Err(AppError::InternalError)` - The object store rejected the upload
    pub async fn upload(&self, artifact: &Artifact) -> Result<String, AppError> {
        let response = self
            .bucket
            .put_object_with_content_type(&artifact.name, &artifact.bytes, CONTENT_TYPE)
            .await?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(AppError::InternalError(format!(
                "Object store rejected upload of {} with status {}",
                artifact.name, status
            )));
        }

        tracing::info!("Stored {} in bucket {}", artifact.name, self.bucket.name());

        Ok(self
            .bucket
            .presign_get(&artifact.name, PRESIGN_EXPIRY_SECS, None)
            .await?)
    }
}

/// Normalizes the configured endpoint to an absolute URL, defaulting to `https`.
///
/// # Returns
/// - `Ok(String)` - Endpoint URL without trailing slash
/// - `Err(url::ParseError)` - The endpoint is not a valid host or URL
pub fn endpoint_url(endpoint: &str) -> Result<String, url::ParseError> {
    let url = if endpoint.contains("://") {
        Url::parse(endpoint)?
    } else {
        Url::parse(&format!("https://{endpoint}"))?
    };

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_defaults_to_https() {
        assert_eq!(
            endpoint_url("s3.example.com").unwrap(),
            "https://s3.example.com"
        );
        assert_eq!(
            endpoint_url("http://localhost:9000/").unwrap(),
            "http://localhost:9000"
        );
    }

    #[test]
    fn rejects_invalid_endpoint() {
        assert!(endpoint_url("http://").is_err());
    }

    /// Tests the bucket handle is created without contacting the store.
    ///
    /// Expected: Ok
    #[test]
    fn creates_bucket_handle() {
        let uploader = ObjectStoreUploader::new(&ObjectStoreConfig {
            endpoint: "localhost:9000".to_string(),
            region: "us-east-1".to_string(),
            access_key: "access".to_string(),
            secret_key: "secret".to_string(),
            bucket_name: "backups".to_string(),
        });

        assert!(uploader.is_ok());
    }
}
