use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_FILE_HOST_URL: &str = "https://file.io";
const DEFAULT_S3_REGION: &str = "us-east-1";

/// Process argument selecting the object store + link shortener upload strategy.
pub const USE_ALL_SERVICES_FLAG: &str = "--use-all-services";

pub struct Config {
    pub bot_token: String,
    pub command_prefix: String,

    /// Download attachment and sticker bytes into the snapshot.
    pub fetch_attachments: bool,

    pub upload: UploadConfig,
}

/// Upload strategy selected at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadConfig {
    /// Upload to a public anonymous single-use file host.
    FileHost { url: String },
    /// Upload to an S3-compatible object store and shorten the presigned URL.
    AllServices {
        object_store: ObjectStoreConfig,
        shortener: ShortenerConfig,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectStoreConfig {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShortenerConfig {
    pub api_key: String,
    pub server_url: String,
}

impl Config {
    /// Loads the configuration from the process environment and arguments.
    ///
    /// The multi-service upload strategy is selected when the process was started with
    /// `--use-all-services`; its variables are only required in that case.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables are present and valid
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or malformed
    pub fn from_env() -> Result<Self, AppError> {
        let use_all_services = std::env::args().any(|arg| arg == USE_ALL_SERVICES_FLAG);

        Self::from_vars(use_all_services, |name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Arguments
    /// - `use_all_services` - Whether the multi-service upload strategy is selected
    /// - `var` - Returns the value of the named variable, if set
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables are present and valid
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or malformed
    pub fn from_vars(
        use_all_services: bool,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let required =
            |name: &str| var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let upload = if use_all_services {
            UploadConfig::AllServices {
                object_store: ObjectStoreConfig {
                    endpoint: required("S3_ENDPOINT")?,
                    region: var("S3_REGION").unwrap_or_else(|| DEFAULT_S3_REGION.to_string()),
                    access_key: required("S3_ACCESS_KEY")?,
                    secret_key: required("S3_SECRET_KEY")?,
                    bucket_name: required("S3_BUCKET_NAME")?,
                },
                shortener: ShortenerConfig {
                    api_key: required("POLR_KEY")?,
                    server_url: required("POLR_SERVER")?,
                },
            }
        } else {
            UploadConfig::FileHost {
                url: var("FILE_HOST_URL").unwrap_or_else(|| DEFAULT_FILE_HOST_URL.to_string()),
            }
        };

        let fetch_attachments = match var("BACKUP_FETCH_ATTACHMENTS") {
            Some(value) => parse_bool("BACKUP_FETCH_ATTACHMENTS", &value)?,
            None => false,
        };

        Ok(Self {
            bot_token: required("BOT_TOKEN")?,
            command_prefix: var("BACKUP_COMMAND_PREFIX")
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string()),
            fetch_attachments,
            upload,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
