use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    SnapshotVersionError { found: u32, expected: u32 },
}

impl RegistryError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        RegistryError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RegistryError::InvalidArgument { .. })
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            RegistryError::InvalidArgument { message } => message.clone(),
            RegistryError::IoError(e) => format!("File access failed: {}", e),
            RegistryError::SerializationError(_) | RegistryError::SnapshotVersionError { .. } => {
                "The registry data file could not be read or written".to_string()
            }
            RegistryError::ConfigError { message } => format!("Configuration problem: {}", message),
            RegistryError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RegistryError::InvalidArgument { .. } => "Check the request parameters and try again",
            RegistryError::IoError(_) => "Check that the data directory exists and is writable",
            RegistryError::SerializationError(_) | RegistryError::SnapshotVersionError { .. } => {
                "Restart with --setup to rebuild the data file from the seed data"
            }
            RegistryError::ConfigError { .. } | RegistryError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or the command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
