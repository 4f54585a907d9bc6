use std::fmt;

// === StorageError ===

/// Errors related to the key-value storage area and the persisted item list.
#[derive(Debug)]
pub enum StorageError {
    /// The underlying store failed to read or write.
    Backend(String),
    /// The item list could not be serialized.
    Serialization(String),
    /// The persisted item list could not be parsed.
    Corrupt(String),
    /// The write would push usage past the assumed capacity.
    QuotaExceeded { needed: i64, capacity: i64 },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Backend(msg) => write!(f, "Storage backend error: {}", msg),
            StorageError::Serialization(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
            StorageError::Corrupt(msg) => write!(f, "Stored list is corrupt: {}", msg),
            StorageError::QuotaExceeded { needed, capacity } => write!(
                f,
                "Storage quota exceeded: {} bytes needed, {} bytes available",
                needed, capacity
            ),
        }
    }
}

impl std::error::Error for StorageError {}

// === PreviewError ===

/// Reasons a link preview fell back to empty metadata.
#[derive(Debug)]
pub enum PreviewError {
    /// No API key is configured, so no request was sent.
    MissingApiKey,
    /// Previews are turned off, or the policy skipped this input.
    Skipped,
    /// The request could not be sent or the connection failed.
    Network(String),
    /// The service answered with a non-success status.
    Status(u16),
    /// The response body was not the expected JSON.
    Decode(String),
    /// The request exceeded the configured timeout.
    Timeout,
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::MissingApiKey => write!(f, "Preview API key not configured"),
            PreviewError::Skipped => write!(f, "Preview skipped"),
            PreviewError::Network(msg) => write!(f, "Preview network error: {}", msg),
            PreviewError::Status(code) => write!(f, "Preview service returned status {}", code),
            PreviewError::Decode(msg) => write!(f, "Preview decode error: {}", msg),
            PreviewError::Timeout => write!(f, "Preview request timed out"),
        }
    }
}

impl std::error::Error for PreviewError {}

// === ListError ===

/// Errors related to list controller operations.
#[derive(Debug)]
pub enum ListError {
    /// Reading or writing the persisted list failed.
    Storage(StorageError),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Storage(err) => write!(f, "List storage error: {}", err),
        }
    }
}

impl std::error::Error for ListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListError::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for ListError {
    fn from(err: StorageError) -> Self {
        ListError::Storage(err)
    }
}

// === ConfigError ===

/// Errors related to configuration management.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the config file.
    IoError(String),
    /// Failed to serialize or deserialize the config.
    SerializationError(String),
    /// The provided config key is invalid.
    InvalidKey(String),
    /// The provided config value is invalid.
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Config serialization error: {}", msg)
            }
            ConfigError::InvalidKey(key) => write!(f, "Invalid config key: {}", key),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// === AppError ===

/// Errors raised while assembling the application.
#[derive(Debug)]
pub enum AppError {
    /// The database could not be opened or migrated.
    Database(String),
    /// The HTTP client for previews could not be built.
    HttpClient(String),
    /// The initial list load failed.
    Load(ListError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::HttpClient(msg) => write!(f, "HTTP client error: {}", msg),
            AppError::Load(err) => write!(f, "Initial load failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {}
