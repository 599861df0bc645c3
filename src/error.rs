//! Error types for IsotrakIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// IsotrakIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parse error
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Operation requires an open transport
    #[error("Transport not open")]
    NotOpen,

    /// Invalid data record (wrong length, including empty on timeout)
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A numeric field in a data record failed to parse
    #[error("Malformed field {index}: {text:?}")]
    MalformedField {
        /// Zero-based field index within the record
        index: usize,
        /// Raw field text as received
        text: String,
    },
}
