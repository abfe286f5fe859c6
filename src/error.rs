//! Unified error type.

/// The error type returned by trellis's fallible operations.
///
/// Application-level errors (400, 401, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: binding to a port, loading configuration, or
/// reading and writing repository snapshots.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(String),

    #[error("config parse: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid socket address `{0}`")]
    InvalidAddress(String),
}

pub type Result<T> = std::result::Result<T, Error>;
