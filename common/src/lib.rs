use thiserror::Error;

pub mod config;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Invalid staging endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Metadata store query failed: {0}")]
    StoreQuery(String),

    #[error("Grid catalog query failed: {0}")]
    CatalogQuery(String),

    #[error("Storage grid error: {0}")]
    Grid(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when the fault is attributable to the caller's request rather
    /// than to this service or one of its remote collaborators.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::InvalidEndpoint(_))
    }
}
