use thiserror::Error;

/// Errors raised while building the index or evaluating calculators.
/// Every error aborts the whole computation; nothing partial is returned.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A category, location type or calculator name with no mapping
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Entity listed under one bundle key but labelled with another category
    #[error("{name} is listed under {expected} but labelled {found}")]
    CategoryMismatch { name: String, expected: String, found: String },

    #[error("no page path for {0}")]
    MissingPath(String),

    #[error("href must be non-empty and start with '/': {0:?}")]
    InvalidHref(String),

    #[error("invalid calculator parameters: {0}")]
    InvalidParams(#[source] serde_json::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine not initialized. Call init_engine(index_json, config_json) first.")]
    NotInitialized,
}

pub type Result<T> = std::result::Result<T, EngineError>;
