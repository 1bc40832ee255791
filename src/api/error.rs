use thiserror::Error;

/// Anything that can go wrong talking to the catalog source.
///
/// Callers only ever display or log these; no code path branches on
/// the variant.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("catalog returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid catalog payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("product {0} not found")]
    NotFound(String),
}
