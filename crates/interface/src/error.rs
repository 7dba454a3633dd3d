use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("upstream error {code}: {description}")]
    Api { code: String, description: String },
    #[error("other error: {0}")]
    Other(String),
}
