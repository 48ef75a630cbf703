use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Request error: {0}")]
    Transport(String),
    /// Non-2xx reply from the generation endpoint. The payload is the
    /// response body verbatim (or the fixed fallback when the body is
    /// empty) and is shown to the user unchanged, so Display adds no
    /// prefix.
    #[error("{0}")]
    Service(String),
    #[error("Response error: {0}")]
    Decoding(String),
}

pub type Result<T> = std::result::Result<T, GenerationError>;
