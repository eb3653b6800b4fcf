use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Request never completed (connect, timeout, body read)
    #[error("request to {backend} failed: {source}")]
    Transport {
        backend: String,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with a non-success status
    #[error("{backend} returned HTTP {status}: {body}")]
    Status {
        backend: String,
        status: u16,
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("could not decode {backend} response: {source}")]
    Decode {
        backend: String,
        #[source]
        source: serde_json::Error,
    },

    /// Service answered but produced no text
    #[error("{0} returned an empty completion")]
    EmptyCompletion(String),
}
