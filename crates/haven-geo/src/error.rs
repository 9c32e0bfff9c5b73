use thiserror::Error;

/// Errors returned by the geo search provider client.
#[derive(Debug, Error)]
pub enum GeoSearchError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL is not a valid URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
