use thiserror::Error;

/// Failures while obtaining the template source.
///
/// Non-2xx responses are not errors; only a missing or unreadable response is.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connection, TLS or timeout failure. Never retried.
    #[error("failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    /// The response arrived but its body could not be read as text.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
