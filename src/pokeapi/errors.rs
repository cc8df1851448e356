//! Error types for the PokéAPI client.

#[derive(Debug, thiserror::Error)]
pub enum PokeApiError {
    #[error("request to {url} failed")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} from {url}")]
    BadStatus { status: u16, url: String },
    #[error("failed to decode response from {url}")]
    DecodeFailed {
        url: String,
        #[source]
        source: anyhow::Error,
    },
}
