//! Environment-backed application configuration.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Postgres connection string.
    pub database_url: String,

    /// Base URL of the upstream catalog API.
    #[serde(default = "default_base_url")]
    pub pokeapi_base_url: String,

    /// Default level for the `pokedex` target when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How long decoded upstream responses stay cached, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Per-request timeout for upstream calls, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_request_timeout() -> u64 {
    10
}
