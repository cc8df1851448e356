//! HTTP client for the upstream PokéAPI catalog.
//!
//! Every fetch goes through a shared response cache keyed by the logical
//! endpoint; a hit returns the stored payload verbatim with no freshness
//! re-validation. There is no retry at this layer; callers decide whether
//! a failed fetch is fatal.

pub mod cache;
pub mod errors;
pub mod json;
pub mod models;

pub use errors::PokeApiError;

use crate::pokeapi::cache::ResponseCache;
use crate::pokeapi::models::{
    AbilityDetail, EvolutionChainPayload, ListingPage, PokemonDetail, PokemonSpecies, TypeDetail,
};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

pub struct PokeApi {
    http: reqwest::Client,
    base_url: String,
    cache: ResponseCache,
}

impl PokeApi {
    /// Build a client against `base_url` with a fixed per-request timeout
    /// and response TTL.
    pub fn new(base_url: &str, timeout: Duration, cache_ttl: Duration) -> anyhow::Result<Self> {
        Url::parse(base_url).context("invalid upstream base URL")?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            cache: ResponseCache::new(cache_ttl),
        })
    }

    /// One page of the Pokémon listing.
    pub async fn fetch_listing(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<ListingPage, PokeApiError> {
        self.get(&format!("pokemon?limit={limit}&offset={offset}"))
            .await
    }

    /// Detail payload for a single Pokémon.
    pub async fn fetch_detail(&self, id: i32) -> Result<PokemonDetail, PokeApiError> {
        self.get(&format!("pokemon/{id}")).await
    }

    /// Species payload (rarity flags, evolution chain reference).
    pub async fn fetch_species(&self, id: i32) -> Result<PokemonSpecies, PokeApiError> {
        self.get(&format!("pokemon-species/{id}")).await
    }

    /// A full evolution chain.
    pub async fn fetch_evolution_chain(
        &self,
        id: i32,
    ) -> Result<EvolutionChainPayload, PokeApiError> {
        self.get(&format!("evolution-chain/{id}")).await
    }

    /// Type lookup by name.
    pub async fn fetch_type(&self, name: &str) -> Result<TypeDetail, PokeApiError> {
        self.get(&format!("type/{name}")).await
    }

    /// Ability lookup by name.
    pub async fn fetch_ability(&self, name: &str) -> Result<AbilityDetail, PokeApiError> {
        self.get(&format!("ability/{name}")).await
    }

    /// Cache-through GET of a logical endpoint ("pokemon/25",
    /// "pokemon?limit=20&offset=0").
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, PokeApiError> {
        let key = cache_key(endpoint);
        if let Some(value) = self.cache.get(&key) {
            debug!(endpoint, "upstream cache hit");
            return json::decode_with_path(value).map_err(|source| PokeApiError::DecodeFailed {
                url: endpoint.to_owned(),
                source,
            });
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "requesting upstream");

        let response = self.http.get(&url).send().await.map_err(|source| {
            error!(%url, error = %source, "upstream request failed");
            PokeApiError::RequestFailed {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(%url, status = status.as_u16(), "upstream returned non-success status");
            return Err(PokeApiError::BadStatus {
                status: status.as_u16(),
                url,
            });
        }

        let value: serde_json::Value = response.json().await.map_err(|source| {
            error!(%url, error = %source, "upstream response was not valid JSON");
            PokeApiError::DecodeFailed {
                url: url.clone(),
                source: source.into(),
            }
        })?;

        let decoded = json::decode_with_path::<T>(value.clone()).map_err(|source| {
            error!(%url, error = %source, "upstream payload did not match the expected shape");
            PokeApiError::DecodeFailed {
                url: url.clone(),
                source,
            }
        })?;

        // Cache only after the full decode succeeds; a payload that failed
        // to decode is never stored, partially or otherwise.
        self.cache.insert(&key, value);
        Ok(decoded)
    }
}

/// Flatten a logical endpoint into a cache key
/// ("pokemon/25" -> "pokeapi_pokemon_25").
fn cache_key(endpoint: &str) -> String {
    format!("pokeapi_{}", endpoint.replace('/', "_"))
}
