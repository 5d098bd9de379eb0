//! PokeAPI HTTP client
//!
//! Fetches location areas, pokemon, and species data. Raw response bodies are
//! cached by URL so repeated lookups within the cache interval skip the network.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{CatchablePokemon, LocationArea, LocationAreaPage, Pokemon, PokemonSpecies};
use crate::cache::{CacheError, TimedCache};

/// Base URL for the PokeAPI v2 REST API
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Errors that can occur when fetching from PokeAPI
#[derive(Debug, Error)]
pub enum PokeApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A named resource does not exist
    #[error("{kind} \"{name}\" not found")]
    NotFound { kind: &'static str, name: String },

    /// Any other non-success status
    #[error("Response failed with status code: {status} and body: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// The response cache could not be created
    #[error("Failed to create response cache: {0}")]
    Cache(#[from] CacheError),
}

/// A named resource being fetched, used to build `NotFound` errors
#[derive(Debug, Clone, Copy)]
struct Resource<'a> {
    kind: &'static str,
    name: &'a str,
}

/// Client for fetching data from PokeAPI
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Raw response bodies keyed by URL
    cache: TimedCache,
    /// Base URL for the API without a trailing slash (allows override for testing)
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client for the public PokeAPI
    ///
    /// Must be called from within a Tokio runtime, since the cache starts its
    /// sweep task here.
    ///
    /// # Arguments
    /// * `cache_interval` - How long responses stay cached (between 1x and 2x this value)
    pub fn new(cache_interval: Duration) -> Result<Self, PokeApiError> {
        Self::with_base_url(DEFAULT_BASE_URL, cache_interval)
    }

    /// Creates a client against a custom base URL
    pub fn with_base_url(
        base_url: impl Into<String>,
        cache_interval: Duration,
    ) -> Result<Self, PokeApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http_client: Client::new(),
            cache: TimedCache::new(cache_interval)?,
            base_url,
        })
    }

    /// Returns the base URL requests are made against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the response cache
    pub fn cache(&self) -> &TimedCache {
        &self.cache
    }

    /// Stops the cache sweep. Safe to call more than once.
    pub fn shutdown(&self) {
        self.cache.stop_sweep();
    }

    /// Fetches a page of location areas
    ///
    /// # Arguments
    /// * `page_url` - A `next`/`previous` link from an earlier page, or `None` for the first page
    pub async fn location_areas(
        &self,
        page_url: Option<&str>,
    ) -> Result<LocationAreaPage, PokeApiError> {
        let url = match page_url {
            Some(url) => url.to_string(),
            None => format!("{}/location-area", self.base_url),
        };
        self.fetch_json(&url, None).await
    }

    /// Fetches a single location area by name
    pub async fn location_area(&self, name: &str) -> Result<LocationArea, PokeApiError> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        let resource = Resource {
            kind: "location area",
            name,
        };
        self.fetch_json(&url, Some(resource)).await
    }

    /// Fetches a pokemon by name
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon, PokeApiError> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        let resource = Resource {
            kind: "pokemon",
            name,
        };
        self.fetch_json(&url, Some(resource)).await
    }

    /// Fetches species data for a pokemon by name
    pub async fn pokemon_species(&self, name: &str) -> Result<PokemonSpecies, PokeApiError> {
        let url = format!("{}/pokemon-species/{}", self.base_url, name);
        let resource = Resource {
            kind: "pokemon species",
            name,
        };
        self.fetch_json(&url, Some(resource)).await
    }

    /// Fetches a pokemon and its species concurrently
    ///
    /// Fails if either request fails.
    pub async fn catchable_pokemon(&self, name: &str) -> Result<CatchablePokemon, PokeApiError> {
        let (pokemon, species) =
            futures::try_join!(self.pokemon(name), self.pokemon_species(name))?;
        Ok(CatchablePokemon { pokemon, species })
    }

    /// Returns the decoded body for `url`, from cache when possible
    ///
    /// # Behavior
    /// - On a cache hit, decodes the cached bytes without touching the network
    /// - On a miss, fetches the URL and decodes the body
    /// - Only bodies that decode successfully are cached
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        resource: Option<Resource<'_>>,
    ) -> Result<T, PokeApiError> {
        if let Some(body) = self.cache.get(url) {
            log::debug!("Cache hit for {}", url);
            return Ok(serde_json::from_slice(&body)?);
        }

        log::debug!("Cache miss for {}", url);
        let body = self.fetch_body(url, resource).await?;
        let decoded = serde_json::from_slice(&body)?;
        self.cache.add(url, body);

        Ok(decoded)
    }

    /// Fetches the raw body for `url`, mapping non-success statuses to errors
    async fn fetch_body(
        &self,
        url: &str,
        resource: Option<Resource<'_>>,
    ) -> Result<Bytes, PokeApiError> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();

        match (status, resource) {
            (StatusCode::NOT_FOUND, Some(resource)) => Err(PokeApiError::NotFound {
                kind: resource.kind,
                name: resource.name.to_string(),
            }),
            (status, _) if !status.is_success() => {
                log::warn!("GET {} returned {}", url, status);
                Err(PokeApiError::UnexpectedStatus {
                    status,
                    body: response.text().await.unwrap_or_else(|e| {
                        log::debug!("Failed to read error body from {}: {}", url, e);
                        e.to_string()
                    }),
                })
            }
            _ => Ok(response.bytes().await?),
        }
    }
}
