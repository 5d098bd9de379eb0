//! PokeAPI client and response models
//!
//! This module contains the HTTP client used by the REPL commands and the
//! subset of the PokeAPI schema that the commands read. Every response body is
//! cached by URL in a [`TimedCache`](crate::cache::TimedCache) before decoding.

pub mod client;
pub mod types;

pub use client::{PokeApiClient, PokeApiError, DEFAULT_BASE_URL};
pub use types::{
    CatchablePokemon, LocationArea, LocationAreaPage, NamedResource, Pokemon, PokemonEncounter,
    PokemonSpecies, PokemonStat, PokemonType,
};
