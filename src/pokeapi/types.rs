//! PokeAPI response models
//!
//! Only the fields the REPL displays are modelled; serde ignores the rest of
//! each payload.

use serde::Deserialize;

/// A name/URL pair as PokeAPI uses for every cross-reference
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the `location-area` listing
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas across all pages
    pub count: u32,
    /// URL of the next page, absent on the last page
    pub next: Option<String>,
    /// URL of the previous page, absent on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// A single location area and the pokemon that can be encountered there
#[derive(Debug, Clone, Deserialize)]
pub struct LocationArea {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub game_index: u32,
    /// The location this area belongs to
    pub location: NamedResource,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

/// Pokemon details from the `pokemon` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub name: String,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    pub species: NamedResource,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

/// Species data from the `pokemon-species` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonSpecies {
    pub name: String,
    /// Base catch rate, 0-255; higher is easier
    pub capture_rate: i32,
}

/// A pokemon together with the species data needed to attempt a catch
#[derive(Debug, Clone)]
pub struct CatchablePokemon {
    pub pokemon: Pokemon,
    pub species: PokemonSpecies,
}

impl CatchablePokemon {
    pub fn name(&self) -> &str {
        &self.pokemon.name
    }

    pub fn capture_rate(&self) -> i32 {
        self.species.capture_rate
    }
}
