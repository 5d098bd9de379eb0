//! Caught pokemon and catch rolls
//!
//! A catch succeeds when a uniform roll in `0..=255` does not exceed the
//! species capture rate, so a capture rate of 255 always succeeds.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::pokeapi::CatchablePokemon;

/// Highest valid capture rate
pub const MAX_CAPTURE_RATE: i32 = 255;

/// A pokemon in the player's Pokedex
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub details: CatchablePokemon,
    /// When the pokemon was caught
    pub caught_at: DateTime<Utc>,
}

/// The pokemon caught during this session, keyed by name
#[derive(Debug, Default)]
pub struct Pokedex {
    caught: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a caught pokemon, replacing an earlier catch of the same name
    pub fn record(&mut self, details: CatchablePokemon) {
        let name = details.name().to_string();
        self.caught.insert(
            name,
            CaughtPokemon {
                details,
                caught_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.caught.get(name)
    }

    /// Returns caught names in alphabetical order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.caught.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }
}

/// Decides a catch from a roll in `0..=255`
///
/// Capture rates outside `0..=255` never succeed.
pub fn catch_succeeds(capture_rate: i32, roll: u8) -> bool {
    if !(0..=MAX_CAPTURE_RATE).contains(&capture_rate) {
        log::warn!(
            "Invalid capture rate {}, must be between 0 and {}",
            capture_rate,
            MAX_CAPTURE_RATE
        );
        return false;
    }
    i32::from(roll) <= capture_rate
}

/// Rolls for a catch using `rng`
pub fn attempt_catch<R: Rng>(rng: &mut R, capture_rate: i32) -> bool {
    catch_succeeds(capture_rate, rng.gen())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokeapi::{Pokemon, PokemonSpecies};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catchable(name: &str, capture_rate: i32) -> CatchablePokemon {
        let pokemon: Pokemon = serde_json::from_value(serde_json::json!({
            "name": name,
            "height": 4,
            "weight": 60,
            "species": {"name": name, "url": "u"}
        }))
        .unwrap();
        CatchablePokemon {
            pokemon,
            species: PokemonSpecies {
                name: name.to_string(),
                capture_rate,
            },
        }
    }

    #[test]
    fn test_catch_succeeds_boundaries() {
        assert!(catch_succeeds(0, 0));
        assert!(!catch_succeeds(0, 1));
        assert!(catch_succeeds(45, 45));
        assert!(!catch_succeeds(45, 46));
        assert!(catch_succeeds(255, 255));
    }

    #[test]
    fn test_catch_with_invalid_capture_rate_fails() {
        assert!(!catch_succeeds(-1, 0));
        assert!(!catch_succeeds(256, 0));
    }

    #[test]
    fn test_attempt_catch_max_rate_always_succeeds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(attempt_catch(&mut rng, MAX_CAPTURE_RATE));
        }
    }

    #[test]
    fn test_pokedex_names_are_sorted() {
        let mut pokedex = Pokedex::new();
        pokedex.record(catchable("pikachu", 190));
        pokedex.record(catchable("bulbasaur", 45));
        pokedex.record(catchable("charmander", 45));

        let names: Vec<_> = pokedex.names().collect();
        assert_eq!(names, ["bulbasaur", "charmander", "pikachu"]);
    }

    #[test]
    fn test_pokedex_recatch_replaces_entry() {
        let mut pokedex = Pokedex::new();
        pokedex.record(catchable("pikachu", 190));
        let first = pokedex.get("pikachu").unwrap().caught_at;
        pokedex.record(catchable("pikachu", 190));

        assert_eq!(pokedex.len(), 1);
        assert!(pokedex.get("pikachu").unwrap().caught_at >= first);
    }

    #[test]
    fn test_empty_pokedex() {
        let pokedex = Pokedex::new();
        assert!(pokedex.is_empty());
        assert!(pokedex.get("pikachu").is_none());
    }
}
