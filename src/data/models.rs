//! Row structs for the local store.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A synced Pokémon row.
///
/// `pokedex_id` is the external identity key; every other non-key field is
/// fully overwritten on each sync. The internal `id` stays stable across
/// re-syncs, so foreign keys (evolutions, favorites) never dangle.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Pokemon {
    pub id: i32,
    pub pokedex_id: i32,
    pub name: String,
    pub height: i32,
    pub weight: i32,
    pub sprite_front: Option<String>,
    pub sprite_back: Option<String>,
    pub official_artwork: Option<String>,
    pub hp: i16,
    pub attack: i16,
    pub defense: i16,
    pub special_attack: i16,
    pub special_defense: i16,
    pub speed: i16,
    pub base_experience: i32,
    pub is_legendary: bool,
    pub is_mythical: bool,
    pub synced_at: Option<DateTime<Utc>>,
}

impl Pokemon {
    /// Sum of the six base stats.
    pub fn total_stats(&self) -> i32 {
        [
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
        .iter()
        .map(|&s| i32::from(s))
        .sum()
    }

    /// Height in meters (stored in decimeters).
    pub fn height_meters(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in kilograms (stored in hectograms).
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PokemonType {
    pub id: i32,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Ability {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub is_hidden: bool,
}

/// Join row between a Pokémon and an ability, carrying the per-Pokémon
/// hidden flag and slot ordinal.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PokemonAbility {
    pub id: i32,
    pub pokemon_id: i32,
    pub ability_id: i32,
    pub is_hidden: bool,
    pub slot: i16,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EvolutionChain {
    pub id: i32,
    pub chain_id: i32,
    pub base_pokemon_id: i32,
}

/// A directed evolution edge within a chain.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Evolution {
    pub id: i32,
    pub chain_id: i32,
    pub from_pokemon_id: i32,
    pub to_pokemon_id: i32,
    pub trigger: String,
    pub min_level: Option<i32>,
    pub item: Option<String>,
    pub condition: Option<String>,
}
