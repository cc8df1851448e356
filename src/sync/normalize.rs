//! Pure transformation from upstream payloads to the local record shape.

use crate::data::types::default_type_color;
use crate::pokeapi::models::{PokemonDetail, PokemonSpecies};

/// Stat applied when the upstream stat list omits one of the six names.
/// 0 would violate the 1..=255 bound the store enforces.
const MISSING_STAT_DEFAULT: i16 = 50;

/// A detail payload (plus optional species payload) flattened into the
/// local entity shape, ready for reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPokemon {
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
    /// `(type name, default color)` pairs in upstream payload order.
    pub types: Vec<TypeRef>,
    /// Ability references in upstream payload order, which is what slot
    /// numbering follows.
    pub abilities: Vec<AbilityRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AbilityRef {
    pub name: String,
    pub is_hidden: bool,
    pub slot: i16,
}

/// Flatten a detail payload into a [`NormalizedPokemon`]. No I/O; rarity
/// flags default to false when the species payload is absent.
pub fn normalize(detail: &PokemonDetail, species: Option<&PokemonSpecies>) -> NormalizedPokemon {
    let stat = |name: &str| {
        detail
            .stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
            .unwrap_or(MISSING_STAT_DEFAULT)
    };

    NormalizedPokemon {
        pokedex_id: detail.id,
        name: detail.name.clone(),
        height: detail.height,
        weight: detail.weight,
        sprite_front: detail.sprites.front_default.clone(),
        sprite_back: detail.sprites.back_default.clone(),
        official_artwork: detail.sprites.other.official_artwork.front_default.clone(),
        hp: stat("hp"),
        attack: stat("attack"),
        defense: stat("defense"),
        special_attack: stat("special-attack"),
        special_defense: stat("special-defense"),
        speed: stat("speed"),
        base_experience: detail.base_experience.unwrap_or(0),
        is_legendary: species.is_some_and(|s| s.is_legendary),
        is_mythical: species.is_some_and(|s| s.is_mythical),
        types: detail
            .types
            .iter()
            .map(|t| TypeRef {
                name: t.type_ref.name.clone(),
                color: default_type_color(&t.type_ref.name).to_owned(),
            })
            .collect(),
        abilities: detail
            .abilities
            .iter()
            .map(|a| AbilityRef {
                name: a.ability.name.clone(),
                is_hidden: a.is_hidden,
                slot: a.slot,
            })
            .collect(),
    }
}
