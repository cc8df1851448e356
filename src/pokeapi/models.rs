//! Serde models for the PokéAPI payloads this service consumes.
//!
//! Only the fields the sync pipeline reads are modeled; everything else in
//! the (very large) upstream payloads is ignored during decoding.

use serde::Deserialize;

/// A named resource reference (`{"name": ..., "url": ...}`).
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    /// Numeric id from the trailing path segment of the resource URL
    /// (".../pokemon/25/" -> 25).
    pub fn resource_id(&self) -> Option<i32> {
        resource_id_from_url(&self.url)
    }
}

/// Extract the numeric trailing path segment of an upstream resource URL.
pub fn resource_id_from_url(url: &str) -> Option<i32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

/// One page of `/pokemon?limit=&offset=`.
#[derive(Debug, Deserialize)]
pub struct ListingPage {
    pub count: i64,
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: ArtworkSprites,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArtworkSprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatValue {
    pub base_stat: i16,
    pub stat: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: i16,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default = "default_slot")]
    pub slot: i16,
}

fn default_slot() -> i16 {
    1
}

/// `/pokemon/{id}`: the detail payload.
#[derive(Debug, Deserialize)]
pub struct PokemonDetail {
    pub id: i32,
    pub name: String,
    pub height: i32,
    pub weight: i32,
    #[serde(default)]
    pub base_experience: Option<i32>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub stats: Vec<StatValue>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

/// `/pokemon-species/{id}`: rarity flags and the chain reference.
#[derive(Debug, Deserialize)]
pub struct PokemonSpecies {
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
    #[serde(default)]
    pub evolution_chain: Option<ResourceLink>,
}

/// An unnamed resource reference (`{"url": ...}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceLink {
    pub url: String,
}

/// `/evolution-chain/{id}`.
#[derive(Debug, Deserialize)]
pub struct EvolutionChainPayload {
    pub id: i32,
    pub chain: ChainLink,
}

/// One node in an evolution chain. `evolution_details` describes how the
/// node's species is evolved *into*, so it is empty on the base node.
#[derive(Debug, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EvolutionDetail {
    #[serde(default)]
    pub trigger: Option<NamedResource>,
    #[serde(default)]
    pub min_level: Option<i32>,
    #[serde(default)]
    pub item: Option<NamedResource>,
    #[serde(default)]
    pub held_item: Option<NamedResource>,
    #[serde(default)]
    pub time_of_day: String,
    #[serde(default)]
    pub min_happiness: Option<i32>,
}

/// `/type/{name}`.
#[derive(Debug, Deserialize)]
pub struct TypeDetail {
    pub id: i32,
    pub name: String,
}

/// `/ability/{name}`: name plus localized effect texts.
#[derive(Debug, Deserialize)]
pub struct AbilityDetail {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

#[derive(Debug, Deserialize)]
pub struct EffectEntry {
    #[serde(default)]
    pub short_effect: String,
    pub language: NamedResource,
}

impl AbilityDetail {
    /// The English short-effect text, if the payload carries one.
    pub fn english_effect(&self) -> Option<&str> {
        self.effect_entries
            .iter()
            .find(|e| e.language.name == "en" && !e.short_effect.is_empty())
            .map(|e| e.short_effect.as_str())
    }
}
