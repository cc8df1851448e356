//! Shared builders for stubbed PokéAPI payloads and wiremock mounts.
//!
//! Compiled into each integration test binary; not every binary uses every
//! helper.
#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A detail payload for a stub Pokémon with sane defaults: two types, two
/// abilities, all six stats present.
pub fn detail_payload(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "base_experience": 64,
        "sprites": {
            "front_default": format!("https://img.example/{id}/front.png"),
            "back_default": format!("https://img.example/{id}/back.png"),
            "other": {
                "official-artwork": {
                    "front_default": format!("https://img.example/{id}/artwork.png")
                }
            }
        },
        "stats": [
            {"base_stat": 45, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 49, "stat": {"name": "attack", "url": ""}},
            {"base_stat": 49, "stat": {"name": "defense", "url": ""}},
            {"base_stat": 65, "stat": {"name": "special-attack", "url": ""}},
            {"base_stat": 65, "stat": {"name": "special-defense", "url": ""}},
            {"base_stat": 45, "stat": {"name": "speed", "url": ""}}
        ],
        "types": [
            {"slot": 1, "type": {"name": "grass", "url": ""}},
            {"slot": 2, "type": {"name": "poison", "url": ""}}
        ],
        "abilities": [
            {"ability": {"name": "overgrow", "url": ""}, "is_hidden": false, "slot": 1},
            {"ability": {"name": "chlorophyll", "url": ""}, "is_hidden": true, "slot": 3}
        ]
    })
}

pub fn species_payload(legendary: bool, mythical: bool) -> Value {
    json!({
        "is_legendary": legendary,
        "is_mythical": mythical,
        "evolution_chain": {"url": "https://api.example/api/v2/evolution-chain/1/"}
    })
}

/// A listing page whose entry URLs carry the given ids.
pub fn listing_payload(base_url: &str, ids: &[i32]) -> Value {
    json!({
        "count": ids.len(),
        "results": ids.iter().map(|id| json!({
            "name": format!("pokemon-{id}"),
            "url": format!("{base_url}/pokemon/{id}/")
        })).collect::<Vec<_>>()
    })
}

/// A linear evolution chain payload over the given `(species id, name)`
/// stages, evolving by level-up at level 16, 32, ...
pub fn chain_payload(chain_id: i32, stages: &[(i32, &str)]) -> Value {
    fn node(stages: &[(i32, &str)], depth: usize) -> Value {
        let (id, name) = stages[depth];
        let mut link = json!({
            "species": {"name": name, "url": format!("https://api.example/api/v2/pokemon-species/{id}/")},
            "evolution_details": [],
            "evolves_to": []
        });
        if depth > 0 {
            link["evolution_details"] = json!([{
                "trigger": {"name": "level-up", "url": ""},
                "min_level": 16 * depth,
                "item": null,
                "held_item": null,
                "time_of_day": "",
                "min_happiness": null
            }]);
        }
        if depth + 1 < stages.len() {
            link["evolves_to"] = json!([node(stages, depth + 1)]);
        }
        link
    }

    json!({
        "id": chain_id,
        "chain": node(stages, 0)
    })
}

/// Mount a listing page for a specific `limit`/`offset` pair.
pub async fn mount_listing(server: &MockServer, limit: u32, offset: u32, ids: &[i32]) {
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", limit.to_string()))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_payload(&server.uri(), ids)))
        .mount(server)
        .await;
}

pub async fn mount_detail(server: &MockServer, id: i32, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/pokemon/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_species(server: &MockServer, id: i32, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/pokemon-species/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_chain(server: &MockServer, chain_id: i32, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/evolution-chain/{chain_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
