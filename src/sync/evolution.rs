//! Evolution-chain synchronization.
//!
//! A separate pass from the main Pokémon sync: walks upstream chain
//! payloads linearly (first branch only) and records directed edges
//! between already-synced Pokémon. Chains whose base Pokémon is missing
//! locally are skipped so the edge set never dangles.

use crate::data::evolutions::{self, NewEvolution};
use crate::data::models::Pokemon;
use crate::data::pokemon;
use crate::pokeapi::PokeApi;
use crate::pokeapi::models::{ChainLink, EvolutionChainPayload, EvolutionDetail};
use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct EvolutionSummary {
    pub chains_synced: u32,
    pub chains_skipped: u32,
    pub edges_written: u32,
}

/// Fetch chains `(offset, offset + limit]` and persist each one. Fetch and
/// persistence failures are soft: the affected chain is skipped and the
/// pass continues.
pub async fn sync_evolutions(
    pool: &PgPool,
    api: &PokeApi,
    limit: u32,
    offset: u32,
) -> Result<EvolutionSummary> {
    let mut summary = EvolutionSummary::default();

    for chain_id in (offset + 1)..=(offset + limit) {
        let payload = match api.fetch_evolution_chain(chain_id as i32).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(chain_id, error = %e, "evolution chain fetch failed, skipping");
                summary.chains_skipped += 1;
                continue;
            }
        };

        match sync_one_chain(pool, &payload).await {
            Ok(Some(edges)) => {
                summary.chains_synced += 1;
                summary.edges_written += edges;
            }
            Ok(None) => {
                debug!(chain_id, "base pokemon not synced yet, skipping chain");
                summary.chains_skipped += 1;
            }
            Err(e) => {
                error!(chain_id, error = ?e, "failed to persist evolution chain");
                summary.chains_skipped += 1;
            }
        }
    }

    info!(
        chains_synced = summary.chains_synced,
        chains_skipped = summary.chains_skipped,
        edges_written = summary.edges_written,
        "evolution sync pass finished"
    );
    Ok(summary)
}

/// Persist one chain, or return `None` when its base Pokémon has no local
/// row. The chain's edge set is fully replaced in one transaction.
async fn sync_one_chain(pool: &PgPool, payload: &EvolutionChainPayload) -> Result<Option<u32>> {
    // Linearize: branching chains (Eevee) are out of scope, only the first
    // branch at each node is followed.
    let mut stages: Vec<&ChainLink> = Vec::new();
    let mut cursor = Some(&payload.chain);
    while let Some(link) = cursor {
        stages.push(link);
        cursor = link.evolves_to.first();
    }

    // Resolve each stage to a local row by catalog number, stopping at the
    // first species that is not synced yet.
    let mut resolved: Vec<(Pokemon, &ChainLink)> = Vec::new();
    for &link in &stages {
        let Some(species_id) = link.species.resource_id() else {
            warn!(
                chain_id = payload.id,
                species = %link.species.name,
                "species reference has no numeric id, truncating chain"
            );
            break;
        };
        match pokemon::get_by_pokedex_id(pool, species_id).await? {
            Some(row) => resolved.push((row, link)),
            None => break,
        }
    }

    let Some((base, _)) = resolved.first() else {
        return Ok(None);
    };

    let mut tx = pool
        .begin()
        .await
        .context("failed to begin evolution chain transaction")?;

    let chain = evolutions::upsert_chain(&mut tx, payload.id, base.id).await?;
    evolutions::clear_edges(&mut tx, chain.id).await?;

    let mut edges = 0u32;
    for pair in resolved.windows(2) {
        let (from, _) = &pair[0];
        let (to, to_link) = &pair[1];
        let detail = to_link.evolution_details.first();

        let trigger = detail
            .and_then(|d| d.trigger.as_ref())
            .map(|t| t.name.as_str())
            .unwrap_or("unknown");
        let condition = detail.and_then(condition_text);

        evolutions::insert_edge(
            &mut tx,
            &NewEvolution {
                chain_id: chain.id,
                from_pokemon_id: from.id,
                to_pokemon_id: to.id,
                trigger,
                min_level: detail.and_then(|d| d.min_level),
                item: detail.and_then(|d| d.item.as_ref()).map(|i| i.name.as_str()),
                condition: condition.as_deref(),
            },
        )
        .await?;
        edges += 1;
    }

    tx.commit()
        .await
        .context("failed to commit evolution chain transaction")?;

    debug!(
        chain_id = payload.id,
        base = %base.name,
        edges,
        "evolution chain persisted"
    );
    Ok(Some(edges))
}

/// Fold secondary requirements into the free-text condition column.
fn condition_text(detail: &EvolutionDetail) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(held) = &detail.held_item {
        parts.push(format!("holding {}", held.name));
    }
    if !detail.time_of_day.is_empty() {
        parts.push(format!("during the {}", detail.time_of_day));
    }
    if let Some(happiness) = detail.min_happiness {
        parts.push(format!("happiness {happiness}+"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
