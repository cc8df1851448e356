//! Per-Pokémon upsert engine.
//!
//! Runs inside a caller-owned transaction; an error here is expected to
//! abort that whole transaction. Dependent collections use full-replace
//! semantics: cleared and rebuilt from the payload, never diffed.

use crate::data::models::Pokemon;
use crate::data::{abilities, pokemon, types};
use crate::sync::normalize::NormalizedPokemon;
use anyhow::{Context, Result};
use sqlx::PgConnection;
use tracing::debug;

/// Create or refresh one Pokémon and its dependent join rows so the store
/// reflects exactly the given record.
pub async fn reconcile(conn: &mut PgConnection, record: &NormalizedPokemon) -> Result<Pokemon> {
    let (row, created) = pokemon::upsert(conn, record).await?;

    let mut type_ids = Vec::with_capacity(record.types.len());
    for t in &record.types {
        let type_row = types::get_or_create(conn, &t.name, &t.color)
            .await
            .with_context(|| format!("failed to resolve type '{}'", t.name))?;
        type_ids.push(type_row.id);
    }
    pokemon::replace_type_assignments(conn, row.id, &type_ids).await?;

    pokemon::clear_ability_links(conn, row.id).await?;
    for a in &record.abilities {
        let ability = abilities::get_or_create(conn, &a.name, a.is_hidden)
            .await
            .with_context(|| format!("failed to resolve ability '{}'", a.name))?;
        pokemon::insert_ability_link(conn, row.id, ability.id, a.is_hidden, a.slot).await?;
    }

    debug!(
        pokedex_id = row.pokedex_id,
        name = %row.name,
        action = if created { "created" } else { "updated" },
        types = record.types.len(),
        abilities = record.abilities.len(),
        "pokemon reconciled"
    );

    Ok(row)
}
