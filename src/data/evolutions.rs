//! Evolution chain and edge persistence.

use crate::data::models::{Evolution, EvolutionChain};
use anyhow::{Context, Result};
use sqlx::{PgConnection, PgPool};

/// Field set for one evolution edge insert.
#[derive(Debug, Clone)]
pub struct NewEvolution<'a> {
    pub chain_id: i32,
    pub from_pokemon_id: i32,
    pub to_pokemon_id: i32,
    pub trigger: &'a str,
    pub min_level: Option<i32>,
    pub item: Option<&'a str>,
    pub condition: Option<&'a str>,
}

/// Insert or update the chain row identified by the upstream chain id.
pub async fn upsert_chain(
    conn: &mut PgConnection,
    chain_id: i32,
    base_pokemon_id: i32,
) -> Result<EvolutionChain> {
    sqlx::query_as::<_, EvolutionChain>(
        r#"
        INSERT INTO evolution_chains (chain_id, base_pokemon_id)
        VALUES ($1, $2)
        ON CONFLICT (chain_id)
        DO UPDATE SET base_pokemon_id = EXCLUDED.base_pokemon_id
        RETURNING id, chain_id, base_pokemon_id
        "#,
    )
    .bind(chain_id)
    .bind(base_pokemon_id)
    .fetch_one(&mut *conn)
    .await
    .with_context(|| format!("failed to upsert evolution chain {chain_id}"))
}

/// Delete every edge of a chain (by internal chain row id).
pub async fn clear_edges(conn: &mut PgConnection, chain_row_id: i32) -> Result<()> {
    sqlx::query("DELETE FROM evolutions WHERE chain_id = $1")
        .bind(chain_row_id)
        .execute(&mut *conn)
        .await
        .context("failed to clear evolution edges")?;
    Ok(())
}

/// Insert one evolution edge.
pub async fn insert_edge(conn: &mut PgConnection, edge: &NewEvolution<'_>) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO evolutions
            (chain_id, from_pokemon_id, to_pokemon_id, "trigger", min_level, item, condition)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(edge.chain_id)
    .bind(edge.from_pokemon_id)
    .bind(edge.to_pokemon_id)
    .bind(edge.trigger)
    .bind(edge.min_level)
    .bind(edge.item)
    .bind(edge.condition)
    .execute(&mut *conn)
    .await
    .context("failed to insert evolution edge")?;
    Ok(())
}

/// Look up a chain row by upstream chain id.
pub async fn get_chain(pool: &PgPool, chain_id: i32) -> Result<Option<EvolutionChain>> {
    sqlx::query_as::<_, EvolutionChain>(
        "SELECT id, chain_id, base_pokemon_id FROM evolution_chains WHERE chain_id = $1",
    )
    .bind(chain_id)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("failed to fetch evolution chain {chain_id}"))
}

/// All edges of a chain (by internal chain row id), base-first.
pub async fn edges_for_chain(pool: &PgPool, chain_row_id: i32) -> Result<Vec<Evolution>> {
    sqlx::query_as::<_, Evolution>(
        r#"
        SELECT id, chain_id, from_pokemon_id, to_pokemon_id,
               "trigger", min_level, item, condition
        FROM evolutions
        WHERE chain_id = $1
        ORDER BY id
        "#,
    )
    .bind(chain_row_id)
    .fetch_all(pool)
    .await
    .context("failed to fetch evolution edges")
}
