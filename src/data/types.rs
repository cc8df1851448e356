//! Type catalog: get-or-create by name, display colors, and the seed set.

use crate::data::models::PokemonType;
use anyhow::{Context, Result};
use sqlx::{PgConnection, PgPool};

/// Display colors for the known type catalog, applied only when a type row
/// is first created. Existing rows keep whatever color they have.
pub const DEFAULT_TYPE_COLORS: &[(&str, &str)] = &[
    ("normal", "#A8A878"),
    ("fire", "#F08030"),
    ("water", "#6890F0"),
    ("electric", "#F8D030"),
    ("grass", "#78C850"),
    ("ice", "#98D8D8"),
    ("fighting", "#C03028"),
    ("poison", "#A040A0"),
    ("ground", "#E0C068"),
    ("flying", "#A890F0"),
    ("psychic", "#F85888"),
    ("bug", "#A8B820"),
    ("rock", "#B8A038"),
    ("ghost", "#705898"),
    ("dragon", "#7038F8"),
    ("dark", "#705848"),
    ("steel", "#B8B8D0"),
    ("fairy", "#EE99AC"),
];

/// Color for types outside the known catalog.
pub const FALLBACK_TYPE_COLOR: &str = "#000000";

/// Default display color for an upstream type name.
pub fn default_type_color(name: &str) -> &'static str {
    DEFAULT_TYPE_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
        .unwrap_or(FALLBACK_TYPE_COLOR)
}

/// Idempotently create the known type catalog. Existing rows are left
/// untouched, colors included.
pub async fn seed_defaults(pool: &PgPool) -> Result<u64> {
    let names: Vec<&str> = DEFAULT_TYPE_COLORS.iter().map(|(n, _)| *n).collect();
    let colors: Vec<&str> = DEFAULT_TYPE_COLORS.iter().map(|(_, c)| *c).collect();

    let result = sqlx::query(
        r#"
        INSERT INTO pokemon_types (name, color)
        SELECT * FROM UNNEST($1::text[], $2::text[])
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(&names)
    .bind(&colors)
    .execute(pool)
    .await
    .context("failed to seed type catalog")?;

    Ok(result.rows_affected())
}

/// Get a type by name, creating it with `color` if absent. An existing
/// row's color is never overwritten.
pub async fn get_or_create(conn: &mut PgConnection, name: &str, color: &str) -> Result<PokemonType> {
    let inserted = sqlx::query_as::<_, PokemonType>(
        r#"
        INSERT INTO pokemon_types (name, color)
        VALUES ($1, $2)
        ON CONFLICT (name) DO NOTHING
        RETURNING id, name, color
        "#,
    )
    .bind(name)
    .bind(color)
    .fetch_optional(&mut *conn)
    .await
    .with_context(|| format!("failed to insert type '{name}'"))?;

    if let Some(row) = inserted {
        return Ok(row);
    }

    sqlx::query_as::<_, PokemonType>("SELECT id, name, color FROM pokemon_types WHERE name = $1")
        .bind(name)
        .fetch_one(&mut *conn)
        .await
        .with_context(|| format!("failed to fetch existing type '{name}'"))
}

/// Look up a type by name.
pub async fn get_by_name(pool: &PgPool, name: &str) -> Result<Option<PokemonType>> {
    sqlx::query_as::<_, PokemonType>("SELECT id, name, color FROM pokemon_types WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("failed to look up type '{name}'"))
}
