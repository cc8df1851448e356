//! Ability catalog: get-or-create by name and description backfill.

use crate::data::models::Ability;
use anyhow::{Context, Result};
use sqlx::{PgConnection, PgPool};

/// Get an ability by name, creating it with the given hidden flag if
/// absent. Creation-time defaults are never overwritten afterwards; the
/// per-Pokémon hidden flag lives on the link row instead.
pub async fn get_or_create(conn: &mut PgConnection, name: &str, is_hidden: bool) -> Result<Ability> {
    let inserted = sqlx::query_as::<_, Ability>(
        r#"
        INSERT INTO abilities (name, is_hidden)
        VALUES ($1, $2)
        ON CONFLICT (name) DO NOTHING
        RETURNING id, name, description, is_hidden
        "#,
    )
    .bind(name)
    .bind(is_hidden)
    .fetch_optional(&mut *conn)
    .await
    .with_context(|| format!("failed to insert ability '{name}'"))?;

    if let Some(row) = inserted {
        return Ok(row);
    }

    sqlx::query_as::<_, Ability>(
        "SELECT id, name, description, is_hidden FROM abilities WHERE name = $1",
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await
    .with_context(|| format!("failed to fetch existing ability '{name}'"))
}

/// Look up an ability by name.
pub async fn get_by_name(pool: &PgPool, name: &str) -> Result<Option<Ability>> {
    sqlx::query_as::<_, Ability>(
        "SELECT id, name, description, is_hidden FROM abilities WHERE name = $1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("failed to look up ability '{name}'"))
}

/// Abilities whose description has not been filled in yet.
pub async fn list_undescribed(pool: &PgPool) -> Result<Vec<Ability>> {
    sqlx::query_as::<_, Ability>(
        "SELECT id, name, description, is_hidden FROM abilities WHERE description = '' ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .context("failed to list undescribed abilities")
}

/// Set an ability's description.
pub async fn set_description(pool: &PgPool, id: i32, description: &str) -> Result<()> {
    sqlx::query("UPDATE abilities SET description = $2 WHERE id = $1")
        .bind(id)
        .bind(description)
        .execute(pool)
        .await
        .context("failed to update ability description")?;
    Ok(())
}
