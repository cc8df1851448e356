//! Pokémon persistence: keyed upsert, join-row replacement, and the read
//! helpers the rest of the crate (and its tests) query through.

use crate::data::models::{Pokemon, PokemonAbility};
use crate::sync::normalize::NormalizedPokemon;
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{PgConnection, PgPool};

/// Insert or fully overwrite the row identified by `pokedex_id`.
///
/// Returns the stored row and whether it was newly created. Behavior is
/// identical either way; the flag only feeds logging.
pub async fn upsert(
    conn: &mut PgConnection,
    record: &NormalizedPokemon,
) -> Result<(Pokemon, bool)> {
    let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM pokemon WHERE pokedex_id = $1")
        .bind(record.pokedex_id)
        .fetch_optional(&mut *conn)
        .await
        .context("failed to look up pokemon by pokedex id")?;

    let row = sqlx::query_as::<_, Pokemon>(
        r#"
        INSERT INTO pokemon (
            pokedex_id, name, height, weight,
            sprite_front, sprite_back, official_artwork,
            hp, attack, defense, special_attack, special_defense, speed,
            base_experience, is_legendary, is_mythical, synced_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        ON CONFLICT (pokedex_id) DO UPDATE SET
            name = EXCLUDED.name,
            height = EXCLUDED.height,
            weight = EXCLUDED.weight,
            sprite_front = EXCLUDED.sprite_front,
            sprite_back = EXCLUDED.sprite_back,
            official_artwork = EXCLUDED.official_artwork,
            hp = EXCLUDED.hp,
            attack = EXCLUDED.attack,
            defense = EXCLUDED.defense,
            special_attack = EXCLUDED.special_attack,
            special_defense = EXCLUDED.special_defense,
            speed = EXCLUDED.speed,
            base_experience = EXCLUDED.base_experience,
            is_legendary = EXCLUDED.is_legendary,
            is_mythical = EXCLUDED.is_mythical,
            synced_at = EXCLUDED.synced_at
        RETURNING *
        "#,
    )
    .bind(record.pokedex_id)
    .bind(&record.name)
    .bind(record.height)
    .bind(record.weight)
    .bind(&record.sprite_front)
    .bind(&record.sprite_back)
    .bind(&record.official_artwork)
    .bind(record.hp)
    .bind(record.attack)
    .bind(record.defense)
    .bind(record.special_attack)
    .bind(record.special_defense)
    .bind(record.speed)
    .bind(record.base_experience)
    .bind(record.is_legendary)
    .bind(record.is_mythical)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await
    .with_context(|| format!("failed to upsert pokemon #{}", record.pokedex_id))?;

    Ok((row, existing.is_none()))
}

/// Drop and rebuild the type assignments for one Pokémon.
pub async fn replace_type_assignments(
    conn: &mut PgConnection,
    pokemon_id: i32,
    type_ids: &[i32],
) -> Result<()> {
    sqlx::query("DELETE FROM pokemon_type_assignments WHERE pokemon_id = $1")
        .bind(pokemon_id)
        .execute(&mut *conn)
        .await
        .context("failed to clear type assignments")?;

    for type_id in type_ids {
        // ON CONFLICT absorbs duplicate type entries within one payload
        sqlx::query(
            r#"
            INSERT INTO pokemon_type_assignments (pokemon_id, type_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(pokemon_id)
        .bind(type_id)
        .execute(&mut *conn)
        .await
        .context("failed to assign type")?;
    }
    Ok(())
}

/// Delete every ability link row for one Pokémon.
pub async fn clear_ability_links(conn: &mut PgConnection, pokemon_id: i32) -> Result<()> {
    sqlx::query("DELETE FROM pokemon_abilities WHERE pokemon_id = $1")
        .bind(pokemon_id)
        .execute(&mut *conn)
        .await
        .context("failed to clear ability links")?;
    Ok(())
}

/// Insert a fresh ability link row.
pub async fn insert_ability_link(
    conn: &mut PgConnection,
    pokemon_id: i32,
    ability_id: i32,
    is_hidden: bool,
    slot: i16,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO pokemon_abilities (pokemon_id, ability_id, is_hidden, slot)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(pokemon_id)
    .bind(ability_id)
    .bind(is_hidden)
    .bind(slot)
    .execute(&mut *conn)
    .await
    .context("failed to insert ability link")?;
    Ok(())
}

/// Look up a Pokémon by its catalog number.
pub async fn get_by_pokedex_id(pool: &PgPool, pokedex_id: i32) -> Result<Option<Pokemon>> {
    sqlx::query_as::<_, Pokemon>("SELECT * FROM pokemon WHERE pokedex_id = $1")
        .bind(pokedex_id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("failed to fetch pokemon #{pokedex_id}"))
}

/// Total number of Pokémon rows.
pub async fn count(pool: &PgPool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM pokemon")
        .fetch_one(pool)
        .await
        .context("failed to count pokemon")
}

/// Assigned type names for one Pokémon, sorted by name.
pub async fn type_names(pool: &PgPool, pokemon_id: i32) -> Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT t.name
        FROM pokemon_type_assignments a
        JOIN pokemon_types t ON t.id = a.type_id
        WHERE a.pokemon_id = $1
        ORDER BY t.name
        "#,
    )
    .bind(pokemon_id)
    .fetch_all(pool)
    .await
    .context("failed to fetch type names")?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}

/// Raw ability link rows for one Pokémon, sorted by slot.
pub async fn ability_links(pool: &PgPool, pokemon_id: i32) -> Result<Vec<PokemonAbility>> {
    sqlx::query_as::<_, PokemonAbility>(
        "SELECT * FROM pokemon_abilities WHERE pokemon_id = $1 ORDER BY slot",
    )
    .bind(pokemon_id)
    .fetch_all(pool)
    .await
    .context("failed to fetch ability links")
}

/// `(ability name, link hidden flag, slot)` for one Pokémon, sorted by
/// slot.
pub async fn ability_loadout(pool: &PgPool, pokemon_id: i32) -> Result<Vec<(String, bool, i16)>> {
    sqlx::query_as::<_, (String, bool, i16)>(
        r#"
        SELECT a.name, pa.is_hidden, pa.slot
        FROM pokemon_abilities pa
        JOIN abilities a ON a.id = pa.ability_id
        WHERE pa.pokemon_id = $1
        ORDER BY pa.slot
        "#,
    )
    .bind(pokemon_id)
    .fetch_all(pool)
    .await
    .context("failed to fetch ability loadout")
}
