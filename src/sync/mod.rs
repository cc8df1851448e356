//! Batch synchronization pipeline.
//!
//! Drives paginated traversal of the upstream listing, resolves per-entry
//! detail and species payloads, and reconciles each Pokémon into the local
//! store. Batches are the unit of atomicity: all reconciles of one batch
//! share a transaction, and a failed batch rolls back without touching
//! batches that already committed.
//!
//! Runs are single-writer and strictly sequential. Concurrent runs against
//! the same store are not coordinated and may interleave upserts; known
//! limitation.

pub mod evolution;
pub mod normalize;
pub mod reconcile;

use crate::data::{abilities, types};
use crate::pokeapi::PokeApi;
use crate::pokeapi::models::NamedResource;
use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Options for one sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Total number of Pokémon to sync.
    pub limit: u32,
    /// Starting offset into the upstream listing.
    pub offset: u32,
    /// Pokémon per transaction.
    pub batch_size: u32,
    /// Pause between batches; skipped when zero.
    pub delay: Duration,
}

/// How a sync run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Reached the requested limit.
    Completed,
    /// Upstream ran out of listings (or stopped yielding syncable
    /// entries) before the limit was reached.
    Partial,
    /// A batch transaction aborted. Earlier batches remain committed.
    Failed,
}

#[derive(Debug, Clone)]
pub struct SyncSummary {
    pub total_synced: u32,
    pub final_offset: u32,
    pub status: SyncStatus,
}

/// Batch sync orchestrator. Holds the store pool and the upstream client;
/// all per-run state lives on the stack of [`SyncService::run_sync`].
pub struct SyncService {
    pool: PgPool,
    api: Arc<PokeApi>,
}

impl SyncService {
    pub fn new(pool: PgPool, api: Arc<PokeApi>) -> Self {
        Self { pool, api }
    }

    /// Run a full paginated sync and report how far it got.
    pub async fn run_sync(&self, opts: &SyncOptions) -> Result<SyncSummary> {
        // The type catalog must exist before any assignment references it.
        let seeded = types::seed_defaults(&self.pool).await?;
        if seeded > 0 {
            info!(created = seeded, "type catalog seeded");
        }

        let mut total_synced: u32 = 0;
        let mut current_offset = opts.offset;
        let mut status = SyncStatus::Completed;
        let mut first_batch = true;

        while total_synced < opts.limit {
            if !first_batch && !opts.delay.is_zero() {
                tokio::time::sleep(opts.delay).await;
            }
            first_batch = false;

            let this_batch = opts.batch_size.min(opts.limit - total_synced);

            let page = match self.api.fetch_listing(this_batch, current_offset).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(offset = current_offset, error = %e, "listing fetch failed, stopping");
                    status = SyncStatus::Partial;
                    break;
                }
            };
            if page.results.is_empty() {
                warn!(offset = current_offset, "upstream listing exhausted, stopping");
                status = SyncStatus::Partial;
                break;
            }

            let synced = match self.sync_batch(&page.results).await {
                Ok(synced) => synced,
                Err(e) => {
                    error!(
                        offset = current_offset,
                        error = ?e,
                        "batch transaction aborted, stopping"
                    );
                    status = SyncStatus::Failed;
                    break;
                }
            };

            total_synced += synced;
            info!(
                batch_start = current_offset + 1,
                batch_end = current_offset + this_batch,
                synced,
                total_synced,
                "batch committed"
            );

            if synced == 0 {
                warn!(offset = current_offset, "no pokemon synced in this batch, stopping");
                status = SyncStatus::Partial;
                break;
            }

            // Offset tracks the upstream pagination position, independent
            // of how many entries actually reconciled.
            current_offset += this_batch;
        }

        if status != SyncStatus::Failed
            && let Err(e) = self.backfill_ability_descriptions().await
        {
            warn!(error = ?e, "ability description backfill failed");
        }

        Ok(SyncSummary {
            total_synced,
            final_offset: current_offset,
            status,
        })
    }

    /// Reconcile one listing page inside a single transaction.
    ///
    /// Entries whose detail fetch fails are skipped; a species fetch
    /// failure degrades to a detail-only normalize. Any reconcile error
    /// rolls the whole batch back.
    async fn sync_batch(&self, entries: &[NamedResource]) -> Result<u32> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to begin batch transaction")?;
        let mut synced = 0u32;

        for entry in entries {
            let Some(id) = entry.resource_id() else {
                warn!(name = %entry.name, url = %entry.url, "listing entry has no numeric id, skipping");
                continue;
            };

            let detail = match self.api.fetch_detail(id).await {
                Ok(detail) => detail,
                Err(e) => {
                    warn!(pokedex_id = id, error = %e, "detail fetch failed, skipping");
                    continue;
                }
            };

            let species = match self.api.fetch_species(id).await {
                Ok(species) => Some(species),
                Err(e) => {
                    warn!(pokedex_id = id, error = %e, "species fetch failed, syncing without rarity flags");
                    None
                }
            };

            let record = normalize::normalize(&detail, species.as_ref());
            reconcile::reconcile(&mut tx, &record)
                .await
                .with_context(|| format!("failed to reconcile pokemon #{id}"))?;
            synced += 1;
        }

        tx.commit()
            .await
            .context("failed to commit batch transaction")?;
        Ok(synced)
    }

    /// Fill in descriptions for abilities created by reconciliation, which
    /// only knows their names. Best-effort per ability; the sync outcome
    /// never depends on it.
    async fn backfill_ability_descriptions(&self) -> Result<u32> {
        let pending = abilities::list_undescribed(&self.pool).await?;
        let mut filled = 0u32;

        for ability in &pending {
            let detail = match self.api.fetch_ability(&ability.name).await {
                Ok(detail) => detail,
                Err(e) => {
                    debug!(ability = %ability.name, error = %e, "ability lookup failed, leaving description empty");
                    continue;
                }
            };
            let Some(effect) = detail.english_effect() else {
                continue;
            };
            abilities::set_description(&self.pool, ability.id, effect).await?;
            filled += 1;
        }

        if filled > 0 {
            info!(
                filled,
                pending = pending.len(),
                "ability descriptions backfilled"
            );
        }
        Ok(filled)
    }
}
