//! Application assembly: configuration, database pool, command dispatch.

use crate::cli::Command;
use crate::config::Config;
use crate::pokeapi::PokeApi;
use crate::sync::{SyncOptions, SyncService, SyncStatus, evolution};
use anyhow::{Context, Result};
use figment::{Figment, providers::Env};
use sqlx::postgres::PgPoolOptions;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Main application struct containing all necessary components
pub struct App {
    db_pool: sqlx::PgPool,
    api: Arc<PokeApi>,
}

impl App {
    /// Create a new App with config loaded, the pool connected, and
    /// migrations applied.
    pub async fn new() -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Env::raw())
            .extract()
            .context("Failed to load config")?;

        let db_pool = PgPoolOptions::new()
            .min_connections(0)
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(4))
            .connect(&config.database_url)
            .await
            .context("Failed to create database pool")?;

        info!(
            min_connections = 0,
            max_connections = 4,
            acquire_timeout = "4s",
            "database pool established"
        );

        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to run database migrations")?;

        let api = PokeApi::new(
            &config.pokeapi_base_url,
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_secs(config.cache_ttl_secs),
        )
        .context("Failed to create PokeApi client")?;

        Ok(Self {
            db_pool,
            api: Arc::new(api),
        })
    }

    /// Execute a CLI command to completion, mapping the outcome to an exit
    /// code.
    pub async fn run(&self, command: Command) -> ExitCode {
        match command {
            Command::Sync {
                limit,
                offset,
                batch_size,
                delay,
            } => {
                let service = SyncService::new(self.db_pool.clone(), self.api.clone());
                let opts = SyncOptions {
                    limit,
                    offset,
                    batch_size,
                    delay: Duration::from_secs_f64(delay.max(0.0)),
                };
                info!(limit, offset, batch_size, delay, "starting pokemon sync");

                match service.run_sync(&opts).await {
                    Ok(summary) => {
                        info!(
                            total_synced = summary.total_synced,
                            final_offset = summary.final_offset,
                            status = ?summary.status,
                            "pokemon sync finished"
                        );
                        if summary.status == SyncStatus::Failed {
                            ExitCode::FAILURE
                        } else {
                            ExitCode::SUCCESS
                        }
                    }
                    Err(e) => {
                        error!(error = ?e, "pokemon sync failed");
                        ExitCode::FAILURE
                    }
                }
            }
            Command::SyncEvolutions { limit, offset } => {
                info!(limit, offset, "starting evolution chain sync");
                match evolution::sync_evolutions(&self.db_pool, &self.api, limit, offset).await {
                    Ok(summary) => {
                        info!(
                            chains_synced = summary.chains_synced,
                            chains_skipped = summary.chains_skipped,
                            edges_written = summary.edges_written,
                            "evolution chain sync finished"
                        );
                        ExitCode::SUCCESS
                    }
                    Err(e) => {
                        error!(error = ?e, "evolution chain sync failed");
                        ExitCode::FAILURE
                    }
                }
            }
        }
    }
}
