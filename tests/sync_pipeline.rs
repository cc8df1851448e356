//! End-to-end orchestrator runs against a stubbed upstream.

mod helpers;

use helpers::*;
use pokedex::data::{evolutions, pokemon};
use pokedex::pokeapi::PokeApi;
use pokedex::sync::{SyncOptions, SyncService, SyncStatus, evolution};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

fn make_api(server: &MockServer) -> Arc<PokeApi> {
    Arc::new(
        PokeApi::new(&server.uri(), Duration::from_secs(5), Duration::from_secs(3600))
            .expect("failed to build client"),
    )
}

fn opts(limit: u32, batch_size: u32) -> SyncOptions {
    SyncOptions {
        limit,
        offset: 0,
        batch_size,
        delay: Duration::ZERO,
    }
}

#[sqlx::test]
async fn test_run_sync_syncs_everything(pool: PgPool) {
    let server = MockServer::start().await;
    mount_listing(&server, 3, 0, &[1, 2, 3]).await;
    for id in 1..=3 {
        mount_detail(&server, id, detail_payload(id, &format!("stub-{id}"))).await;
        // make the last one legendary to check species plumbing
        mount_species(&server, id, species_payload(id == 3, false)).await;
    }

    let service = SyncService::new(pool.clone(), make_api(&server));
    let summary = service.run_sync(&opts(3, 3)).await.expect("run_sync errored");

    assert_eq!(summary.total_synced, 3);
    assert_eq!(summary.final_offset, 3);
    assert_eq!(summary.status, SyncStatus::Completed);
    assert_eq!(pokemon::count(&pool).await.unwrap(), 3);

    for id in 1..=3 {
        let row = pokemon::get_by_pokedex_id(&pool, id)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("pokemon #{id} missing"));
        assert_eq!(row.name, format!("stub-{id}"));
        let types = pokemon::type_names(&pool, row.id).await.unwrap();
        assert!(!types.is_empty(), "pokemon #{id} should have types");
    }

    let third = pokemon::get_by_pokedex_id(&pool, 3).await.unwrap().unwrap();
    assert!(third.is_legendary);
}

#[sqlx::test]
async fn test_listing_exhaustion_reports_partial(pool: PgPool) {
    let server = MockServer::start().await;
    // first page is full, second page is empty
    mount_listing(&server, 2, 0, &[1, 2]).await;
    mount_listing(&server, 2, 2, &[]).await;
    for id in 1..=2 {
        mount_detail(&server, id, detail_payload(id, &format!("stub-{id}"))).await;
        mount_species(&server, id, species_payload(false, false)).await;
    }

    let service = SyncService::new(pool.clone(), make_api(&server));
    let summary = service.run_sync(&opts(4, 2)).await.expect("run_sync errored");

    assert_eq!(summary.total_synced, 2);
    assert_eq!(summary.final_offset, 2);
    assert_eq!(summary.status, SyncStatus::Partial);
    assert_eq!(pokemon::count(&pool).await.unwrap(), 2);
}

#[sqlx::test]
async fn test_failed_batch_rolls_back_but_keeps_prior_batches(pool: PgPool) {
    let server = MockServer::start().await;
    mount_listing(&server, 2, 0, &[1, 2]).await;
    mount_listing(&server, 2, 2, &[3, 4]).await;

    for id in [1, 2, 3] {
        mount_detail(&server, id, detail_payload(id, &format!("stub-{id}"))).await;
        mount_species(&server, id, species_payload(false, false)).await;
    }
    // poisoned: hp present but 0, rejected by the stat bound on insert
    let mut bad = detail_payload(4, "glitch");
    bad["stats"][0]["base_stat"] = serde_json::json!(0);
    mount_detail(&server, 4, bad).await;
    mount_species(&server, 4, species_payload(false, false)).await;

    let service = SyncService::new(pool.clone(), make_api(&server));
    let summary = service.run_sync(&opts(4, 2)).await.expect("run_sync errored");

    assert_eq!(summary.status, SyncStatus::Failed);
    assert_eq!(summary.total_synced, 2);
    assert_eq!(summary.final_offset, 2);

    // batch 1 committed, batch 2 rolled back wholesale: #3 reconciled fine
    // but must not survive its batch-mate's failure
    assert_eq!(pokemon::count(&pool).await.unwrap(), 2);
    assert!(pokemon::get_by_pokedex_id(&pool, 3).await.unwrap().is_none());
    assert!(pokemon::get_by_pokedex_id(&pool, 4).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_species_failure_is_tolerated(pool: PgPool) {
    let server = MockServer::start().await;
    mount_listing(&server, 1, 0, &[7]).await;
    mount_detail(&server, 7, detail_payload(7, "squirtle")).await;
    // no species mock mounted: the fetch 404s

    let service = SyncService::new(pool.clone(), make_api(&server));
    let summary = service.run_sync(&opts(1, 1)).await.expect("run_sync errored");

    assert_eq!(summary.total_synced, 1);
    assert_eq!(summary.status, SyncStatus::Completed);

    let row = pokemon::get_by_pokedex_id(&pool, 7).await.unwrap().unwrap();
    assert!(!row.is_legendary);
    assert!(!row.is_mythical);
}

#[sqlx::test]
async fn test_detail_failures_skip_entries(pool: PgPool) {
    let server = MockServer::start().await;
    mount_listing(&server, 2, 0, &[1, 2]).await;
    // entry 1 has no detail mock (404), entry 2 is fine
    mount_detail(&server, 2, detail_payload(2, "stub-2")).await;
    mount_species(&server, 2, species_payload(false, false)).await;
    // the second listing page (for the one remaining slot) is empty
    mount_listing(&server, 1, 2, &[]).await;

    let service = SyncService::new(pool.clone(), make_api(&server));
    let summary = service.run_sync(&opts(2, 2)).await.expect("run_sync errored");

    assert_eq!(summary.total_synced, 1);
    assert_eq!(summary.status, SyncStatus::Partial);
    assert!(pokemon::get_by_pokedex_id(&pool, 1).await.unwrap().is_none());
    assert!(pokemon::get_by_pokedex_id(&pool, 2).await.unwrap().is_some());
}

#[sqlx::test]
async fn test_sync_evolutions_links_synced_pokemon(pool: PgPool) {
    let server = MockServer::start().await;

    // sync the three bulbasaur stages first
    mount_listing(&server, 3, 0, &[1, 2, 3]).await;
    for (id, name) in [(1, "bulbasaur"), (2, "ivysaur"), (3, "venusaur")] {
        mount_detail(&server, id, detail_payload(id, name)).await;
        mount_species(&server, id, species_payload(false, false)).await;
    }
    let api = make_api(&server);
    let service = SyncService::new(pool.clone(), api.clone());
    let summary = service.run_sync(&opts(3, 3)).await.expect("run_sync errored");
    assert_eq!(summary.total_synced, 3);

    mount_chain(
        &server,
        1,
        chain_payload(1, &[(1, "bulbasaur"), (2, "ivysaur"), (3, "venusaur")]),
    )
    .await;
    // chain 2's base is not synced locally
    mount_chain(&server, 2, chain_payload(2, &[(4, "charmander")])).await;

    let evo = evolution::sync_evolutions(&pool, &api, 2, 0)
        .await
        .expect("sync_evolutions errored");
    assert_eq!(evo.chains_synced, 1);
    assert_eq!(evo.chains_skipped, 1);
    assert_eq!(evo.edges_written, 2);

    let chain = evolutions::get_chain(&pool, 1).await.unwrap().unwrap();
    let base = pokemon::get_by_pokedex_id(&pool, 1).await.unwrap().unwrap();
    assert_eq!(chain.base_pokemon_id, base.id);

    let edges = evolutions::edges_for_chain(&pool, chain.id).await.unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].trigger, "level-up");
    assert_eq!(edges[0].min_level, Some(16));
    assert_eq!(edges[1].min_level, Some(32));
}

#[sqlx::test]
async fn test_rerunning_evolutions_does_not_duplicate_edges(pool: PgPool) {
    let server = MockServer::start().await;
    mount_listing(&server, 2, 0, &[1, 2]).await;
    for (id, name) in [(1, "bulbasaur"), (2, "ivysaur")] {
        mount_detail(&server, id, detail_payload(id, name)).await;
        mount_species(&server, id, species_payload(false, false)).await;
    }
    let api = make_api(&server);
    let service = SyncService::new(pool.clone(), api.clone());
    service.run_sync(&opts(2, 2)).await.expect("run_sync errored");

    mount_chain(&server, 1, chain_payload(1, &[(1, "bulbasaur"), (2, "ivysaur")])).await;

    evolution::sync_evolutions(&pool, &api, 1, 0).await.unwrap();
    evolution::sync_evolutions(&pool, &api, 1, 0).await.unwrap();

    let chain = evolutions::get_chain(&pool, 1).await.unwrap().unwrap();
    let edges = evolutions::edges_for_chain(&pool, chain.id).await.unwrap();
    assert_eq!(edges.len(), 1, "edge set must be replaced, not appended");
}
