mod common;

use chrono::{SubsecRound, Utc};
use link_shortener::domain::entities::NewLink;
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use link_shortener::server::run_migrations;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        target_url: url.to_string(),
        owner_id: None,
        life_time_seconds: None,
    }
}

#[sqlx::test]
async fn test_insert_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .insert_if_absent(NewLink {
            owner_id: Some("user_1".to_string()),
            life_time_seconds: Some(60),
            ..new_link("pg0001", "https://example.com")
        })
        .await
        .unwrap();

    assert_eq!(link.code, "pg0001");
    assert_eq!(link.target_url, "https://example.com");
    assert_eq!(link.owner_id.as_deref(), Some("user_1"));
    assert_eq!(link.life_time_seconds, Some(60));
    assert_eq!(link.click_count, 0);
    assert!(!link.is_expired());
}

#[sqlx::test]
async fn test_insert_conflict_keeps_original(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert_if_absent(new_link("pgdup1", "https://first.example.com"))
        .await
        .unwrap();

    let result = repo
        .insert_if_absent(new_link("pgdup1", "https://second.example.com"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));

    let stored = repo.find_by_code("pgdup1").await.unwrap().unwrap();
    assert_eq!(stored.target_url, "https://first.example.com");
}

#[sqlx::test]
async fn test_find_by_code_missing(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.find_by_code("nope00").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_increment_clicks(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert_if_absent(new_link("pgclk1", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(repo.increment_clicks("pgclk1").await.unwrap(), 1);
    assert_eq!(repo.increment_clicks("pgclk1").await.unwrap(), 2);

    let link = repo.find_by_code("pgclk1").await.unwrap().unwrap();
    assert_eq!(link.click_count, 2);
}

#[sqlx::test]
async fn test_increment_clicks_missing(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.increment_clicks("nope00").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_concurrent_increments(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.insert_if_absent(new_link("pgcon1", "https://example.com"))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.increment_clicks("pgcon1").await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let link = repo.find_by_code("pgcon1").await.unwrap().unwrap();
    assert_eq!(link.click_count, 20);
}

#[sqlx::test]
async fn test_expired_link_is_kept(pool: PgPool) {
    let state = common::create_pg_test_state(pool.clone());
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert_if_absent(NewLink {
        life_time_seconds: Some(0),
        ..new_link("pgexp1", "https://example.com")
    })
    .await
    .unwrap();

    let result = state.link_service.resolve("pgexp1").await;
    assert!(matches!(result, Err(AppError::Gone { .. })));

    let link = repo.find_by_code("pgexp1").await.unwrap().unwrap();
    assert_eq!(link.click_count, 0);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}

#[sqlx::test]
async fn test_insert_uses_application_clock(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let before = Utc::now().trunc_subsecs(6);
    let link = repo
        .insert_if_absent(new_link("pgclk0", "https://example.com"))
        .await
        .unwrap();
    let after = Utc::now();

    assert!(link.created_at >= before);
    assert!(link.created_at <= after);

    let stored = repo.find_by_code("pgclk0").await.unwrap().unwrap();
    assert_eq!(stored.created_at, link.created_at);
}

#[sqlx::test]
async fn test_zero_lifetime_expires_immediately(pool: PgPool) {
    let state = common::create_pg_test_state(pool);

    let issued = state
        .link_service
        .shorten("https://example.com".to_string(), None, Some(0))
        .await
        .unwrap();

    assert!(issued.link.is_expired());

    let result = state.link_service.resolve(&issued.link.code).await;
    assert!(matches!(result, Err(AppError::Gone { .. })));
}

#[sqlx::test]
async fn test_migrations_are_idempotent(pool: PgPool) {
    run_migrations(&pool).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let repo = PgLinkRepository::new(Arc::new(pool));
    assert!(repo.ping().await.is_ok());
}
