#![allow(dead_code)]

use link_shortener::application::services::{LinkService, ShortenerSettings};
use link_shortener::domain::entities::{Link, NewLink};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use link_shortener::routes::router;
use link_shortener::state::AppState;
use link_shortener::utils::code_generator::{
    DEFAULT_ALPHABET, DEFAULT_CODE_LENGTH, RandomCodeGenerator,
};
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;

fn build_service(repository: Arc<dyn LinkRepository>) -> LinkService {
    let code_source = RandomCodeGenerator::new(DEFAULT_ALPHABET, DEFAULT_CODE_LENGTH).unwrap();

    LinkService::new(
        repository,
        Arc::new(code_source),
        ShortenerSettings::default(),
    )
}

pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let service = build_service(repository.clone());

    (AppState::new(Arc::new(service), "memory"), repository)
}

pub fn create_pg_test_state(pool: PgPool) -> AppState {
    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    AppState::new(Arc::new(build_service(repository)), "postgres")
}

pub fn create_test_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    let (state, repository) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();

    (server, repository)
}

pub async fn create_test_link(
    repository: &dyn LinkRepository,
    code: &str,
    url: &str,
    life_time_seconds: Option<i64>,
) -> Link {
    repository
        .insert_if_absent(NewLink {
            code: code.to_string(),
            target_url: url.to_string(),
            owner_id: None,
            life_time_seconds,
        })
        .await
        .unwrap()
}

pub async fn click_count(repository: &dyn LinkRepository, code: &str) -> i64 {
    repository
        .find_by_code(code)
        .await
        .unwrap()
        .map(|link| link.click_count)
        .unwrap()
}

pub async fn find_link(repository: &dyn LinkRepository, code: &str) -> Link {
    repository.find_by_code(code).await.unwrap().unwrap()
}
