#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use shortlink::domain::entities::{Link, NewLink};
use shortlink::domain::repositories::{LinkRepository, StoreError};
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::routes::router;
use shortlink::state::AppState;
use shortlink::utils::code_generator::CodeGenerator;

pub const MAX_ATTEMPTS: usize = 5;

pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let state = AppState::new(repo.clone(), CodeGenerator::default(), MAX_ATTEMPTS);

    (state, repo)
}

pub fn create_test_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();

    (server, repo)
}

pub async fn create_link(server: &TestServer, url: &str, email: &str, code: Option<&str>) -> Value {
    let mut body = json!({ "url": url, "email": email });
    if let Some(code) = code {
        body["code"] = json!(code);
    }

    let response = server.post("/api/links").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<Value>()
}

/// A store whose namespace is always full.
pub struct SaturatedRepository;

#[async_trait]
impl LinkRepository for SaturatedRepository {
    async fn insert(&self, _new_link: NewLink) -> Result<Link, StoreError> {
        Err(StoreError::DuplicateCode)
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, StoreError> {
        Ok(None)
    }

    async fn list_by_owner(&self, _email: &str) -> Result<Vec<Link>, StoreError> {
        Ok(Vec::new())
    }

    async fn record_visit(&self, _code: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    async fn delete_by_code(&self, _code: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A store whose backend is unreachable.
pub struct UnreachableRepository;

#[async_trait]
impl LinkRepository for UnreachableRepository {
    async fn insert(&self, _new_link: NewLink) -> Result<Link, StoreError> {
        Err(unreachable_error())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, StoreError> {
        Err(unreachable_error())
    }

    async fn list_by_owner(&self, _email: &str) -> Result<Vec<Link>, StoreError> {
        Err(unreachable_error())
    }

    async fn record_visit(&self, _code: &str) -> Result<Option<String>, StoreError> {
        Err(unreachable_error())
    }

    async fn delete_by_code(&self, _code: &str) -> Result<bool, StoreError> {
        Err(unreachable_error())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unreachable_error())
    }
}

fn unreachable_error() -> StoreError {
    StoreError::Unavailable("connection refused (10.0.0.5:5432)".to_string())
}

pub fn create_server_with(repo: Arc<dyn LinkRepository>) -> TestServer {
    let state = AppState::new(repo, CodeGenerator::default(), MAX_ATTEMPTS);
    TestServer::new(router(state)).unwrap()
}
