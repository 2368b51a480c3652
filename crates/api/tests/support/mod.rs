//! Shared setup for command integration tests
#![allow(dead_code)]

use std::sync::Arc;

use pathwise_common::{Credential, MemoryCredentialStore};
use pathwise_domain::{Config, SessionBackend};
use pathwise_lib::{hydrate_session, AppContext};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "tok";

/// Context pointed at `server`, backed by `store`.
pub fn context(server: &MockServer, store: Arc<MemoryCredentialStore>) -> AppContext {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.session.backend = SessionBackend::Memory;
    AppContext::with_credential_store(config, store).expect("failed to build test context")
}

/// Hydrated anonymous context.
pub async fn anonymous_app() -> (MockServer, AppContext, Arc<MemoryCredentialStore>) {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryCredentialStore::new());
    let ctx = context(&server, store.clone());
    hydrate_session(&ctx).await;
    (server, ctx, store)
}

/// Hydrated context whose stored credential the server accepts as `user`.
pub async fn signed_in_app(user: Value) -> (MockServer, AppContext, Arc<MemoryCredentialStore>) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(Credential::new(TOKEN)));
    let ctx = context(&server, store.clone());
    let state = hydrate_session(&ctx).await;
    assert!(state.is_authenticated(), "stored credential should be accepted");
    (server, ctx, store)
}

pub fn user_json(xp: u64, paths: &[i64], onboarding_complete: bool) -> Value {
    json!({
        "id": 1,
        "username": "ada",
        "email": "ada@example.com",
        "xp": xp,
        "streak": 4,
        "interests": [],
        "selected_career_paths": paths,
        "onboarding_complete": onboarding_complete
    })
}

pub fn track_json(id: i64, slug: &str, title: &str) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "title": title,
        "emoji": "🧭",
        "avg_salary": "$90k",
        "relevant_interests": []
    })
}

pub fn progress_json(id: i64, track: Value, days_completed: u32) -> Value {
    json!({"id": id, "career": track, "xp": 10, "streak": 1, "days_completed": days_completed})
}
