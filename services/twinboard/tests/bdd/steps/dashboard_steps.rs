//! BDD step definitions for dashboard routes feature

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use cucumber::{given, then, when};
use tower::ServiceExt;

use twinboard::config::Config;
use twinboard::dashboard::build_router;
use twinboard::state::AppState;
use twinboard::twin_client::TwinStore;

use crate::world::TwinboardWorld;

async fn send(world: &mut TwinboardWorld, request: Request<Body>) {
    let app = world.app.as_ref().expect("dashboard not set").clone();
    let response = build_router(app).oneshot(request).await.unwrap();

    world.response_status = Some(response.status().as_u16());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    world.response_body = Some(String::from_utf8(body.to_vec()).unwrap());
}

fn post(uri: &str, content_type: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

fn body(world: &TwinboardWorld) -> &str {
    world.response_body.as_deref().expect("no response")
}

// --- Given steps ---

#[given("a dashboard over the store")]
fn dashboard_over_store(world: &mut TwinboardWorld) {
    let store = world.store() as Arc<dyn TwinStore>;
    world.app = Some(AppState::new(&Config::default(), store));
}

// --- When steps ---

#[when(expr = "the browser requests {string}")]
async fn browser_requests(world: &mut TwinboardWorld, uri: String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(world, request).await;
}

#[when(expr = "the browser submits {string} to {string}")]
async fn browser_submits(world: &mut TwinboardWorld, form: String, uri: String) {
    let request = post(&uri, "application/x-www-form-urlencoded", form);
    send(world, request).await;
}

#[when(expr = "the client posts {string} to {string}")]
async fn client_posts_json(world: &mut TwinboardWorld, json: String, uri: String) {
    let request = post(&uri, "application/json", json);
    send(world, request).await;
}

// --- Then steps ---

#[then(expr = "the response status should be {int}")]
fn response_status(world: &mut TwinboardWorld, status: u16) {
    assert_eq!(world.response_status, Some(status));
}

#[then(expr = "the response should contain {string}")]
fn response_contains(world: &mut TwinboardWorld, text: String) {
    let body = body(world);
    assert!(body.contains(&text), "'{}' not found in:\n{}", text, body);
}

#[then(expr = "the response should not contain {string}")]
fn response_lacks(world: &mut TwinboardWorld, text: String) {
    let body = body(world);
    assert!(!body.contains(&text), "'{}' unexpectedly found in:\n{}", text, body);
}

#[then(expr = "the JSON field {string} should be {string}")]
fn json_field(world: &mut TwinboardWorld, pointer: String, expected: String) {
    let json: serde_json::Value = serde_json::from_str(body(world)).unwrap();
    let actual = json
        .pointer(&pointer)
        .unwrap_or_else(|| panic!("no field at {}", pointer));
    let actual = match actual {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    assert_eq!(actual, expected);
}
