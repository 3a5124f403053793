//! BDD step definitions for list page loading feature

use std::sync::Arc;

use cucumber::{given, then, when};
use serde_json::json;

use twinboard::config::ModelsConfig;
use twinboard::page::{model_query, PageHandle, PageKind};
use twinboard::twin::RawTwin;
use twinboard::twin_client::TwinStore;

use crate::steps::split_list;
use crate::world::TwinboardWorld;

fn parse_kind(name: &str) -> PageKind {
    PageKind::ALL
        .into_iter()
        .find(|kind| kind.title().eq_ignore_ascii_case(name))
        .unwrap_or_else(|| panic!("Unknown page: {}", name))
}

pub fn page(world: &TwinboardWorld) -> &PageHandle {
    world.page.as_ref().expect("page not set")
}

// --- Given steps ---

#[given(expr = "the store holds twins {string}")]
async fn store_holds_twins(world: &mut TwinboardWorld, ids: String) {
    let records = split_list(&ids)
        .into_iter()
        .map(|id| {
            RawTwin::from(json!({
                "$dtId": id,
                "Temperature": 70.5,
                "Humidity": 41.2,
            }))
        })
        .collect();
    world.store().push_query_result(Ok(records)).await;
}

#[given("the store holds those twin records")]
async fn store_holds_records(world: &mut TwinboardWorld) {
    let records = world.raw_records.clone();
    world.store().push_query_result(Ok(records)).await;
}

#[given(expr = "the next query fails with {string}")]
async fn next_query_fails(world: &mut TwinboardWorld, message: String) {
    world.store().push_query_result(Err(message)).await;
}

#[given(expr = "the {word} page")]
fn list_page(world: &mut TwinboardWorld, name: String) {
    let kind = parse_kind(&name);
    let store = world.store() as Arc<dyn TwinStore>;
    world.page = Some(PageHandle::new(
        kind,
        kind.query(&ModelsConfig::default()),
        store,
    ));
}

// --- When steps ---

#[when("the page is mounted")]
async fn page_is_mounted(world: &mut TwinboardWorld) {
    page(world).refresh().await;
}

#[when("the refresh button is pressed")]
async fn refresh_pressed(world: &mut TwinboardWorld) {
    page(world).refresh().await;
}

// --- Then steps ---

#[then(expr = "the page should be {word} with {int} twins")]
async fn page_state_with_twins(world: &mut TwinboardWorld, state: String, count: usize) {
    let snapshot = page(world).snapshot().await;
    assert_eq!(
        serde_json::to_value(snapshot.load_state).unwrap(),
        json!(state)
    );
    assert_eq!(snapshot.twins.len(), count);
}

#[then(expr = "the page should list {string}")]
async fn page_lists(world: &mut TwinboardWorld, ids: String) {
    let snapshot = page(world).snapshot().await;
    let names: Vec<String> = snapshot
        .twins
        .iter()
        .map(|card| card.twin.name.clone())
        .collect();
    assert_eq!(names, split_list(&ids));
}

#[then(expr = "the store should have received {int} queries")]
async fn store_received_queries(world: &mut TwinboardWorld, count: usize) {
    let queries = world.store().queries.read().await.clone();
    assert_eq!(queries.len(), count, "queries: {:?}", queries);
}

#[then(expr = "every query should select model {string}")]
async fn every_query_selects(world: &mut TwinboardWorld, model: String) {
    let expected = model_query(&model);
    let queries = world.store().queries.read().await.clone();
    assert!(!queries.is_empty());
    assert!(queries.iter().all(|q| *q == expected), "queries: {:?}", queries);
}

#[then(expr = "the last query should start with {string}")]
async fn last_query_starts_with(world: &mut TwinboardWorld, prefix: String) {
    let queries = world.store().queries.read().await.clone();
    let last = queries.last().expect("no queries issued");
    assert!(last.starts_with(&prefix), "last query: {}", last);
}
