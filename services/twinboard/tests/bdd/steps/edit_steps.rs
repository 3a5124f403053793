//! BDD step definitions for the edit modal feature

use cucumber::{given, then, when};
use serde_json::json;

use twinboard::edit::EditField;
use twinboard::twin::FieldValue;
use twinboard::twin_client::PatchOperation;

use crate::steps::page_steps::page;
use crate::steps::split_list;
use crate::world::TwinboardWorld;

async fn last_patch(world: &mut TwinboardWorld) -> (String, Vec<PatchOperation>) {
    world
        .store()
        .updates
        .read()
        .await
        .last()
        .cloned()
        .expect("no update was sent")
}

fn operation<'a>(patch: &'a [PatchOperation], path: &str) -> &'a PatchOperation {
    patch
        .iter()
        .find(|op| op.path == path)
        .unwrap_or_else(|| panic!("no operation for {}", path))
}

// --- Given steps ---

#[given(expr = "the store answers the next update with status {int}")]
async fn next_update_status(world: &mut TwinboardWorld, status: u16) {
    world.store().push_update_result(Ok(status)).await;
}

#[given(expr = "the next update fails with {string}")]
async fn next_update_fails(world: &mut TwinboardWorld, message: String) {
    world.store().push_update_result(Err(message)).await;
}

// --- When steps ---

#[when(expr = "the edit modal is opened for {string}")]
async fn open_modal(world: &mut TwinboardWorld, twin_id: String) {
    let opened = page(world).open_edit(&twin_id).await;
    world.opened = Some(opened);
}

#[when(expr = "the user enters {string} into {string}")]
async fn enter_value(world: &mut TwinboardWorld, value: String, field: String) {
    let field: EditField = field.parse().expect("unknown form field");
    page(world).apply_input(field, &value).await;
}

#[when("the user saves the edit")]
async fn save_edit(world: &mut TwinboardWorld) {
    let outcome = page(world).save_edit().await;
    world.last_save = Some(outcome);
}

#[when("the user cancels the edit")]
async fn cancel_edit(world: &mut TwinboardWorld) {
    page(world).cancel_edit().await;
}

// --- Then steps ---

#[then("opening the modal should have been refused")]
fn opening_refused(world: &mut TwinboardWorld) {
    assert_eq!(world.opened, Some(false));
}

#[then(expr = "the modal should be {word}")]
async fn modal_phase(world: &mut TwinboardWorld, phase: String) {
    let snapshot = page(world).snapshot().await;
    assert_eq!(serde_json::to_value(snapshot.edit.phase).unwrap(), json!(phase));
}

#[then(expr = "the modal should be editing {string}")]
async fn modal_target(world: &mut TwinboardWorld, twin_id: String) {
    assert_eq!(page(world).snapshot().await.edit.twin_id, twin_id);
}

#[then(expr = "the {string} field should hold {string}")]
async fn field_holds(world: &mut TwinboardWorld, field: String, expected: String) {
    let field: EditField = field.parse().expect("unknown form field");
    let fields = page(world).snapshot().await.edit.fields;
    let actual = match field {
        EditField::Name => fields.name,
        EditField::Color => fields.color,
        EditField::Icon => fields.icon,
        EditField::Order => fields.order.to_string(),
    };
    assert_eq!(actual, expected);
}

#[then(expr = "the save outcome should be {word}")]
fn save_outcome(world: &mut TwinboardWorld, outcome: String) {
    let last = world.last_save.as_ref().expect("nothing was saved");
    assert_eq!(serde_json::to_value(last).unwrap()["outcome"], json!(outcome));
}

#[then(expr = "the store should have received {int} updates")]
async fn store_received_updates(world: &mut TwinboardWorld, count: usize) {
    assert_eq!(world.store().updates.read().await.len(), count);
}

#[then(expr = "the patch should target twin {string}")]
async fn patch_targets(world: &mut TwinboardWorld, twin_id: String) {
    assert_eq!(last_patch(world).await.0, twin_id);
}

#[then(expr = "the patch should replace {string} in that order")]
async fn patch_paths(world: &mut TwinboardWorld, paths: String) {
    let (_, patch) = last_patch(world).await;
    assert!(patch.iter().all(|op| op.op == "replace"));
    let actual: Vec<String> = patch.iter().map(|op| op.path.clone()).collect();
    assert_eq!(actual, split_list(&paths));
}

#[then(expr = "the patch should set {string} to the text {string}")]
async fn patch_sets_text(world: &mut TwinboardWorld, path: String, value: String) {
    let (_, patch) = last_patch(world).await;
    assert_eq!(operation(&patch, &path).value, FieldValue::text(value));
}

#[then(expr = "the patch should set {string} to the number {int}")]
async fn patch_sets_number(world: &mut TwinboardWorld, path: String, value: i64) {
    let (_, patch) = last_patch(world).await;
    assert_eq!(operation(&patch, &path).value, FieldValue::int(value));
}
