//! BDD step definitions for twin mapping feature

use cucumber::{given, then, when};
use serde_json::json;

use twinboard::format::datetime_formatter;
use twinboard::mapper::map_twins;
use twinboard::twin::{FieldValue, RawTwin, TwinView};

use crate::steps::split_list;
use crate::world::TwinboardWorld;

fn mapped<'a>(world: &'a TwinboardWorld, name: &str) -> &'a TwinView {
    world
        .mapped
        .iter()
        .find(|twin| twin.name == name)
        .unwrap_or_else(|| panic!("no mapped twin named '{}'", name))
}

// --- Given steps ---

#[given(expr = "a twin record {string} with temperature {float} and humidity {float} and no display")]
fn record_without_display(world: &mut TwinboardWorld, id: String, temperature: f64, humidity: f64) {
    world.raw_records.push(RawTwin::from(json!({
        "$dtId": id,
        "Temperature": temperature,
        "Humidity": humidity,
    })));
}

#[given(expr = "a twin record {string} with a null display")]
fn record_with_null_display(world: &mut TwinboardWorld, id: String) {
    world.raw_records.push(RawTwin::from(json!({
        "$dtId": id,
        "Temperature": 70.0,
        "Humidity": 40.0,
        "Display": null,
    })));
}

#[given(
    expr = "a twin record {string} with display name {string} icon {string} color {string} order {int}"
)]
fn record_with_display(
    world: &mut TwinboardWorld,
    id: String,
    name: String,
    icon: String,
    color: String,
    order: i64,
) {
    world.raw_records.push(RawTwin::from(json!({
        "$dtId": id,
        "Temperature": 70.0,
        "Humidity": 40.0,
        "Display": { "Name": name, "Icon": icon, "Color": color, "Order": order },
    })));
}

#[given(expr = "a twin record {string} with a display that only has name {string}")]
fn record_with_partial_display(world: &mut TwinboardWorld, id: String, name: String) {
    world.raw_records.push(RawTwin::from(json!({
        "$dtId": id,
        "Display": { "Name": name },
    })));
}

#[given(expr = "a twin record {string} without readings")]
fn record_without_readings(world: &mut TwinboardWorld, id: String) {
    world.raw_records.push(RawTwin::from(json!({ "$dtId": id })));
}

#[given(expr = "a twin record {string} with non-numeric readings")]
fn record_with_text_readings(world: &mut TwinboardWorld, id: String) {
    world.raw_records.push(RawTwin::from(json!({
        "$dtId": id,
        "Temperature": "warm",
        "Humidity": null,
    })));
}

#[given(expr = "a twin record {string} whose humidity was updated at {string}")]
fn record_with_update_time(world: &mut TwinboardWorld, id: String, timestamp: String) {
    world.raw_records.push(RawTwin::from(json!({
        "$dtId": id,
        "Temperature": 70.0,
        "Humidity": 40.0,
        "$metadata": {
            "Temperature": { "lastUpdateTime": "1999-01-01T00:00:00Z" },
            "Humidity": { "lastUpdateTime": timestamp },
        },
    })));
}

#[given(expr = "twin records {string}")]
fn plain_records(world: &mut TwinboardWorld, ids: String) {
    for id in split_list(&ids) {
        world.raw_records.push(RawTwin::from(json!({
            "$dtId": id,
            "Temperature": 70.5,
            "Humidity": 41.2,
        })));
    }
}

// --- When steps ---

#[when("the records are mapped")]
fn records_are_mapped(world: &mut TwinboardWorld) {
    world.mapped = map_twins(&world.raw_records);
}

// --- Then steps ---

#[then(expr = "twin {string} should show temperature {int} and humidity {int}")]
fn twin_shows_readings(world: &mut TwinboardWorld, name: String, temperature: i64, humidity: i64) {
    let twin = mapped(world, &name);
    assert_eq!(twin.temperature, Some(temperature));
    assert_eq!(twin.humidity, Some(humidity));
}

#[then(expr = "twin {string} should have no readings")]
fn twin_has_no_readings(world: &mut TwinboardWorld, name: String) {
    let twin = mapped(world, &name);
    assert_eq!(twin.temperature, None);
    assert_eq!(twin.humidity, None);
}

#[then(expr = "twin {string} should have display name {string}, icon {string}, color {string} and order {int}")]
fn twin_has_display(
    world: &mut TwinboardWorld,
    name: String,
    display_name: String,
    icon: String,
    color: String,
    order: i64,
) {
    let display = &mapped(world, &name).display;
    assert_eq!(display.name.as_deref(), Some(display_name.as_str()));
    assert_eq!(display.icon.as_deref(), Some(icon.as_str()));
    assert_eq!(display.color.as_deref(), Some(color.as_str()));
    assert_eq!(display.order, Some(FieldValue::int(order)));
}

#[then(expr = "twin {string} should have no display icon, color or order")]
fn twin_has_display_holes(world: &mut TwinboardWorld, name: String) {
    let display = &mapped(world, &name).display;
    assert_eq!(display.icon, None);
    assert_eq!(display.color, None);
    assert_eq!(display.order, None);
}

#[then(expr = "twin {string} should read last updated {string}")]
fn twin_last_updated(world: &mut TwinboardWorld, name: String, expected: String) {
    let twin = mapped(world, &name);
    assert_eq!(datetime_formatter(twin.last_updated.as_ref()), expected);
}

#[then(expr = "twin {string} should not be flagged as a warning")]
fn twin_not_warning(world: &mut TwinboardWorld, name: String) {
    assert!(!mapped(world, &name).warning);
}

#[then(expr = "the mapped twins should be {string} in that order")]
fn mapped_in_order(world: &mut TwinboardWorld, ids: String) {
    let names: Vec<String> = world.mapped.iter().map(|twin| twin.name.clone()).collect();
    assert_eq!(names, split_list(&ids));
}
