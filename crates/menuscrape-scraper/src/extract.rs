//! Structural Extractor: tolerant projections over the decoded payload.
//!
//! Every lookup goes through `serde_json::Value` indexing, which yields
//! `Null` for absent keys or mismatched shapes instead of panicking. A
//! partially shaped payload therefore degrades to empty strings, empty
//! lists, and zero prices rather than aborting the extraction.

use menuscrape_core::{Category, MenuItem};
use serde_json::Value;

use crate::normalize::{capitalize_day, parse_price};

/// Returns the first non-empty `result.storepageFeed` object under
/// `json.results[*]`, scanning in order.
#[must_use]
pub fn store_feed(payload: &Value) -> Option<&Value> {
    array(&payload["json"]["results"])
        .iter()
        .map(|result| &result["result"]["storepageFeed"])
        .find(|feed| feed.as_object().is_some_and(|obj| !obj.is_empty()))
}

/// The feed's `storeHeader` sub-object (`Null` when absent).
#[must_use]
pub fn extract_store_header(feed: &Value) -> &Value {
    &feed["storeHeader"]
}

/// Flattens `operationInfo.storeOperationHourInfo.operationSchedule` into
/// `"<Day> <slot>"` strings, one per time slot, in source order.
#[must_use]
pub fn extract_store_hours(mx_info: &Value) -> Vec<String> {
    let schedule = &mx_info["operationInfo"]["storeOperationHourInfo"]["operationSchedule"];

    array(schedule)
        .iter()
        .flat_map(|day_info| {
            let day = capitalize_day(day_info["dayOfWeek"].as_str().unwrap_or_default());
            array(&day_info["timeSlotList"])
                .iter()
                .filter_map(display_text)
                .map(move |slot| format!("{day} {slot}"))
        })
        .collect()
}

/// Names of `menuCategories[*]`, in order. Unnamed entries become `""`.
#[must_use]
pub fn extract_menu_groups(menu_book: &Value) -> Vec<String> {
    array(&menu_book["menuCategories"])
        .iter()
        .map(|category| text(&category["name"]).unwrap_or_default())
        .collect()
}

/// Builds one [`Category`] per `itemLists[*]` entry with its items' prices
/// parsed from `displayPrice`. Detail groups start empty.
#[must_use]
pub fn transform_item_lists(item_lists: &Value) -> Vec<Category> {
    array(item_lists)
        .iter()
        .map(|item_list| Category {
            title: text(&item_list["name"]),
            menu: array(&item_list["items"]).iter().map(transform_item).collect(),
        })
        .collect()
}

fn transform_item(item: &Value) -> MenuItem {
    MenuItem {
        name: text(&item["name"]).unwrap_or_default(),
        description: text(&item["description"]),
        image_url: text(&item["imageUrl"]),
        price: item["displayPrice"].as_str().map_or(0.0, parse_price),
        ingredients_groups: Vec::new(),
    }
}

/// Elements of a JSON array, or an empty slice for anything else.
pub(crate) fn array(value: &Value) -> &[Value] {
    value.as_array().map_or(&[][..], Vec::as_slice)
}

/// String content of a JSON string, `None` otherwise.
pub(crate) fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// String content of a string, or the literal form of a number/bool.
pub(crate) fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A coordinate given either as a JSON number or a numeric string.
pub(crate) fn coordinate(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
}
