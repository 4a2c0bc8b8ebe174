//! Record Compiler: assembles the extracted pieces into a
//! [`RestaurantRecord`].

use menuscrape_core::{Category, PostalAddress, RestaurantRecord};
use serde_json::Value;

use crate::extract::{
    coordinate, display_text, extract_menu_groups, extract_store_header, extract_store_hours,
    store_feed, text, transform_item_lists,
};
use crate::normalize::extract_postal_code;

/// Combines header, store info, hours, menu groups, and categories.
///
/// The postal code comes from the first five-digit run of
/// `mxInfo.address.displayAddress`. Rating, cuisine, and URL-slug fields are
/// not in the payload and stay blank.
#[must_use]
pub fn compile_restaurant_data(
    store_header: &Value,
    mx_info: &Value,
    opening_hours: Vec<String>,
    menu_groups: Vec<String>,
    categories: Vec<Category>,
) -> RestaurantRecord {
    let address = &mx_info["address"];
    let display_address = address["displayAddress"].as_str().unwrap_or_default();

    RestaurantRecord {
        menu_id: display_text(&store_header["id"]),
        title_url: String::new(),
        title_id: String::new(),
        title: text(&store_header["name"]),
        images: text(&store_header["coverSquareImgUrl"]),
        logo_url: text(&store_header["businessHeaderImgUrl"]),
        address: PostalAddress {
            type_name: text(&address["__typename"]),
            street: text(&address["street"]),
            locality: text(&address["city"]),
            region: text(&address["state"]),
            postal_code: extract_postal_code(display_address),
            country: text(&address["countryShortname"]),
        },
        opening_hours,
        price_range: text(&store_header["priceRange"]),
        telephone: display_text(&mx_info["phoneno"]),
        rating_value: String::new(),
        rating_count: String::new(),
        latitude: coordinate(&store_header["address"]["lat"]),
        longitude: coordinate(&store_header["address"]["lng"]),
        cuisine: String::new(),
        menu_groups,
        categories,
    }
}

/// Runs extraction and compilation over a decoded payload.
///
/// Returns `None` (and logs why) when the payload carries no store feed.
#[must_use]
pub fn extract_and_transform(payload: &Value) -> Option<RestaurantRecord> {
    if payload.as_object().is_none_or(serde_json::Map::is_empty) {
        tracing::error!("no JSON data provided for transformation");
        return None;
    }

    let Some(feed) = store_feed(payload) else {
        tracing::error!("no store feed found in payload results");
        return None;
    };

    let store_header = extract_store_header(feed);
    let mx_info = &feed["mxInfo"];
    let opening_hours = extract_store_hours(mx_info);
    let menu_groups = extract_menu_groups(&feed["menuBook"]);
    let categories = transform_item_lists(&feed["itemLists"]);

    let record = compile_restaurant_data(
        store_header,
        mx_info,
        opening_hours,
        menu_groups,
        categories,
    );

    tracing::info!(
        title = record.title.as_deref().unwrap_or_default(),
        categories = record.categories.len(),
        items = record.item_count(),
        "compiled restaurant record"
    );

    Some(record)
}

#[cfg(test)]
#[path = "compile_test.rs"]
mod tests;
