//! Canonical restaurant/menu record and the per-item detail fragments that
//! enrich it.
//!
//! Field names on the wire follow the published `restaurant_detail.json`
//! layout (`menu_id`, `restaurantAddress`, `ingredientsGroups`, ...), so the
//! serde renames below are part of the output contract.

use serde::{Deserialize, Serialize};

/// Output envelope written to disk: `{ "data": RestaurantRecord }`.
///
/// `data` is omitted when the initial extraction failed, producing `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RestaurantRecord>,
}

impl RestaurantDocument {
    #[must_use]
    pub fn new(record: RestaurantRecord) -> Self {
        Self { data: Some(record) }
    }

    /// An envelope with no record, used when the payload could not be read.
    #[must_use]
    pub fn empty() -> Self {
        Self { data: None }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

/// A single restaurant's storefront data, compiled from the embedded page
/// payload and enriched with option groups discovered through the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    /// Store identifier from the page header, stringified if numeric.
    pub menu_id: Option<String>,
    /// Not present in the payload; always blank.
    #[serde(rename = "titleURL")]
    pub title_url: String,
    /// Not present in the payload; always blank.
    pub title_id: String,
    pub title: Option<String>,
    /// Square cover image URL.
    pub images: Option<String>,
    /// Business header image URL.
    #[serde(rename = "LogoURL")]
    pub logo_url: Option<String>,
    #[serde(rename = "restaurantAddress")]
    pub address: PostalAddress,
    /// Flattened `"<Day> <slot>"` strings in source order.
    #[serde(rename = "storeOpeningHours")]
    pub opening_hours: Vec<String>,
    #[serde(rename = "priceRange")]
    pub price_range: Option<String>,
    pub telephone: Option<String>,
    #[serde(rename = "ratingValue")]
    pub rating_value: String,
    #[serde(rename = "ratingCount")]
    pub rating_count: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cuisine: String,
    pub menu_groups: Vec<String>,
    /// Populated once at compile time; only ever mutated in place afterwards.
    pub categories: Vec<Category>,
}

impl RestaurantRecord {
    /// Total number of menu items across all categories.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.menu.len()).sum()
    }

    /// Number of items whose option groups have been filled in.
    #[must_use]
    pub fn enriched_item_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.menu.iter())
            .filter(|item| !item.ingredients_groups.is_empty())
            .count()
    }

    /// First item (categories then items, in order) whose name equals `name`.
    pub fn find_item_mut(&mut self, name: &str) -> Option<&mut MenuItem> {
        self.categories
            .iter_mut()
            .flat_map(|c| c.menu.iter_mut())
            .find(|item| item.name == name)
    }
}

/// Structured street address. `type_name` carries the payload's `__typename`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub type_name: Option<String>,
    #[serde(rename = "streetAddress")]
    pub street: Option<String>,
    #[serde(rename = "addressLocality")]
    pub locality: Option<String>,
    #[serde(rename = "addressRegion")]
    pub region: Option<String>,
    /// First five-digit run of the display address, or `""`.
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    #[serde(rename = "addressCountry")]
    pub country: Option<String>,
}

/// A titled menu section. Identity is positional, not keyed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub title: Option<String>,
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Treated as the item's key when merging discovered details.
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    /// Normalized price, currency symbol and separators removed.
    pub price: f64,
    /// Empty until a detail fragment for this item is merged.
    #[serde(rename = "ingredientsGroups")]
    pub ingredients_groups: Vec<ItemDetailGroup>,
}

/// Kind tag for a detail group. The source only ever produces `general`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    #[default]
    General,
}

/// A named set of selectable options shown in an item's detail view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDetailGroup {
    #[serde(rename = "type")]
    pub kind: GroupKind,
    pub name: String,
    #[serde(rename = "requiresSelectionMin")]
    pub min_selections: u32,
    #[serde(rename = "requiresSelectionMax")]
    pub max_selections: u32,
    #[serde(rename = "ingredients")]
    pub options: Vec<DetailOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailOption {
    pub name: String,
    /// `1` when the option can be added to the item. The source never
    /// renders a non-addable option, so this is always `1`.
    #[serde(rename = "possibleToAdd")]
    pub possible_to_add: u8,
    pub price: f64,
    #[serde(rename = "leftHalfPrice")]
    pub left_half_price: f64,
    #[serde(rename = "rightHalfPrice")]
    pub right_half_price: f64,
}

/// Option groups read from one item's detail view, awaiting merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDetailFragment {
    pub item_name: String,
    pub item_details: Vec<ItemDetailGroup>,
}
