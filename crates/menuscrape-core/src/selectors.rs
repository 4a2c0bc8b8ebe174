use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// An element query understood by the page driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selector {
    Css(String),
    Xpath(String),
}

impl Selector {
    #[must_use]
    pub fn css(query: &str) -> Self {
        Self::Css(query.to_owned())
    }

    #[must_use]
    pub fn xpath(query: &str) -> Self {
        Self::Xpath(query.to_owned())
    }

    #[must_use]
    pub fn query(&self) -> &str {
        match self {
            Selector::Css(q) | Selector::Xpath(q) => q,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(q) => write!(f, "css:{q}"),
            Selector::Xpath(q) => write!(f, "xpath:{q}"),
        }
    }
}

/// Every element query the scraper issues against the store page.
///
/// Defaults match the current storefront markup. A YAML file may override
/// any subset of fields; omitted fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Script element carrying the embedded payload.
    pub payload_script: Selector,
    /// Text that identifies payload scripts in saved markup.
    pub payload_marker: String,
    /// 1-based occurrence of the marker script that holds the store feed.
    pub payload_occurrence: usize,
    pub menu_nav_tabs: Selector,
    pub menu_item: Selector,
    pub item_modal: Selector,
    pub item_modal_name: Selector,
    pub modal_close: Selector,
    /// Searched within the open modal's document.
    pub detail_group: Selector,
    /// Searched within a detail group.
    pub detail_group_name: Selector,
    /// The second match carries the "select up to N" label.
    pub detail_group_labels: Selector,
    /// Searched within a detail group.
    pub option: Selector,
    /// Searched within an option.
    pub option_name: Selector,
    /// Searched within an option; absent when the option is free.
    pub option_price: Selector,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            payload_script: Selector::xpath(
                r#"(//script[contains(text(),"ApolloSSRDataTransport")])[2]"#,
            ),
            payload_marker: "ApolloSSRDataTransport".to_owned(),
            payload_occurrence: 2,
            menu_nav_tabs: Selector::xpath(
                r#"//div[@data-testid="MenuNavCategories"]//button[@aria-label]"#,
            ),
            menu_item: Selector::xpath(r#"//div[@data-testid="MenuItem"]"#),
            item_modal: Selector::css(r#"[data-testid="ItemModal"]"#),
            item_modal_name: Selector::xpath(r#"//h2[@class="Text-sc-1nm69d8-0 dtvoNG"]/span"#),
            modal_close: Selector::css(r#"button[aria-label^="Close"]"#),
            detail_group: Selector::css(r#"div[role="group"]"#),
            detail_group_name: Selector::css("h3.Text-sc-1nm69d8-0"),
            detail_group_labels: Selector::css("span.Text-sc-1nm69d8-0.gFJzBa"),
            option: Selector::css("label"),
            option_name: Selector::css("span.Text-sc-1nm69d8-0"),
            option_price: Selector::css("span.Text-sc-1nm69d8-0.dCneXH"),
        }
    }
}

/// Load selector overrides from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or contains an
/// empty selector.
pub fn load_selectors(path: &Path) -> Result<Selectors, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SelectorsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    // Selectors are written as one-key maps (`css: "label"`), not YAML tags.
    let selectors: Selectors = serde_yaml::with::singleton_map_recursive::deserialize(
        serde_yaml::Deserializer::from_str(&content),
    )
    .map_err(ConfigError::SelectorsFileParse)?;

    validate_selectors(&selectors)?;

    Ok(selectors)
}

fn validate_selectors(selectors: &Selectors) -> Result<(), ConfigError> {
    let named = [
        ("payload_script", &selectors.payload_script),
        ("menu_nav_tabs", &selectors.menu_nav_tabs),
        ("menu_item", &selectors.menu_item),
        ("item_modal", &selectors.item_modal),
        ("item_modal_name", &selectors.item_modal_name),
        ("modal_close", &selectors.modal_close),
        ("detail_group", &selectors.detail_group),
        ("detail_group_name", &selectors.detail_group_name),
        ("detail_group_labels", &selectors.detail_group_labels),
        ("option", &selectors.option),
        ("option_name", &selectors.option_name),
        ("option_price", &selectors.option_price),
    ];

    for (name, selector) in named {
        if selector.query().trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "selector '{name}' must be non-empty"
            )));
        }
    }

    if selectors.payload_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "payload_marker must be non-empty".to_string(),
        ));
    }

    if selectors.payload_occurrence == 0 {
        return Err(ConfigError::Validation(
            "payload_occurrence is 1-based and must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "selectors_test.rs"]
mod tests;
