//! Per-item traversal: click, read the detail modal, close, scroll.
//!
//! Idle → Clickable → Clicked → ModalVisible → Extracting → Closing →
//! ModalInvisible → Scrolled. A failure at any stage ends the traversal for
//! this item; it is not retried within the pass. Once the click has gone
//! through the item's text is in the clicked set, so later passes skip it.

use std::fmt;

use menuscrape_core::{
    DetailOption, GroupKind, ItemDetailFragment, ItemDetailGroup, Pacing, Selector, Selectors,
};
use thiserror::Error;

use crate::driver::PageDriver;
use crate::error::{DriverError, ScraperError};
use crate::merge::MergeOutcome;
use crate::normalize::{option_prices, selection_limit};
use crate::session::DiscoverySession;
use crate::wait::{self, pause, Condition, Wait};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStage {
    ReadText,
    Clickable,
    Click,
    ModalVisible,
    Extracting,
    Closing,
    ModalInvisible,
    Scroll,
}

impl fmt::Display for ItemStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemStage::ReadText => "read item text",
            ItemStage::Clickable => "wait for item clickable",
            ItemStage::Click => "click item",
            ItemStage::ModalVisible => "wait for modal visible",
            ItemStage::Extracting => "extract item details",
            ItemStage::Closing => "close modal",
            ItemStage::ModalInvisible => "wait for modal invisible",
            ItemStage::Scroll => "scroll after item",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("{stage} failed: {reason}")]
pub struct ItemInteractionFailure {
    pub stage: ItemStage,
    pub reason: String,
}

impl ItemInteractionFailure {
    fn at(stage: ItemStage) -> impl FnOnce(ScraperError) -> Self {
        move |err| Self {
            stage,
            reason: err.to_string(),
        }
    }
}

/// What happened to one item during a pass.
#[derive(Debug)]
pub enum ItemOutcome {
    /// Its visible text was already in the clicked set.
    AlreadyClicked { item_text: String },
    /// Details were read and handed to the merge engine.
    Discovered {
        item_name: String,
        merge: MergeOutcome,
    },
    Failed {
        item_text: String,
        failure: ItemInteractionFailure,
    },
}

/// Drives one item through the modal state machine and merges the result.
pub async fn process_item<D: PageDriver>(
    driver: &D,
    session: &mut DiscoverySession,
    item: &D::Element,
    selectors: &Selectors,
    pacing: &Pacing,
) -> ItemOutcome {
    let item_text = match driver.read_text(item).await {
        Ok(text) => text,
        Err(e) => {
            let failure = ItemInteractionFailure::at(ItemStage::ReadText)(e.into());
            return fail(String::new(), failure, pacing).await;
        }
    };

    if session.is_clicked(&item_text) {
        tracing::info!(item = %item_text, "item already clicked");
        return ItemOutcome::AlreadyClicked { item_text };
    }

    match traverse(driver, session, item, &item_text, selectors, pacing).await {
        Ok(fragment) => {
            let item_name = fragment.item_name.clone();
            let merge = session.absorb(fragment);
            tracing::debug!(item = %item_name, ?merge, "merged item details");
            ItemOutcome::Discovered { item_name, merge }
        }
        Err(failure) => fail(item_text, failure, pacing).await,
    }
}

async fn fail(
    item_text: String,
    failure: ItemInteractionFailure,
    pacing: &Pacing,
) -> ItemOutcome {
    tracing::error!(
        item = %item_text,
        stage = %failure.stage,
        error = %failure.reason,
        "error interacting with item"
    );
    pause(pacing.failure_pause).await;
    ItemOutcome::Failed { item_text, failure }
}

async fn traverse<D: PageDriver>(
    driver: &D,
    session: &mut DiscoverySession,
    item: &D::Element,
    item_text: &str,
    selectors: &Selectors,
    pacing: &Pacing,
) -> Result<ItemDetailFragment, ItemInteractionFailure> {
    let clickable = Wait::new(
        "item clickable",
        Condition::Clickable(item),
        pacing.wait_timeout,
    );
    wait::until(driver, &clickable, pacing.poll_interval)
        .await
        .map_err(ItemInteractionFailure::at(ItemStage::Clickable))?;

    driver
        .click(item)
        .await
        .map_err(|e| ItemInteractionFailure::at(ItemStage::Click)(e.into()))?;
    session.mark_clicked(item_text);
    tracing::info!(item = %item_text, "item clicked");
    pause(pacing.modal_open_pause).await;

    let visible = Wait::new(
        "item modal visible",
        Condition::Visible(&selectors.item_modal),
        pacing.wait_timeout,
    );
    wait::until(driver, &visible, pacing.poll_interval)
        .await
        .map_err(ItemInteractionFailure::at(ItemStage::ModalVisible))?;
    tracing::info!("item modal visible");

    let fragment = read_item_details(driver, selectors)
        .await
        .map_err(ItemInteractionFailure::at(ItemStage::Extracting))?;

    close_modal(driver, selectors)
        .await
        .map_err(ItemInteractionFailure::at(ItemStage::Closing))?;
    tracing::info!("close button clicked");

    let invisible = Wait::new(
        "item modal invisible",
        Condition::Invisible(&selectors.item_modal),
        pacing.wait_timeout,
    );
    wait::until(driver, &invisible, pacing.poll_interval)
        .await
        .map_err(ItemInteractionFailure::at(ItemStage::ModalInvisible))?;
    tracing::info!("item modal closed");
    pause(pacing.modal_close_pause).await;

    driver
        .scroll_by(0, pacing.item_scroll_px)
        .await
        .map_err(|e| ItemInteractionFailure::at(ItemStage::Scroll)(e.into()))?;
    pause(pacing.item_scroll_pause).await;

    Ok(fragment)
}

async fn close_modal<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
) -> Result<(), ScraperError> {
    let button = require_first(
        driver.find_element(&selectors.modal_close).await?,
        &selectors.modal_close,
    )?;
    driver.click(&button).await?;
    Ok(())
}

/// Reads the open modal's item name and every option group it shows.
///
/// # Errors
///
/// Returns [`ScraperError::Driver`] if the name, a group heading, or an
/// option name is missing, or if any read fails.
pub async fn read_item_details<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
) -> Result<ItemDetailFragment, ScraperError> {
    let name_el = require_first(
        driver.find_element(&selectors.item_modal_name).await?,
        &selectors.item_modal_name,
    )?;
    let item_name = driver.read_text(&name_el).await?;
    tracing::info!(item = %item_name, "item name");

    let mut item_details = Vec::new();
    for group in driver.find_all(&selectors.detail_group).await? {
        item_details.push(read_group(driver, &group, selectors).await?);
    }

    Ok(ItemDetailFragment {
        item_name,
        item_details,
    })
}

async fn read_group<D: PageDriver>(
    driver: &D,
    group: &D::Element,
    selectors: &Selectors,
) -> Result<ItemDetailGroup, ScraperError> {
    let heading = first_within(driver, group, &selectors.detail_group_name)
        .await?
        .ok_or_else(|| missing(&selectors.detail_group_name))?;
    let name = driver.read_text(&heading).await?;

    let labels = driver
        .find_within(group, &selectors.detail_group_labels)
        .await?;
    let max_selections = match labels.get(1) {
        Some(label) => selection_limit(driver.read_text(label).await?.trim()),
        None => 0,
    };

    let mut options = Vec::new();
    for option in driver.find_within(group, &selectors.option).await? {
        options.push(read_option(driver, &option, selectors).await?);
    }

    Ok(ItemDetailGroup {
        kind: GroupKind::General,
        name,
        min_selections: 0,
        max_selections,
        options,
    })
}

async fn read_option<D: PageDriver>(
    driver: &D,
    option: &D::Element,
    selectors: &Selectors,
) -> Result<DetailOption, ScraperError> {
    let name_el = first_within(driver, option, &selectors.option_name)
        .await?
        .ok_or_else(|| missing(&selectors.option_name))?;
    let name = driver.read_text(&name_el).await?;

    let price_label = match first_within(driver, option, &selectors.option_price).await? {
        Some(el) => Some(driver.read_text(&el).await?),
        None => None,
    };
    let (price, half_price) = option_prices(price_label.as_deref());

    Ok(DetailOption {
        name,
        possible_to_add: 1,
        price,
        left_half_price: half_price,
        right_half_price: half_price,
    })
}

async fn first_within<D: PageDriver>(
    driver: &D,
    parent: &D::Element,
    selector: &Selector,
) -> Result<Option<D::Element>, ScraperError> {
    Ok(driver.find_within(parent, selector).await?.into_iter().next())
}

fn require_first<E>(
    element: Option<E>,
    selector: &Selector,
) -> Result<E, ScraperError> {
    element.ok_or_else(|| missing(selector))
}

fn missing(selector: &Selector) -> ScraperError {
    ScraperError::Driver(DriverError::NoSuchElement {
        selector: selector.to_string(),
    })
}
