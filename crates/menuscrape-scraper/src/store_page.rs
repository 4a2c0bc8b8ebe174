//! Phase one: read the embedded payload and compile the initial record.
//!
//! Failures here are terminal for the phase but never for the run: they are
//! logged and an empty document is returned.

use menuscrape_core::{Pacing, RestaurantDocument, Selectors};

use crate::compile::extract_and_transform;
use crate::driver::PageDriver;
use crate::error::ScraperError;
use crate::payload::{decode_from_markup, decode_payload};
use crate::wait::{self, Condition, Wait};

/// Waits for the payload script on the live page and returns its text.
///
/// # Errors
///
/// - [`ScraperError::PayloadNotFound`] if the script never appears.
/// - [`ScraperError::Driver`] if the element cannot be read.
pub async fn read_payload_text<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
    pacing: &Pacing,
) -> Result<String, ScraperError> {
    let wait = Wait::new(
        "payload script present",
        Condition::Present(&selectors.payload_script),
        pacing.wait_timeout,
    );

    let script = match wait::until(driver, &wait, pacing.poll_interval).await {
        Ok(Some(script)) => script,
        Ok(None) | Err(ScraperError::WaitTimeout { .. }) => {
            return Err(ScraperError::PayloadNotFound {
                operation: wait.operation.to_string(),
                timeout_ms: wait.timeout.as_millis(),
            })
        }
        Err(e) => return Err(e),
    };

    match driver.read_attribute(&script, "textContent").await? {
        Some(text) => Ok(text),
        None => Ok(driver.read_text(&script).await?),
    }
}

/// Reads, decodes, and compiles the payload from the live page.
pub async fn parse_store_data<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
    pacing: &Pacing,
) -> RestaurantDocument {
    let text = match read_payload_text(driver, selectors, pacing).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "could not find the payload script");
            return RestaurantDocument::empty();
        }
    };

    match decode_payload(&text) {
        Ok(payload) => extract_and_transform(&payload)
            .map_or_else(RestaurantDocument::empty, RestaurantDocument::new),
        Err(e) => {
            tracing::error!(error = %e, "payload decoding failed");
            RestaurantDocument::empty()
        }
    }
}

/// Same as [`parse_store_data`] for saved page markup.
#[must_use]
pub fn parse_store_markup(html: &str, selectors: &Selectors) -> RestaurantDocument {
    match decode_from_markup(html, &selectors.payload_marker, selectors.payload_occurrence) {
        Ok(payload) => extract_and_transform(&payload)
            .map_or_else(RestaurantDocument::empty, RestaurantDocument::new),
        Err(e) => {
            tracing::error!(error = %e, "could not read payload from markup");
            RestaurantDocument::empty()
        }
    }
}
