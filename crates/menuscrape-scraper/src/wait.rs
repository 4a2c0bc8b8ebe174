//! Explicit suspension contract for bounded waits.
//!
//! Each wait names the operation it belongs to, the condition it polls for,
//! and its timeout. [`until`] is the only place that polls; the fixed pauses
//! in [`pause`] are the only other suspension points.

use std::time::Duration;

use menuscrape_core::Selector;
use tokio::time::Instant;

use crate::driver::PageDriver;
use crate::error::ScraperError;

/// An externally observable page condition.
pub enum Condition<'a, E> {
    /// An element matching the selector exists in the document.
    Present(&'a Selector),
    /// An element matching the selector exists and is displayed.
    Visible(&'a Selector),
    /// No displayed element matches the selector.
    Invisible(&'a Selector),
    /// The element is displayed and enabled.
    Clickable(&'a E),
}

pub struct Wait<'a, E> {
    pub operation: &'static str,
    pub condition: Condition<'a, E>,
    pub timeout: Duration,
}

impl<'a, E> Wait<'a, E> {
    #[must_use]
    pub fn new(operation: &'static str, condition: Condition<'a, E>, timeout: Duration) -> Self {
        Self {
            operation,
            condition,
            timeout,
        }
    }
}

/// Polls `wait.condition` every `poll_interval` until it holds or
/// `wait.timeout` elapses. The condition is always checked at least once.
///
/// Returns the matched element for `Present` and `Visible`, `None` otherwise.
///
/// # Errors
///
/// - [`ScraperError::WaitTimeout`] if the condition never held.
/// - [`ScraperError::Driver`] if a probe fails outright.
pub async fn until<D: PageDriver>(
    driver: &D,
    wait: &Wait<'_, D::Element>,
    poll_interval: Duration,
) -> Result<Option<D::Element>, ScraperError> {
    let deadline = Instant::now() + wait.timeout;

    loop {
        if let Some(outcome) = probe(driver, &wait.condition).await? {
            return Ok(outcome);
        }

        if Instant::now() >= deadline {
            tracing::debug!(
                operation = wait.operation,
                timeout_ms = wait.timeout.as_millis(),
                "wait timed out"
            );
            return Err(ScraperError::WaitTimeout {
                operation: wait.operation.to_string(),
                timeout_ms: wait.timeout.as_millis(),
            });
        }

        tokio::time::sleep(poll_interval.max(Duration::from_millis(1))).await;
    }
}

/// One check of `condition`. `Some(..)` when satisfied.
async fn probe<D: PageDriver>(
    driver: &D,
    condition: &Condition<'_, D::Element>,
) -> Result<Option<Option<D::Element>>, ScraperError> {
    match condition {
        Condition::Present(selector) => Ok(driver.find_element(selector).await?.map(Some)),
        Condition::Visible(selector) => match driver.find_element(selector).await? {
            Some(element) if driver.is_displayed(&element).await? => Ok(Some(Some(element))),
            _ => Ok(None),
        },
        Condition::Invisible(selector) => match driver.find_element(selector).await? {
            None => Ok(Some(None)),
            Some(element) => {
                // A handle that vanished between lookup and check counts as gone.
                let displayed = driver.is_displayed(&element).await.unwrap_or(false);
                Ok((!displayed).then_some(None))
            }
        },
        Condition::Clickable(element) => {
            let ready =
                driver.is_displayed(element).await? && driver.is_enabled(element).await?;
            Ok(ready.then_some(None))
        }
    }
}

/// Fixed-duration pause. Zero durations return immediately.
pub async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
