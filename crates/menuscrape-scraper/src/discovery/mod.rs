//! Detail Discovery Loop.
//!
//! Each pass walks the menu items currently in the DOM, in query order,
//! through [`process_item`]. Between passes the loop scrolls, pauses, and
//! re-queries; the [`StallDetector`] decides when to stop. Items that appear
//! between passes are picked up on the next one, so the overall order is
//! first-seen per pass rather than a stable total order.

mod item;

use std::path::Path;

use menuscrape_core::{Pacing, Selectors};

pub use item::{
    process_item, read_item_details, ItemInteractionFailure, ItemOutcome, ItemStage,
};

use crate::driver::PageDriver;
use crate::error::ScraperError;
use crate::merge::MergeOutcome;
use crate::persist::save_document;
use crate::scroll::{StallDetector, Termination, Verdict};
use crate::session::DiscoverySession;
use crate::wait::{self, pause, Condition, Wait};

/// Tally of one discovery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub passes: usize,
    pub termination: Termination,
    pub applied: usize,
    pub already_populated: usize,
    /// Matched items whose detail view showed no option groups.
    pub no_details: usize,
    pub unmatched: usize,
    pub already_clicked: usize,
    pub failed: usize,
}

impl DiscoveryReport {
    fn new() -> Self {
        Self {
            passes: 0,
            termination: Termination::Exhausted,
            applied: 0,
            already_populated: 0,
            no_details: 0,
            unmatched: 0,
            already_clicked: 0,
            failed: 0,
        }
    }

    fn tally(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::AlreadyClicked { .. } => self.already_clicked += 1,
            ItemOutcome::Failed { .. } => self.failed += 1,
            ItemOutcome::Discovered { merge, .. } => match merge {
                MergeOutcome::Applied => self.applied += 1,
                MergeOutcome::AlreadyPopulated => self.already_populated += 1,
                MergeOutcome::NoDetails => self.no_details += 1,
                MergeOutcome::Unmatched => self.unmatched += 1,
            },
        }
    }
}

/// Scrolls into the menu and waits for its category tabs, returning their
/// labels. Used once before the first pass.
///
/// # Errors
///
/// - [`ScraperError::WaitTimeout`] if the tabs never appear.
/// - [`ScraperError::Driver`] if scrolling or reading a tab fails.
pub async fn prime_menu<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
    pacing: &Pacing,
) -> Result<Vec<String>, ScraperError> {
    driver.scroll_by(0, pacing.prime_scroll_px).await?;
    pause(pacing.prime_pause).await;

    let tabs_present = Wait::new(
        "menu category tabs present",
        Condition::Present(&selectors.menu_nav_tabs),
        pacing.wait_timeout,
    );
    wait::until(driver, &tabs_present, pacing.poll_interval).await?;

    let mut labels = Vec::new();
    for tab in driver.find_all(&selectors.menu_nav_tabs).await? {
        if let Some(label) = driver.read_attribute(&tab, "aria-label").await? {
            labels.push(label);
        }
    }
    tracing::info!(tabs = labels.len(), labels = ?labels, "menu category tabs loaded");
    Ok(labels)
}

/// Runs passes until the item set is exhausted or scrolling stalls.
///
/// With `checkpoint` set, the session's document is saved there every
/// `pacing.checkpoint_every` applied merges; a failed checkpoint is logged
/// and the run continues.
///
/// # Errors
///
/// Returns [`ScraperError::Driver`] if the item query, the between-pass
/// scroll, or the offset read fails. Per-item failures never surface here.
pub async fn run_discovery<D: PageDriver>(
    driver: &D,
    session: &mut DiscoverySession,
    selectors: &Selectors,
    pacing: &Pacing,
    checkpoint: Option<&Path>,
) -> Result<DiscoveryReport, ScraperError> {
    let mut report = DiscoveryReport::new();
    let mut items = driver.find_all(&selectors.menu_item).await?;
    let mut detector = StallDetector::new(pacing.stall_threshold, driver.scroll_offset().await?);

    if items.is_empty() {
        tracing::info!("no menu items found");
        return Ok(report);
    }

    loop {
        report.passes += 1;
        tracing::debug!(pass = report.passes, items = items.len(), "starting pass");

        for item in &items {
            let outcome = process_item(driver, session, item, selectors, pacing).await;
            report.tally(&outcome);

            if let Some(path) = checkpoint {
                if session.checkpoint_due(pacing.checkpoint_every) {
                    if let Err(e) = save_document(session.document(), path) {
                        tracing::warn!(error = %e, "checkpoint save failed");
                    }
                }
            }
        }

        driver.scroll_by(0, pacing.pass_scroll_px).await?;
        pause(pacing.pass_scroll_pause).await;
        items = driver.find_all(&selectors.menu_item).await?;
        let offset = driver.scroll_offset().await?;

        match detector.observe(items.len(), offset) {
            Verdict::Continue => {}
            Verdict::Stop(reason) => {
                match reason {
                    Termination::Exhausted => tracing::info!("no more items found"),
                    Termination::Stalled => tracing::info!(
                        passes = report.passes,
                        "no new items found after scrolling multiple times"
                    ),
                }
                report.termination = reason;
                break;
            }
        }
    }

    tracing::info!(
        passes = report.passes,
        termination = %report.termination,
        applied = report.applied,
        no_details = report.no_details,
        failed = report.failed,
        clicked = session.clicked_count(),
        "detail discovery finished"
    );
    Ok(report)
}
