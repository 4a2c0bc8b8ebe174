//! Command handlers. Each phase failure is logged and the run moves on, so a
//! store that only partly cooperates still yields a document on disk.

use std::path::Path;

use anyhow::Context;
use menuscrape_core::{AppConfig, Selectors};
use menuscrape_scraper::{
    parse_store_data, parse_store_markup, prime_menu, run_discovery, save_document,
    DiscoverySession,
};

use crate::browser::ChromeDriver;

/// Scrapes `url` live: initial extraction, then detail discovery, saving the
/// document after each phase.
///
/// # Errors
///
/// Returns an error if the browser cannot be launched or the first save
/// fails. Discovery errors are logged, not returned.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    selectors: &Selectors,
    url: &str,
    output: &Path,
) -> anyhow::Result<()> {
    let pacing = &config.pacing;
    let driver = ChromeDriver::launch(&config.browser, url)
        .await
        .context("failed to open store page")?;
    tokio::time::sleep(pacing.page_settle).await;

    let document = parse_store_data(&driver, selectors, pacing).await;
    save_document(&document, output)
        .with_context(|| format!("failed to save {}", output.display()))?;
    match document.data.as_ref() {
        Some(record) => tracing::info!(
            items = record.item_count(),
            categories = record.categories.len(),
            "initial extraction saved"
        ),
        None => tracing::warn!("initial extraction produced no record"),
    }

    if let Err(e) = prime_menu(&driver, selectors, pacing).await {
        tracing::warn!(error = %e, "menu did not finish loading; continuing");
    }

    let mut session = DiscoverySession::new(document);
    if let Err(e) = run_discovery(&driver, &mut session, selectors, pacing, Some(output)).await {
        tracing::error!(error = %e, "detail discovery aborted");
    }

    let summary = session.remerge_all();
    tracing::info!(
        fragments = summary.fragments,
        merged = summary.merged,
        unmatched = summary.unmatched,
        "final merge of discovered details"
    );
    if summary.unmatched > 0 {
        tracing::warn!(
            unmatched = summary.unmatched,
            "discovered items with no matching menu entry"
        );
    }

    let document = session.into_document();
    if let Some(record) = document.data.as_ref() {
        tracing::info!(
            items = record.item_count(),
            enriched = record.enriched_item_count(),
            "detail discovery merged"
        );
    }
    if let Err(e) = save_document(&document, output) {
        tracing::error!(error = %e, "final save failed");
    }

    driver.close().await;
    Ok(())
}

/// Runs the initial extraction over saved page markup.
///
/// # Errors
///
/// Returns an error if `html` cannot be read or `output` cannot be written.
pub(crate) fn run_extract(selectors: &Selectors, html: &Path, output: &Path) -> anyhow::Result<()> {
    let markup = std::fs::read_to_string(html)
        .with_context(|| format!("failed to read {}", html.display()))?;
    let document = parse_store_markup(&markup, selectors);
    save_document(&document, output)
        .with_context(|| format!("failed to save {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_extract_writes_record_from_saved_markup() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("store.html");
        let output = dir.path().join("restaurant.json");
        std::fs::write(
            &html,
            r#"<script>window.ApolloSSRDataTransport = [];</script>
<script>ApolloSSRDataTransport.push({"json":{"results":[{"result":{"storepageFeed":{"storeHeader":{"id":"5","name":"Bao House"},"itemLists":[{"name":"Buns","items":[{"name":"Pork Bao","displayPrice":"$3.75"}]}]}}}]}})</script>"#,
        )
        .unwrap();

        run_extract(&Selectors::default(), &html, &output).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(saved["data"]["title"], "Bao House");
        assert_eq!(saved["data"]["categories"][0]["menu"][0]["name"], "Pork Bao");
    }

    #[test]
    fn run_extract_writes_empty_document_without_payload() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("store.html");
        let output = dir.path().join("restaurant.json");
        std::fs::write(&html, "<html><body>closed</body></html>").unwrap();

        run_extract(&Selectors::default(), &html, &output).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap().trim(), "{}");
    }

    #[test]
    fn run_extract_fails_for_missing_html() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_extract(
            &Selectors::default(),
            &dir.path().join("missing.html"),
            &dir.path().join("out.json"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
