//! Chromium-backed [`PageDriver`].

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use menuscrape_core::{BrowserSettings, Selector};
use menuscrape_scraper::{DriverError, PageDriver};
use tokio::task::JoinHandle;

const IS_DISPLAYED_JS: &str = "function() {
    const rect = this.getBoundingClientRect();
    const style = window.getComputedStyle(this);
    return rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden' && style.display !== 'none';
}";

const IS_ENABLED_JS: &str = "function() { return !this.disabled; }";

const TEXT_CONTENT_JS: &str = "function() { return this.textContent; }";

/// A launched browser with a single page open on the store.
pub struct ChromeDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromeDriver {
    /// Launches Chromium and navigates to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Command`] if the browser cannot start or the
    /// page fails to load.
    pub async fn launch(settings: &BrowserSettings, url: &str) -> Result<Self, DriverError> {
        let mut builder =
            BrowserConfig::builder().window_size(settings.window_width, settings.window_height);
        if !settings.headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|e| DriverError::command("configure browser", e))?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .map_err(|e| DriverError::command("launch browser", e))?;
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler stopped");
                    break;
                }
            }
        });

        let page = browser
            .new_page(url)
            .await
            .map_err(|e| DriverError::command("open page", e))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| DriverError::command("navigate", e))?;
        tracing::info!(url, headless = settings.headless, "store page opened");

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    /// Closes the browser and waits for the process to exit.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!(error = %e, "browser close failed");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::warn!(error = %e, "browser did not exit cleanly");
        }
        self.handler.abort();
    }

    async fn call_on(
        element: &Element,
        operation: &str,
        function: &str,
    ) -> Result<Option<serde_json::Value>, DriverError> {
        let returns = element
            .call_js_fn(function, false)
            .await
            .map_err(|e| DriverError::command(operation, e))?;
        Ok(returns.result.value)
    }
}

#[async_trait]
impl PageDriver for ChromeDriver {
    type Element = Element;

    async fn find_element(&self, selector: &Selector) -> Result<Option<Element>, DriverError> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<Element>, DriverError> {
        let found = match selector {
            Selector::Css(query) => self.page.find_elements(query.as_str()).await,
            Selector::Xpath(query) => self.page.find_xpaths(query.as_str()).await,
        };
        found.map_err(|e| DriverError::command(&format!("find {selector}"), e))
    }

    async fn find_within(
        &self,
        parent: &Element,
        selector: &Selector,
    ) -> Result<Vec<Element>, DriverError> {
        match selector {
            Selector::Css(query) => parent
                .find_elements(query.as_str())
                .await
                .map_err(|e| DriverError::command(&format!("find {selector}"), e)),
            Selector::Xpath(_) => Err(DriverError::Unsupported {
                selector: selector.to_string(),
                reason: "element-scoped lookups take CSS selectors only".to_owned(),
            }),
        }
    }

    async fn click(&self, element: &Element) -> Result<(), DriverError> {
        element
            .click()
            .await
            .map(|_| ())
            .map_err(|e| DriverError::command("click", e))
    }

    async fn read_text(&self, element: &Element) -> Result<String, DriverError> {
        let text = element
            .inner_text()
            .await
            .map_err(|e| DriverError::command("read text", e))?;
        Ok(text.unwrap_or_default())
    }

    async fn read_attribute(
        &self,
        element: &Element,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        if name == "textContent" {
            let value = Self::call_on(element, "read textContent", TEXT_CONTENT_JS).await?;
            return Ok(value.and_then(|v| v.as_str().map(str::to_owned)));
        }
        element
            .attribute(name)
            .await
            .map_err(|e| DriverError::command("read attribute", e))
    }

    async fn is_displayed(&self, element: &Element) -> Result<bool, DriverError> {
        let value = Self::call_on(element, "check visibility", IS_DISPLAYED_JS).await?;
        Ok(value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    async fn is_enabled(&self, element: &Element) -> Result<bool, DriverError> {
        let value = Self::call_on(element, "check enabled", IS_ENABLED_JS).await?;
        Ok(value.and_then(|v| v.as_bool()).unwrap_or(true))
    }

    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<(), DriverError> {
        self.page
            .evaluate(format!("window.scrollBy({dx}, {dy})"))
            .await
            .map(|_| ())
            .map_err(|e| DriverError::command("scroll", e))
    }

    async fn scroll_offset(&self) -> Result<f64, DriverError> {
        self.page
            .evaluate("window.scrollY")
            .await
            .map_err(|e| DriverError::command("read scroll offset", e))?
            .into_value::<f64>()
            .map_err(|e| DriverError::command("read scroll offset", e))
    }
}
