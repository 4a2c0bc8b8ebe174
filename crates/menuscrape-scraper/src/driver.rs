//! The UI-interaction capability the scraper drives.
//!
//! Implementations wrap a real browser session (see the CLI crate) or an
//! in-memory page for tests. The scraper assumes nothing beyond these
//! operations; waiting is layered on top in [`crate::wait`].

use async_trait::async_trait;
use menuscrape_core::Selector;

use crate::error::DriverError;

#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Handle to a located element. Handles may go stale when the page
    /// re-renders; operations on a stale handle return an error.
    type Element: Send + Sync;

    /// First element matching `selector`, or `None` if nothing matches.
    async fn find_element(&self, selector: &Selector)
        -> Result<Option<Self::Element>, DriverError>;

    /// All elements matching `selector`, in document order.
    async fn find_all(&self, selector: &Selector) -> Result<Vec<Self::Element>, DriverError>;

    /// All descendants of `parent` matching `selector`, in document order.
    async fn find_within(
        &self,
        parent: &Self::Element,
        selector: &Selector,
    ) -> Result<Vec<Self::Element>, DriverError>;

    async fn click(&self, element: &Self::Element) -> Result<(), DriverError>;

    /// Rendered (visible) text of the element.
    async fn read_text(&self, element: &Self::Element) -> Result<String, DriverError>;

    /// Attribute or DOM property value; `textContent` must be supported.
    async fn read_attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    async fn is_displayed(&self, element: &Self::Element) -> Result<bool, DriverError>;

    async fn is_enabled(&self, element: &Self::Element) -> Result<bool, DriverError>;

    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<(), DriverError>;

    /// Current vertical scroll offset of the viewport.
    async fn scroll_offset(&self) -> Result<f64, DriverError>;
}
