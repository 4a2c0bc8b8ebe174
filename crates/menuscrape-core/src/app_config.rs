use std::path::PathBuf;
use std::time::Duration;

/// Timing and scroll parameters for the interactive phase.
///
/// Every suspension the scraper performs is one of these values; nothing
/// else sleeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacing {
    /// Upper bound for every wait-until condition.
    pub wait_timeout: Duration,
    /// How often a pending wait condition is re-checked.
    pub poll_interval: Duration,
    /// Pause after navigation before the payload is read.
    pub page_settle: Duration,
    pub prime_scroll_px: i64,
    pub prime_pause: Duration,
    /// Pause after clicking an item, before waiting on the modal.
    pub modal_open_pause: Duration,
    /// Pause after the modal reports invisible.
    pub modal_close_pause: Duration,
    pub item_scroll_px: i64,
    pub item_scroll_pause: Duration,
    pub pass_scroll_px: i64,
    pub pass_scroll_pause: Duration,
    pub failure_pause: Duration,
    /// Consecutive no-progress passes before the item set counts as stalled.
    pub stall_threshold: u32,
    /// Save the record after every N merged fragments; `0` disables.
    pub checkpoint_every: usize,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            wait_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
            page_settle: Duration::from_secs(50),
            prime_scroll_px: 2000,
            prime_pause: Duration::from_secs(10),
            modal_open_pause: Duration::from_millis(5000),
            modal_close_pause: Duration::from_millis(5000),
            item_scroll_px: 100,
            item_scroll_pause: Duration::from_millis(2000),
            pass_scroll_px: 85,
            pass_scroll_pause: Duration::from_millis(2000),
            failure_pause: Duration::from_millis(2000),
            stall_threshold: 3,
            checkpoint_every: 10,
        }
    }
}

impl Pacing {
    /// All pauses zeroed, waits bounded at `wait_timeout`. Used by tests and
    /// offline replays where there is no page to settle.
    #[must_use]
    pub fn immediate(wait_timeout: Duration) -> Self {
        Self {
            wait_timeout,
            poll_interval: Duration::ZERO,
            page_settle: Duration::ZERO,
            prime_pause: Duration::ZERO,
            modal_open_pause: Duration::ZERO,
            modal_close_pause: Duration::ZERO,
            item_scroll_pause: Duration::ZERO,
            pass_scroll_pause: Duration::ZERO,
            failure_pause: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Store page to scrape. Only the live `scrape` command requires it.
    pub store_url: Option<String>,
    pub output_path: PathBuf,
    pub log_level: String,
    pub selectors_path: Option<PathBuf>,
    pub browser: BrowserSettings,
    pub pacing: Pacing,
}
