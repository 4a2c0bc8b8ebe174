use std::time::Duration;

use crate::app_config::{AppConfig, BrowserSettings, Pacing};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        or_default(var, default)
            .parse::<i64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        parse_flag(&or_default(var, default))
            .ok_or_else(|| invalid(var, "expected true/false, 1/0, or yes/no".to_string()))
    };

    let secs = |var: &str, default: &str| parse_u64(var, default).map(Duration::from_secs);
    let millis = |var: &str, default: &str| parse_u64(var, default).map(Duration::from_millis);

    let store_url = lookup("MENUSCRAPE_STORE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty());
    let output_path = PathBuf::from(or_default(
        "MENUSCRAPE_OUTPUT_PATH",
        "restaurant_detail.json",
    ));
    let log_level = or_default("MENUSCRAPE_LOG_LEVEL", "info");
    let selectors_path = lookup("MENUSCRAPE_SELECTORS_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let browser = BrowserSettings {
        headless: parse_bool("MENUSCRAPE_HEADLESS", "false")?,
        window_width: parse_u32("MENUSCRAPE_WINDOW_WIDTH", "1024")?,
        window_height: parse_u32("MENUSCRAPE_WINDOW_HEIGHT", "1024")?,
    };

    let stall_threshold = parse_u32("MENUSCRAPE_STALL_THRESHOLD", "3")?;
    if stall_threshold == 0 {
        return Err(invalid(
            "MENUSCRAPE_STALL_THRESHOLD",
            "must be at least 1".to_string(),
        ));
    }

    let pacing = Pacing {
        wait_timeout: secs("MENUSCRAPE_WAIT_TIMEOUT_SECS", "60")?,
        poll_interval: millis("MENUSCRAPE_POLL_INTERVAL_MS", "500")?,
        page_settle: secs("MENUSCRAPE_PAGE_SETTLE_SECS", "50")?,
        prime_scroll_px: parse_i64("MENUSCRAPE_PRIME_SCROLL_PX", "2000")?,
        prime_pause: secs("MENUSCRAPE_PRIME_PAUSE_SECS", "10")?,
        modal_open_pause: millis("MENUSCRAPE_MODAL_OPEN_PAUSE_MS", "5000")?,
        modal_close_pause: millis("MENUSCRAPE_MODAL_CLOSE_PAUSE_MS", "5000")?,
        item_scroll_px: parse_i64("MENUSCRAPE_ITEM_SCROLL_PX", "100")?,
        item_scroll_pause: millis("MENUSCRAPE_ITEM_SCROLL_PAUSE_MS", "2000")?,
        pass_scroll_px: parse_i64("MENUSCRAPE_PASS_SCROLL_PX", "85")?,
        pass_scroll_pause: millis("MENUSCRAPE_PASS_SCROLL_PAUSE_MS", "2000")?,
        failure_pause: millis("MENUSCRAPE_FAILURE_PAUSE_MS", "2000")?,
        stall_threshold,
        checkpoint_every: parse_usize("MENUSCRAPE_CHECKPOINT_EVERY", "10")?,
    };

    Ok(AppConfig {
        store_url,
        output_path,
        log_level,
        selectors_path,
        browser,
        pacing,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
