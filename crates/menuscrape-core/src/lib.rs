pub mod app_config;
pub mod config;
pub mod record;
pub mod selectors;

pub use app_config::{AppConfig, BrowserSettings, Pacing};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{
    Category, DetailOption, GroupKind, ItemDetailFragment, ItemDetailGroup, MenuItem,
    PostalAddress, RestaurantDocument, RestaurantRecord,
};
pub use selectors::{load_selectors, Selector, Selectors};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read selectors file {path}: {source}")]
    SelectorsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse selectors file: {0}")]
    SelectorsFileParse(#[from] serde_yaml::Error),

    #[error("selectors validation failed: {0}")]
    Validation(String),
}
