pub mod compile;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod extract;
pub mod merge;
pub mod normalize;
pub mod payload;
pub mod persist;
pub mod scroll;
pub mod session;
pub mod store_page;
pub mod wait;

pub use compile::{compile_restaurant_data, extract_and_transform};
pub use discovery::{
    prime_menu, process_item, run_discovery, DiscoveryReport, ItemInteractionFailure,
    ItemOutcome, ItemStage,
};
pub use driver::PageDriver;
pub use error::{DriverError, ScraperError};
pub use merge::{merge_item_details, MergeOutcome};
pub use normalize::{parse_price, OPTION_PRICE_MULTIPLIER};
pub use persist::{load_document, save_document};
pub use scroll::{StallDetector, Termination};
pub use session::{DiscoverySession, RemergeSummary};
pub use store_page::{parse_store_data, parse_store_markup};
