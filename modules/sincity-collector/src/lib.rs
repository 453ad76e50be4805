pub mod anchors;
pub mod config;
pub mod dedup;
pub mod error;
pub mod pacing;
pub mod persist;
pub mod record;
pub mod runner;
pub mod search;
pub mod selector;
pub mod summary;
pub mod taxonomy;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use anchors::{Anchor, AnchorSet};
pub use config::Config;
pub use error::{CollectorError, Result};
pub use runner::{CollectionRun, CollectionRunner, Dataset};
pub use selector::CategorySelector;
