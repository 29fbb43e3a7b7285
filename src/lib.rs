pub mod compose;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod extraction;
pub mod history;
pub mod infra;
pub mod logging;
pub mod sites;
pub mod templates;
pub mod types;

pub use extract::Page;
pub use extraction::extract;
pub use sites::{resolve_handler, SiteHandler};
pub use types::{ExtractionResponse, ExtractionResult};
