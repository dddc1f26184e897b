pub mod artifact;
pub mod config;
pub mod duration;
pub mod error;
pub mod extractor;
pub mod page;
pub mod pagination;
pub mod progress;
pub mod record;
pub mod session;
pub mod site;

pub use config::{PaginationConfig, ScrapeConfig, WaitCondition};
pub use error::{Error, Result};
pub use progress::ProgressReporter;
pub use record::{ItemRecord, ScrapeOutcome, ScrapeResult};
pub use session::ScrapeSession;
pub use site::FeedSite;
