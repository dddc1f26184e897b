//! Chrome DevTools Protocol backend for the feedscrape engine

mod chrome_finder;
mod error;
mod launcher;
mod page;
mod profile;

pub use chrome_finder::ChromeFinder;
pub use error::{Error, Result};
pub use launcher::{ChromeBrowser, ChromeLauncher};
pub use page::{ChromeItem, ChromePage};
pub use profile::ProfileManager;
