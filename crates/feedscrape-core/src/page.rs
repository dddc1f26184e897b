//! Seams between the engine and a live browser.
//!
//! The engine only talks to these traits. `feedscrape-browser` implements them
//! over the Chrome DevTools Protocol; tests implement them with scripted doubles.

use crate::Result;
use crate::config::WaitCondition;
use async_trait::async_trait;

/// One rendered feed item, queried relative to its own subtree
#[async_trait]
pub trait ItemElement: Send + Sync {
    /// Attribute `name` of the first descendant matching `selector`.
    ///
    /// `Err` when the lookup fails or nothing matches, `Ok(None)` when the
    /// element exists but does not carry the attribute.
    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>>;

    /// Rendered text of the first descendant matching `selector`
    async fn text(&self, selector: &str) -> Result<Option<String>>;

    /// `innerText` of the first descendant matching `selector`, read by a
    /// script evaluated against this element
    async fn script_text(&self, selector: &str) -> Result<Option<String>>;
}

/// A page showing an infinite-scroll feed
#[async_trait]
pub trait FeedPage: Send + Sync {
    type Item: ItemElement;

    async fn navigate(&self, url: &str) -> Result<()>;

    /// Whether at least one element matching `selector` satisfies `condition`
    async fn has_item(&self, selector: &str, condition: WaitCondition) -> Result<bool>;

    async fn scroll_to_bottom(&self) -> Result<()>;

    /// Current `scrollHeight` of the document element
    async fn document_height(&self) -> Result<u64>;

    /// Every element currently in the DOM matching `selector`, in document order
    async fn items(&self, selector: &str) -> Result<Vec<Self::Item>>;
}

/// Starts a browser instance
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Browser: BrowserHandle;

    async fn launch(&self, headless: bool) -> Result<Self::Browser>;
}

/// An exclusively owned running browser
#[async_trait]
pub trait BrowserHandle: Send + Sized {
    type Page: FeedPage;

    async fn open_page(&mut self) -> Result<Self::Page>;

    /// Shut the browser down and release its process
    async fn close(self) -> Result<()>;
}
