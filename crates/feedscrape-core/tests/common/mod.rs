#![allow(dead_code)]

use async_trait::async_trait;
use feedscrape_core::page::{BrowserHandle, BrowserLauncher, FeedPage, ItemElement};
use feedscrape_core::{Error, Result, WaitCondition};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Descendant of a fake item
#[derive(Clone, Default)]
pub struct FakeNode {
    attributes: HashMap<String, String>,
    text: Option<String>,
}

impl FakeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }
}

/// In-memory item element keyed by selector
#[derive(Clone, Default)]
pub struct FakeItem {
    nodes: HashMap<String, FakeNode>,
    broken: HashSet<String>,
}

impl FakeItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, selector: &str, node: FakeNode) -> Self {
        self.nodes.insert(selector.to_string(), node);
        self
    }

    /// Lookups on `selector` raise an evaluation error
    pub fn broken(mut self, selector: &str) -> Self {
        self.broken.insert(selector.to_string());
        self
    }

    /// An item shaped like a YouTube search result
    pub fn video(title: &str, href: &str) -> Self {
        Self::new()
            .node(
                "#video-title",
                FakeNode::new().attr("title", title).attr("href", href),
            )
            .node(
                "span.ytd-thumbnail-overlay-time-status-renderer",
                FakeNode::new().text(" 12:05 "),
            )
            .node(
                "yt-formatted-string.metadata-snippet-text",
                FakeNode::new().text("A short description"),
            )
            .node(
                "img.yt-core-image",
                FakeNode::new().attr("src", "https://i.ytimg.com/vi/1/hq.jpg"),
            )
    }

    fn lookup(&self, selector: &str) -> Result<&FakeNode> {
        if self.broken.contains(selector) {
            return Err(Error::Browser(format!("evaluation failed for {}", selector)));
        }
        self.nodes
            .get(selector)
            .ok_or_else(|| Error::ElementNotFound(selector.to_string()))
    }
}

#[async_trait]
impl ItemElement for FakeItem {
    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        Ok(self.lookup(selector)?.attributes.get(name).cloned())
    }

    async fn text(&self, selector: &str) -> Result<Option<String>> {
        Ok(self.lookup(selector)?.text.clone())
    }

    async fn script_text(&self, selector: &str) -> Result<Option<String>> {
        Ok(self.lookup(selector)?.text.clone())
    }
}

#[derive(Default)]
struct PageState {
    heights: Mutex<VecDeque<u64>>,
    last_height: Mutex<u64>,
    scrolls: AtomicU32,
    polls: AtomicU32,
    ready_after: Option<u32>,
    items: Vec<FakeItem>,
    navigations: Mutex<Vec<String>>,
    scroll_fails_after: Option<u32>,
    navigation_stall: Option<Duration>,
}

/// Page double that replays a scripted sequence of document heights
#[derive(Clone)]
pub struct ScriptedPage {
    state: Arc<PageState>,
}

impl ScriptedPage {
    pub fn new(heights: &[u64], items: Vec<FakeItem>) -> Self {
        Self::build(heights, items, Some(0), None)
    }

    /// The first item never shows up
    pub fn never_ready() -> Self {
        Self::build(&[800], vec![], None, None)
    }

    /// Navigation hangs for `stall` before returning
    pub fn stalled_navigation(stall: Duration) -> Self {
        Self {
            state: Arc::new(PageState {
                heights: Mutex::new(VecDeque::from([800])),
                ready_after: Some(0),
                navigation_stall: Some(stall),
                ..PageState::default()
            }),
        }
    }

    /// Scrolling errors once `count` scrolls have succeeded
    pub fn failing_scroll_after(count: u32, items: Vec<FakeItem>) -> Self {
        Self::build(&[800, 1600, 2400], items, Some(0), Some(count))
    }

    fn build(
        heights: &[u64],
        items: Vec<FakeItem>,
        ready_after: Option<u32>,
        scroll_fails_after: Option<u32>,
    ) -> Self {
        Self {
            state: Arc::new(PageState {
                heights: Mutex::new(heights.iter().copied().collect()),
                ready_after,
                items,
                scroll_fails_after,
                ..PageState::default()
            }),
        }
    }

    pub fn scrolls(&self) -> u32 {
        self.state.scrolls.load(Ordering::SeqCst)
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.navigations.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedPage for ScriptedPage {
    type Item = FakeItem;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.state.navigations.lock().unwrap().push(url.to_string());
        if let Some(stall) = self.state.navigation_stall {
            tokio::time::sleep(stall).await;
        }
        Ok(())
    }

    async fn has_item(&self, _selector: &str, _condition: WaitCondition) -> Result<bool> {
        let polls = self.state.polls.fetch_add(1, Ordering::SeqCst);
        Ok(matches!(self.state.ready_after, Some(n) if polls >= n))
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        if let Some(limit) = self.state.scroll_fails_after {
            if self.state.scrolls.load(Ordering::SeqCst) >= limit {
                return Err(Error::Browser("target closed".to_string()));
            }
        }
        self.state.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn document_height(&self) -> Result<u64> {
        let mut last = self.state.last_height.lock().unwrap();
        if let Some(next) = self.state.heights.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(*last)
    }

    async fn items(&self, _selector: &str) -> Result<Vec<FakeItem>> {
        Ok(self.state.items.clone())
    }
}

/// Page double whose height grows by 100 on every reading
pub struct GrowingPage {
    height: AtomicU32,
    scrolls: AtomicU32,
}

impl GrowingPage {
    pub fn new() -> Self {
        Self {
            height: AtomicU32::new(0),
            scrolls: AtomicU32::new(0),
        }
    }

    pub fn scrolls(&self) -> u32 {
        self.scrolls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedPage for GrowingPage {
    type Item = FakeItem;

    async fn navigate(&self, _url: &str) -> Result<()> {
        Ok(())
    }

    async fn has_item(&self, _selector: &str, _condition: WaitCondition) -> Result<bool> {
        Ok(true)
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn document_height(&self) -> Result<u64> {
        Ok(u64::from(self.height.fetch_add(100, Ordering::SeqCst) + 100))
    }

    async fn items(&self, _selector: &str) -> Result<Vec<FakeItem>> {
        Ok(vec![])
    }
}

/// Launcher handing out one scripted page and recording browser release
#[derive(Clone)]
pub struct FakeLauncher {
    page: ScriptedPage,
    closed: Arc<AtomicBool>,
    fail_launch: bool,
    fail_close: bool,
}

impl FakeLauncher {
    pub fn new(page: ScriptedPage) -> Self {
        Self {
            page,
            closed: Arc::new(AtomicBool::new(false)),
            fail_launch: false,
            fail_close: false,
        }
    }

    pub fn failing_launch(page: ScriptedPage) -> Self {
        Self {
            fail_launch: true,
            ..Self::new(page)
        }
    }

    pub fn failing_close(page: ScriptedPage) -> Self {
        Self {
            fail_close: true,
            ..Self::new(page)
        }
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub struct FakeBrowser {
    page: ScriptedPage,
    closed: Arc<AtomicBool>,
    fail_close: bool,
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    type Browser = FakeBrowser;

    async fn launch(&self, _headless: bool) -> Result<FakeBrowser> {
        if self.fail_launch {
            return Err(Error::Browser("chrome not found".to_string()));
        }
        Ok(FakeBrowser {
            page: self.page.clone(),
            closed: self.closed.clone(),
            fail_close: self.fail_close,
        })
    }
}

#[async_trait]
impl BrowserHandle for FakeBrowser {
    type Page = ScriptedPage;

    async fn open_page(&mut self) -> Result<ScriptedPage> {
        Ok(self.page.clone())
    }

    async fn close(self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        if self.fail_close {
            return Err(Error::Browser("browser already gone".to_string()));
        }
        Ok(())
    }
}

/// Log lines captured from `tracing`
#[derive(Clone, Default)]
pub struct CapturedLogs {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl CapturedLogs {
    /// Number of events at `level` whose message contains `needle`
    pub fn count(&self, level: Level, needle: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, m)| *l == level && m.contains(needle))
            .count()
    }

    pub fn count_level(&self, level: Level) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

/// Install a capturing subscriber for the current thread
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry().with(logs.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
