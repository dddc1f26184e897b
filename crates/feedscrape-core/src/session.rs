use crate::artifact::ResultWriter;
use crate::config::ScrapeConfig;
use crate::extractor::FieldExtractor;
use crate::page::{BrowserHandle, BrowserLauncher, FeedPage};
use crate::pagination::PaginationController;
use crate::progress::{ProgressReporter, Reporter};
use crate::record::{ItemRecord, ScrapeResult, current_timestamp};
use crate::site::FeedSite;
use crate::{Error, Result};
use std::sync::Arc;
use url::Url;

/// One end-to-end scrape: launch, navigate, paginate, extract, persist.
///
/// `run` never fails. Every error ends up as a [`ScrapeOutcome::Failed`]
/// result plus a log line, and the browser is closed on every path.
///
/// [`ScrapeOutcome::Failed`]: crate::record::ScrapeOutcome::Failed
pub struct ScrapeSession<L: BrowserLauncher> {
    launcher: L,
    site: FeedSite,
    config: ScrapeConfig,
    writer: Option<ResultWriter>,
    reporter: Reporter,
}

impl<L: BrowserLauncher> ScrapeSession<L> {
    pub fn new(launcher: L, site: FeedSite, config: ScrapeConfig) -> Self {
        Self {
            launcher,
            site,
            config,
            writer: None,
            reporter: Reporter::default(),
        }
    }

    /// Persist every result through `writer`
    pub fn with_writer(mut self, writer: ResultWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = Reporter::new(Some(reporter));
        self
    }

    pub async fn run(&self, query: &str) -> ScrapeResult {
        let timestamp = current_timestamp();
        self.reporter.progress(0);
        self.reporter.status("Starting search...");

        let result = match self.scrape(query).await {
            Ok(records) => ScrapeResult::completed(timestamp, query.to_string(), records),
            Err(e) => {
                tracing::error!("Error while scraping '{}': {}", query, e);
                self.reporter
                    .status("Error occurred while fetching video data.");
                ScrapeResult::failed(timestamp, query.to_string(), e.to_string())
            }
        };

        self.reporter.progress(75);

        if let Some(writer) = &self.writer {
            match writer.write(&result) {
                Ok(_) => self
                    .reporter
                    .status("Saved video data to JSON file and displaying results..."),
                Err(e) => tracing::error!("Failed to save results: {}", e),
            }
        }

        self.reporter.progress(100);
        self.reporter.status("Completed!");

        result
    }

    /// Owns the browser for the duration of one scrape
    async fn scrape(&self, query: &str) -> Result<Vec<ItemRecord>> {
        self.config.validate()?;
        let url = self.site.search_url(query)?;

        let mut browser = self.launcher.launch(self.config.headless).await?;
        let outcome = self.scrape_page(&mut browser, &url, query).await;

        if let Err(e) = browser.close().await {
            tracing::error!("Failed to release browser: {}", e);
        }

        outcome
    }

    async fn scrape_page(
        &self,
        browser: &mut L::Browser,
        url: &Url,
        query: &str,
    ) -> Result<Vec<ItemRecord>> {
        let page = browser.open_page().await?;

        tracing::info!("Accessing {} for query: {}", self.site.name, query);
        self.reporter
            .status(&format!("Accessing {}...", self.site.name));
        self.load_feed(&page, url).await?;
        self.reporter.progress(50);
        self.reporter.status(
            "Fetching video titles, URLs, descriptions, thumbnails, and durations...",
        );

        let controller = PaginationController::new(self.config.pagination.clone());
        match controller.run(&page).await {
            Ok(report) => tracing::debug!(
                "Pagination finished: {} cycles, height {}, {:?}",
                report.cycles,
                report.final_height,
                report.stop_reason
            ),
            Err(e) => tracing::warn!("Pagination interrupted, extracting loaded items: {}", e),
        }

        let items = page.items(&self.site.item_selector).await?;
        tracing::info!("Found {} item elements", items.len());

        let extractor = FieldExtractor::new(&self.site);
        let mut records = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match extractor.extract(item).await {
                Ok(record) => {
                    tracing::debug!(
                        "Found video: {} ({}) [Duration: {}] [Thumbnail: {}]",
                        record.title,
                        record.url,
                        record.duration_display,
                        record.thumbnail_url.as_deref().unwrap_or("none")
                    );
                    records.push(record);
                }
                Err(rejection) => {
                    tracing::error!("Skipping video element {}: {}", index, rejection)
                }
            }
        }

        tracing::info!("Extracted {} of {} videos", records.len(), items.len());
        Ok(records)
    }

    /// Navigate and wait for the first item.
    ///
    /// Both steps share `initial_load_timeout`, so a stalled page load also
    /// ends in [`Error::NavigationTimeout`].
    async fn load_feed<P: FeedPage>(&self, page: &P, url: &Url) -> Result<()> {
        tokio::time::timeout(
            self.config.initial_load_timeout,
            self.navigate_and_wait(page, url),
        )
        .await
        .map_err(|_| Error::NavigationTimeout(self.config.initial_load_timeout))?
    }

    /// Poll until the first item satisfies the wait condition
    async fn navigate_and_wait<P: FeedPage>(&self, page: &P, url: &Url) -> Result<()> {
        let selector = &self.site.item_selector;
        let condition = self.config.wait_condition;

        page.navigate(url.as_str()).await?;
        loop {
            match page.has_item(selector, condition).await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(e) => tracing::debug!("Feed not ready yet: {}", e),
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
