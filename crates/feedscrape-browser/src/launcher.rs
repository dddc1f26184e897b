use crate::page::ChromePage;
use crate::{ChromeFinder, Error, ProfileManager};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use feedscrape_core::page::{BrowserHandle, BrowserLauncher};
use futures::StreamExt;
use std::path::PathBuf;
use tokio::task::JoinHandle;

const DEFAULT_WINDOW_SIZE: (u32, u32) = (1366, 2000);

/// Launches Chrome instances for scrape sessions
#[derive(Debug, Clone, Default)]
pub struct ChromeLauncher {
    chrome_path: Option<PathBuf>,
    profile_dir: Option<PathBuf>,
    window_size: Option<(u32, u32)>,
}

impl ChromeLauncher {
    pub fn new(chrome_path: Option<PathBuf>) -> Self {
        Self {
            chrome_path,
            ..Self::default()
        }
    }

    /// Keep the user-data directory between launches instead of a throwaway one
    pub fn with_profile_dir(mut self, dir: PathBuf) -> Self {
        self.profile_dir = Some(dir);
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    /// Browser configuration for one launch
    fn build_config(
        &self,
        executable: PathBuf,
        profile: &ProfileManager,
        headless: bool,
    ) -> crate::Result<BrowserConfig> {
        let (width, height) = self.window_size.unwrap_or(DEFAULT_WINDOW_SIZE);

        let mut builder = BrowserConfig::builder()
            .chrome_executable(executable)
            .user_data_dir(profile.path())
            .window_size(width, height)
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check");

        if !headless {
            builder = builder.with_head();
        }

        builder.build().map_err(Error::Browser)
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    type Browser = ChromeBrowser;

    async fn launch(&self, headless: bool) -> feedscrape_core::Result<ChromeBrowser> {
        let executable = ChromeFinder::new(self.chrome_path.clone()).find()?;
        let profile = match &self.profile_dir {
            Some(dir) => ProfileManager::persistent(dir.clone())?,
            None => ProfileManager::temporary()?,
        };

        tracing::info!(
            "Launching Chrome at {} ({})",
            executable.display(),
            if headless { "headless" } else { "headed" }
        );

        let config = self.build_config(executable, &profile, headless)?;
        let (browser, mut handler) = Browser::launch(config).await.map_err(Error::from)?;

        // The handler must be polled for any CDP command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        tracing::debug!("Chrome launched with profile {}", profile.path().display());

        Ok(ChromeBrowser {
            browser,
            handler_task,
            profile,
        })
    }
}

/// A running Chrome owned by one session.
///
/// Dropping it without [`BrowserHandle::close`] still kills the process.
pub struct ChromeBrowser {
    browser: Browser,
    handler_task: JoinHandle<()>,
    // Dropped last so the profile outlives the process using it
    profile: ProfileManager,
}

#[async_trait]
impl BrowserHandle for ChromeBrowser {
    type Page = ChromePage;

    async fn open_page(&mut self) -> feedscrape_core::Result<ChromePage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(Error::from)?;
        Ok(ChromePage::new(page))
    }

    async fn close(mut self) -> feedscrape_core::Result<()> {
        tracing::debug!(
            "Closing Chrome (profile {}, temporary: {})",
            self.profile.path().display(),
            self.profile.is_temporary()
        );

        if let Err(e) = self.browser.close().await {
            self.handler_task.abort();
            return Err(Error::from(e).into());
        }
        self.browser.wait().await.map_err(Error::from)?;
        self.handler_task.abort();

        tracing::info!("Chrome closed");
        Ok(())
    }
}

impl Drop for ChromeBrowser {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
