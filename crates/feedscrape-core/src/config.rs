use crate::{Error, Result};
use std::time::Duration;

/// What "loaded" means for the first feed item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaitCondition {
    /// Attached to the DOM
    #[default]
    Presence,
    /// Attached and rendered with a non-empty layout box
    Visibility,
}

/// Bounds for the scroll-until-stable loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Pause after each scroll before measuring the document
    pub scroll_delay: Duration,
    /// Hard cap on scroll cycles
    pub max_iterations: u32,
    /// Consecutive unchanged height readings that count as "stable"
    pub stable_readings: u32,
    /// Optional wall-clock cap on the whole loop
    pub time_budget: Option<Duration>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            scroll_delay: Duration::from_secs(2),
            max_iterations: 50,
            stable_readings: 1,
            time_budget: None,
        }
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::Config(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.stable_readings == 0 {
            return Err(Error::Config(
                "stable_readings must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-session settings supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub headless: bool,
    /// Upper bound on waiting for the first item after navigation
    pub initial_load_timeout: Duration,
    /// How often the page is polled while waiting for the first item
    pub poll_interval: Duration,
    pub wait_condition: WaitCondition,
    pub pagination: PaginationConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            headless: true,
            initial_load_timeout: Duration::from_secs(20),
            poll_interval: Duration::from_millis(250),
            wait_condition: WaitCondition::Presence,
            pagination: PaginationConfig::default(),
        }
    }
}

impl ScrapeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(Error::Config("poll_interval must be non-zero".to_string()));
        }
        self.pagination.validate()
    }
}
