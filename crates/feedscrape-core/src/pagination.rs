use crate::Result;
use crate::config::PaginationConfig;
use crate::page::FeedPage;
use std::time::Instant;

/// Why the scroll loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Height stayed the same for `stable_readings` cycles in a row
    Stabilized,
    IterationCap,
    TimeBudget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationReport {
    pub cycles: u32,
    pub final_height: u64,
    pub stop_reason: StopReason,
}

/// Scrolls a feed until it stops growing
pub struct PaginationController {
    config: PaginationConfig,
}

impl PaginationController {
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    /// Scroll, wait, measure; repeat until the height settles or a bound is hit.
    ///
    /// The caller re-queries the DOM afterwards for the final item set.
    pub async fn run<P: FeedPage + ?Sized>(&self, page: &P) -> Result<PaginationReport> {
        let started = Instant::now();
        let mut last_height = page.document_height().await?;
        let mut unchanged = 0;
        let mut cycles = 0;

        tracing::debug!("Initial document height: {}", last_height);

        let stop_reason = loop {
            if cycles >= self.config.max_iterations {
                break StopReason::IterationCap;
            }
            if let Some(budget) = self.config.time_budget {
                if started.elapsed() >= budget {
                    break StopReason::TimeBudget;
                }
            }

            page.scroll_to_bottom().await?;
            tokio::time::sleep(self.config.scroll_delay).await;
            cycles += 1;

            let height = page.document_height().await?;
            tracing::debug!("Scroll cycle {}: height {} -> {}", cycles, last_height, height);

            if height == last_height {
                unchanged += 1;
                if unchanged >= self.config.stable_readings {
                    break StopReason::Stabilized;
                }
            } else {
                unchanged = 0;
            }
            last_height = height;
        };

        match stop_reason {
            StopReason::Stabilized => {
                tracing::info!("Feed stabilized after {} scroll cycles", cycles)
            }
            StopReason::IterationCap => tracing::warn!(
                "Feed still growing after {} scroll cycles, stopping at cap",
                cycles
            ),
            StopReason::TimeBudget => tracing::warn!(
                "Pagination time budget of {:?} exhausted after {} scroll cycles",
                self.config.time_budget.unwrap_or_default(),
                cycles
            ),
        }

        Ok(PaginationReport {
            cycles,
            final_height: last_height,
            stop_reason,
        })
    }
}
