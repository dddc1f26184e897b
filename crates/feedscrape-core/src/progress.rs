use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Receives milestone updates from a running session
pub trait ProgressReporter: Send + Sync {
    /// Overall completion, 0..=100
    fn report_progress(&self, percent: u8);

    fn report_status(&self, text: &str);
}

/// Fire-and-forget wrapper: a misbehaving reporter is logged, never propagated
#[derive(Clone, Default)]
pub(crate) struct Reporter {
    inner: Option<Arc<dyn ProgressReporter>>,
}

impl Reporter {
    pub(crate) fn new(inner: Option<Arc<dyn ProgressReporter>>) -> Self {
        Self { inner }
    }

    pub(crate) fn progress(&self, percent: u8) {
        if let Some(reporter) = &self.inner {
            let percent = percent.min(100);
            if panic::catch_unwind(AssertUnwindSafe(|| reporter.report_progress(percent))).is_err()
            {
                tracing::warn!("Progress reporter panicked at {}%", percent);
            }
        }
    }

    pub(crate) fn status(&self, text: &str) {
        if let Some(reporter) = &self.inner {
            if panic::catch_unwind(AssertUnwindSafe(|| reporter.report_status(text))).is_err() {
                tracing::warn!("Progress reporter panicked on status '{}'", text);
            }
        }
    }
}
