mod common;

use common::{GrowingPage, ScriptedPage};
use feedscrape_core::PaginationConfig;
use feedscrape_core::pagination::{PaginationController, StopReason};
use std::time::Duration;

fn config(max_iterations: u32, stable_readings: u32) -> PaginationConfig {
    PaginationConfig {
        scroll_delay: Duration::ZERO,
        max_iterations,
        stable_readings,
        time_budget: None,
    }
}

#[tokio::test]
async fn test_stops_when_height_repeats() {
    let page = ScriptedPage::new(&[800, 1600, 1600], vec![]);
    let controller = PaginationController::new(config(50, 1));

    let report = controller.run(&page).await.unwrap();

    assert_eq!(report.cycles, 2);
    assert_eq!(page.scrolls(), 2);
    assert_eq!(report.final_height, 1600);
    assert_eq!(report.stop_reason, StopReason::Stabilized);
}

#[tokio::test]
async fn test_static_page_needs_one_cycle() {
    let page = ScriptedPage::new(&[800, 800], vec![]);
    let controller = PaginationController::new(config(50, 1));

    let report = controller.run(&page).await.unwrap();

    assert_eq!(report.cycles, 1);
    assert_eq!(report.stop_reason, StopReason::Stabilized);
}

#[tokio::test]
async fn test_growing_feed_stops_at_iteration_cap() {
    let page = GrowingPage::new();
    let controller = PaginationController::new(config(7, 1));

    let report = controller.run(&page).await.unwrap();

    assert_eq!(report.cycles, 7);
    assert_eq!(page.scrolls(), 7);
    assert_eq!(report.stop_reason, StopReason::IterationCap);
}

#[tokio::test]
async fn test_stable_readings_tolerate_jitter() {
    // One flat reading is treated as jitter when two are required
    let page = ScriptedPage::new(&[800, 1600, 1600, 2400, 2400, 2400], vec![]);
    let controller = PaginationController::new(config(50, 2));

    let report = controller.run(&page).await.unwrap();

    assert_eq!(report.cycles, 5);
    assert_eq!(report.final_height, 2400);
    assert_eq!(report.stop_reason, StopReason::Stabilized);
}

#[tokio::test]
async fn test_time_budget_bounds_loop() {
    let page = GrowingPage::new();
    let controller = PaginationController::new(PaginationConfig {
        scroll_delay: Duration::from_millis(20),
        max_iterations: 10_000,
        stable_readings: 1,
        time_budget: Some(Duration::from_millis(100)),
    });

    let report = controller.run(&page).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::TimeBudget);
    assert!(report.cycles < 10_000);
}

#[tokio::test]
async fn test_scroll_failure_propagates() {
    let page = ScriptedPage::failing_scroll_after(1, vec![]);
    let controller = PaginationController::new(config(50, 1));

    assert!(controller.run(&page).await.is_err());
    assert_eq!(page.scrolls(), 1);
}
