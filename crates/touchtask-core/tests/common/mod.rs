#![allow(dead_code)]

use jiff::civil::{date, Date};
use tempfile::TempDir;
use touchtask_core::{FixedClock, Planner, PlannerBuilder, TimeOfDay};

/// Wednesday, weekday index 3.
pub fn wednesday() -> Date {
    date(2026, 10, 14)
}

pub fn time(value: &str) -> TimeOfDay {
    value.parse().expect("valid time of day")
}

/// Opens a planner on the given database with the clock pinned to `at`.
pub async fn planner_at(temp_dir: &TempDir, day: Date, at: &str) -> Planner {
    PlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_clock(FixedClock::at(day, time(at)))
        .build()
        .await
        .expect("Failed to create planner")
}

/// Helper function to create a test planner on Wednesday morning
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let planner = planner_at(&temp_dir, wednesday(), "09:00").await;
    (temp_dir, planner)
}
