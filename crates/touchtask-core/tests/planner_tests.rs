mod common;

use common::{create_test_planner, planner_at, time, wednesday};
use touchtask_core::{
    models::{weekday_index, Recurrence},
    params::{CompleteBlock, Confirm, CreateTemplate, CycleSubtask, Id, ImportData, SubtaskInput},
    ExportBundle, SubtaskState,
};

fn workday_block(title: &str, start: &str, end: &str) -> CreateTemplate {
    CreateTemplate {
        title: title.to_string(),
        description: Some("Integration block".to_string()),
        start_time: time(start),
        end_time: time(end),
        category: None,
        tags: vec!["test".to_string()],
        repeat_days: vec![1, 2, 3, 4, 5],
        subtasks: vec![SubtaskInput {
            id: None,
            title: "First step".to_string(),
            duration_minutes: 5,
            optional: false,
        }],
    }
}

#[tokio::test]
async fn test_complete_day_workflow() {
    let (temp_dir, planner) = create_test_planner().await;
    planner
        .clear_all_data(&Confirm { confirmed: true })
        .await
        .expect("Failed to clear data");

    let block = planner
        .create_template(&workday_block("Deep Work", "10:00", "12:00"))
        .await
        .expect("Failed to create block");
    assert_eq!(block.recurrence, Recurrence::weekdays());
    assert_eq!(weekday_index(wednesday()), 3);

    // Reconcile with no prior snapshot shows the block in focus mode
    let overview = planner.day_overview().await.expect("Failed to load day");
    assert!(overview.focus_mode);
    assert_eq!(overview.visible.len(), 1);

    let subtask_id = block.subtasks[0].id.clone();
    let updated = planner
        .cycle_subtask(&CycleSubtask {
            block_id: block.id.clone(),
            subtask_id,
        })
        .await
        .expect("Failed to cycle sub-step");
    assert_eq!(updated.subtasks[0].state, SubtaskState::Done);

    planner
        .complete_block(&CompleteBlock {
            id: block.id.clone(),
            skipped: false,
        })
        .await
        .expect("Failed to complete block");
    let snapshot = planner.today().await.expect("Failed to load day");
    assert_eq!(snapshot.completed_block_ids, vec![block.id.clone()]);

    planner
        .restore_block(&Id {
            id: block.id.clone(),
        })
        .await
        .expect("Failed to restore block");

    // A second process on the same day sees the same progress
    let reopened = planner_at(&temp_dir, wednesday(), "23:59").await;
    let overview = reopened.day_overview().await.expect("Failed to load day");
    assert_eq!(overview.visible.len(), 1);
    assert_eq!(overview.visible[0].subtasks[0].state, SubtaskState::Done);
    assert!(overview.completed.is_empty());
    assert!(overview.to_string().contains("Deep Work (behind)"));
}

#[tokio::test]
async fn test_export_uses_backup_field_names() {
    let (_temp_dir, planner) = create_test_planner().await;
    let bundle = planner.export_data().await.expect("Failed to export");

    let json = serde_json::to_value(&bundle).expect("Failed to serialize");
    assert!(json["masterBlocks"].is_array());
    assert!(json["kanbanTasks"].is_array());
    assert_eq!(json["masterBlocks"].as_array().map(Vec::len), Some(8));
}

#[tokio::test]
async fn test_import_accepts_legacy_column_names() {
    let (_temp_dir, planner) = create_test_planner().await;
    let json = r#"{
        "masterBlocks": [{
            "id": "b1",
            "title": "Evening Review",
            "start_time": "20:00",
            "end_time": "20:30",
            "duration_minutes": 30,
            "repeat_days": [0, 3, 6],
            "subtasks": []
        }],
        "kanbanTasks": [{
            "id": "t1",
            "title": "Plan sprint",
            "column": "week",
            "created_at": "2026-10-10T08:00:00Z"
        }],
        "reminders": []
    }"#;
    let bundle: ExportBundle = serde_json::from_str(json).expect("Failed to parse bundle");

    let unconfirmed = planner
        .import_data(&ImportData {
            bundle: bundle.clone(),
            confirmed: false,
        })
        .await;
    assert!(unconfirmed.is_err());

    let today = planner
        .import_data(&ImportData {
            bundle,
            confirmed: true,
        })
        .await
        .expect("Failed to import");
    assert_eq!(today.blocks.len(), 1);
    assert_eq!(today.blocks[0].title, "Evening Review");

    let board = planner.task_board().await.expect("Failed to load board");
    assert_eq!(board.column(touchtask_core::Column::Scheduled).len(), 1);
}
