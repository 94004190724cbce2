use jiff::Timestamp;

use crate::{
    fixtures::{ledger_task, template, time},
    models::{
        board_order, weekday_index, Column, DailyBlock, DailySnapshot, ExportBundle, Meeting,
        MeetingDay, Preset, PresetList, Priority, Recurrence, RecurringBlock, Settings,
        SubtaskState, TimeOfDay,
    },
};

#[test]
fn test_time_of_day_parse_and_display() {
    let t: TimeOfDay = "06:05".parse().expect("valid time");
    assert_eq!(t.hour(), 6);
    assert_eq!(t.minute(), 5);
    assert_eq!(t.to_string(), "06:05");
    assert_eq!(t.minutes_since_midnight(), 365);

    assert!("24:00".parse::<TimeOfDay>().is_err());
    assert!("12:60".parse::<TimeOfDay>().is_err());
    assert!("noon".parse::<TimeOfDay>().is_err());
}

#[test]
fn test_time_of_day_minutes_until_wraps_midnight() {
    assert_eq!(time("06:00").minutes_until(time("06:20")), 20);
    assert_eq!(time("23:30").minutes_until(time("00:15")), 45);
    assert_eq!(time("08:00").minutes_until(time("08:00")), 0);
}

#[test]
fn test_time_of_day_serde_uses_hh_mm() {
    let json = serde_json::to_string(&time("18:30")).expect("serialize");
    assert_eq!(json, "\"18:30\"");
    let parsed: TimeOfDay = serde_json::from_str("\"07:45\"").expect("deserialize");
    assert_eq!(parsed, time("07:45"));
    assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
}

#[test]
fn test_recurrence_toggle_and_order() {
    let set = Recurrence::from_days([5, 1, 3]).expect("valid days");
    assert_eq!(set.days().collect::<Vec<_>>(), vec![1, 3, 5]);

    let set = set.toggled(3).toggled(0);
    assert_eq!(set.days().collect::<Vec<_>>(), vec![0, 1, 5]);
    assert!(set.contains(0));
    assert!(!set.contains(3));

    assert_eq!(set.toggled(9), set);
    assert!(Recurrence::from_days([7]).is_err());
}

#[test]
fn test_recurrence_serializes_as_day_list() {
    let json = serde_json::to_string(&Recurrence::weekdays()).expect("serialize");
    assert_eq!(json, "[1,2,3,4,5]");
    assert!(serde_json::from_str::<Recurrence>("[0,8]").is_err());
    assert_eq!(Recurrence::weekdays().to_string(), "sMTWTFs");
}

#[test]
fn test_weekday_index_is_sunday_based() {
    assert_eq!(weekday_index(jiff::civil::date(2026, 10, 11)), 0);
    assert_eq!(weekday_index(jiff::civil::date(2026, 10, 14)), 3);
    assert_eq!(weekday_index(jiff::civil::date(2026, 10, 17)), 6);
}

#[test]
fn test_subtask_state_cycle() {
    assert_eq!(SubtaskState::Default.next(), SubtaskState::Done);
    assert_eq!(SubtaskState::Done.next(), SubtaskState::Skipped);
    assert_eq!(SubtaskState::Skipped.next(), SubtaskState::Default);
    assert_eq!("DONE".parse::<SubtaskState>(), Ok(SubtaskState::Done));
}

#[test]
fn test_column_accepts_legacy_names() {
    assert_eq!("week".parse::<Column>(), Ok(Column::Scheduled));
    assert_eq!("progress".parse::<Column>(), Ok(Column::InProgress));
    let column: Column = serde_json::from_str("\"progress\"").expect("legacy alias");
    assert_eq!(column, Column::InProgress);
    assert_eq!(
        serde_json::to_string(&Column::InProgress).expect("serialize"),
        "\"in_progress\""
    );
}

#[test]
fn test_daily_block_from_template_resets_day_fields() {
    let block = DailyBlock::from_template(&template("b1", "08:00", &[1, 2], &["s1", "s2"]));
    assert_eq!(block.id, "b1");
    assert!(!block.completed && !block.skipped && !block.minimized);
    assert!(block
        .subtasks
        .iter()
        .all(|st| st.state == SubtaskState::Default));
}

#[test]
fn test_daily_block_merge_keeps_surviving_states() {
    let mut block = DailyBlock::from_template(&template("b1", "08:00", &[1], &["s1", "s2"]));
    block.subtasks[0].state = SubtaskState::Done;
    block.subtasks[1].state = SubtaskState::Skipped;
    block.minimized = true;

    let mut edited = template("b1", "09:00", &[1, 2], &["s1", "s3"]);
    edited.title = "Renamed".to_string();
    edited.subtasks[0].title = "Renamed subtask".to_string();

    let merged = block.merged_with(&edited);
    assert_eq!(merged.title, "Renamed");
    assert_eq!(merged.start_time, time("09:00"));
    assert!(merged.minimized);
    assert_eq!(merged.subtasks.len(), 2);
    assert_eq!(merged.subtasks[0].title, "Renamed subtask");
    assert_eq!(merged.subtasks[0].state, SubtaskState::Done);
    assert_eq!(merged.subtasks[1].id, "s3");
    assert_eq!(merged.subtasks[1].state, SubtaskState::Default);
}

#[test]
fn test_snapshot_deserializes_with_defaults() {
    let snapshot: DailySnapshot =
        serde_json::from_str(r#"{"date":"2026-10-14"}"#).expect("minimal snapshot");
    assert!(snapshot.focus_mode);
    assert!(snapshot.blocks.is_empty());
    assert!(snapshot.completed_block_ids.is_empty());
}

#[test]
fn test_template_wire_format_uses_repeat_days() {
    let block = template("b1", "06:00", &[1, 2, 3], &[]);
    let value = serde_json::to_value(&block).expect("serialize");
    assert_eq!(value["repeat_days"], serde_json::json!([1, 2, 3]));
    assert_eq!(value["start_time"], "06:00");
}

#[test]
fn test_ledger_task_move_stamps_completion() {
    let now = Timestamp::from_second(1_760_100_000).expect("valid timestamp");
    let done = ledger_task("t1").moved_to(Column::Done, now);
    assert_eq!(done.completed_at, Some(now));

    let reopened = done.moved_to(Column::InProgress, now);
    assert_eq!(reopened.completed_at, None);
}

#[test]
fn test_board_order_by_priority_then_newest() {
    let mut high = ledger_task("high");
    high.priority = Priority::High;
    let mut old_normal = ledger_task("old");
    old_normal.created_at = Timestamp::from_second(1_000).expect("valid timestamp");
    let new_normal = ledger_task("new");
    let mut low = ledger_task("low");
    low.priority = Priority::Low;

    let mut tasks = vec![low, old_normal, new_normal, high];
    tasks.sort_by(|a, b| board_order(Column::Backlog, a, b));
    let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["high", "new", "old", "low"]);
}

#[test]
fn test_board_order_done_newest_completion_first() {
    let first = ledger_task("first")
        .moved_to(Column::Done, Timestamp::from_second(100).expect("valid timestamp"));
    let second = ledger_task("second")
        .moved_to(Column::Done, Timestamp::from_second(200).expect("valid timestamp"));

    let mut tasks = vec![first, second];
    tasks.sort_by(|a, b| board_order(Column::Done, a, b));
    assert_eq!(tasks[0].id, "second");
}

#[test]
fn test_preset_floor_and_list_edit() {
    assert_eq!(Preset::new(0, 0), Preset::new(1, 1));

    let mut list = PresetList::default();
    assert_eq!(list.active_index(), 1);
    assert_eq!(list.active().work_minutes, 25);
    assert_eq!(list.edit(1, 0, 7), Some(Preset::new(1, 7)));
    assert_eq!(list.active().work_seconds(), 60);
    assert_eq!(list.edit(10, 5, 5), None);
    assert_eq!(list.select(3).map(|p| p.work_minutes), Some(90));
    assert_eq!(list.select(4), None);
    assert_eq!(list.active_index(), 3);
}

#[test]
fn test_preset_durations_are_capped() {
    let preset = Preset::new(u32::MAX, 1000);
    assert_eq!(preset, Preset::new(999, 999));
    assert_eq!(preset.work_seconds(), 59_940);

    let stored: Preset = serde_json::from_str(r#"{"work":4294967295,"break":0}"#).expect("preset");
    assert_eq!(stored.work_seconds(), 59_940);
    assert_eq!(stored.break_seconds(), 60);
}

#[test]
fn test_preset_list_recovers_from_bad_input() {
    let list = PresetList::new(vec![], 7);
    assert_eq!(list.len(), 4);
    assert_eq!(list.active_index(), 3);
}

#[test]
fn test_settings_partial_document_uses_defaults() {
    let settings: Settings =
        serde_json::from_str(r#"{"dayStartsAt":"05:00","bell_enabled":false}"#)
            .expect("partial settings");
    assert!(!settings.bell_enabled);
    assert_eq!(settings.day_starts_at, TimeOfDay::MIDNIGHT);
    assert_eq!(settings.preset_list(), PresetList::default());
}

#[test]
fn test_export_bundle_ignores_unknown_sections() {
    let json = r#"{"masterBlocks":[],"kanbanTasks":[],"dailyState":{"date":"x"},
        "reminders":[{"id":"r","text":"Milk"}],
        "meetings":[{"id":"m","time":"14:00","title":"Call Jim"}]}"#;
    let bundle: ExportBundle = serde_json::from_str(json).expect("bundle");
    assert!(bundle.master_blocks.is_empty());
    assert!(bundle.kanban_tasks.is_empty());
    assert_eq!(bundle.reminders[0].text, "Milk");
    assert_eq!(bundle.meetings[0].time, TimeOfDay::new(14, 0).expect("valid time"));
    assert_eq!(bundle.meetings[0].description, "");
}

#[test]
fn test_export_bundle_without_agenda_sections() {
    let bundle: ExportBundle =
        serde_json::from_str(r#"{"masterBlocks":[],"kanbanTasks":[]}"#).expect("bundle");
    assert!(bundle.reminders.is_empty());
    assert!(bundle.meetings.is_empty());
}

#[test]
fn test_overnight_block_from_old_backup_reads_leniently() {
    let json = r#"{"id":"b1","title":"Night shift","start_time":"23:00","end_time":"01:00",
        "duration_minutes":-1320,"repeat_days":[1],
        "subtasks":[{"id":"s1","title":"Handover","duration_minutes":null}]}"#;
    let block: RecurringBlock = serde_json::from_str(json).expect("block");
    assert_eq!(block.duration_minutes, 0);
    assert_eq!(block.subtasks[0].duration_minutes, 0);
    assert_eq!(block.with_derived_duration().duration_minutes, 120);
}

#[test]
fn test_meeting_day_orders_and_rolls_over() {
    let today = jiff::civil::date(2026, 10, 14);
    let meeting = |id: &str, hour: u8| Meeting {
        id: id.to_string(),
        time: TimeOfDay::new(hour, 0).expect("valid time"),
        title: id.to_string(),
        description: String::new(),
    };

    let mut day = MeetingDay::with_items(today, vec![meeting("late", 16), meeting("early", 9)]);
    day.insert(meeting("noon", 12));
    let order: Vec<_> = day.items.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(order, vec!["early", "noon", "late"]);
    assert_eq!(day.remove("noon").map(|m| m.id), Some("noon".to_string()));
    assert!(day.remove("noon").is_none());

    let kept = MeetingDay::current(Some(day.clone()), today);
    assert_eq!(kept, day);
    let tomorrow = today.tomorrow().expect("valid date");
    let rolled = MeetingDay::current(Some(day), tomorrow);
    assert_eq!(rolled, MeetingDay::empty(tomorrow));
    assert_eq!(MeetingDay::current(None, today), MeetingDay::empty(today));
}
