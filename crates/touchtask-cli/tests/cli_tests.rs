use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn tt_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tt").expect("Failed to find tt binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path.to_str().unwrap());
    cmd
}

fn stdout_of(db_path: &Path, args: &[&str]) -> String {
    let output = tt_cmd(db_path).args(args).assert().success().get_output().clone();
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

/// Pulls the ID out of a "Created ... with ID: <id>" line
fn created_id(output: &str) -> String {
    output
        .lines()
        .find_map(|line| line.split_once("with ID: ").map(|(_, id)| id.trim().to_string()))
        .expect("No created ID in output")
}

/// Pulls the backquoted ID from the first line mentioning `title`
fn subtask_id(output: &str, title: &str) -> String {
    let line = output
        .lines()
        .find(|line| line.contains(title))
        .expect("Sub-step not in output");
    line.split('`').nth(1).expect("No ID on sub-step line").to_string()
}

#[test]
fn test_cli_no_command_shows_today() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"))
        .stdout(predicate::str::contains("Focus mode: on"));
}

#[test]
fn test_cli_block_list_shows_seeded_routine() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["block", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Recurring Blocks"))
        .stdout(predicate::str::contains("Morning Identity Primer"))
        .stdout(predicate::str::contains("Evening Shutdown"));
}

#[test]
fn test_cli_block_day_workflow() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let output = stdout_of(
        &db_path,
        &[
            "block",
            "add",
            "Daily Stretch",
            "--start",
            "00:00",
            "--end",
            "23:30",
            "--days",
            "sun,mon,tue,wed,thu,fri,sat",
            "--step",
            "Neck rolls:2",
            "--optional-step",
            "Foam roller:10",
        ],
    );
    assert!(output.contains("Created block with ID:"));
    assert!(output.contains("Repeats: SMTWTFS"));
    let block_id = created_id(&output);
    let step_id = subtask_id(&output, "Neck rolls");

    tt_cmd(&db_path)
        .args(["day", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily Stretch"))
        .stdout(predicate::str::contains("0/2 sub-steps"));

    tt_cmd(&db_path)
        .args(["subtask", "cycle", &block_id, &step_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Sub-step is now done"));

    tt_cmd(&db_path)
        .args(["block", "complete", &block_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("as done"));

    tt_cmd(&db_path)
        .args(["day", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Completed"))
        .stdout(predicate::str::contains("~~Daily Stretch~~ (done)"));

    tt_cmd(&db_path)
        .args(["block", "restore", &block_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored block 'Daily Stretch'"));
}

#[test]
fn test_cli_block_edit_keeps_matching_sub_steps() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let output = stdout_of(
        &db_path,
        &[
            "block", "add", "Reading", "-s", "21:00", "-e", "21:45", "--step", "Pick a book:1",
        ],
    );
    let block_id = created_id(&output);
    let step_id = subtask_id(&output, "Pick a book");

    let output = stdout_of(
        &db_path,
        &[
            "block",
            "edit",
            &block_id,
            "--title",
            "Evening Reading",
            "--step",
            "Pick a book:2",
            "--step",
            "Read a chapter:30",
        ],
    );
    assert!(output.contains("Updated block with ID:"));
    assert!(output.contains("Evening Reading"));
    assert_eq!(subtask_id(&output, "Pick a book"), step_id);
}

#[test]
fn test_cli_block_repeat_toggle() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let output = stdout_of(
        &db_path,
        &["block", "add", "Piano", "-s", "18:00", "-e", "18:30", "--days", "1,3"],
    );
    let block_id = created_id(&output);

    tt_cmd(&db_path)
        .args(["block", "repeat", &block_id, "friday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now repeats on sMtWtFs"));

    tt_cmd(&db_path)
        .args(["block", "repeat", &block_id, "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_cli_block_delete() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let output = stdout_of(&db_path, &["block", "add", "Nap", "-s", "13:00", "-e", "13:20"]);
    let block_id = created_id(&output);

    tt_cmd(&db_path)
        .args(["block", "delete", &block_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted block 'Nap'"));

    tt_cmd(&db_path)
        .args(["block", "show", &block_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_complete_unknown_block_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["block", "complete", "missing-block"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to complete block"));
}

#[test]
fn test_cli_task_lifecycle() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let output = stdout_of(
        &db_path,
        &["task", "add", "Write report", "-c", "Work", "-p", "high", "--logged", "30"],
    );
    assert!(output.contains("Created task with ID:"));
    assert!(output.contains("- Priority: high"));
    let task_id = created_id(&output);

    tt_cmd(&db_path)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Backlog (1)"))
        .stdout(predicate::str::contains("**Write report**"));

    tt_cmd(&db_path)
        .args(["task", "edit", &task_id, "--logged", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes made:"))
        .stdout(predicate::str::contains("- Logged: 10m"));

    tt_cmd(&db_path)
        .args(["task", "move", &task_id, "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved task 'Write report' to Done"));

    tt_cmd(&db_path)
        .args(["task", "show", &task_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Completed:"));

    tt_cmd(&db_path)
        .args(["task", "clear-done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 done task(s)"));

    tt_cmd(&db_path)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_cli_task_move_accepts_legacy_column_name() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let task_id = created_id(&stdout_of(&db_path, &["task", "add", "Plan week"]));

    tt_cmd(&db_path)
        .args(["task", "move", &task_id, "week"])
        .assert()
        .success()
        .stdout(predicate::str::contains("to Scheduled"));
}

#[test]
fn test_cli_task_add_rejects_blank_title() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["task", "add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to add task"));
}

#[test]
fn test_cli_delete_missing_task_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["task", "delete", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to delete task"));
}

#[test]
fn test_cli_day_reset_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["day", "reset"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to reset today"));

    tt_cmd(&db_path)
        .args(["day", "reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Rebuilt today's schedule"));
}

#[test]
fn test_cli_focus_mode_toggles() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["day", "focus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus mode is now off"));

    tt_cmd(&db_path)
        .args(["day", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus mode: off"));
}

#[test]
fn test_cli_timer_presets() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["timer", "presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. 25/5 (active)"))
        .stdout(predicate::str::contains("Bell: on"));

    tt_cmd(&db_path)
        .args(["timer", "select", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active preset is now 50/10"));

    tt_cmd(&db_path)
        .args(["timer", "edit", "1", "--work", "0", "--break", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preset 1 is now 1/3"));

    tt_cmd(&db_path)
        .args(["timer", "edit", "4", "--work", "4294967295", "--break", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preset 4 is now 999/5"));

    tt_cmd(&db_path)
        .args(["timer", "select", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to select preset"));

    tt_cmd(&db_path)
        .args(["timer", "bell", "off"])
        .assert()
        .success();

    tt_cmd(&db_path)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Bell: off"))
        .stdout(predicate::str::contains("3. 50/10 (active)"));
}

#[test]
fn test_cli_timer_run_unknown_task_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["timer", "run", "missing-task"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task with ID missing-task not found"));
}

#[test]
fn test_cli_settings_set() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["settings", "set", "--day-starts-at", "04:00", "--clock", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Day starts at: 04:00"))
        .stdout(predicate::str::contains("- Clock: 12-hour"));

    tt_cmd(&db_path)
        .args(["settings", "set", "--day-starts-at", "25:00"])
        .assert()
        .failure();
}

#[test]
fn test_cli_data_export_clear_import() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let backup = temp_dir.path().join("backup.json");
    let backup_arg = backup.to_str().unwrap();

    tt_cmd(&db_path)
        .args(["task", "add", "Keep me"])
        .assert()
        .success();

    tt_cmd(&db_path)
        .args(["reminder", "add", "Water plants"])
        .assert()
        .success();

    tt_cmd(&db_path)
        .args(["data", "export", backup_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 8 blocks and 1 tasks"));

    let json = std::fs::read_to_string(&backup).unwrap();
    assert!(json.contains("\"masterBlocks\""));
    assert!(json.contains("\"kanbanTasks\""));
    assert!(json.contains("\"reminders\""));

    tt_cmd(&db_path)
        .args(["data", "clear"])
        .assert()
        .failure();

    tt_cmd(&db_path)
        .args(["data", "clear", "--yes"])
        .assert()
        .success();

    tt_cmd(&db_path)
        .args(["block", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No blocks found."));

    tt_cmd(&db_path)
        .args(["reminder", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reminders."));

    tt_cmd(&db_path)
        .args(["data", "import", backup_arg, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 8 blocks and 1 tasks"));

    tt_cmd(&db_path)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep me"));

    tt_cmd(&db_path)
        .args(["reminder", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Water plants"));
}

#[test]
fn test_cli_export_to_stdout() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let output = stdout_of(&db_path, &["data", "export", "-"]);
    let bundle: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(bundle["masterBlocks"].as_array().unwrap().len(), 8);
    assert!(bundle["kanbanTasks"].as_array().unwrap().is_empty());
}

#[test]
fn test_cli_import_rejects_malformed_file() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let backup = temp_dir.path().join("broken.json");
    std::fs::write(&backup, "{ not json").unwrap();

    tt_cmd(&db_path)
        .args(["data", "import", backup.to_str().unwrap(), "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse backup file"));
}

#[test]
fn test_cli_demo_data() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["data", "demo", "--yes"])
        .assert()
        .success();

    tt_cmd(&db_path)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to TouchTask!"));
}

#[test]
fn test_cli_demo_data_includes_agenda() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["data", "demo", "--yes"])
        .assert()
        .success();

    tt_cmd(&db_path)
        .args(["reminder", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy Milk"))
        .stdout(predicate::str::contains("Follow up on Jim's email"));

    tt_cmd(&db_path)
        .args(["meeting", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Call Jim"));
}

#[test]
fn test_cli_reminder_workflow() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["reminder", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reminders."));

    let output = stdout_of(&db_path, &["reminder", "add", "Buy Eggs"]);
    let id = created_id(&output);

    tt_cmd(&db_path)
        .args(["r", "l"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy Eggs"));

    tt_cmd(&db_path)
        .args(["reminder", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted reminder 'Buy Eggs'"));

    tt_cmd(&db_path)
        .args(["reminder", "delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    tt_cmd(&db_path)
        .args(["reminder", "add", "  "])
        .assert()
        .failure();
}

#[test]
fn test_cli_meeting_workflow() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tt_cmd(&db_path)
        .args(["meeting", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No meetings today."));

    let late = created_id(&stdout_of(&db_path, &["meeting", "add", "16:00", "Retro"]));
    stdout_of(&db_path, &["meeting", "add", "09:30", "Standup", "-d", "Room 4"]);

    let listing = stdout_of(&db_path, &["meeting", "list"]);
    let standup = listing.find("Standup").expect("Standup listed");
    let retro = listing.find("Retro").expect("Retro listed");
    assert!(standup < retro, "meetings are ordered by time");
    assert!(listing.contains("Room 4"));

    tt_cmd(&db_path)
        .args(["meeting", "edit", &late, "--time", "08:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved to 08:00"));

    let listing = stdout_of(&db_path, &["m", "l"]);
    assert!(listing.find("Retro") < listing.find("Standup"));

    tt_cmd(&db_path)
        .args(["meeting", "add", "25:00", "Nope"])
        .assert()
        .failure();

    tt_cmd(&db_path)
        .args(["meeting", "delete", &late])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted meeting 'Retro' at 08:00"));
}
