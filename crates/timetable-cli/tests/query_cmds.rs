//! Integration tests for the timetable query subcommands.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("timetable").unwrap();
    cmd.env_remove("TIMETABLE_DATA_DIR")
        .env_remove("TIMETABLE_FRESHNESS_SECS");
    cmd
}

const CLASS_10A: &str = r#"{
    "created": "01.09.2026",
    "pages": [
        {"page": 1, "tables": [[
            ["Неделя", "Урок", "Пн", "", "Ср"],
            ["1", "1", "Английский 10А.1 201 Смирнова А.В.", "Английский 10А.2 202 Орлова О.О.", "Химия 305 Петрова Е.Н."],
            ["", "2", "Алгебра 210 Иванов И.И.", null, null],
            ["2", "1", "Геометрия 210", null, "Биология 302"]
        ]]}
    ]
}"#;

fn write_fixture(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn fixture() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "10a.json", CLASS_10A);
    (dir, path)
}

#[test]
fn weeks_lists_parities() {
    let (_dir, file) = fixture();
    cmd()
        .args(["weeks", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[test]
fn weeks_json_is_an_array() {
    let (_dir, file) = fixture();
    let output = cmd()
        .args(["weeks", file.to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let weeks: Vec<u32> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(weeks, [1, 2]);
}

#[test]
fn days_in_weekday_order() {
    let (_dir, file) = fixture();
    cmd()
        .args(["days", file.to_str().unwrap(), "--week", "1"])
        .assert()
        .success()
        .stdout("Понедельник\nСреда\n");
}

#[test]
fn days_of_missing_week() {
    let (_dir, file) = fixture();
    cmd()
        .args(["days", file.to_str().unwrap(), "--week", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No lessons in week 3"));
}

#[test]
fn lessons_render_group_splits() {
    let (_dir, file) = fixture();
    cmd()
        .args([
            "lessons",
            file.to_str().unwrap(),
            "--class",
            "10А",
            "--day",
            "Пн",
        ])
        .assert()
        .success()
        .stdout(
            "1 Английский, каб. 201, 10А.1, Смирнова А.В.\n  \
             1 Английский, каб. 202, 10А.2, Орлова О.О.\n\
             2 Алгебра, каб. 210, Иванов И.И.\n",
        );
}

#[test]
fn lessons_html_emphasis() {
    let (_dir, file) = fixture();
    cmd()
        .args([
            "lessons",
            file.to_str().unwrap(),
            "--day",
            "среда",
            "--html",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<b>1-2</b> Химия"));
}

#[test]
fn lessons_json_carries_fields() {
    let (_dir, file) = fixture();
    let output = cmd()
        .args([
            "lessons",
            file.to_str().unwrap(),
            "--week",
            "2",
            "--day",
            "Ср",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["day"], "Среда");
    assert_eq!(json["lessons"][0]["subject"], "Биология");
    assert_eq!(json["lessons"][0]["room"], "302");
    assert_eq!(json["lessons"][0]["hours"], "1");
}

#[test]
fn lessons_invalid_day() {
    let (_dir, file) = fixture();
    cmd()
        .args(["lessons", file.to_str().unwrap(), "--day", "Funday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid weekday"));
}

#[test]
fn dump_text_groups_by_week_and_day() {
    let (_dir, file) = fixture();
    cmd()
        .args(["dump", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 1\n  Понедельник\n    1 Английский"))
        .stdout(predicate::str::contains("Week 2\n  Понедельник\n    1 Геометрия, каб. 210"));
}

#[test]
fn dump_json_structure() {
    let (_dir, file) = fixture();
    let output = cmd()
        .args(["dump", file.to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let weeks = json["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0]["days"][1]["day"], "Среда");
    assert_eq!(weeks[0]["days"][1]["lessons"][0]["hours"], "1-2");
}

#[test]
fn info_reports_created_date() {
    let (_dir, file) = fixture();
    cmd()
        .args(["info", file.to_str().unwrap(), "--class", "10А"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Class: 10А"))
        .stdout(predicate::str::contains("Created: 01.09.2026"))
        .stdout(predicate::str::contains("Weeks: 1, 2"));
}

#[test]
fn cache_dir_receives_entry() {
    let (dir, file) = fixture();
    let cache = dir.path().join("cache");
    cmd()
        .args([
            "weeks",
            file.to_str().unwrap(),
            "--cache-dir",
            cache.to_str().unwrap(),
        ])
        .assert()
        .success();
    assert_eq!(std::fs::read_dir(&cache).unwrap().count(), 1);

    // served from the cache on the second run
    cmd()
        .args([
            "weeks",
            file.to_str().unwrap(),
            "--cache-dir",
            cache.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[test]
fn data_dir_from_environment() {
    let (dir, file) = fixture();
    cmd()
        .env("TIMETABLE_DATA_DIR", dir.path())
        .args(["weeks", file.to_str().unwrap()])
        .assert()
        .success();
    assert!(dir.path().join("schedules").is_dir());
}

#[test]
fn invalid_freshness_setting() {
    let (_dir, file) = fixture();
    cmd()
        .env("TIMETABLE_FRESHNESS_SECS", "soon")
        .args(["weeks", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TIMETABLE_FRESHNESS_SECS"));
}

#[test]
fn missing_file() {
    cmd()
        .args(["weeks", "/nonexistent/10a.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn layout_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(
        &dir,
        "bad.json",
        r#"{"pages": [{"tables": [[["1", "Химия"], ["2", "Физика"]]]}]}"#,
    );
    cmd()
        .args(["weeks", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: page 1: table layout error: weekday headers not found",
        ));
}

#[test]
fn scanned_page_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir, "scan.json", r#"{"pages": [{"scanned": true}]}"#);
    cmd()
        .args(["dump", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scanned image"));
}
