use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with plain output and no delays
fn eva_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("eva").expect("Failed to find eva binary");
    cmd.args([
        "--no-color",
        "--typing-delay-ms",
        "0",
        "--response-delay-ms",
        "0",
        "--database-file",
    ])
    .arg(db_path);
    cmd
}

#[test]
fn test_cli_history_bootstraps_conversation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    eva_cmd(&db_path)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("**Eva**"))
        .stdout(predicate::str::contains("Я помогаю людям"))
        .stdout(predicate::str::contains("1. Выглядит впечатляюще 🤩"));
}

#[test]
fn test_cli_default_command_is_history() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    eva_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Во мне собраны десятки"));
}

#[test]
fn test_cli_say_choice_by_number() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    eva_cmd(&db_path).arg("history").assert().success();

    eva_cmd(&db_path)
        .args(["say", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("> Выглядит впечатляюще 🤩"))
        .stdout(predicate::str::contains("Замечательно"))
        .stdout(predicate::str::contains("1. Запустить курс 🚀"))
        .stdout(predicate::str::contains("Я помогаю людям").not());
}

#[test]
fn test_cli_say_label_text() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    eva_cmd(&db_path)
        .args(["say", "Выглядит", "впечатляюще", "🤩"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Знаешь, что в этом курсе"));
}

#[test]
fn test_cli_say_unknown_answer_completes_stage() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    eva_cmd(&db_path)
        .args(["say", "не", "знаю"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Мы завершили этот этап"));

    eva_cmd(&db_path)
        .args(["say", "ритуал"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Твой ритуал помогает"));
}

#[test]
fn test_cli_history_survives_restart() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    eva_cmd(&db_path).args(["say", "1"]).assert().success();

    eva_cmd(&db_path)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Я помогаю людям"))
        .stdout(predicate::str::contains("> Выглядит впечатляюще 🤩"))
        .stdout(predicate::str::contains("1. Запустить курс 🚀"));
}

#[test]
fn test_cli_script_shows_steps() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    eva_cmd(&db_path)
        .arg("script")
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Start"))
        .stdout(predicate::str::contains("### 7234. О тебе"))
        .stdout(predicate::str::contains("- Next script: 239"));
}

#[test]
fn test_cli_reset() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    eva_cmd(&db_path).args(["say", "1"]).assert().success();

    eva_cmd(&db_path)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Session reset"));

    eva_cmd(&db_path)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Выглядит впечатляюще 🤩"))
        .stdout(predicate::str::contains("Замечательно").not());
}

#[test]
fn test_cli_article_mapping() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    eva_cmd(&db_path)
        .args(["article", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("continues with script 232"));

    eva_cmd(&db_path)
        .args(["article", "43"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No follow-up script for article 43"));
}

#[test]
fn test_cli_chat_from_stdin() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    eva_cmd(&db_path)
        .arg("chat")
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Я помогаю людям"))
        .stdout(predicate::str::contains("Замечательно"));
}

#[test]
fn test_cli_chat_quit() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    eva_cmd(&db_path)
        .arg("chat")
        .write_stdin("/quit\n")
        .assert()
        .success();
}
