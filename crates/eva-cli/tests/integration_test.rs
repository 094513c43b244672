//! Integration tests comparing CLI output with the core Display
//! implementations.

use std::process::Command;

use eva_core::{Database, DialogueStore, Messages, MessageLog};
use tempfile::TempDir;

/// Run a CLI command without delays and capture its output
fn run_cli_command(db_path: &str, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_eva"));
    cmd.args([
        "--no-color",
        "--typing-delay-ms",
        "0",
        "--response-delay-ms",
        "0",
        "--database-file",
        db_path,
    ]);

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to execute CLI command");
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[test]
fn test_history_matches_message_display() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path = db_path.to_str().expect("Non UTF-8 path");

    run_cli_command(db_path, &["say", "1"]);
    let output = run_cli_command(db_path, &["history"]);

    let db = Database::new(db_path).expect("Failed to open database");
    let messages = db.load_messages().expect("Failed to load messages");
    let log = MessageLog::from_messages(messages);
    let expected = Messages(log.messages().to_vec()).to_string();

    assert!(output.starts_with(&expected));
    assert!(output.ends_with("1. Запустить курс 🚀\n"));
}

#[test]
fn test_script_matches_script_display() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path = db_path.to_str().expect("Non UTF-8 path");

    run_cli_command(db_path, &["say", "1"]);
    let output = run_cli_command(db_path, &["script"]);

    let db = Database::new(db_path).expect("Failed to open database");
    let scripts = db.load_scripts().expect("Failed to load scripts");
    let main = scripts
        .iter()
        .find(|s| s.is_main)
        .expect("Main script should exist");

    assert!(output.starts_with(&format!("# {}. {}\n", main.id, main.name)));
    for step in &main.steps {
        assert!(output.contains(&format!("### {}. {}", step.id, step.name)));
    }
}
