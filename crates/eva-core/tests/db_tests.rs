use eva_core::{
    models::{Message, ScriptState, StepState},
    seed, Database, DialogueStore,
};
use jiff::Timestamp;
use rusqlite::Connection;
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();

    assert!(temp_file.path().exists());
    assert!(db.get_scripts().expect("Failed to load scripts").is_empty());
    assert!(db.get_messages().expect("Failed to load messages").is_empty());
}

#[test]
fn test_save_and_load_seed_script() {
    let (_temp_file, mut db) = create_test_db();
    let script = seed::start_script();

    db.save_script(&script).expect("Failed to save script");

    let loaded = db.get_scripts().expect("Failed to load scripts");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0], script);
}

#[test]
fn test_save_script_replaces_steps() {
    let (_temp_file, mut db) = create_test_db();
    let mut script = seed::start_script();
    db.save_script(&script).expect("Failed to save script");

    script.steps.truncate(2);
    db.save_script(&script).expect("Failed to save script again");

    let steps = db.get_steps(script.id).expect("Failed to load steps");
    assert_eq!(steps.len(), 2);
}

#[test]
fn test_mark_step_done_moves_cursor() {
    let (_temp_file, mut db) = create_test_db();
    let script = seed::start_script();
    db.save_script(&script).expect("Failed to save script");

    db.mark_step_done(script.id, 7234).expect("Failed to mark step");
    // repeating the write is harmless
    db.mark_step_done(script.id, 7234).expect("Failed to mark step");

    let loaded = &db.get_scripts().expect("Failed to load scripts")[0];
    assert_eq!(loaded.current_step_id, Some(7234));
    assert_eq!(loaded.step(7234).unwrap().state, StepState::Done);
    assert_eq!(loaded.next_pending_step().unwrap().id, 7235);
}

#[test]
fn test_update_script_state() {
    let (_temp_file, mut db) = create_test_db();
    let script = seed::start_script();
    db.save_script(&script).expect("Failed to save script");

    db.update_script_state(script.id, ScriptState::Done, None)
        .expect("Failed to update script");

    let loaded = &db.get_scripts().expect("Failed to load scripts")[0];
    assert_eq!(loaded.state, ScriptState::Done);
    assert_eq!(loaded.current_step_id, None);
}

#[test]
fn test_messages_round_trip_in_order() {
    let (_temp_file, mut db) = create_test_db();
    let now = Timestamp::now();

    let first = Message::new(1, "Привет 👋", false, now);
    let second = Message::new(2, "ритуал", true, now);
    db.save_message(&second).expect("Failed to save message");
    db.save_message(&first).expect("Failed to save message");
    db.save_message(&first).expect("Failed to save message twice");

    let messages = db.get_messages().expect("Failed to load messages");
    assert_eq!(messages, vec![first, second]);
}

#[test]
fn test_record_answer_persists_user_answer() {
    let (_temp_file, mut db) = create_test_db();
    let script = seed::start_script();
    db.save_script(&script).expect("Failed to save script");

    db.record_answer(script.id, 7235, "Отлично 👍")
        .expect("Failed to record answer");

    let loaded = db.get_scripts().expect("Failed to load scripts");
    let step = loaded[0].step(7235).expect("Step should exist");
    assert_eq!(step.user_answer.as_deref(), Some("Отлично 👍"));
    assert_eq!(loaded[0].step(7234).expect("Step should exist").user_answer, None);
}

#[test]
fn test_reset_session_cascades_steps() {
    let (temp_file, mut db) = create_test_db();
    db.save_script(&seed::start_script())
        .expect("Failed to save script");
    db.save_message(&Message::new(1, "hi", true, Timestamp::now()))
        .expect("Failed to save message");

    db.reset_session().expect("Failed to reset");

    assert!(db.load_scripts().expect("Failed to load scripts").is_empty());
    assert!(db.load_messages().expect("Failed to load messages").is_empty());

    let conn = Connection::open(temp_file.path()).expect("Failed to open connection");
    let steps: i64 = conn
        .query_row("SELECT COUNT(*) FROM steps", [], |row| row.get(0))
        .expect("Failed to count steps");
    assert_eq!(steps, 0);
}

#[test]
fn test_unknown_enum_values_decode_to_defaults() {
    let (temp_file, mut db) = create_test_db();
    db.save_script(&seed::start_script())
        .expect("Failed to save script");

    let conn = Connection::open(temp_file.path()).expect("Failed to open connection");
    conn.execute(
        "UPDATE steps SET state = 'sleeping', type = 'video', next_step_ids = 'oops' WHERE id = 7234",
        [],
    )
    .expect("Failed to corrupt step");

    let loaded = &db.get_scripts().expect("Failed to load scripts")[0];
    let step = loaded.step(7234).unwrap();
    assert_eq!(step.state, StepState::NotRunning);
    assert_eq!(step.kind, eva_core::StepKind::Nothing);
    assert!(step.next_step_ids.is_empty());
}

#[test]
fn test_schema_declares_cursor_column() {
    let (temp_file, mut db) = create_test_db();

    let conn = Connection::open(temp_file.path()).expect("Failed to open connection");
    let columns: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('scripts') WHERE name = 'current_step_id'",
            [],
            |row| row.get(0),
        )
        .expect("Failed to inspect scripts table");
    assert_eq!(columns, 1);

    let script = seed::start_script();
    db.save_script(&script).expect("Failed to save script");
    db.mark_step_done(script.id, 7234)
        .expect("Failed to mark step done");
    let loaded = db.get_scripts().expect("Failed to load scripts");
    assert_eq!(loaded[0].current_step_id, Some(7234));
}

#[test]
fn test_open_or_recreate_replaces_corrupt_file() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    std::fs::write(temp_file.path(), vec![b'x'; 4096]).expect("Failed to write garbage");

    assert!(Database::new(temp_file.path()).is_err());

    let db = Database::open_or_recreate(temp_file.path()).expect("Failed to recreate database");
    assert!(db.get_scripts().expect("Failed to load scripts").is_empty());
}
