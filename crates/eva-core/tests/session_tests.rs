mod common;

use common::{create_test_session, FIRST_CHOICE};
use eva_core::{engine::replies, Database, DialogueStore, ScriptState, SessionEvent};
use tempfile::TempDir;

#[tokio::test]
async fn test_fresh_session_persists_start_script() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let session = create_test_session(&dir).await;

    let snapshot = session.settled().await.expect("Session closed");
    assert_eq!(snapshot.messages.len(), 2);
    assert_eq!(snapshot.buttons, vec![FIRST_CHOICE.to_string()]);
    session.shutdown().await.expect("Session closed");

    let db = Database::new(dir.path().join("eva.db")).expect("Failed to open database");
    let scripts = db.load_scripts().expect("Failed to load scripts");
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].current_step_id, Some(7235));
    assert_eq!(db.load_messages().expect("Failed to load messages").len(), 2);
}

#[tokio::test]
async fn test_resume_across_restarts() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let session = create_test_session(&dir).await;
    session.settled().await.expect("Session closed");
    session.send(FIRST_CHOICE).await.expect("Session closed");
    let before = session.settled().await.expect("Session closed");
    session.shutdown().await.expect("Session closed");

    let session = create_test_session(&dir).await;
    let after = session.settled().await.expect("Session closed");

    assert_eq!(after.messages, before.messages);
    assert_eq!(after.buttons, before.buttons);
    assert_eq!(after.current_step_id, Some(7236));
}

#[tokio::test]
async fn test_stage_complete_survives_restart() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let session = create_test_session(&dir).await;
    session.settled().await.expect("Session closed");
    session.send("что-то другое").await.expect("Session closed");
    let snapshot = session.settled().await.expect("Session closed");
    assert_eq!(
        snapshot.messages.last().map(|m| m.body.as_str()),
        Some(replies::STAGE_COMPLETE)
    );
    session.shutdown().await.expect("Session closed");

    let session = create_test_session(&dir).await;
    let snapshot = session.settled().await.expect("Session closed");
    assert!(snapshot.is_free_text);
    assert_eq!(
        snapshot.script.as_ref().map(|s| s.state),
        Some(ScriptState::Done)
    );

    session.send("ритуал").await.expect("Session closed");
    let snapshot = session.settled().await.expect("Session closed");
    assert_eq!(
        snapshot.messages.last().map(|m| m.body.as_str()),
        Some(replies::RITUAL_REPLY)
    );
}

#[tokio::test]
async fn test_reset_wipes_database() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let session = create_test_session(&dir).await;
    session.settled().await.expect("Session closed");
    session.send(FIRST_CHOICE).await.expect("Session closed");
    session.settled().await.expect("Session closed");

    let mut events = session.subscribe();
    session.reset().await.expect("Session closed");
    let snapshot = session.settled().await.expect("Session closed");

    assert_eq!(snapshot.messages.len(), 2);
    assert!(snapshot.messages.iter().all(|m| m.id <= 2));
    assert_eq!(events.recv().await.expect("No event"), SessionEvent::Reset);
    session.shutdown().await.expect("Session closed");

    let db = Database::new(dir.path().join("eva.db")).expect("Failed to open database");
    assert_eq!(db.load_messages().expect("Failed to load messages").len(), 2);
}
