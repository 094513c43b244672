use std::time::Duration;

use eva_core::{SessionBuilder, SessionHandle};
use tempfile::TempDir;

pub const FIRST_CHOICE: &str = "Выглядит впечатляюще 🤩";

/// Helper function to start a session without delays on a database in `dir`
pub async fn create_test_session(dir: &TempDir) -> SessionHandle {
    let db_path = dir.path().join("eva.db");
    SessionBuilder::new()
        .with_database_path(Some(&db_path))
        .with_typing_delay(Duration::ZERO)
        .with_response_delay(Duration::ZERO)
        .build()
        .await
        .expect("Failed to create session")
}
