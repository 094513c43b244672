//! Script and step queries.

use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, Result},
    models::{Script, ScriptId, ScriptState, Step, StepId, StepKind, StepState},
};

const SELECT_SCRIPTS_SQL: &str = "SELECT id, name, state, is_main, article_id, ritual_line_id, next_script_id, current_step_id FROM scripts ORDER BY id";
const SELECT_STEPS_BY_SCRIPT_SQL: &str = "SELECT id, name, message, sequence, state, type, next_step_ids, user_answer, code FROM steps WHERE script_id = ?1 ORDER BY sequence, id";
const DELETE_SCRIPT_SQL: &str = "DELETE FROM scripts WHERE id = ?1";
const INSERT_SCRIPT_SQL: &str = "INSERT INTO scripts (id, name, state, is_main, article_id, ritual_line_id, next_script_id, current_step_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const INSERT_STEP_SQL: &str = "INSERT OR REPLACE INTO steps (id, script_id, name, message, sequence, state, type, next_step_ids, user_answer, code) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const MARK_STEP_DONE_SQL: &str = "UPDATE steps SET state = 'done' WHERE id = ?1 AND script_id = ?2";
const UPDATE_ANSWER_SQL: &str =
    "UPDATE steps SET user_answer = ?1 WHERE id = ?2 AND script_id = ?3";
const UPDATE_CURSOR_SQL: &str = "UPDATE scripts SET current_step_id = ?1 WHERE id = ?2";
const UPDATE_SCRIPT_STATE_SQL: &str =
    "UPDATE scripts SET state = ?1, current_step_id = ?2 WHERE id = ?3";

impl super::Database {
    /// Helper function to construct a Step from a database row.
    ///
    /// Unknown state or type strings and malformed edge lists decode to their
    /// defaults instead of failing the load.
    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<Step> {
        let id = row.get::<_, i64>(0)? as StepId;
        let state: String = row.get(4)?;
        let kind: String = row.get(5)?;
        let edges: String = row.get(6)?;

        let next_step_ids = serde_json::from_str::<Vec<StepId>>(&edges).unwrap_or_else(|e| {
            log::warn!("Invalid next_step_ids for step {id}: {e}, treating as no edges");
            Vec::new()
        });

        Ok(Step {
            id,
            name: row.get(1)?,
            message: row.get(2)?,
            sequence: row.get(3)?,
            state: StepState::parse_or_default(&state),
            kind: StepKind::parse_or_default(&kind),
            next_step_ids,
            user_answer: row.get(7)?,
            code: row.get(8)?,
        })
    }

    /// Helper function to construct a Script (without steps) from a row.
    fn build_script_from_row(row: &rusqlite::Row) -> rusqlite::Result<Script> {
        let state: String = row.get(2)?;

        Ok(Script {
            id: row.get::<_, i64>(0)? as ScriptId,
            name: row.get(1)?,
            state: ScriptState::parse_or_default(&state),
            is_main: row.get(3)?,
            article_id: row.get::<_, Option<i64>>(4)?.map(|v| v as u64),
            ritual_line_id: row.get::<_, Option<i64>>(5)?.map(|v| v as u64),
            next_script_id: row.get::<_, Option<i64>>(6)?.map(|v| v as ScriptId),
            current_step_id: row.get::<_, Option<i64>>(7)?.map(|v| v as StepId),
            steps: Vec::new(),
        })
    }

    /// Retrieves every script with its steps.
    pub fn get_scripts(&self) -> Result<Vec<Script>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SCRIPTS_SQL)
            .db_context("Failed to prepare scripts query")?;
        let mut scripts = stmt
            .query_map([], Self::build_script_from_row)
            .db_context("Failed to query scripts")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read script row")?;

        for script in &mut scripts {
            script.steps = self.get_steps(script.id)?;
        }

        Ok(scripts)
    }

    /// Retrieves the steps of a script ordered by sequence.
    pub fn get_steps(&self, script_id: ScriptId) -> Result<Vec<Step>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_BY_SCRIPT_SQL)
            .db_context("Failed to prepare steps query")?;
        let steps = stmt
            .query_map(params![script_id as i64], Self::build_step_from_row)
            .db_context("Failed to query steps")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read step row")?;
        Ok(steps)
    }

    /// Writes a script and its steps, replacing an existing script with the
    /// same id (its old steps are removed by the cascade).
    pub fn save_script(&mut self, script: &Script) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_SCRIPT_SQL, params![script.id as i64])
            .db_context("Failed to replace script")?;

        tx.execute(
            INSERT_SCRIPT_SQL,
            params![
                script.id as i64,
                &script.name,
                script.state.as_str(),
                script.is_main,
                script.article_id.map(|v| v as i64),
                script.ritual_line_id.map(|v| v as i64),
                script.next_script_id.map(|v| v as i64),
                script.current_step_id.map(|v| v as i64),
            ],
        )
        .db_context("Failed to insert script")?;

        for step in &script.steps {
            let edges = serde_json::to_string(&step.next_step_ids)?;
            tx.execute(
                INSERT_STEP_SQL,
                params![
                    step.id as i64,
                    script.id as i64,
                    &step.name,
                    &step.message,
                    step.sequence,
                    step.state.as_str(),
                    step.kind.as_str(),
                    edges,
                    step.user_answer.as_deref(),
                    step.code.as_deref(),
                ],
            )
            .db_context("Failed to insert step")?;
        }

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Marks a step done and points the script's cursor at it.
    pub fn mark_step_done(&mut self, script_id: ScriptId, step_id: StepId) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(MARK_STEP_DONE_SQL, params![step_id as i64, script_id as i64])
            .db_context("Failed to mark step done")?;
        tx.execute(UPDATE_CURSOR_SQL, params![step_id as i64, script_id as i64])
            .db_context("Failed to move script cursor")?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Stores the user's answer to a step.
    pub fn save_answer(&mut self, script_id: ScriptId, step_id: StepId, answer: &str) -> Result<()> {
        self.connection
            .execute(
                UPDATE_ANSWER_SQL,
                params![answer, step_id as i64, script_id as i64],
            )
            .db_context("Failed to save step answer")?;
        Ok(())
    }

    /// Updates a script's run state and cursor.
    pub fn update_script_state(
        &mut self,
        script_id: ScriptId,
        state: ScriptState,
        current_step_id: Option<StepId>,
    ) -> Result<()> {
        self.connection
            .execute(
                UPDATE_SCRIPT_STATE_SQL,
                params![
                    state.as_str(),
                    current_step_id.map(|v| v as i64),
                    script_id as i64
                ],
            )
            .db_context("Failed to update script state")?;
        Ok(())
    }
}
