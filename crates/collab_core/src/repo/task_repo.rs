//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - A user sees tasks assigned to them and tasks of projects they authored,
//!   each task at most once.
//! - `set_assignees` replaces the whole assignee set in one transaction.

use crate::model::task::{Task, TaskId};
use crate::model::user::UserId;
use crate::repo::error::{PersistenceError, PersistenceResult};
use crate::repo::{ensure_schema_ready, uuid_column};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;

const TASK_SELECT_SQL: &str = "SELECT
    t.uuid AS uuid,
    t.description AS description,
    t.project_uuid AS project_uuid,
    t.end_date AS end_date
FROM tasks t";

pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> PersistenceResult<TaskId>;
    fn get_task(&self, id: TaskId) -> PersistenceResult<Option<Task>>;
    /// Tasks visible to `user_id`, ordered by end date.
    fn fetch_tasks_for_user(&self, user_id: UserId) -> PersistenceResult<Vec<Task>>;
    /// Replaces the assignee set of one task.
    fn set_assignees(&self, task_id: TaskId, user_ids: &[UserId]) -> PersistenceResult<()>;
    /// Assignee ids, sorted.
    fn list_assignees(&self, task_id: TaskId) -> PersistenceResult<Vec<UserId>>;
}

pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> PersistenceResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> PersistenceResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (uuid, description, project_uuid, end_date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                task.id.to_string(),
                task.description.as_str(),
                task.project_id.to_string(),
                task.end_date,
            ],
        )?;

        Ok(task.id)
    }

    fn get_task(&self, id: TaskId) -> PersistenceResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE t.uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn fetch_tasks_for_user(&self, user_id: UserId) -> PersistenceResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             JOIN projects p ON p.uuid = t.project_uuid
             LEFT JOIN task_assignees a
               ON a.task_uuid = t.uuid
              AND a.user_uuid = ?1
             WHERE p.author_uuid = ?1
                OR a.user_uuid IS NOT NULL
             ORDER BY t.end_date ASC, t.uuid ASC;"
        ))?;

        let mut rows = stmt.query([user_id.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn set_assignees(&self, task_id: TaskId, user_ids: &[UserId]) -> PersistenceResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        let task_exists = tx
            .query_row(
                "SELECT 1 FROM tasks WHERE uuid = ?1;",
                [task_id.to_string()],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !task_exists {
            return Err(PersistenceError::NotFound {
                entity: "task",
                id: task_id,
            });
        }

        tx.execute(
            "DELETE FROM task_assignees WHERE task_uuid = ?1;",
            [task_id.to_string()],
        )?;
        let unique: BTreeSet<&UserId> = user_ids.iter().collect();
        for user_id in unique {
            tx.execute(
                "INSERT INTO task_assignees (task_uuid, user_uuid) VALUES (?1, ?2);",
                params![task_id.to_string(), user_id.to_string()],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn list_assignees(&self, task_id: TaskId) -> PersistenceResult<Vec<UserId>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_uuid FROM task_assignees
             WHERE task_uuid = ?1
             ORDER BY user_uuid ASC;",
        )?;
        let mut rows = stmt.query([task_id.to_string()])?;
        let mut user_ids = Vec::new();
        while let Some(row) = rows.next()? {
            user_ids.push(uuid_column(row, "user_uuid")?);
        }
        Ok(user_ids)
    }
}

fn parse_task_row(row: &Row<'_>) -> PersistenceResult<Task> {
    let task = Task {
        id: uuid_column(row, "uuid")?,
        description: row.get("description")?,
        project_id: uuid_column(row, "project_uuid")?,
        end_date: row.get("end_date")?,
    };
    task.validate()?;
    Ok(task)
}
