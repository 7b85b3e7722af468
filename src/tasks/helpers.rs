use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use std::collections::HashMap;

use crate::api_error::{ApiError, ApiResult};
use crate::data::UserId;
use crate::db::{conflict_on_unique, owned_row_exists};
use crate::taxonomy::data::StatusId;

use super::data::*;

/// Re-completing an already completed task overwrites `completedOn` with the
/// edit time. Flip to `false` to preserve the first completion time instead.
pub const RESTAMP_COMPLETED_ON: bool = true;

const NOT_STARTED: &str = "not started";
const COMPLETED: &str = "completed";

/// Looks up a status by case-insensitive trimmed name within the user's own
/// status set.
fn status_id_by_name(
    conn: &Connection,
    user_id: UserId,
    name: &str,
) -> Result<Option<StatusId>, rusqlite::Error> {
    conn.query_row(
        "SELECT id FROM statuses
         WHERE user_id = ?1 AND LOWER(TRIM(status_name)) = ?2 LIMIT 1",
        params![user_id, name],
        |row| row.get(0),
    )
    .optional()
}

pub fn create_task(conn: &mut Connection, user_id: UserId, task: &NewTask) -> ApiResult<TaskId> {
    let tx = conn.transaction()?;

    let duplicate = tx
        .query_row(
            "SELECT 1 FROM tasks WHERE user_id = ?1 AND task_title = ?2",
            params![user_id, task.title],
            |_| Ok(()),
        )
        .optional()?;
    if duplicate.is_some() {
        return Err(ApiError::Conflict(
            "You already have a task with this title.".to_string(),
        ));
    }

    // Creation ignores any client-supplied status: every task starts in the
    // user's "Not Started" state.
    let not_started = status_id_by_name(&tx, user_id, NOT_STARTED)?.ok_or_else(|| {
        ApiError::BadRequest("Default status 'Not Started' not found.".to_string())
    })?;

    tx.execute(
        "INSERT INTO tasks (user_id, task_title, date, priority, status, task_image, task_description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user_id,
            task.title,
            task.date,
            task.priority,
            not_started,
            task.image,
            task.description
        ],
    )
    .map_err(|e| conflict_on_unique(e, "You already have a task with this title."))?;
    let task_id = tx.last_insert_rowid();

    insert_tags(&tx, user_id, task_id, &task.tags)?;
    tx.commit()?;

    Ok(task_id)
}

pub fn edit_task(
    conn: &mut Connection,
    user_id: UserId,
    task_id: TaskId,
    edit: &TaskEdit,
) -> ApiResult<()> {
    let tx = conn.transaction()?;

    if !owned_row_exists(&tx, "tasks", task_id, user_id)? {
        return Err(ApiError::NotFound(
            "Task not found or unauthorized".to_string(),
        ));
    }

    let duplicate = tx
        .query_row(
            "SELECT 1 FROM tasks WHERE user_id = ?1 AND task_title = ?2 AND id != ?3",
            params![user_id, edit.title, task_id],
            |_| Ok(()),
        )
        .optional()?;
    if duplicate.is_some() {
        return Err(duplicate_title(&edit.title));
    }

    // completedOn is recomputed on every edit, not only on the transition.
    let completed = status_id_by_name(&tx, user_id, COMPLETED)?;
    let completed_on: Option<String> = if completed == Some(edit.status) {
        if RESTAMP_COMPLETED_ON {
            Some(Utc::now().to_rfc3339())
        } else {
            let existing: Option<String> = tx.query_row(
                "SELECT completedOn FROM tasks WHERE id = ?1",
                params![task_id],
                |row| row.get(0),
            )?;
            existing.or_else(|| Some(Utc::now().to_rfc3339()))
        }
    } else {
        None
    };

    tx.execute(
        "UPDATE tasks
         SET task_title = ?1, date = ?2, priority = ?3, status = ?4, task_description = ?5,
             task_image = COALESCE(?6, task_image),
             completedOn = ?7
         WHERE id = ?8 AND user_id = ?9",
        params![
            edit.title,
            edit.date,
            edit.priority,
            edit.status,
            edit.description,
            edit.image,
            completed_on,
            task_id,
            user_id
        ],
    )
    .map_err(|e| conflict_on_unique(e, &duplicate_title_message(&edit.title)))?;

    // Whole tag set is replaced; snapshot rows get fresh ids.
    tx.execute(
        "DELETE FROM task_category_values WHERE task_id = ?1 AND user_id = ?2",
        params![task_id, user_id],
    )?;
    insert_tags(&tx, user_id, task_id, &edit.tags)?;

    tx.commit()?;
    Ok(())
}

pub fn delete_task(conn: &mut Connection, user_id: UserId, task_id: TaskId) -> ApiResult<()> {
    let tx = conn.transaction()?;

    if !owned_row_exists(&tx, "tasks", task_id, user_id)? {
        return Err(ApiError::NotFound(
            "Task not found or unauthorized".to_string(),
        ));
    }

    tx.execute(
        "DELETE FROM task_category_values WHERE task_id = ?1",
        params![task_id],
    )?;
    tx.execute(
        "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
        params![task_id, user_id],
    )?;

    tx.commit()?;
    Ok(())
}

pub fn list_tasks(conn: &Connection, user_id: UserId) -> Result<Vec<TaskView>, rusqlite::Error> {
    let mut task_statement = conn.prepare(
        "SELECT id, user_id, task_title, date, priority, status, task_image, task_description,
                completedOn
         FROM tasks WHERE user_id = ?1 ORDER BY date DESC",
    )?;
    let task_rows = task_statement.query_map(params![user_id], |row| {
        Ok(TaskView {
            id: row.get(0)?,
            user_id: row.get(1)?,
            task_title: row.get(2)?,
            date: row.get(3)?,
            priority: row.get(4)?,
            status: row.get(5)?,
            task_image: row.get(6)?,
            task_description: row.get(7)?,
            completed_on: row.get(8)?,
            category_values: vec![],
        })
    })?;
    let mut tasks: Vec<TaskView> = task_rows.collect::<Result<_, _>>()?;

    let index: HashMap<TaskId, usize> = tasks
        .iter()
        .enumerate()
        .map(|(position, task)| (task.id, position))
        .collect();

    let mut tag_statement = conn.prepare(
        "SELECT task_id, id, category_name, value_name, value_color
         FROM task_category_values WHERE user_id = ?1",
    )?;
    let tag_rows = tag_statement.query_map(params![user_id], |row| {
        Ok((
            row.get::<_, TaskId>(0)?,
            TagRow {
                id: row.get(1)?,
                category_name: row.get(2)?,
                value_name: row.get(3)?,
                value_color: row.get(4)?,
            },
        ))
    })?;

    for row in tag_rows {
        let (task_id, tag) = row?;
        if let Some(&position) = index.get(&task_id) {
            tasks[position].category_values.push(tag);
        }
    }

    Ok(tasks)
}

fn insert_tags(
    conn: &Connection,
    user_id: UserId,
    task_id: TaskId,
    tags: &[TagSnapshot],
) -> Result<(), rusqlite::Error> {
    for tag in tags {
        conn.execute(
            "INSERT INTO task_category_values (user_id, task_id, category_name, value_name, value_color)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_id,
                task_id,
                tag.category_name,
                tag.value_name,
                tag.value_color
            ],
        )?;
    }
    Ok(())
}

fn duplicate_title_message(title: &str) -> String {
    format!("You already have another task with the title \"{title}\".")
}

fn duplicate_title(title: &str) -> ApiError {
    ApiError::Conflict(duplicate_title_message(title))
}
