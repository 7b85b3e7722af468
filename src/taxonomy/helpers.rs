use rusqlite::{params, Connection, OptionalExtension};

use crate::api_error::{ApiError, ApiResult};
use crate::data::UserId;
use crate::db::conflict_on_unique;

use super::data::*;

pub fn list_priorities(
    conn: &Connection,
    user_id: UserId,
) -> Result<Vec<Priority>, rusqlite::Error> {
    let mut statement = conn.prepare(
        "SELECT id, user_id, priority_name, priority_color, priority_level, is_default
         FROM priorities WHERE user_id = ?1",
    )?;
    let rows = statement.query_map(params![user_id], |row| {
        Ok(Priority {
            id: row.get(0)?,
            user_id: row.get(1)?,
            priority_name: row.get(2)?,
            priority_color: row.get(3)?,
            priority_level: row.get(4)?,
            is_default: row.get(5)?,
        })
    })?;
    rows.collect()
}

pub fn add_priority(conn: &Connection, user_id: UserId, request: &PriorityRequest) -> ApiResult<()> {
    let (name, color, level) = require_priority_fields(request)?;

    if priority_name_taken(conn, user_id, name, None)? {
        return Err(ApiError::Conflict(
            "Priority name already exists.".to_string(),
        ));
    }

    conn.execute(
        "INSERT INTO priorities (user_id, priority_name, priority_color, priority_level, is_default)
         VALUES (?1, ?2, ?3, ?4, 0)",
        params![user_id, name, color, level],
    )
    .map_err(|e| conflict_on_unique(e, "Priority name already exists."))?;
    Ok(())
}

pub fn update_priority(
    conn: &Connection,
    user_id: UserId,
    id: PriorityId,
    request: &PriorityRequest,
) -> ApiResult<()> {
    let (name, color, level) = require_priority_fields(request)?;

    if priority_name_taken(conn, user_id, name, Some(id))? {
        return Err(ApiError::Conflict(
            "Priority name already exists.".to_string(),
        ));
    }

    let affected = conn
        .execute(
            "UPDATE priorities SET priority_name = ?1, priority_color = ?2, priority_level = ?3
             WHERE id = ?4 AND user_id = ?5",
            params![name, color, level, id, user_id],
        )
        .map_err(|e| conflict_on_unique(e, "Priority name already exists."))?;
    if affected == 0 {
        return Err(ApiError::NotFound("Priority not found".to_string()));
    }
    Ok(())
}

pub fn delete_priority(conn: &Connection, user_id: UserId, id: PriorityId) -> ApiResult<()> {
    let affected = conn.execute(
        "DELETE FROM priorities WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    if affected == 0 {
        return Err(ApiError::NotFound("Priority not found".to_string()));
    }
    Ok(())
}

pub fn list_statuses(
    conn: &Connection,
    user_id: UserId,
) -> Result<Vec<TaskStatus>, rusqlite::Error> {
    let mut statement = conn.prepare(
        "SELECT id, user_id, status_name, status_color, is_default
         FROM statuses WHERE user_id = ?1",
    )?;
    let rows = statement.query_map(params![user_id], |row| {
        Ok(TaskStatus {
            id: row.get(0)?,
            user_id: row.get(1)?,
            status_name: row.get(2)?,
            status_color: row.get(3)?,
            is_default: row.get(4)?,
        })
    })?;
    rows.collect()
}

pub fn add_status(conn: &Connection, user_id: UserId, request: &StatusRequest) -> ApiResult<()> {
    let (name, color) = require_status_fields(request)?;

    if status_name_taken(conn, user_id, name, None)? {
        return Err(ApiError::Conflict("Status name already exists.".to_string()));
    }

    conn.execute(
        "INSERT INTO statuses (user_id, status_name, status_color, is_default)
         VALUES (?1, ?2, ?3, 0)",
        params![user_id, name, color],
    )
    .map_err(|e| conflict_on_unique(e, "Status name already exists."))?;
    Ok(())
}

pub fn update_status(
    conn: &Connection,
    user_id: UserId,
    id: StatusId,
    request: &StatusRequest,
) -> ApiResult<()> {
    let (name, color) = require_status_fields(request)?;

    if status_name_taken(conn, user_id, name, Some(id))? {
        return Err(ApiError::Conflict("Status name already exists.".to_string()));
    }

    let affected = conn
        .execute(
            "UPDATE statuses SET status_name = ?1, status_color = ?2
             WHERE id = ?3 AND user_id = ?4",
            params![name, color, id, user_id],
        )
        .map_err(|e| conflict_on_unique(e, "Status name already exists."))?;
    if affected == 0 {
        return Err(ApiError::NotFound("Status not found".to_string()));
    }
    Ok(())
}

pub fn delete_status(conn: &Connection, user_id: UserId, id: StatusId) -> ApiResult<()> {
    let affected = conn.execute(
        "DELETE FROM statuses WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    if affected == 0 {
        return Err(ApiError::NotFound("Status not found".to_string()));
    }
    Ok(())
}

fn require_priority_fields(request: &PriorityRequest) -> ApiResult<(&str, &str, i64)> {
    match (
        request.priority_name.as_deref().map(str::trim),
        request.priority_color.as_deref().map(str::trim),
        request.priority_level,
    ) {
        (Some(name), Some(color), Some(level)) if !name.is_empty() && !color.is_empty() => {
            Ok((name, color, level))
        }
        _ => Err(ApiError::BadRequest("All fields are required.".to_string())),
    }
}

fn require_status_fields(request: &StatusRequest) -> ApiResult<(&str, &str)> {
    match (
        request.status_name.as_deref().map(str::trim),
        request.status_color.as_deref().map(str::trim),
    ) {
        (Some(name), Some(color)) if !name.is_empty() && !color.is_empty() => Ok((name, color)),
        _ => Err(ApiError::BadRequest("All fields are required.".to_string())),
    }
}

fn priority_name_taken(
    conn: &Connection,
    user_id: UserId,
    name: &str,
    excluding: Option<PriorityId>,
) -> Result<bool, rusqlite::Error> {
    let found = conn
        .query_row(
            "SELECT 1 FROM priorities
             WHERE user_id = ?1 AND priority_name = ?2 AND id != COALESCE(?3, -1)",
            params![user_id, name, excluding],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn status_name_taken(
    conn: &Connection,
    user_id: UserId,
    name: &str,
    excluding: Option<StatusId>,
) -> Result<bool, rusqlite::Error> {
    let found = conn
        .query_row(
            "SELECT 1 FROM statuses
             WHERE user_id = ?1 AND status_name = ?2 AND id != COALESCE(?3, -1)",
            params![user_id, name, excluding],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}
