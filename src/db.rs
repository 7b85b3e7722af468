use rocket::{Build, Rocket};
use rocket_sync_db_pools::database;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::error;

use crate::api_error::ApiError;
use crate::data::UserId;

#[database("taskdb")]
pub struct TaskDb(rusqlite::Connection);

// Tag rows in task_category_values are snapshots by design: no foreign key
// into category_values, so category edits never rewrite task history.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    firstname TEXT,
    lastname TEXT,
    contactnumber TEXT,
    position TEXT,
    profile_picture TEXT
);
CREATE TABLE IF NOT EXISTS priorities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    priority_name TEXT NOT NULL,
    priority_color TEXT NOT NULL,
    priority_level INTEGER NOT NULL,
    is_default INTEGER NOT NULL DEFAULT 0,
    UNIQUE (user_id, priority_name)
);
CREATE TABLE IF NOT EXISTS statuses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    status_name TEXT NOT NULL,
    status_color TEXT NOT NULL,
    is_default INTEGER NOT NULL DEFAULT 0,
    UNIQUE (user_id, status_name)
);
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    category_name TEXT NOT NULL,
    UNIQUE (user_id, category_name)
);
CREATE TABLE IF NOT EXISTS category_values (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER NOT NULL REFERENCES categories(id),
    value_name TEXT NOT NULL,
    value_color TEXT NOT NULL,
    UNIQUE (category_id, value_name)
);
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    task_title TEXT NOT NULL,
    date TEXT NOT NULL,
    priority INTEGER NOT NULL REFERENCES priorities(id),
    status INTEGER NOT NULL REFERENCES statuses(id),
    task_image TEXT,
    task_description TEXT NOT NULL,
    completedOn TEXT,
    UNIQUE (user_id, task_title)
);
CREATE TABLE IF NOT EXISTS task_category_values (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    task_id INTEGER NOT NULL REFERENCES tasks(id),
    category_name TEXT NOT NULL,
    value_name TEXT NOT NULL,
    value_color TEXT NOT NULL
);
";

pub async fn init_schema(rocket: Rocket<Build>) -> Result<Rocket<Build>, Rocket<Build>> {
    let db = match TaskDb::get_one(&rocket).await {
        Some(db) => db,
        None => {
            error!("database pool unavailable during schema init");
            return Err(rocket);
        }
    };

    match db.run(|conn| conn.execute_batch(SCHEMA)).await {
        Ok(()) => Ok(rocket),
        Err(e) => {
            error!("schema initialization failed: {e}");
            Err(rocket)
        }
    }
}

/// Turns a unique-constraint violation into a Conflict with the given
/// message; anything else stays an internal database error. The constraint
/// is the authority for duplicate names, handler pre-checks are a fast path.
pub fn conflict_on_unique(err: rusqlite::Error, message: &str) -> ApiError {
    match err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            ApiError::Conflict(message.to_string())
        }
        other => ApiError::Database(other),
    }
}

/// Single ownership check behind every not-found/not-owned decision. A row
/// that exists but belongs to someone else is indistinguishable from one
/// that does not exist.
pub fn owned_row_exists(
    conn: &Connection,
    table: &str,
    id: i64,
    user_id: UserId,
) -> Result<bool, rusqlite::Error> {
    let sql = format!("SELECT 1 FROM {table} WHERE id = ?1 AND user_id = ?2");
    let found = conn
        .query_row(&sql, params![id, user_id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}
