use rusqlite::{params, Connection};
use tracing::info;

use crate::data::UserId;

pub const DEFAULT_PRIORITIES: [(&str, &str, i64); 3] = [
    ("Extreme", "#F21E1E", 5),
    ("Moderate", "#5BC0F8", 3),
    ("Low", "#7ED957", 1),
];

pub const DEFAULT_STATUSES: [(&str, &str); 3] = [
    ("Completed", "#05A301"),
    ("In Progress", "#0225FF"),
    ("Not Started", "#F21E1E"),
];

pub fn ensure_defaults(conn: &mut Connection, user_id: UserId) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    seed_missing(&tx, user_id)?;
    tx.commit()
}

/// Idempotent: a user who already owns any priority (resp. status) row is
/// left alone. `INSERT OR IGNORE` rides the `(user, name)` unique
/// constraint, so concurrent seeding cannot duplicate rows.
pub fn seed_missing(conn: &Connection, user_id: UserId) -> rusqlite::Result<()> {
    let priorities: i64 = conn.query_row(
        "SELECT COUNT(*) FROM priorities WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    if priorities == 0 {
        for (name, color, level) in DEFAULT_PRIORITIES {
            conn.execute(
                "INSERT OR IGNORE INTO priorities
                     (user_id, priority_name, priority_color, priority_level, is_default)
                 VALUES (?1, ?2, ?3, ?4, 1)",
                params![user_id, name, color, level],
            )?;
        }
        info!(user_id, "seeded default priorities");
    }

    let statuses: i64 = conn.query_row(
        "SELECT COUNT(*) FROM statuses WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    if statuses == 0 {
        for (name, color) in DEFAULT_STATUSES {
            conn.execute(
                "INSERT OR IGNORE INTO statuses
                     (user_id, status_name, status_color, is_default)
                 VALUES (?1, ?2, ?3, 1)",
                params![user_id, name, color],
            )?;
        }
        info!(user_id, "seeded default statuses");
    }

    Ok(())
}
