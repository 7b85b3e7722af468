use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rusqlite::{params, Connection, OptionalExtension};

use crate::api_error::{ApiError, ApiResult};
use crate::data::UserId;
use crate::db::conflict_on_unique;
use crate::taxonomy::seed;

use super::data::{Profile, ProfileUpdate, RegisterRequest};

pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, stored: &str) -> ApiResult<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| ApiError::Internal(format!("stored password hash unreadable: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(ApiError::Internal(format!(
            "password verification failed: {e}"
        ))),
    }
}

/// Inserts the user row and seeds the default taxonomy in one transaction.
pub fn register_user(
    conn: &mut Connection,
    request: &RegisterRequest,
    password_hash: &str,
) -> ApiResult<UserId> {
    let tx = conn.transaction()?;

    let taken = tx
        .query_row(
            "SELECT 1 FROM users WHERE username = ?1 OR email = ?2",
            params![request.username, request.email],
            |_| Ok(()),
        )
        .optional()?;
    if taken.is_some() {
        return Err(ApiError::Conflict("user already existed".to_string()));
    }

    tx.execute(
        "INSERT INTO users (username, email, password, firstname, lastname)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            request.username,
            request.email,
            password_hash,
            request.firstname,
            request.lastname
        ],
    )
    .map_err(|e| conflict_on_unique(e, "user already existed"))?;
    let user_id = tx.last_insert_rowid();

    seed::seed_missing(&tx, user_id)?;
    tx.commit()?;

    Ok(user_id)
}

pub fn find_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<(UserId, String)>, rusqlite::Error> {
    conn.query_row(
        "SELECT id, password FROM users WHERE username = ?1",
        params![username],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()
}

pub fn password_hash_of(
    conn: &Connection,
    user_id: UserId,
) -> Result<Option<String>, rusqlite::Error> {
    conn.query_row(
        "SELECT password FROM users WHERE id = ?1",
        params![user_id],
        |row| row.get(0),
    )
    .optional()
}

pub fn set_password_hash(
    conn: &Connection,
    user_id: UserId,
    password_hash: &str,
) -> Result<(), rusqlite::Error> {
    conn.execute(
        "UPDATE users SET password = ?1 WHERE id = ?2",
        params![password_hash, user_id],
    )?;
    Ok(())
}

pub fn load_profile(
    conn: &Connection,
    user_id: UserId,
) -> Result<Option<Profile>, rusqlite::Error> {
    conn.query_row(
        "SELECT username, email, firstname, lastname, contactnumber, position, profile_picture
         FROM users WHERE id = ?1",
        params![user_id],
        |row| {
            Ok(Profile {
                username: row.get(0)?,
                email: row.get(1)?,
                firstname: row.get(2)?,
                lastname: row.get(3)?,
                contactnumber: row.get(4)?,
                position: row.get(5)?,
                profile_picture: row.get(6)?,
            })
        },
    )
    .optional()
}

/// Partial update over the allowed profile fields; only supplied fields are
/// written.
pub fn update_profile(
    conn: &Connection,
    user_id: UserId,
    update: &ProfileUpdate,
) -> ApiResult<()> {
    let mut assignments: Vec<String> = Vec::new();
    let mut values: Vec<&dyn rusqlite::ToSql> = Vec::new();

    for (column, value) in [
        ("firstname", &update.firstname),
        ("lastname", &update.lastname),
        ("email", &update.email),
        ("contactnumber", &update.contactnumber),
        ("position", &update.position),
    ] {
        if let Some(value) = value {
            assignments.push(format!("{column} = ?{}", values.len() + 1));
            values.push(value);
        }
    }

    if assignments.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let sql = format!(
        "UPDATE users SET {} WHERE id = ?{}",
        assignments.join(", "),
        values.len() + 1
    );
    values.push(&user_id);

    let affected = conn
        .execute(&sql, values.as_slice())
        .map_err(|e| conflict_on_unique(e, "Email already in use."))?;
    if affected == 0 {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    Ok(())
}

pub fn set_profile_picture(
    conn: &Connection,
    user_id: UserId,
    image_path: &str,
) -> Result<(), rusqlite::Error> {
    conn.execute(
        "UPDATE users SET profile_picture = ?1 WHERE id = ?2",
        params![image_path, user_id],
    )?;
    Ok(())
}
