use rusqlite::{params, Connection, OptionalExtension};

use crate::api_error::{ApiError, ApiResult};
use crate::data::UserId;
use crate::db::{conflict_on_unique, owned_row_exists};

use super::data::*;

pub fn list_categories(
    conn: &Connection,
    user_id: UserId,
) -> Result<Vec<Category>, rusqlite::Error> {
    let mut statement = conn.prepare(
        "SELECT id, user_id, category_name FROM categories WHERE user_id = ?1",
    )?;
    let rows = statement.query_map(params![user_id], |row| {
        Ok(Category {
            id: row.get(0)?,
            user_id: row.get(1)?,
            category_name: row.get(2)?,
        })
    })?;
    rows.collect()
}

pub fn add_category(conn: &Connection, user_id: UserId, request: &CategoryRequest) -> ApiResult<()> {
    let name = match request.category_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ApiError::BadRequest("Category name is required".to_string())),
    };

    let duplicate = conn
        .query_row(
            "SELECT 1 FROM categories WHERE user_id = ?1 AND category_name = ?2",
            params![user_id, name],
            |_| Ok(()),
        )
        .optional()?;
    if duplicate.is_some() {
        return Err(ApiError::Conflict("Category already exists".to_string()));
    }

    conn.execute(
        "INSERT INTO categories (user_id, category_name) VALUES (?1, ?2)",
        params![user_id, name],
    )
    .map_err(|e| conflict_on_unique(e, "Category already exists"))?;
    Ok(())
}

/// Cascades: the category's values go first, then the category. Task tag
/// snapshots are left untouched.
pub fn delete_category(conn: &mut Connection, user_id: UserId, id: CategoryId) -> ApiResult<()> {
    let tx = conn.transaction()?;

    if !owned_row_exists(&tx, "categories", id, user_id)? {
        return Err(ApiError::Forbidden(
            "Category not found or not authorized".to_string(),
        ));
    }

    tx.execute(
        "DELETE FROM category_values WHERE category_id = ?1",
        params![id],
    )?;
    tx.execute(
        "DELETE FROM categories WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;

    tx.commit()?;
    Ok(())
}

pub fn list_values(conn: &Connection, user_id: UserId) -> Result<GroupedValues, rusqlite::Error> {
    let mut statement = conn.prepare(
        "SELECT cv.id, cv.category_id, cv.value_name, cv.value_color
         FROM category_values cv
         JOIN categories c ON cv.category_id = c.id
         WHERE c.user_id = ?1",
    )?;
    let rows = statement.query_map(params![user_id], |row| {
        Ok(CategoryValue {
            id: row.get(0)?,
            category_id: row.get(1)?,
            value_name: row.get(2)?,
            value_color: row.get(3)?,
        })
    })?;

    let mut grouped = GroupedValues::new();
    for row in rows {
        let value = row?;
        grouped.entry(value.category_id).or_default().push(value);
    }
    Ok(grouped)
}

pub fn add_value(conn: &Connection, user_id: UserId, request: &CategoryValueRequest) -> ApiResult<CategoryValueId> {
    let (category_id, name, color) = match (
        request.category_id,
        request.value_name.as_deref().map(str::trim),
        request.value_color.as_deref().map(str::trim),
    ) {
        (Some(category_id), Some(name), Some(color)) if !name.is_empty() && !color.is_empty() => {
            (category_id, name, color)
        }
        _ => return Err(ApiError::BadRequest("Missing required fields".to_string())),
    };

    if !owned_row_exists(conn, "categories", category_id, user_id)? {
        return Err(ApiError::Forbidden(
            "Category not found or not authorized".to_string(),
        ));
    }

    if value_name_taken(conn, category_id, name, None)? {
        return Err(duplicate_value(name));
    }

    conn.execute(
        "INSERT INTO category_values (category_id, value_name, value_color) VALUES (?1, ?2, ?3)",
        params![category_id, name, color],
    )
    .map_err(|e| conflict_on_unique(e, &duplicate_value_message(name)))?;
    Ok(conn.last_insert_rowid())
}

pub fn update_value(
    conn: &Connection,
    user_id: UserId,
    id: CategoryValueId,
    request: &CategoryValueUpdate,
) -> ApiResult<()> {
    let (name, color) = match (
        request.value_name.as_deref().map(str::trim),
        request.value_color.as_deref().map(str::trim),
    ) {
        (Some(name), Some(color)) if !name.is_empty() && !color.is_empty() => (name, color),
        _ => return Err(ApiError::BadRequest("Missing required fields".to_string())),
    };

    let category_id = value_owner_category(conn, id, user_id)?.ok_or_else(|| {
        ApiError::Forbidden("Unauthorized or value not found".to_string())
    })?;

    if value_name_taken(conn, category_id, name, Some(id))? {
        return Err(duplicate_value(name));
    }

    conn.execute(
        "UPDATE category_values SET value_name = ?1, value_color = ?2 WHERE id = ?3",
        params![name, color, id],
    )
    .map_err(|e| conflict_on_unique(e, &duplicate_value_message(name)))?;
    Ok(())
}

pub fn delete_value(conn: &Connection, user_id: UserId, id: CategoryValueId) -> ApiResult<()> {
    if value_owner_category(conn, id, user_id)?.is_none() {
        return Err(ApiError::Forbidden(
            "Unauthorized or value not found".to_string(),
        ));
    }

    conn.execute("DELETE FROM category_values WHERE id = ?1", params![id])?;
    Ok(())
}

/// Ownership of a value runs through its parent category's user.
fn value_owner_category(
    conn: &Connection,
    id: CategoryValueId,
    user_id: UserId,
) -> Result<Option<CategoryId>, rusqlite::Error> {
    conn.query_row(
        "SELECT cv.category_id
         FROM category_values cv
         JOIN categories c ON cv.category_id = c.id
         WHERE cv.id = ?1 AND c.user_id = ?2",
        params![id, user_id],
        |row| row.get(0),
    )
    .optional()
}

fn value_name_taken(
    conn: &Connection,
    category_id: CategoryId,
    name: &str,
    excluding: Option<CategoryValueId>,
) -> Result<bool, rusqlite::Error> {
    let found = conn
        .query_row(
            "SELECT 1 FROM category_values
             WHERE category_id = ?1 AND value_name = ?2 AND id != COALESCE(?3, -1)",
            params![category_id, name, excluding],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn duplicate_value_message(name: &str) -> String {
    format!("The value \"{name}\" already exists in this category.")
}

fn duplicate_value(name: &str) -> ApiError {
    ApiError::Conflict(duplicate_value_message(name))
}
