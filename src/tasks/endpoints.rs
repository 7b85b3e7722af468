use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, State};

use crate::api_error::{ApiError, ApiResult};
use crate::auth::guard::AuthUser;
use crate::config::AppConfig;
use crate::data::Message;
use crate::db::TaskDb;
use crate::uploads;

use super::data::*;
use super::helpers;

#[get("/tasks")]
pub async fn tasks(user: AuthUser, db: TaskDb) -> ApiResult<Json<TaskListResponse>> {
    let user_id = user.id;
    let tasks = db
        .run(move |conn| helpers::list_tasks(conn, user_id))
        .await?;
    Ok(Json(TaskListResponse { tasks }))
}

#[post("/add-task", data = "<form>")]
pub async fn add_task(
    user: AuthUser,
    db: TaskDb,
    config: &State<AppConfig>,
    form: Form<TaskForm<'_>>,
) -> ApiResult<Json<Message>> {
    let mut form = form.into_inner();
    let title = required_text(form.task_title.take())?;
    let date = required_text(form.date.take())?;
    let priority = required(form.priority_id)?;
    let description = required_text(form.task_description.take())?;

    let image = match form.task_image.as_mut() {
        Some(file) => Some(uploads::store(file, &config.upload_dir).await?),
        None => None,
    };

    let task = NewTask {
        title,
        date,
        priority,
        description,
        image,
        tags: parse_tags(form.extra_categories.as_deref()),
    };

    let user_id = user.id;
    db.run(move |conn| helpers::create_task(conn, user_id, &task))
        .await?;

    Ok(Json(Message::new("Task created successfully")))
}

#[put("/edit-tasks/<id>", data = "<form>")]
pub async fn edit_task(
    user: AuthUser,
    db: TaskDb,
    config: &State<AppConfig>,
    id: TaskId,
    form: Form<TaskForm<'_>>,
) -> ApiResult<Json<Message>> {
    let mut form = form.into_inner();
    let edit = TaskEdit {
        title: required_text(form.task_title.take())?,
        date: required_text(form.date.take())?,
        priority: required(form.priority_id)?,
        status: required(form.status_id)?,
        description: required_text(form.task_description.take())?,
        image: match form.task_image.as_mut() {
            Some(file) => Some(uploads::store(file, &config.upload_dir).await?),
            None => None,
        },
        tags: parse_tags(form.extra_categories.as_deref()),
    };

    let user_id = user.id;
    db.run(move |conn| helpers::edit_task(conn, user_id, id, &edit))
        .await?;

    Ok(Json(Message::new("Task updated successfully")))
}

#[delete("/tasks/<id>")]
pub async fn delete_task(user: AuthUser, db: TaskDb, id: TaskId) -> ApiResult<Json<Message>> {
    let user_id = user.id;
    db.run(move |conn| helpers::delete_task(conn, user_id, id))
        .await?;
    Ok(Json(Message::new("Task deleted successfully")))
}

fn required<T>(value: Option<T>) -> ApiResult<T> {
    value.ok_or_else(missing_fields)
}

fn required_text(value: Option<String>) -> ApiResult<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(missing_fields()),
    }
}

fn missing_fields() -> ApiError {
    ApiError::BadRequest("Missing required fields".to_string())
}

/// Tags are optional decoration: an unparseable payload degrades to no tags
/// rather than failing the whole request.
fn parse_tags(raw: Option<&str>) -> Vec<TagSnapshot> {
    raw.and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default()
}
