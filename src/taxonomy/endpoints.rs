use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put};

use crate::api_error::ApiResult;
use crate::auth::guard::AuthUser;
use crate::data::Message;
use crate::db::TaskDb;

use super::data::*;
use super::helpers;

#[get("/priorities")]
pub async fn priorities(user: AuthUser, db: TaskDb) -> ApiResult<Json<Vec<Priority>>> {
    let user_id = user.id;
    let rows = db
        .run(move |conn| helpers::list_priorities(conn, user_id))
        .await?;
    Ok(Json(rows))
}

#[post("/add-priority", format = "json", data = "<request>")]
pub async fn add_priority(
    user: AuthUser,
    db: TaskDb,
    request: Json<PriorityRequest>,
) -> ApiResult<(Status, Json<Message>)> {
    let user_id = user.id;
    let request = request.into_inner();
    db.run(move |conn| helpers::add_priority(conn, user_id, &request))
        .await?;
    Ok((
        Status::Created,
        Json(Message::new("Priority added successfully.")),
    ))
}

#[put("/priorities/<id>", format = "json", data = "<request>")]
pub async fn update_priority(
    user: AuthUser,
    db: TaskDb,
    id: PriorityId,
    request: Json<PriorityRequest>,
) -> ApiResult<Json<Message>> {
    let user_id = user.id;
    let request = request.into_inner();
    db.run(move |conn| helpers::update_priority(conn, user_id, id, &request))
        .await?;
    Ok(Json(Message::new("Priority updated successfully")))
}

#[delete("/priorities/<id>")]
pub async fn delete_priority(
    user: AuthUser,
    db: TaskDb,
    id: PriorityId,
) -> ApiResult<Json<Message>> {
    let user_id = user.id;
    db.run(move |conn| helpers::delete_priority(conn, user_id, id))
        .await?;
    Ok(Json(Message::new("Priority deleted successfully")))
}

#[get("/statuses")]
pub async fn statuses(user: AuthUser, db: TaskDb) -> ApiResult<Json<Vec<TaskStatus>>> {
    let user_id = user.id;
    let rows = db
        .run(move |conn| helpers::list_statuses(conn, user_id))
        .await?;
    Ok(Json(rows))
}

#[post("/add-statuses", format = "json", data = "<request>")]
pub async fn add_status(
    user: AuthUser,
    db: TaskDb,
    request: Json<StatusRequest>,
) -> ApiResult<(Status, Json<Message>)> {
    let user_id = user.id;
    let request = request.into_inner();
    db.run(move |conn| helpers::add_status(conn, user_id, &request))
        .await?;
    Ok((
        Status::Created,
        Json(Message::new("Status added successfully.")),
    ))
}

#[put("/statuses/<id>", format = "json", data = "<request>")]
pub async fn update_status(
    user: AuthUser,
    db: TaskDb,
    id: StatusId,
    request: Json<StatusRequest>,
) -> ApiResult<Json<Message>> {
    let user_id = user.id;
    let request = request.into_inner();
    db.run(move |conn| helpers::update_status(conn, user_id, id, &request))
        .await?;
    Ok(Json(Message::new("Status updated successfully")))
}

#[delete("/statuses/<id>")]
pub async fn delete_status(user: AuthUser, db: TaskDb, id: StatusId) -> ApiResult<Json<Message>> {
    let user_id = user.id;
    db.run(move |conn| helpers::delete_status(conn, user_id, id))
        .await?;
    Ok(Json(Message::new("Status deleted successfully")))
}
