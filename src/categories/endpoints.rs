use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put};

use crate::api_error::ApiResult;
use crate::auth::guard::AuthUser;
use crate::data::Message;
use crate::db::TaskDb;

use super::data::*;
use super::helpers;

#[get("/categories")]
pub async fn categories(user: AuthUser, db: TaskDb) -> ApiResult<Json<Vec<Category>>> {
    let user_id = user.id;
    let rows = db
        .run(move |conn| helpers::list_categories(conn, user_id))
        .await?;
    Ok(Json(rows))
}

#[post("/add-category", format = "json", data = "<request>")]
pub async fn add_category(
    user: AuthUser,
    db: TaskDb,
    request: Json<CategoryRequest>,
) -> ApiResult<(Status, Json<Message>)> {
    let user_id = user.id;
    let request = request.into_inner();
    db.run(move |conn| helpers::add_category(conn, user_id, &request))
        .await?;
    Ok((
        Status::Created,
        Json(Message::new("Category added successfully")),
    ))
}

#[delete("/categories/<id>")]
pub async fn delete_category(user: AuthUser, db: TaskDb, id: CategoryId) -> ApiResult<Json<Message>> {
    let user_id = user.id;
    db.run(move |conn| helpers::delete_category(conn, user_id, id))
        .await?;
    Ok(Json(Message::new(
        "Category and related values deleted successfully",
    )))
}

#[get("/category_values")]
pub async fn category_values(user: AuthUser, db: TaskDb) -> ApiResult<Json<GroupedValues>> {
    let user_id = user.id;
    let grouped = db
        .run(move |conn| helpers::list_values(conn, user_id))
        .await?;
    Ok(Json(grouped))
}

#[post("/add-category_values", format = "json", data = "<request>")]
pub async fn add_category_value(
    user: AuthUser,
    db: TaskDb,
    request: Json<CategoryValueRequest>,
) -> ApiResult<Json<Message>> {
    let user_id = user.id;
    let request = request.into_inner();
    db.run(move |conn| helpers::add_value(conn, user_id, &request))
        .await?;
    Ok(Json(Message::new("Value added successfully")))
}

#[put("/category_values/<id>", format = "json", data = "<request>")]
pub async fn update_category_value(
    user: AuthUser,
    db: TaskDb,
    id: CategoryValueId,
    request: Json<CategoryValueUpdate>,
) -> ApiResult<Json<Message>> {
    let user_id = user.id;
    let request = request.into_inner();
    db.run(move |conn| helpers::update_value(conn, user_id, id, &request))
        .await?;
    Ok(Json(Message::new("Value updated successfully")))
}

#[delete("/category_values/<id>")]
pub async fn delete_category_value(
    user: AuthUser,
    db: TaskDb,
    id: CategoryValueId,
) -> ApiResult<Json<Message>> {
    let user_id = user.id;
    db.run(move |conn| helpers::delete_value(conn, user_id, id))
        .await?;
    Ok(Json(Message::new("Category value deleted successfully")))
}
