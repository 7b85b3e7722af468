use chrono::Duration;
use rocket::form::Form;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post, put, State};
use tracing::{info, warn};

use std::net::IpAddr;

use crate::api_error::{ApiError, ApiResult};
use crate::config::AppConfig;
use crate::data::Message;
use crate::db::TaskDb;
use crate::taxonomy::seed;
use crate::uploads;

use super::data::*;
use super::guard::AuthUser;
use super::helpers;
use super::rate_limit::LoginRateLimiter;
use super::token;

#[post("/register", format = "json", data = "<request>")]
pub async fn register(
    db: TaskDb,
    request: Json<RegisterRequest>,
) -> ApiResult<(Status, Json<Message>)> {
    let request = request.into_inner();
    let password_hash = helpers::hash_password(&request.password)?;

    let username = request.username.clone();
    let user_id = db
        .run(move |conn| helpers::register_user(conn, &request, &password_hash))
        .await?;
    info!(user_id, %username, "user registered");

    Ok((
        Status::Created,
        Json(Message::new("User created successfully with defaults")),
    ))
}

#[post("/login", format = "json", data = "<request>")]
pub async fn login(
    db: TaskDb,
    config: &State<AppConfig>,
    limiter: &State<LoginRateLimiter>,
    remote: Option<IpAddr>,
    request: Json<LoginRequest>,
) -> ApiResult<(Status, Json<LoginResponse>)> {
    // Local requests without a resolvable peer address share one bucket.
    let addr = remote.unwrap_or_else(|| IpAddr::from([0u8, 0, 0, 0]));
    if !limiter.allow(addr) {
        warn!(%addr, "login rate limit exceeded");
        return Err(ApiError::TooManyRequests);
    }

    let request = request.into_inner();
    let username = request.username.clone();
    let row = db
        .run(move |conn| helpers::find_user_by_username(conn, &username))
        .await?;
    let (user_id, stored_hash) =
        row.ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if !helpers::verify_password(&request.password, &stored_hash)? {
        return Err(ApiError::Unauthorized("Wrong password".to_string()));
    }

    // Repair path for accounts that predate seeding.
    db.run(move |conn| seed::ensure_defaults(conn, user_id))
        .await?;

    let token = token::issue(
        user_id,
        &config.jwt_secret,
        Duration::hours(config.token_expiry_hours),
    )?;
    Ok((Status::Created, Json(LoginResponse { token })))
}

// Stateless tokens: nothing to revoke server-side, the client discards it.
#[post("/logout")]
pub fn logout() -> Json<Message> {
    Json(Message::new("Logged out successfully"))
}

#[get("/dashboard")]
pub async fn dashboard(user: AuthUser, db: TaskDb) -> ApiResult<Json<Profile>> {
    let user_id = user.id;
    let profile = db
        .run(move |conn| helpers::load_profile(conn, user_id))
        .await?;
    profile
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

#[put("/update", format = "json", data = "<request>")]
pub async fn update_profile(
    user: AuthUser,
    db: TaskDb,
    request: Json<ProfileUpdate>,
) -> ApiResult<Json<Message>> {
    let user_id = user.id;
    let request = request.into_inner();
    db.run(move |conn| helpers::update_profile(conn, user_id, &request))
        .await?;
    Ok(Json(Message::new("Profile updated successfully")))
}

#[put("/change-password", format = "json", data = "<request>")]
pub async fn change_password(
    user: AuthUser,
    db: TaskDb,
    request: Json<ChangePasswordRequest>,
) -> ApiResult<Json<Message>> {
    let request = request.into_inner();
    let (old_password, new_password) = match (request.old_password, request.new_password) {
        (Some(old), Some(new)) if !old.is_empty() && !new.is_empty() => (old, new),
        _ => {
            return Err(ApiError::BadRequest(
                "Old and new password required".to_string(),
            ))
        }
    };

    let user_id = user.id;
    let stored = db
        .run(move |conn| helpers::password_hash_of(conn, user_id))
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if !helpers::verify_password(&old_password, &stored)? {
        return Err(ApiError::Unauthorized(
            "Old password is incorrect".to_string(),
        ));
    }

    let new_hash = helpers::hash_password(&new_password)?;
    db.run(move |conn| helpers::set_password_hash(conn, user_id, &new_hash))
        .await?;

    Ok(Json(Message::new("Password updated successfully")))
}

#[put("/upload-profile-picture", data = "<form>")]
pub async fn upload_profile_picture(
    user: AuthUser,
    db: TaskDb,
    config: &State<AppConfig>,
    form: Form<ProfilePictureUpload<'_>>,
) -> ApiResult<Json<UploadResponse>> {
    let mut form = form.into_inner();
    let file = form
        .profile_picture
        .as_mut()
        .ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    let filename = uploads::store(file, &config.upload_dir).await?;
    let image_path = format!("/uploads/{filename}");

    let user_id = user.id;
    let stored_path = image_path.clone();
    db.run(move |conn| helpers::set_profile_picture(conn, user_id, &stored_path))
        .await?;

    Ok(Json(UploadResponse {
        message: "Profile picture updated".to_string(),
        image_path,
    }))
}
