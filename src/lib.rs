//! taskboard - personal task management REST service
//!
//! Users register, log in, and manage tasks with per-user priority levels,
//! workflow statuses, and free-form category/value tags. All endpoints live
//! under `/auth` and, apart from register/login, require a bearer token.
//!
//! # Module Organization
//!
//! - `auth`: registration, login, token guard, profile, rate limiting
//! - `taxonomy`: per-user priorities and statuses plus default seeding
//! - `categories`: user-defined categories and their values
//! - `tasks`: the task store, tag snapshots, and completion stamping
//! - `db`: pooled SQLite access and schema bootstrap
//! - `api_error`: the error taxonomy every handler maps into

#[macro_use]
extern crate rocket;

pub mod api_error;
pub mod auth;
pub mod categories;
pub mod config;
pub mod data;
pub mod db;
pub mod tasks;
pub mod taxonomy;
pub mod uploads;

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use tracing::warn;

use crate::auth::rate_limit::LoginRateLimiter;
use crate::config::AppConfig;
use crate::db::TaskDb;

pub fn build(figment: Figment) -> Rocket<Build> {
    let upload_dir: String = figment
        .extract_inner("upload_dir")
        .unwrap_or_else(|_| "uploads".to_string());
    if let Err(e) = std::fs::create_dir_all(&upload_dir) {
        warn!("could not create upload directory {upload_dir}: {e}");
    }

    rocket::custom(figment)
        .attach(TaskDb::fairing())
        .attach(AdHoc::config::<AppConfig>())
        .attach(AdHoc::try_on_ignite("schema", db::init_schema))
        .manage(LoginRateLimiter::default())
        .mount(
            "/auth",
            routes![
                auth::endpoints::register,
                auth::endpoints::login,
                auth::endpoints::logout,
                auth::endpoints::dashboard,
                auth::endpoints::update_profile,
                auth::endpoints::change_password,
                auth::endpoints::upload_profile_picture,
                taxonomy::endpoints::priorities,
                taxonomy::endpoints::add_priority,
                taxonomy::endpoints::update_priority,
                taxonomy::endpoints::delete_priority,
                taxonomy::endpoints::statuses,
                taxonomy::endpoints::add_status,
                taxonomy::endpoints::update_status,
                taxonomy::endpoints::delete_status,
                categories::endpoints::categories,
                categories::endpoints::add_category,
                categories::endpoints::delete_category,
                categories::endpoints::category_values,
                categories::endpoints::add_category_value,
                categories::endpoints::update_category_value,
                categories::endpoints::delete_category_value,
                tasks::endpoints::tasks,
                tasks::endpoints::add_task,
                tasks::endpoints::edit_task,
                tasks::endpoints::delete_task,
            ],
        )
        .mount("/uploads", FileServer::from(upload_dir))
        .register(
            "/",
            catchers![
                api_error::bad_request,
                api_error::unauthorized,
                api_error::forbidden,
                api_error::not_found,
                api_error::unprocessable,
                api_error::internal,
            ],
        )
}
