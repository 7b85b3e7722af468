mod support;

use rocket::http::Status;
use serde_json::json;

use support::{bearer, spawn, FilePart, TEST_PASSWORD, TEST_SECRET};

#[test]
fn register_then_login_round_trip() {
    let app = spawn();

    assert_eq!(app.register("alice"), Status::Created);
    assert_eq!(app.register("alice"), Status::Conflict);

    let (status, body) = app.login_raw("alice", TEST_PASSWORD);
    assert_eq!(status, Status::Created);
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));
}

#[test]
fn login_rejects_unknown_user_and_wrong_password() {
    let app = spawn();

    let (status, _) = app.login_raw("nobody", TEST_PASSWORD);
    assert_eq!(status, Status::NotFound);

    assert_eq!(app.register("bob"), Status::Created);
    let (status, _) = app.login_raw("bob", "not-the-password");
    assert_eq!(status, Status::Unauthorized);
}

#[test]
fn login_attempts_are_rate_limited() {
    let app = spawn();
    assert_eq!(app.register("carol"), Status::Created);

    for _ in 0..5 {
        let (status, _) = app.login_raw("carol", "not-the-password");
        assert_eq!(status, Status::Unauthorized);
    }

    // Sixth attempt in the window is blocked even with valid credentials.
    let (status, _) = app.login_raw("carol", TEST_PASSWORD);
    assert_eq!(status, Status::TooManyRequests);
}

#[test]
fn bearer_guard_rejects_missing_malformed_and_forged_tokens() {
    let app = spawn();
    let token = app.register_and_login("dave");

    let response = app.client.get("/auth/tasks").dispatch();
    assert_eq!(response.status(), Status::Forbidden);

    let response = app
        .client
        .get("/auth/tasks")
        .header(rocket::http::Header::new("Authorization", "Token abc"))
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);

    let (status, _) = app.get("garbage.token.here", "/auth/tasks");
    assert_eq!(status, Status::Unauthorized);

    let expired =
        taskboard::auth::token::issue(1, TEST_SECRET, chrono::Duration::hours(-4)).unwrap();
    let (status, _) = app.get(&expired, "/auth/tasks");
    assert_eq!(status, Status::Unauthorized);

    let forged =
        taskboard::auth::token::issue(1, "some-other-secret", chrono::Duration::hours(3)).unwrap();
    let (status, _) = app.get(&forged, "/auth/tasks");
    assert_eq!(status, Status::Unauthorized);

    let (status, _) = app.get(&token, "/auth/tasks");
    assert_eq!(status, Status::Ok);
}

#[test]
fn dashboard_returns_the_registered_profile() {
    let app = spawn();
    let token = app.register_and_login("erin");

    let (status, body) = app.get(&token, "/auth/dashboard");
    assert_eq!(status, Status::Ok);
    assert_eq!(body["username"], "erin");
    assert_eq!(body["email"], "erin@example.com");
    assert_eq!(body["firstname"], "Test");
    assert_eq!(body["lastname"], "User");
    assert!(body["profile_picture"].is_null());
}

#[test]
fn profile_update_touches_only_supplied_fields() {
    let app = spawn();
    let token = app.register_and_login("frank");

    let (status, _) = app.put(&token, "/auth/update", json!({ "position": "Engineer" }));
    assert_eq!(status, Status::Ok);

    let (_, body) = app.get(&token, "/auth/dashboard");
    assert_eq!(body["position"], "Engineer");
    assert_eq!(body["firstname"], "Test");

    let (status, _) = app.put(&token, "/auth/update", json!({}));
    assert_eq!(status, Status::BadRequest);
}

#[test]
fn change_password_requires_the_old_one() {
    let app = spawn();
    let token = app.register_and_login("grace");

    let (status, _) = app.put(
        &token,
        "/auth/change-password",
        json!({ "oldPassword": "not-the-password", "newPassword": "s3cret!" }),
    );
    assert_eq!(status, Status::Unauthorized);

    let (status, _) = app.put(
        &token,
        "/auth/change-password",
        json!({ "oldPassword": TEST_PASSWORD }),
    );
    assert_eq!(status, Status::BadRequest);

    let (status, _) = app.put(
        &token,
        "/auth/change-password",
        json!({ "oldPassword": TEST_PASSWORD, "newPassword": "s3cret!" }),
    );
    assert_eq!(status, Status::Ok);

    let (status, _) = app.login_raw("grace", TEST_PASSWORD);
    assert_eq!(status, Status::Unauthorized);
    let (status, _) = app.login_raw("grace", "s3cret!");
    assert_eq!(status, Status::Created);
}

#[test]
fn profile_picture_upload_is_stored_and_served() {
    let app = spawn();
    let token = app.register_and_login("holly");

    let bytes = b"\x89PNG-not-really-a-png";
    let file = FilePart {
        field: "profile_picture",
        filename: "avatar.png",
        content_type: "image/png",
        bytes,
    };
    let (status, body) = app.put_multipart(&token, "/auth/upload-profile-picture", &[], Some(&file));
    assert_eq!(status, Status::Ok);

    let image_path = body["imagePath"].as_str().expect("imagePath").to_string();
    assert!(image_path.starts_with("/uploads/"));

    let (_, dashboard) = app.get(&token, "/auth/dashboard");
    assert_eq!(dashboard["profile_picture"].as_str().unwrap(), image_path);

    let served = app
        .client
        .get(image_path.as_str())
        .header(bearer(&token))
        .dispatch();
    assert_eq!(served.status(), Status::Ok);
    assert_eq!(served.into_bytes().unwrap(), bytes.to_vec());
}

#[test]
fn upload_without_a_file_is_rejected() {
    let app = spawn();
    let token = app.register_and_login("iris");

    let (status, _) = app.put_multipart(&token, "/auth/upload-profile-picture", &[], None);
    assert_eq!(status, Status::BadRequest);
}

#[test]
fn logout_is_a_stateless_no_op() {
    let app = spawn();
    let response = app.client.post("/auth/logout").dispatch();
    assert_eq!(response.status(), Status::Ok);
}
