// Shared by every integration test binary; each uses a different subset.
#![allow(dead_code)]

use std::path::PathBuf;

use rocket::http::{ContentType, Header, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

pub const TEST_SECRET: &str = "test-secret";
pub const TEST_PASSWORD: &str = "hunter2";

const BOUNDARY: &str = "taskboard-test-boundary";

pub struct TestApp {
    pub client: Client,
    pub db_path: PathBuf,
    _dir: TempDir,
}

pub struct FilePart<'a> {
    pub field: &'a str,
    pub filename: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

pub fn spawn() -> TestApp {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let db_path = dir.path().join("taskboard-test.db");
    let upload_dir = dir.path().join("uploads");

    let figment = rocket::Config::figment()
        .merge(("databases.taskdb.url", db_path.display().to_string()))
        .merge(("jwt_secret", TEST_SECRET))
        .merge(("upload_dir", upload_dir.display().to_string()))
        .merge(("log_level", "off"));

    let client = Client::tracked(taskboard::build(figment)).expect("valid rocket instance");

    TestApp {
        client,
        db_path,
        _dir: dir,
    }
}

impl TestApp {
    pub fn register(&self, username: &str) -> Status {
        self.client
            .post("/auth/register")
            .header(ContentType::JSON)
            .body(
                json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": TEST_PASSWORD,
                    "firstname": "Test",
                    "lastname": "User",
                })
                .to_string(),
            )
            .dispatch()
            .status()
    }

    pub fn login_raw(&self, username: &str, password: &str) -> (Status, Value) {
        let response = self
            .client
            .post("/auth/login")
            .header(ContentType::JSON)
            .body(json!({ "username": username, "password": password }).to_string())
            .dispatch();
        let status = response.status();
        let body = response.into_json::<Value>().unwrap_or(Value::Null);
        (status, body)
    }

    pub fn register_and_login(&self, username: &str) -> String {
        assert_eq!(self.register(username), Status::Created);
        let (status, body) = self.login_raw(username, TEST_PASSWORD);
        assert_eq!(status, Status::Created);
        body["token"].as_str().expect("login token").to_string()
    }

    pub fn get(&self, token: &str, path: &str) -> (Status, Value) {
        let response = self
            .client
            .get(path)
            .header(bearer(token))
            .dispatch();
        let status = response.status();
        let body = response.into_json::<Value>().unwrap_or(Value::Null);
        (status, body)
    }

    pub fn post(&self, token: &str, path: &str, body: Value) -> (Status, Value) {
        let response = self
            .client
            .post(path)
            .header(bearer(token))
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch();
        let status = response.status();
        let body = response.into_json::<Value>().unwrap_or(Value::Null);
        (status, body)
    }

    pub fn put(&self, token: &str, path: &str, body: Value) -> (Status, Value) {
        let response = self
            .client
            .put(path)
            .header(bearer(token))
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch();
        let status = response.status();
        let body = response.into_json::<Value>().unwrap_or(Value::Null);
        (status, body)
    }

    pub fn delete(&self, token: &str, path: &str) -> (Status, Value) {
        let response = self
            .client
            .delete(path)
            .header(bearer(token))
            .dispatch();
        let status = response.status();
        let body = response.into_json::<Value>().unwrap_or(Value::Null);
        (status, body)
    }

    pub fn post_multipart(
        &self,
        token: &str,
        path: &str,
        fields: &[(&str, &str)],
        file: Option<&FilePart<'_>>,
    ) -> (Status, Value) {
        let response = self
            .client
            .post(path)
            .header(bearer(token))
            .header(multipart_content_type())
            .body(multipart_body(fields, file))
            .dispatch();
        let status = response.status();
        let body = response.into_json::<Value>().unwrap_or(Value::Null);
        (status, body)
    }

    pub fn put_multipart(
        &self,
        token: &str,
        path: &str,
        fields: &[(&str, &str)],
        file: Option<&FilePart<'_>>,
    ) -> (Status, Value) {
        let response = self
            .client
            .put(path)
            .header(bearer(token))
            .header(multipart_content_type())
            .body(multipart_body(fields, file))
            .dispatch();
        let status = response.status();
        let body = response.into_json::<Value>().unwrap_or(Value::Null);
        (status, body)
    }
}

pub fn bearer(token: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {token}"))
}

fn multipart_content_type() -> ContentType {
    ContentType::parse_flexible(&format!("multipart/form-data; boundary={BOUNDARY}"))
        .expect("multipart content type")
}

fn multipart_body(fields: &[(&str, &str)], file: Option<&FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.filename, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
