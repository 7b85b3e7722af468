use rocket::fs::TempFile;
use rocket::FromForm;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize, Debug)]
pub struct Profile {
    pub username: String,
    pub email: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub contactnumber: Option<String>,
    pub position: Option<String>,
    pub profile_picture: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ProfileUpdate {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub contactnumber: Option<String>,
    pub position: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChangePasswordRequest {
    #[serde(rename = "oldPassword")]
    pub old_password: Option<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Option<String>,
}

#[derive(FromForm)]
pub struct ProfilePictureUpload<'r> {
    pub profile_picture: Option<TempFile<'r>>,
}

#[derive(Serialize, Debug)]
pub struct UploadResponse {
    pub message: String,
    #[serde(rename = "imagePath")]
    pub image_path: String,
}
