use serde::Deserialize;

/// Application settings extracted from Rocket's figment (`Rocket.toml` or
/// `ROCKET_*` environment variables).
#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_token_expiry_hours")]
    pub token_expiry_hours: i64,
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_token_expiry_hours() -> i64 {
    3
}
