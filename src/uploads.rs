use chrono::Utc;
use rocket::fs::TempFile;

use std::path::Path;

use crate::api_error::ApiResult;

/// Writes an uploaded part into the upload directory under a generated name
/// and returns that name. File contents are opaque to the server.
pub async fn store(file: &mut TempFile<'_>, upload_dir: &str) -> ApiResult<String> {
    let extension = file
        .content_type()
        .and_then(|content_type| content_type.extension())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    let filename = format!("{}{}", Utc::now().timestamp_millis(), extension);

    file.copy_to(Path::new(upload_dir).join(&filename)).await?;

    Ok(filename)
}
