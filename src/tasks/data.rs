use rocket::fs::TempFile;
use rocket::FromForm;
use serde::{Deserialize, Serialize};

use crate::data::UserId;
use crate::taxonomy::data::{PriorityId, StatusId};

pub type TaskId = i64;
pub type TagId = i64;

/// One category/value association captured on a task. A snapshot of the
/// names and color at submission time, never a reference into the live
/// category tables.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TagSnapshot {
    pub category_name: String,
    pub value_name: String,
    pub value_color: String,
}

#[derive(Serialize, Debug)]
pub struct TagRow {
    pub id: TagId,
    pub category_name: String,
    pub value_name: String,
    pub value_color: String,
}

/// Multipart body shared by create and edit. Everything is optional at the
/// parsing layer so missing fields surface as 400, not a form error;
/// `status_id` is only honored on edit.
#[derive(FromForm)]
pub struct TaskForm<'r> {
    pub task_title: Option<String>,
    pub date: Option<String>,
    pub priority_id: Option<PriorityId>,
    pub status_id: Option<StatusId>,
    pub task_description: Option<String>,
    pub task_image: Option<TempFile<'r>>,
    pub extra_categories: Option<String>,
}

pub struct NewTask {
    pub title: String,
    pub date: String,
    pub priority: PriorityId,
    pub description: String,
    pub image: Option<String>,
    pub tags: Vec<TagSnapshot>,
}

pub struct TaskEdit {
    pub title: String,
    pub date: String,
    pub priority: PriorityId,
    pub status: StatusId,
    pub description: String,
    /// Replacement image name; `None` keeps whatever is stored.
    pub image: Option<String>,
    pub tags: Vec<TagSnapshot>,
}

#[derive(Serialize, Debug)]
pub struct TaskView {
    pub id: TaskId,
    pub user_id: UserId,
    pub task_title: String,
    pub date: String,
    pub priority: PriorityId,
    pub status: StatusId,
    pub task_image: Option<String>,
    pub task_description: String,
    #[serde(rename = "completedOn")]
    pub completed_on: Option<String>,
    pub category_values: Vec<TagRow>,
}

#[derive(Serialize, Debug)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskView>,
}
