use serde::{Deserialize, Serialize};

use crate::data::UserId;

pub type PriorityId = i64;
pub type StatusId = i64;

#[derive(Serialize, Debug)]
pub struct Priority {
    pub id: PriorityId,
    pub user_id: UserId,
    pub priority_name: String,
    pub priority_color: String,
    pub priority_level: i64,
    pub is_default: bool,
}

#[derive(Serialize, Debug)]
pub struct TaskStatus {
    pub id: StatusId,
    pub user_id: UserId,
    pub status_name: String,
    pub status_color: String,
    pub is_default: bool,
}

#[derive(Deserialize, Debug)]
pub struct PriorityRequest {
    pub priority_name: Option<String>,
    pub priority_color: Option<String>,
    pub priority_level: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct StatusRequest {
    pub status_name: Option<String>,
    pub status_color: Option<String>,
}
