use serde::{Deserialize, Serialize};

use std::collections::HashMap;

use crate::data::UserId;

pub type CategoryId = i64;
pub type CategoryValueId = i64;

#[derive(Serialize, Debug)]
pub struct Category {
    pub id: CategoryId,
    pub user_id: UserId,
    pub category_name: String,
}

#[derive(Deserialize, Debug)]
pub struct CategoryRequest {
    pub category_name: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct CategoryValue {
    pub id: CategoryValueId,
    pub category_id: CategoryId,
    pub value_name: String,
    pub value_color: String,
}

#[derive(Deserialize, Debug)]
pub struct CategoryValueRequest {
    pub category_id: Option<CategoryId>,
    pub value_name: Option<String>,
    pub value_color: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CategoryValueUpdate {
    pub value_name: Option<String>,
    pub value_color: Option<String>,
}

/// All of a user's values keyed by their category id.
pub type GroupedValues = HashMap<CategoryId, Vec<CategoryValue>>;
