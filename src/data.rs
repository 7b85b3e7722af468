use serde::Serialize;

pub type UserId = i64;

#[derive(Serialize, Debug)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Message {
        Message {
            message: message.into(),
        }
    }
}
