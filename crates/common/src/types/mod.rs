use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Plain `{ "message": ... }` body returned by register/logout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
