use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assistant::domain::model::enums::chat_role::ChatRole;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: String, sent_at: DateTime<Utc>) -> Self {
        Self {
            role,
            content,
            sent_at,
        }
    }
}
