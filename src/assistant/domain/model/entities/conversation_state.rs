use chrono::Utc;

use crate::assistant::domain::model::{
    entities::chat_message::ChatMessage, enums::chat_role::ChatRole,
};

pub const GREETING: &str = "Hi! I'm DataDoc. Ask me anything about your database.";

#[derive(Clone, Debug)]
pub struct ConversationState {
    messages: Vec<ChatMessage>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            messages: vec![Self::greeting()],
        }
    }

    fn greeting() -> ChatMessage {
        ChatMessage::new(ChatRole::Assistant, GREETING.to_string(), Utc::now())
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages
            .push(ChatMessage::new(ChatRole::User, content.into(), Utc::now()));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(
            ChatRole::Assistant,
            content.into(),
            Utc::now(),
        ));
    }

    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(Self::greeting());
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
