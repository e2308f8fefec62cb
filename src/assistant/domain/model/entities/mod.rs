pub mod chat_message;
pub mod conversation_state;
pub mod intent_rule;
