use async_trait::async_trait;

use crate::assistant::domain::model::{
    commands::ask_question_command::AskQuestionCommand,
    entities::conversation_state::ConversationState,
    enums::assistant_domain_error::AssistantDomainError,
};

#[async_trait]
pub trait AssistantAnswerService: Send + Sync {
    async fn handle_ask(
        &self,
        state: &mut ConversationState,
        command: AskQuestionCommand,
    ) -> Result<String, AssistantDomainError>;
}
