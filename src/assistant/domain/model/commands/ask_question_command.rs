use crate::assistant::domain::model::{
    enums::assistant_domain_error::AssistantDomainError, value_objects::question::Question,
};

#[derive(Clone, Debug)]
pub struct AskQuestionCommand {
    question: Question,
}

impl AskQuestionCommand {
    pub fn new(question: String) -> Result<Self, AssistantDomainError> {
        Ok(Self {
            question: Question::new(question)?,
        })
    }

    pub fn question(&self) -> &Question {
        &self.question
    }
}
