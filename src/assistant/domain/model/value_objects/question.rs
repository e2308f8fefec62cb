use regex::Regex;

use crate::assistant::domain::model::enums::assistant_domain_error::AssistantDomainError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question {
    original: String,
    normalized: String,
}

impl Question {
    pub fn new(value: String) -> Result<Self, AssistantDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AssistantDomainError::EmptyQuestion);
        }

        Ok(Self {
            original: trimmed.to_string(),
            normalized: trimmed.to_lowercase(),
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.normalized.contains(phrase)
    }

    pub fn mentions(&self, word: &str) -> bool {
        let pattern = format!(r"\b{}\b", regex::escape(&word.to_lowercase()));
        Regex::new(&pattern)
            .map(|regex| regex.is_match(&self.normalized))
            .unwrap_or(false)
    }

    // A plural table name also matches its singular form.
    pub fn mentioned_among<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        candidates
            .iter()
            .find(|name| self.mentions(name))
            .or_else(|| {
                candidates.iter().find(|name| {
                    name.len() > 1
                        && name
                            .strip_suffix('s')
                            .is_some_and(|singular| self.mentions(singular))
                })
            })
            .map(String::as_str)
    }
}
