use std::fmt;

use crate::catalog::domain::model::enums::catalog_domain_error::CatalogDomainError;

#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TableName(String);

impl TableName {
    pub fn new(value: String) -> Result<Self, CatalogDomainError> {
        let trimmed = value.trim();
        let valid = !trimmed.is_empty()
            && !trimmed.starts_with('.')
            && !trimmed
                .chars()
                .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control());

        if !valid {
            return Err(CatalogDomainError::InvalidTableName);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
