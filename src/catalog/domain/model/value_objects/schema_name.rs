use regex::Regex;

use crate::catalog::domain::model::enums::catalog_domain_error::CatalogDomainError;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SchemaName(String);

impl SchemaName {
    pub fn new(value: String) -> Result<Self, CatalogDomainError> {
        let trimmed = value.trim();
        let regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("valid regex");

        if !regex.is_match(trimmed) {
            return Err(CatalogDomainError::InvalidSchemaName);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
