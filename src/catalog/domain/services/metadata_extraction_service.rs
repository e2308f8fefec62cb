use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::catalog::domain::model::{
    entities::table_metadata::TableMetadata, enums::catalog_domain_error::CatalogDomainError,
};

#[async_trait]
pub trait MetadataExtractionService: Send + Sync {
    async fn handle_extract(&self) -> Result<BTreeMap<String, TableMetadata>, CatalogDomainError>;
}
