use async_trait::async_trait;

use crate::catalog::domain::model::{
    entities::{table_metadata::TableMetadata, table_quality_report::TableQualityReport},
    enums::catalog_domain_error::CatalogDomainError,
};

#[derive(Clone, Debug)]
pub struct CatalogTableSnapshot {
    pub metadata: TableMetadata,
    pub quality: Option<TableQualityReport>,
    pub documentation: Option<String>,
}

#[async_trait]
pub trait CatalogFacade: Send + Sync {
    async fn list_tables(&self) -> Result<Vec<String>, CatalogDomainError>;

    async fn table_snapshot(
        &self,
        table_name: &str,
    ) -> Result<CatalogTableSnapshot, CatalogDomainError>;
}
