use async_trait::async_trait;

use crate::catalog::domain::model::{
    entities::{table_metadata::TableMetadata, table_quality_report::TableQualityReport},
    enums::catalog_domain_error::CatalogDomainError,
    queries::table_catalog_query::TableCatalogQuery,
};

#[async_trait]
pub trait CatalogQueryService: Send + Sync {
    async fn handle_list_tables(&self) -> Result<Vec<String>, CatalogDomainError>;

    async fn handle_get_metadata(
        &self,
        query: TableCatalogQuery,
    ) -> Result<TableMetadata, CatalogDomainError>;

    async fn handle_get_quality_report(
        &self,
        query: TableCatalogQuery,
    ) -> Result<TableQualityReport, CatalogDomainError>;

    async fn handle_get_documentation(
        &self,
        query: TableCatalogQuery,
    ) -> Result<Option<String>, CatalogDomainError>;
}
