use async_trait::async_trait;

use crate::catalog::domain::model::{
    entities::{table_metadata::TableMetadata, table_quality_report::TableQualityReport},
    enums::catalog_domain_error::CatalogDomainError,
    value_objects::table_name::TableName,
};

#[async_trait]
pub trait CatalogReportRepository: Send + Sync {
    async fn save_table_metadata(&self, metadata: &TableMetadata) -> Result<(), CatalogDomainError>;

    async fn save_quality_report(
        &self,
        table_name: &str,
        report: &TableQualityReport,
    ) -> Result<(), CatalogDomainError>;

    async fn find_table_metadata(
        &self,
        table_name: &TableName,
    ) -> Result<Option<TableMetadata>, CatalogDomainError>;

    async fn find_quality_report(
        &self,
        table_name: &TableName,
    ) -> Result<Option<TableQualityReport>, CatalogDomainError>;

    async fn list_table_names(&self) -> Result<Vec<String>, CatalogDomainError>;

    async fn find_table_documentation(
        &self,
        table_name: &TableName,
    ) -> Result<Option<String>, CatalogDomainError>;
}
