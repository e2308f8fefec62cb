use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{
    domain::{
        model::{
            entities::{table_metadata::TableMetadata, table_quality_report::TableQualityReport},
            enums::catalog_domain_error::CatalogDomainError,
            queries::table_catalog_query::TableCatalogQuery,
        },
        services::catalog_query_service::CatalogQueryService,
    },
    infrastructure::persistence::repositories::catalog_report_repository::CatalogReportRepository,
};

pub struct CatalogQueryServiceImpl {
    report_repository: Arc<dyn CatalogReportRepository>,
}

impl CatalogQueryServiceImpl {
    pub fn new(report_repository: Arc<dyn CatalogReportRepository>) -> Self {
        Self { report_repository }
    }
}

#[async_trait]
impl CatalogQueryService for CatalogQueryServiceImpl {
    async fn handle_list_tables(&self) -> Result<Vec<String>, CatalogDomainError> {
        self.report_repository.list_table_names().await
    }

    async fn handle_get_metadata(
        &self,
        query: TableCatalogQuery,
    ) -> Result<TableMetadata, CatalogDomainError> {
        self.report_repository
            .find_table_metadata(query.table_name())
            .await?
            .ok_or_else(|| CatalogDomainError::TableNotFound(query.table_name().to_string()))
    }

    async fn handle_get_quality_report(
        &self,
        query: TableCatalogQuery,
    ) -> Result<TableQualityReport, CatalogDomainError> {
        self.report_repository
            .find_quality_report(query.table_name())
            .await?
            .ok_or_else(|| {
                CatalogDomainError::QualityReportNotFound(query.table_name().to_string())
            })
    }

    async fn handle_get_documentation(
        &self,
        query: TableCatalogQuery,
    ) -> Result<Option<String>, CatalogDomainError> {
        self.report_repository
            .find_table_documentation(query.table_name())
            .await
    }
}
