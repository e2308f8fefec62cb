use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{
    domain::{
        model::{
            enums::catalog_domain_error::CatalogDomainError,
            queries::table_catalog_query::TableCatalogQuery,
        },
        services::catalog_query_service::CatalogQueryService,
    },
    interfaces::acl::catalog_facade::{CatalogFacade, CatalogTableSnapshot},
};

pub struct CatalogFacadeImpl {
    query_service: Arc<dyn CatalogQueryService>,
}

impl CatalogFacadeImpl {
    pub fn new(query_service: Arc<dyn CatalogQueryService>) -> Self {
        Self { query_service }
    }
}

#[async_trait]
impl CatalogFacade for CatalogFacadeImpl {
    async fn list_tables(&self) -> Result<Vec<String>, CatalogDomainError> {
        self.query_service.handle_list_tables().await
    }

    async fn table_snapshot(
        &self,
        table_name: &str,
    ) -> Result<CatalogTableSnapshot, CatalogDomainError> {
        let query = TableCatalogQuery::new(table_name.to_string())?;

        let metadata = self.query_service.handle_get_metadata(query.clone()).await?;
        let quality = match self
            .query_service
            .handle_get_quality_report(query.clone())
            .await
        {
            Ok(report) => Some(report),
            Err(CatalogDomainError::QualityReportNotFound(_)) => None,
            Err(error) => return Err(error),
        };
        let documentation = self.query_service.handle_get_documentation(query).await?;

        Ok(CatalogTableSnapshot {
            metadata,
            quality,
            documentation,
        })
    }
}
