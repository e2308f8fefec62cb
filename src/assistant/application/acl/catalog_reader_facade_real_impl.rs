use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    assistant::{
        domain::model::enums::assistant_domain_error::AssistantDomainError,
        interfaces::acl::catalog_reader_facade::CatalogReaderFacade,
    },
    catalog::{
        domain::model::enums::catalog_domain_error::CatalogDomainError,
        interfaces::acl::catalog_facade::{CatalogFacade, CatalogTableSnapshot},
    },
};

pub struct CatalogReaderFacadeRealImpl {
    facade: Arc<dyn CatalogFacade>,
}

impl CatalogReaderFacadeRealImpl {
    pub fn new(facade: Arc<dyn CatalogFacade>) -> Self {
        Self { facade }
    }
}

#[async_trait]
impl CatalogReaderFacade for CatalogReaderFacadeRealImpl {
    async fn list_tables(&self) -> Result<Vec<String>, AssistantDomainError> {
        self.facade
            .list_tables()
            .await
            .map_err(|e| AssistantDomainError::CatalogUnavailable(e.to_string()))
    }

    async fn table_snapshot(
        &self,
        table_name: &str,
    ) -> Result<CatalogTableSnapshot, AssistantDomainError> {
        self.facade
            .table_snapshot(table_name)
            .await
            .map_err(|e| match e {
                CatalogDomainError::TableNotFound(name) => {
                    AssistantDomainError::TableNotInCatalog(name)
                }
                other => AssistantDomainError::CatalogUnavailable(other.to_string()),
            })
    }
}
