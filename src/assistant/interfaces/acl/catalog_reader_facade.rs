use async_trait::async_trait;

use crate::{
    assistant::domain::model::enums::assistant_domain_error::AssistantDomainError,
    catalog::interfaces::acl::catalog_facade::CatalogTableSnapshot,
};

#[async_trait]
pub trait CatalogReaderFacade: Send + Sync {
    async fn list_tables(&self) -> Result<Vec<String>, AssistantDomainError>;

    async fn table_snapshot(
        &self,
        table_name: &str,
    ) -> Result<CatalogTableSnapshot, AssistantDomainError>;
}
