use async_trait::async_trait;
use serde_json::Value;

use crate::catalog::domain::model::{
    enums::catalog_domain_error::CatalogDomainError,
    value_objects::sql_identifier::SqlIdentifier,
};

#[derive(Clone, Debug, PartialEq)]
pub struct IntrospectedColumn {
    pub column_name: String,
    pub data_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    // 1-based, 0 outside the key.
    pub primary_key_position: u32,
}

#[async_trait]
pub trait SchemaIntrospectionRepository: Send + Sync {
    async fn open_session(&self)
    -> Result<Box<dyn SchemaIntrospectionSession>, CatalogDomainError>;
}

#[async_trait]
pub trait SchemaIntrospectionSession: Send {
    async fn list_user_tables(&mut self) -> Result<Vec<String>, CatalogDomainError>;

    async fn introspect_columns(
        &mut self,
        table: &SqlIdentifier,
    ) -> Result<Vec<IntrospectedColumn>, CatalogDomainError>;

    async fn begin_read_snapshot(&mut self, table: &SqlIdentifier)
    -> Result<(), CatalogDomainError>;

    async fn end_read_snapshot(&mut self, table: &SqlIdentifier) -> Result<(), CatalogDomainError>;

    async fn count_rows(&mut self, table: &SqlIdentifier) -> Result<u64, CatalogDomainError>;

    async fn count_non_null(
        &mut self,
        table: &SqlIdentifier,
        column: &SqlIdentifier,
    ) -> Result<u64, CatalogDomainError>;

    async fn count_duplicate_values(
        &mut self,
        table: &SqlIdentifier,
        column: &SqlIdentifier,
    ) -> Result<u64, CatalogDomainError>;

    async fn max_value(
        &mut self,
        table: &SqlIdentifier,
        column: &SqlIdentifier,
    ) -> Result<Option<Value>, CatalogDomainError>;

    async fn close(&mut self) -> Result<(), CatalogDomainError>;
}
