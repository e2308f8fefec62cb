use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogDomainError {
    #[error("database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("schema enumeration failed: {0}")]
    SchemaEnumerationFailed(String),

    #[error("introspection failed for table {table_name}: {message}")]
    IntrospectionFailed { table_name: String, message: String },

    #[error("quality query failed for table {table_name}: {message}")]
    QueryFailed { table_name: String, message: String },

    #[error("storage failed for table {table_name}: {message}")]
    StorageFailed { table_name: String, message: String },

    #[error("identifier was not returned by schema introspection: {0}")]
    UnknownIdentifier(String),

    #[error("table name is invalid")]
    InvalidTableName,

    #[error("schema name is invalid")]
    InvalidSchemaName,

    #[error("table not found in catalog: {0}")]
    TableNotFound(String),

    #[error("quality report not found in catalog: {0}")]
    QualityReportNotFound(String),

    #[error("infrastructure error: {0}")]
    InfrastructureError(String),
}

impl CatalogDomainError {
    pub fn introspection(table_name: &str, error: impl ToString) -> Self {
        Self::IntrospectionFailed {
            table_name: table_name.to_string(),
            message: error.to_string(),
        }
    }

    pub fn query(table_name: &str, error: impl ToString) -> Self {
        Self::QueryFailed {
            table_name: table_name.to_string(),
            message: error.to_string(),
        }
    }

    pub fn storage(table_name: &str, error: impl ToString) -> Self {
        Self::StorageFailed {
            table_name: table_name.to_string(),
            message: error.to_string(),
        }
    }
}
