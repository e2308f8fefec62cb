use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantDomainError {
    #[error("question is empty")]
    EmptyQuestion,

    #[error("table is not in the catalog: {0}")]
    TableNotInCatalog(String),

    #[error("catalog is unavailable: {0}")]
    CatalogUnavailable(String),
}
