use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::catalog::domain::model::{
    entities::table_quality_report::TableQualityReport,
    enums::catalog_domain_error::CatalogDomainError,
};

#[async_trait]
pub trait QualityAnalysisService: Send + Sync {
    async fn handle_analyze(
        &self,
    ) -> Result<BTreeMap<String, TableQualityReport>, CatalogDomainError>;
}
