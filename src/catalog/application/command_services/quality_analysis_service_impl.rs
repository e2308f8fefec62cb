use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::catalog::{
    domain::{
        model::{
            entities::{
                table_metadata::TableMetadata,
                table_quality_report::{
                    ColumnCompleteness, TableQualityReport, select_freshness_column,
                },
            },
            enums::catalog_domain_error::CatalogDomainError,
            value_objects::schema_allow_list::SchemaAllowList,
        },
        services::{
            metadata_extraction_service::MetadataExtractionService,
            quality_analysis_service::QualityAnalysisService,
        },
    },
    infrastructure::persistence::repositories::{
        catalog_report_repository::CatalogReportRepository,
        schema_introspection_repository::{
            SchemaIntrospectionRepository, SchemaIntrospectionSession,
        },
    },
};

pub struct QualityAnalysisServiceImpl {
    metadata_extraction_service: Arc<dyn MetadataExtractionService>,
    introspection_repository: Arc<dyn SchemaIntrospectionRepository>,
    report_repository: Arc<dyn CatalogReportRepository>,
}

impl QualityAnalysisServiceImpl {
    pub fn new(
        metadata_extraction_service: Arc<dyn MetadataExtractionService>,
        introspection_repository: Arc<dyn SchemaIntrospectionRepository>,
        report_repository: Arc<dyn CatalogReportRepository>,
    ) -> Self {
        Self {
            metadata_extraction_service,
            introspection_repository,
            report_repository,
        }
    }

    async fn analyze_with_session(
        &self,
        session: &mut dyn SchemaIntrospectionSession,
        metadata: &BTreeMap<String, TableMetadata>,
    ) -> Result<BTreeMap<String, TableQualityReport>, CatalogDomainError> {
        let allow_list = SchemaAllowList::from_metadata(metadata.values());

        let mut reports = BTreeMap::new();
        for (table_name, table_metadata) in metadata {
            let table = allow_list.table(table_name)?;

            session.begin_read_snapshot(&table).await?;
            let report = analyze_table(session, &allow_list, table_metadata).await?;
            session.end_read_snapshot(&table).await?;

            debug!(
                table = %table_name,
                total_rows = report.total_rows,
                duplicate_primary_keys = report.duplicate_primary_keys,
                freshness_column = ?report.freshness_column,
                "analyzed table"
            );

            self.report_repository
                .save_quality_report(table_name, &report)
                .await?;
            reports.insert(table_name.clone(), report);
        }

        Ok(reports)
    }
}

async fn analyze_table(
    session: &mut dyn SchemaIntrospectionSession,
    allow_list: &SchemaAllowList,
    metadata: &TableMetadata,
) -> Result<TableQualityReport, CatalogDomainError> {
    let table_name = metadata.table_name.as_str();
    let table = allow_list.table(table_name)?;

    let total_rows = session.count_rows(&table).await?;

    let mut column_completeness = BTreeMap::new();
    for column in &metadata.columns {
        let identifier = allow_list.column(table_name, &column.column_name)?;
        let non_null_count = session.count_non_null(&table, &identifier).await?;
        column_completeness.insert(
            column.column_name.clone(),
            ColumnCompleteness::new(non_null_count, total_rows),
        );
    }

    let duplicate_primary_keys = match metadata.first_primary_key() {
        Some(primary_key) => {
            let identifier = allow_list.column(table_name, primary_key)?;
            session.count_duplicate_values(&table, &identifier).await?
        }
        None => 0,
    };

    let freshness_column = select_freshness_column(&metadata.columns);
    let last_updated = match freshness_column {
        Some(column) => {
            let identifier = allow_list.column(table_name, &column.column_name)?;
            session.max_value(&table, &identifier).await?
        }
        None => None,
    };

    Ok(TableQualityReport {
        total_rows,
        column_completeness,
        duplicate_primary_keys,
        freshness_column: freshness_column.map(|c| c.column_name.clone()),
        last_updated,
    })
}

#[async_trait]
impl QualityAnalysisService for QualityAnalysisServiceImpl {
    async fn handle_analyze(
        &self,
    ) -> Result<BTreeMap<String, TableQualityReport>, CatalogDomainError> {
        let metadata = self.metadata_extraction_service.handle_extract().await?;

        let mut session = self.introspection_repository.open_session().await?;

        let result = self.analyze_with_session(session.as_mut(), &metadata).await;

        if let Err(error) = session.close().await {
            warn!(%error, "failed to close analysis session");
        }

        let reports = result?;
        info!(tables = reports.len(), "data quality analysis completed");
        Ok(reports)
    }
}
