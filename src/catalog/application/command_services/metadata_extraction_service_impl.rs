use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::catalog::{
    domain::{
        model::{
            entities::{
                table_metadata::{ColumnDescriptor, TableMetadata},
                table_quality_report::find_quality_record_clash,
            },
            enums::catalog_domain_error::CatalogDomainError,
            value_objects::schema_allow_list::SchemaAllowList,
        },
        services::metadata_extraction_service::MetadataExtractionService,
    },
    infrastructure::persistence::repositories::{
        catalog_report_repository::CatalogReportRepository,
        schema_introspection_repository::{
            IntrospectedColumn, SchemaIntrospectionRepository, SchemaIntrospectionSession,
        },
    },
};

pub struct MetadataExtractionServiceImpl {
    introspection_repository: Arc<dyn SchemaIntrospectionRepository>,
    report_repository: Arc<dyn CatalogReportRepository>,
}

impl MetadataExtractionServiceImpl {
    pub fn new(
        introspection_repository: Arc<dyn SchemaIntrospectionRepository>,
        report_repository: Arc<dyn CatalogReportRepository>,
    ) -> Self {
        Self {
            introspection_repository,
            report_repository,
        }
    }

    async fn extract_with_session(
        &self,
        session: &mut dyn SchemaIntrospectionSession,
    ) -> Result<BTreeMap<String, TableMetadata>, CatalogDomainError> {
        let table_names = session.list_user_tables().await?;
        if let Some((table_name, owner)) = find_quality_record_clash(&table_names) {
            return Err(CatalogDomainError::storage(
                table_name,
                format!("record name clashes with the quality report of table {owner}"),
            ));
        }
        let allow_list = SchemaAllowList::from_table_names(table_names.iter().cloned());

        let mut extracted = BTreeMap::new();
        for table_name in &table_names {
            let table = allow_list.table(table_name)?;
            let columns = session.introspect_columns(&table).await?;
            let metadata = build_table_metadata(table_name, columns);

            debug!(
                table = %table_name,
                columns = metadata.columns.len(),
                primary_keys = ?metadata.primary_keys,
                "introspected table"
            );

            self.report_repository.save_table_metadata(&metadata).await?;
            extracted.insert(table_name.clone(), metadata);
        }

        Ok(extracted)
    }
}

// Primary keys follow key position, so composite keys keep their declared order.
pub fn build_table_metadata(table_name: &str, columns: Vec<IntrospectedColumn>) -> TableMetadata {
    let mut key_columns = columns
        .iter()
        .filter(|c| c.primary_key_position > 0)
        .map(|c| (c.primary_key_position, c.column_name.clone()))
        .collect::<Vec<_>>();
    key_columns.sort_by_key(|(position, _)| *position);

    let descriptors = columns
        .into_iter()
        .map(|c| ColumnDescriptor {
            column_name: c.column_name,
            data_type: c.data_type,
            not_null: c.not_null,
            default_value: c.default_value,
        })
        .collect();

    TableMetadata::new(
        table_name.to_string(),
        descriptors,
        key_columns.into_iter().map(|(_, name)| name).collect(),
    )
}

#[async_trait]
impl MetadataExtractionService for MetadataExtractionServiceImpl {
    async fn handle_extract(&self) -> Result<BTreeMap<String, TableMetadata>, CatalogDomainError> {
        let mut session = self.introspection_repository.open_session().await?;

        let result = self.extract_with_session(session.as_mut()).await;

        if let Err(error) = session.close().await {
            warn!(%error, "failed to close introspection session");
        }

        let extracted = result?;
        info!(
            tables = ?extracted.keys().collect::<Vec<_>>(),
            "metadata extracted"
        );
        Ok(extracted)
    }
}
