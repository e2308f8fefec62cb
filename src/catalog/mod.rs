use std::sync::Arc;

use crate::{
    catalog::{
        application::{
            acl::catalog_facade_impl::CatalogFacadeImpl,
            command_services::{
                metadata_extraction_service_impl::MetadataExtractionServiceImpl,
                quality_analysis_service_impl::QualityAnalysisServiceImpl,
            },
            query_services::catalog_query_service_impl::CatalogQueryServiceImpl,
        },
        domain::{
            model::{
                enums::catalog_domain_error::CatalogDomainError,
                value_objects::schema_name::SchemaName,
            },
            services::{
                catalog_query_service::CatalogQueryService,
                metadata_extraction_service::MetadataExtractionService,
                quality_analysis_service::QualityAnalysisService,
            },
        },
        infrastructure::persistence::repositories::{
            catalog_report_repository::CatalogReportRepository,
            json::json_file_catalog_report_repository_impl::JsonFileCatalogReportRepositoryImpl,
            postgres::sqlx_postgres_schema_introspection_repository_impl::SqlxPostgresSchemaIntrospectionRepositoryImpl,
            schema_introspection_repository::SchemaIntrospectionRepository,
            sqlite::sqlx_sqlite_schema_introspection_repository_impl::SqlxSqliteSchemaIntrospectionRepositoryImpl,
        },
        interfaces::acl::catalog_facade::CatalogFacade,
    },
    config::app_config::{AppConfig, DatabaseBackend},
};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

#[derive(Clone)]
pub struct CatalogServices {
    pub metadata_extraction_service: Arc<dyn MetadataExtractionService>,
    pub quality_analysis_service: Arc<dyn QualityAnalysisService>,
    pub query_service: Arc<dyn CatalogQueryService>,
    pub facade: Arc<dyn CatalogFacade>,
}

pub fn build_catalog_services(config: &AppConfig) -> Result<CatalogServices, CatalogDomainError> {
    let introspection_repository: Arc<dyn SchemaIntrospectionRepository> =
        match config.database_backend {
            DatabaseBackend::Postgres => {
                Arc::new(SqlxPostgresSchemaIntrospectionRepositoryImpl::new(
                    config.postgres_database_url(),
                    SchemaName::new(config.postgres_schema.clone())?,
                ))
            }
            DatabaseBackend::Sqlite => Arc::new(SqlxSqliteSchemaIntrospectionRepositoryImpl::new(
                config.sqlite_database_url(),
            )),
        };

    let report_repository: Arc<dyn CatalogReportRepository> =
        Arc::new(JsonFileCatalogReportRepositoryImpl::new(
            config.metadata_dir.clone(),
            config.ai_docs_dir.clone(),
        ));

    Ok(assemble_catalog_services(
        introspection_repository,
        report_repository,
    ))
}

pub fn assemble_catalog_services(
    introspection_repository: Arc<dyn SchemaIntrospectionRepository>,
    report_repository: Arc<dyn CatalogReportRepository>,
) -> CatalogServices {
    let metadata_extraction_service: Arc<dyn MetadataExtractionService> =
        Arc::new(MetadataExtractionServiceImpl::new(
            introspection_repository.clone(),
            report_repository.clone(),
        ));
    let quality_analysis_service = Arc::new(QualityAnalysisServiceImpl::new(
        metadata_extraction_service.clone(),
        introspection_repository,
        report_repository.clone(),
    ));
    let query_service: Arc<dyn CatalogQueryService> =
        Arc::new(CatalogQueryServiceImpl::new(report_repository));
    let facade = Arc::new(CatalogFacadeImpl::new(query_service.clone()));

    CatalogServices {
        metadata_extraction_service,
        quality_analysis_service,
        query_service,
        facade,
    }
}
