use std::collections::BTreeMap;

use datadoc_catalog::catalog::{
    domain::model::{
        entities::{
            table_metadata::{ColumnDescriptor, TableMetadata},
            table_quality_report::{ColumnCompleteness, TableQualityReport},
        },
        enums::catalog_domain_error::CatalogDomainError,
        value_objects::table_name::TableName,
    },
    infrastructure::persistence::repositories::{
        catalog_report_repository::CatalogReportRepository,
        json::json_file_catalog_report_repository_impl::JsonFileCatalogReportRepositoryImpl,
    },
};
use serde_json::json;
use tempfile::TempDir;

fn repository(dir: &TempDir) -> JsonFileCatalogReportRepositoryImpl {
    JsonFileCatalogReportRepositoryImpl::new(dir.path().join("metadata"), dir.path().join("ai_docs"))
}

fn orders_metadata() -> TableMetadata {
    TableMetadata::new(
        "orders".to_string(),
        vec![
            ColumnDescriptor {
                column_name: "order_id".to_string(),
                data_type: "INTEGER".to_string(),
                not_null: true,
                default_value: None,
            },
            ColumnDescriptor {
                column_name: "status".to_string(),
                data_type: "TEXT".to_string(),
                not_null: false,
                default_value: Some("'pending'".to_string()),
            },
        ],
        vec!["order_id".to_string()],
    )
}

fn orders_quality() -> TableQualityReport {
    TableQualityReport {
        total_rows: 2,
        column_completeness: BTreeMap::from([
            ("order_id".to_string(), ColumnCompleteness::new(2, 2)),
            ("status".to_string(), ColumnCompleteness::new(1, 2)),
        ]),
        duplicate_primary_keys: 0,
        freshness_column: None,
        last_updated: None,
    }
}

fn table(name: &str) -> TableName {
    TableName::new(name.to_string()).expect("valid table name")
}

#[tokio::test]
async fn metadata_is_written_as_indented_json_and_read_back() {
    let dir = TempDir::new().expect("temp dir");
    let repository = repository(&dir);

    repository
        .save_table_metadata(&orders_metadata())
        .await
        .expect("save should succeed");

    let contents = std::fs::read_to_string(dir.path().join("metadata").join("orders.json"))
        .expect("file should exist");
    assert!(contents.starts_with("{\n    \"table_name\": \"orders\""));
    assert!(contents.ends_with("}\n"));

    let stored = repository
        .find_table_metadata(&table("orders"))
        .await
        .expect("read should succeed");
    assert_eq!(stored, Some(orders_metadata()));
}

#[tokio::test]
async fn quality_report_lives_next_to_metadata() {
    let dir = TempDir::new().expect("temp dir");
    let repository = repository(&dir);

    repository
        .save_quality_report("orders", &orders_quality())
        .await
        .expect("save should succeed");

    let raw: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("metadata").join("orders_quality.json"))
            .expect("file should exist"),
    )
    .expect("valid json");
    assert_eq!(raw["column_completeness"]["status"]["completeness_percent"], json!(50.0));
    assert_eq!(raw["freshness_column"], json!(null));
    assert_eq!(raw["last_updated"], json!(null));

    let stored = repository
        .find_quality_report(&table("orders"))
        .await
        .expect("read should succeed");
    assert_eq!(stored, Some(orders_quality()));
}

#[tokio::test]
async fn list_table_names_skips_quality_files_and_is_sorted() {
    let dir = TempDir::new().expect("temp dir");
    let repository = repository(&dir);

    let mut customers = orders_metadata();
    customers.table_name = "customers".to_string();
    repository.save_table_metadata(&orders_metadata()).await.expect("save orders");
    repository.save_table_metadata(&customers).await.expect("save customers");
    repository
        .save_quality_report("orders", &orders_quality())
        .await
        .expect("save quality");

    let tables = repository.list_table_names().await.expect("list should succeed");

    assert_eq!(tables, vec!["customers".to_string(), "orders".to_string()]);
}

#[tokio::test]
async fn table_ending_in_quality_is_listed_when_it_has_no_owner() {
    let dir = TempDir::new().expect("temp dir");
    let repository = repository(&dir);

    let mut audit_quality = orders_metadata();
    audit_quality.table_name = "audit_quality".to_string();
    repository
        .save_table_metadata(&audit_quality)
        .await
        .expect("save audit_quality");
    repository
        .save_quality_report("audit_quality", &orders_quality())
        .await
        .expect("save quality");

    let tables = repository.list_table_names().await.expect("list should succeed");

    assert_eq!(tables, vec!["audit_quality".to_string()]);
}

#[tokio::test]
async fn missing_directory_means_empty_catalog() {
    let dir = TempDir::new().expect("temp dir");
    let repository = repository(&dir);

    assert!(repository.list_table_names().await.expect("list").is_empty());
    assert!(
        repository
            .find_table_metadata(&table("orders"))
            .await
            .expect("read")
            .is_none()
    );
}

#[tokio::test]
async fn documentation_is_read_from_docs_directory() {
    let dir = TempDir::new().expect("temp dir");
    let repository = repository(&dir);
    std::fs::create_dir_all(dir.path().join("ai_docs")).expect("docs dir");
    std::fs::write(dir.path().join("ai_docs").join("orders.md"), "# Orders\n").expect("doc");

    let documentation = repository
        .find_table_documentation(&table("orders"))
        .await
        .expect("read should succeed");

    assert_eq!(documentation.as_deref(), Some("# Orders\n"));
}

#[tokio::test]
async fn corrupt_record_is_a_storage_failure() {
    let dir = TempDir::new().expect("temp dir");
    let repository = repository(&dir);
    std::fs::create_dir_all(dir.path().join("metadata")).expect("metadata dir");
    std::fs::write(dir.path().join("metadata").join("orders.json"), "{ not json").expect("file");

    let result = repository.find_table_metadata(&table("orders")).await;

    assert!(matches!(
        result,
        Err(CatalogDomainError::StorageFailed { ref table_name, .. }) if table_name == "orders"
    ));
}
