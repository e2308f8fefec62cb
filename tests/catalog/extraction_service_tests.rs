use std::collections::BTreeMap;

use datadoc_catalog::catalog::{
    application::command_services::metadata_extraction_service_impl::build_table_metadata,
    domain::{
        model::enums::catalog_domain_error::CatalogDomainError,
        services::metadata_extraction_service::MetadataExtractionService,
    },
};

use crate::support::{
    column, create_catalog_harness, customers_table, fakes::FakeTable, orders_table,
    shop_database,
};

#[tokio::test]
async fn handle_extract_persists_metadata_for_every_user_table() {
    let harness = create_catalog_harness(shop_database());

    let extracted = harness
        .services
        .metadata_extraction_service
        .handle_extract()
        .await
        .expect("extraction should succeed");

    assert_eq!(
        extracted.keys().cloned().collect::<Vec<_>>(),
        vec!["customers".to_string(), "orders".to_string()]
    );
    assert_eq!(harness.reports.metadata_saves(), 2);

    let customers = harness
        .reports
        .stored_metadata("customers")
        .expect("customers metadata should be stored");
    assert_eq!(customers.primary_keys, vec!["customer_id".to_string()]);
    assert_eq!(
        customers
            .columns
            .iter()
            .map(|c| c.column_name.as_str())
            .collect::<Vec<_>>(),
        vec!["customer_id", "name", "email", "city"]
    );
    assert!(customers.column("name").expect("name column").not_null);
    assert!(!customers.column("email").expect("email column").not_null);
}

#[tokio::test]
async fn handle_extract_opens_one_session_and_closes_it() {
    let harness = create_catalog_harness(shop_database());

    harness
        .services
        .metadata_extraction_service
        .handle_extract()
        .await
        .expect("extraction should succeed");

    assert_eq!(harness.database.opened_sessions(), 1);
    assert_eq!(harness.database.closed_sessions(), 1);
}

#[tokio::test]
async fn handle_extract_on_empty_schema_returns_empty_catalog() {
    let harness = create_catalog_harness(BTreeMap::new());

    let extracted = harness
        .services
        .metadata_extraction_service
        .handle_extract()
        .await
        .expect("extraction should succeed");

    assert!(extracted.is_empty());
    assert_eq!(harness.reports.metadata_saves(), 0);
}

#[tokio::test]
async fn handle_extract_table_without_primary_key_yields_empty_key_list() {
    let table = FakeTable::new(vec![
        column("event", "TEXT", false, 0),
        column("payload", "TEXT", false, 0),
    ]);
    let harness = create_catalog_harness(BTreeMap::from([("events".to_string(), table)]));

    let extracted = harness
        .services
        .metadata_extraction_service
        .handle_extract()
        .await
        .expect("extraction should succeed");

    assert!(extracted["events"].primary_keys.is_empty());
}

#[tokio::test]
async fn handle_extract_connection_failure_surfaces_error() {
    let harness = create_catalog_harness(shop_database());
    harness.database.set_fail_open(true);

    let result = harness
        .services
        .metadata_extraction_service
        .handle_extract()
        .await;

    assert!(matches!(result, Err(CatalogDomainError::ConnectionFailed(_))));
    assert_eq!(harness.reports.metadata_saves(), 0);
}

#[tokio::test]
async fn handle_extract_introspection_failure_names_table_and_closes_session() {
    let harness = create_catalog_harness(shop_database());
    harness.database.set_fail_introspection_for("orders");

    let result = harness
        .services
        .metadata_extraction_service
        .handle_extract()
        .await;

    assert!(matches!(
        result,
        Err(CatalogDomainError::IntrospectionFailed { ref table_name, .. }) if table_name == "orders"
    ));
    assert!(harness.reports.stored_metadata("orders").is_none());
    assert_eq!(harness.database.closed_sessions(), 1);
}

#[tokio::test]
async fn handle_extract_rejects_table_that_shadows_a_quality_report() {
    let mut tables = shop_database();
    tables.insert("orders_quality".to_string(), orders_table());
    let harness = create_catalog_harness(tables);

    let result = harness
        .services
        .metadata_extraction_service
        .handle_extract()
        .await;

    assert!(matches!(
        result,
        Err(CatalogDomainError::StorageFailed { ref table_name, ref message })
            if table_name == "orders_quality" && message.contains("orders")
    ));
    assert_eq!(harness.reports.metadata_saves(), 0);
    assert_eq!(harness.database.closed_sessions(), 1);
}

#[tokio::test]
async fn handle_extract_twice_without_schema_change_produces_identical_records() {
    let harness = create_catalog_harness(BTreeMap::from([(
        "customers".to_string(),
        customers_table(),
    )]));
    let service = &harness.services.metadata_extraction_service;

    let first = service.handle_extract().await.expect("first extraction");
    let second = service.handle_extract().await.expect("second extraction");

    assert_eq!(first, second);
}

#[test]
fn build_table_metadata_orders_composite_keys_by_key_position() {
    let metadata = build_table_metadata(
        "order_items",
        vec![
            column("order_id", "INTEGER", true, 2),
            column("line_no", "INTEGER", true, 1),
            column("sku", "TEXT", false, 0),
        ],
    );

    assert_eq!(
        metadata.primary_keys,
        vec!["line_no".to_string(), "order_id".to_string()]
    );
    assert_eq!(metadata.first_primary_key(), Some("line_no"));
    assert_eq!(metadata.columns[0].column_name, "order_id");
}
