use std::path::Path;

use datadoc_catalog::{
    catalog::{
        CatalogServices, build_catalog_services,
        domain::{
            model::enums::catalog_domain_error::CatalogDomainError,
            services::{
                metadata_extraction_service::MetadataExtractionService,
                quality_analysis_service::QualityAnalysisService,
            },
        },
    },
    config::app_config::AppConfig,
};
use serde_json::json;
use sqlx::{
    Connection, Executor,
    sqlite::{SqliteConnectOptions, SqliteConnection},
};
use tempfile::TempDir;

const SHOP_SCHEMA: &str = r#"
    CREATE TABLE customers (
        customer_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT,
        signup_date TEXT
    );
    INSERT INTO customers VALUES (1, 'Asha', 'asha@example.com', '2024-01-02');
    INSERT INTO customers VALUES (2, 'Ravi', 'ravi@example.com', '2024-02-11');
    INSERT INTO customers VALUES (3, 'Meena', NULL, '2024-02-20');
    INSERT INTO customers VALUES (4, 'Kiran', 'kiran@example.com', '2024-03-01');
    INSERT INTO customers VALUES (5, 'Divya', 'divya@example.com', '2024-01-15');

    CREATE TABLE order_items (
        order_id INTEGER NOT NULL,
        line_no INTEGER NOT NULL,
        sku TEXT,
        quantity INTEGER DEFAULT 1,
        PRIMARY KEY (line_no, order_id)
    );
    INSERT INTO order_items VALUES (10, 1, 'SKU-1', 2);
    INSERT INTO order_items VALUES (10, 2, 'SKU-2', 1);
    INSERT INTO order_items VALUES (11, 1, NULL, 3);

    CREATE TABLE "order notes" (
        id INTEGER,
        body TEXT
    );
"#;

async fn seed(database_path: &Path, statements: &str) {
    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true);
    let mut connection = SqliteConnection::connect_with(&options)
        .await
        .expect("seed connection");
    connection.execute(statements).await.expect("seed statements");
    connection.close().await.expect("close seed connection");
}

async fn services_for(dir: &TempDir) -> CatalogServices {
    services_with_schema(dir, SHOP_SCHEMA).await
}

async fn services_with_schema(dir: &TempDir, schema: &str) -> CatalogServices {
    let database_path = dir.path().join("shop.db");
    if !database_path.exists() {
        seed(&database_path, schema).await;
    }

    let root = dir.path().to_path_buf();
    let config = AppConfig::from_lookup(move |key| match key {
        "SQLITE_PATH" => Some(root.join("shop.db").to_string_lossy().into_owned()),
        "METADATA_DIR" => Some(root.join("metadata").to_string_lossy().into_owned()),
        "AI_DOCS_DIR" => Some(root.join("ai_docs").to_string_lossy().into_owned()),
        _ => None,
    });

    build_catalog_services(&config).expect("services should build")
}

#[tokio::test]
async fn extract_reads_sqlite_catalog_including_composite_keys() {
    let dir = TempDir::new().expect("temp dir");
    let services = services_for(&dir).await;

    let catalog = services
        .metadata_extraction_service
        .handle_extract()
        .await
        .expect("extraction should succeed");

    assert_eq!(
        catalog.keys().cloned().collect::<Vec<_>>(),
        vec![
            "customers".to_string(),
            "order notes".to_string(),
            "order_items".to_string()
        ]
    );

    let items = &catalog["order_items"];
    assert_eq!(
        items.primary_keys,
        vec!["line_no".to_string(), "order_id".to_string()]
    );
    assert_eq!(
        items.column("quantity").and_then(|c| c.default_value.as_deref()),
        Some("1")
    );
    assert!(items.column("order_id").expect("order_id").not_null);

    let customers = &catalog["customers"];
    assert_eq!(customers.primary_keys, vec!["customer_id".to_string()]);
    assert_eq!(customers.column("name").expect("name").data_type, "TEXT");

    assert!(catalog["order notes"].primary_keys.is_empty());
    assert!(dir.path().join("metadata").join("customers.json").exists());
}

#[tokio::test]
async fn extract_twice_writes_byte_identical_files() {
    let dir = TempDir::new().expect("temp dir");
    let services = services_for(&dir).await;
    let metadata_file = dir.path().join("metadata").join("order_items.json");

    services
        .metadata_extraction_service
        .handle_extract()
        .await
        .expect("first extraction");
    let first = std::fs::read(&metadata_file).expect("first file");

    services
        .metadata_extraction_service
        .handle_extract()
        .await
        .expect("second extraction");
    let second = std::fs::read(&metadata_file).expect("second file");

    assert_eq!(first, second);
}

#[tokio::test]
async fn analyze_profiles_sqlite_tables() {
    let dir = TempDir::new().expect("temp dir");
    let services = services_for(&dir).await;

    let reports = services
        .quality_analysis_service
        .handle_analyze()
        .await
        .expect("analysis should succeed");

    let customers = &reports["customers"];
    assert_eq!(customers.total_rows, 5);
    assert_eq!(customers.column_completeness["email"].non_null_count, 4);
    assert_eq!(customers.column_completeness["email"].completeness_percent, 80.0);
    assert_eq!(customers.duplicate_primary_keys, 0);
    assert_eq!(customers.freshness_column.as_deref(), Some("signup_date"));
    assert_eq!(customers.last_updated, Some(json!("2024-03-01")));

    let items = &reports["order_items"];
    assert_eq!(items.total_rows, 3);
    assert_eq!(items.column_completeness["sku"].completeness_percent, 66.67);
    // duplicates are measured on the first key column only
    assert_eq!(items.duplicate_primary_keys, 1);

    let notes = &reports["order notes"];
    assert_eq!(notes.total_rows, 0);
    assert_eq!(notes.column_completeness["body"].completeness_percent, 0.0);

    assert!(dir.path().join("metadata").join("customers_quality.json").exists());
}

#[tokio::test]
async fn analyze_picks_up_added_column_without_separate_extraction() {
    let dir = TempDir::new().expect("temp dir");
    let services = services_for(&dir).await;
    services
        .quality_analysis_service
        .handle_analyze()
        .await
        .expect("first analysis");

    seed(
        &dir.path().join("shop.db"),
        "ALTER TABLE customers ADD COLUMN loyalty_tier TEXT;",
    )
    .await;
    let reports = services
        .quality_analysis_service
        .handle_analyze()
        .await
        .expect("second analysis");

    let tier = &reports["customers"].column_completeness["loyalty_tier"];
    assert_eq!(tier.non_null_count, 0);
    assert_eq!(tier.completeness_percent, 0.0);
}

#[tokio::test]
async fn analyze_reports_numeric_freshness_values_as_numbers() {
    let dir = TempDir::new().expect("temp dir");
    let services = services_with_schema(
        &dir,
        r#"
        CREATE TABLE readings (id INTEGER PRIMARY KEY, updated_at INTEGER);
        INSERT INTO readings VALUES (1, 1700000000);
        INSERT INTO readings VALUES (2, 1700000500);
        INSERT INTO readings VALUES (3, 1699999999);

        CREATE TABLE ratings (id INTEGER PRIMARY KEY, rating REAL);
        INSERT INTO ratings VALUES (1, 1.5);
        INSERT INTO ratings VALUES (2, 2.25);
        "#,
    )
    .await;

    let reports = services
        .quality_analysis_service
        .handle_analyze()
        .await
        .expect("analysis should succeed");

    let readings = &reports["readings"];
    assert_eq!(readings.freshness_column.as_deref(), Some("updated_at"));
    assert_eq!(readings.last_updated, Some(json!(1700000500)));

    // `rating` qualifies through `at`
    let ratings = &reports["ratings"];
    assert_eq!(ratings.freshness_column.as_deref(), Some("rating"));
    assert_eq!(ratings.last_updated, Some(json!(2.25)));
}

#[tokio::test]
async fn table_named_like_a_quality_report_fails_the_run() {
    let dir = TempDir::new().expect("temp dir");
    let services = services_with_schema(
        &dir,
        r#"
        CREATE TABLE orders (id INTEGER PRIMARY KEY, note TEXT);
        INSERT INTO orders VALUES (1, 'first');

        CREATE TABLE orders_quality (id INTEGER PRIMARY KEY, score INTEGER);
        INSERT INTO orders_quality VALUES (1, 7);
        "#,
    )
    .await;

    let result = services.quality_analysis_service.handle_analyze().await;

    assert!(matches!(
        result,
        Err(CatalogDomainError::StorageFailed { ref table_name, .. }) if table_name == "orders_quality"
    ));
    assert!(!dir.path().join("metadata").join("orders.json").exists());
    assert!(!dir.path().join("metadata").join("orders_quality.json").exists());
}
