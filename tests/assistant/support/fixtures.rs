use std::collections::BTreeMap;

use datadoc_catalog::{
    assistant::domain::model::commands::ask_question_command::AskQuestionCommand,
    catalog::{
        domain::model::entities::{
            table_metadata::{ColumnDescriptor, TableMetadata},
            table_quality_report::{ColumnCompleteness, TableQualityReport},
        },
        interfaces::acl::catalog_facade::CatalogTableSnapshot,
    },
};
use serde_json::{Value, json};

pub fn ask(question: &str) -> AskQuestionCommand {
    AskQuestionCommand::new(question.to_string()).expect("non-empty question")
}

fn metadata(table_name: &str, columns: &[&str], primary_keys: &[&str]) -> TableMetadata {
    TableMetadata::new(
        table_name.to_string(),
        columns
            .iter()
            .map(|name| ColumnDescriptor {
                column_name: name.to_string(),
                data_type: "TEXT".to_string(),
                not_null: primary_keys.contains(name),
                default_value: None,
            })
            .collect(),
        primary_keys.iter().map(|k| k.to_string()).collect(),
    )
}

fn quality(
    total_rows: u64,
    non_null: &[(&str, u64)],
    freshness: Option<(&str, Value)>,
) -> TableQualityReport {
    TableQualityReport {
        total_rows,
        column_completeness: non_null
            .iter()
            .map(|(name, count)| (name.to_string(), ColumnCompleteness::new(*count, total_rows)))
            .collect::<BTreeMap<_, _>>(),
        duplicate_primary_keys: 0,
        freshness_column: freshness.as_ref().map(|(name, _)| name.to_string()),
        last_updated: freshness.map(|(_, value)| value),
    }
}

/// customers, orders and payments, linked through their key columns.
pub fn shop_catalog() -> Vec<CatalogTableSnapshot> {
    vec![
        CatalogTableSnapshot {
            metadata: metadata(
                "customers",
                &["customer_id", "name", "email", "city"],
                &["customer_id"],
            ),
            quality: Some(quality(
                5,
                &[("customer_id", 5), ("name", 5), ("email", 4), ("city", 5)],
                None,
            )),
            documentation: None,
        },
        CatalogTableSnapshot {
            metadata: metadata(
                "orders",
                &["order_id", "customer_id", "order_date", "total_amount"],
                &["order_id"],
            ),
            quality: Some(quality(
                3,
                &[
                    ("order_id", 3),
                    ("customer_id", 3),
                    ("order_date", 3),
                    ("total_amount", 2),
                ],
                Some(("order_date", json!("2024-03-17"))),
            )),
            documentation: Some("# Orders\nOne row per purchase.".to_string()),
        },
        CatalogTableSnapshot {
            metadata: metadata(
                "payments",
                &["payment_id", "order_id", "status"],
                &["payment_id"],
            ),
            quality: None,
            documentation: None,
        },
    ]
}
