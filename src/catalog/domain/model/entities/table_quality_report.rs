use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::domain::model::entities::table_metadata::ColumnDescriptor;

const FRESHNESS_HINTS: [&str; 2] = ["date", "at"];
pub const QUALITY_RECORD_SUFFIX: &str = "_quality";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnCompleteness {
    pub non_null_count: u64,
    pub completeness_percent: f64,
}

impl ColumnCompleteness {
    pub fn new(non_null_count: u64, total_rows: u64) -> Self {
        Self {
            non_null_count,
            completeness_percent: completeness_percent(non_null_count, total_rows),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completeness_percent >= 100.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableQualityReport {
    pub total_rows: u64,
    pub column_completeness: BTreeMap<String, ColumnCompleteness>,
    pub duplicate_primary_keys: u64,
    pub freshness_column: Option<String>,
    pub last_updated: Option<Value>,
}

impl TableQualityReport {
    pub fn least_complete_column(&self) -> Option<(&str, &ColumnCompleteness)> {
        self.column_completeness
            .iter()
            .min_by(|a, b| a.1.completeness_percent.total_cmp(&b.1.completeness_percent))
            .map(|(name, completeness)| (name.as_str(), completeness))
    }

    pub fn incomplete_columns(&self) -> Vec<(&str, &ColumnCompleteness)> {
        self.column_completeness
            .iter()
            .filter(|(_, completeness)| !completeness.is_complete())
            .map(|(name, completeness)| (name.as_str(), completeness))
            .collect()
    }
}

// Two decimals, halves to even.
pub fn completeness_percent(non_null_count: u64, total_rows: u64) -> f64 {
    if total_rows == 0 {
        return 0.0;
    }

    let ratio = (non_null_count.min(total_rows) as f64 * 100.0) / total_rows as f64;
    (ratio * 100.0).round_ties_even() / 100.0
}

// Returns `(table, owner)` for a table whose records would overwrite `owner`'s quality report.
pub fn find_quality_record_clash(table_names: &[String]) -> Option<(&str, &str)> {
    table_names.iter().find_map(|name| {
        let owner = name.strip_suffix(QUALITY_RECORD_SUFFIX)?;
        table_names
            .iter()
            .any(|candidate| candidate == owner)
            .then_some((name.as_str(), owner))
    })
}

/// First column, in schema order, whose name contains `date` or `at`.
///
/// This is a plain case-sensitive substring test: `category` qualifies through `at`.
pub fn select_freshness_column(columns: &[ColumnDescriptor]) -> Option<&ColumnDescriptor> {
    columns.iter().find(|column| {
        FRESHNESS_HINTS
            .iter()
            .any(|hint| column.column_name.contains(hint))
    })
}
