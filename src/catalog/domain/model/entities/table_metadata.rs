use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub column_name: String,
    pub data_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub table_name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub primary_keys: Vec<String>,
}

impl TableMetadata {
    pub fn new(table_name: String, columns: Vec<ColumnDescriptor>, primary_keys: Vec<String>) -> Self {
        let primary_keys = primary_keys
            .into_iter()
            .filter(|key| columns.iter().any(|c| &c.column_name == key))
            .collect();

        Self {
            table_name,
            columns,
            primary_keys,
        }
    }

    pub fn has_column(&self, column_name: &str) -> bool {
        self.columns.iter().any(|c| c.column_name == column_name)
    }

    pub fn column(&self, column_name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.column_name == column_name)
    }

    /// Duplicate detection only looks at the first key column, composite keys included.
    pub fn first_primary_key(&self) -> Option<&str> {
        self.primary_keys.first().map(String::as_str)
    }

    pub fn is_primary_key(&self, column_name: &str) -> bool {
        self.primary_keys.iter().any(|key| key == column_name)
    }
}
