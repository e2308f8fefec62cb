use std::collections::{HashMap, HashSet};

use crate::catalog::domain::model::{
    entities::table_metadata::TableMetadata,
    enums::catalog_domain_error::CatalogDomainError,
    value_objects::sql_identifier::SqlIdentifier,
};

#[derive(Clone, Debug, Default)]
pub struct SchemaAllowList {
    tables: HashMap<String, HashSet<String>>,
}

impl SchemaAllowList {
    pub fn from_table_names<I, S>(table_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tables: table_names
                .into_iter()
                .map(|name| (name.into(), HashSet::new()))
                .collect(),
        }
    }

    pub fn from_metadata<'a, I>(tables: I) -> Self
    where
        I: IntoIterator<Item = &'a TableMetadata>,
    {
        Self {
            tables: tables
                .into_iter()
                .map(|table| {
                    let columns = table
                        .columns
                        .iter()
                        .map(|c| c.column_name.clone())
                        .collect::<HashSet<_>>();
                    (table.table_name.clone(), columns)
                })
                .collect(),
        }
    }

    pub fn contains_table(&self, table_name: &str) -> bool {
        self.tables.contains_key(table_name)
    }

    pub fn table(&self, table_name: &str) -> Result<SqlIdentifier, CatalogDomainError> {
        if !self.contains_table(table_name) {
            return Err(CatalogDomainError::UnknownIdentifier(table_name.to_string()));
        }

        Ok(SqlIdentifier::introspected(table_name))
    }

    pub fn column(
        &self,
        table_name: &str,
        column_name: &str,
    ) -> Result<SqlIdentifier, CatalogDomainError> {
        let known = self
            .tables
            .get(table_name)
            .is_some_and(|columns| columns.contains(column_name));

        if !known {
            return Err(CatalogDomainError::UnknownIdentifier(format!(
                "{}.{}",
                table_name, column_name
            )));
        }

        Ok(SqlIdentifier::introspected(column_name))
    }
}
