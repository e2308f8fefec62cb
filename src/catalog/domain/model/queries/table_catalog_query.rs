use crate::catalog::domain::model::{
    enums::catalog_domain_error::CatalogDomainError, value_objects::table_name::TableName,
};

#[derive(Clone, Debug)]
pub struct TableCatalogQuery {
    table_name: TableName,
}

impl TableCatalogQuery {
    pub fn new(table_name: String) -> Result<Self, CatalogDomainError> {
        Ok(Self {
            table_name: TableName::new(table_name)?,
        })
    }

    pub fn table_name(&self) -> &TableName {
        &self.table_name
    }
}
