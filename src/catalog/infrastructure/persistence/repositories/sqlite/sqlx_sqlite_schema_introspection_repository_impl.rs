use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{
    Connection, Executor, Row,
    sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow},
};
use tracing::debug;

use crate::catalog::{
    domain::model::{
        enums::catalog_domain_error::CatalogDomainError,
        value_objects::sql_identifier::SqlIdentifier,
    },
    infrastructure::persistence::repositories::schema_introspection_repository::{
        IntrospectedColumn, SchemaIntrospectionRepository, SchemaIntrospectionSession,
    },
};

pub struct SqlxSqliteSchemaIntrospectionRepositoryImpl {
    database_url: String,
}

impl SqlxSqliteSchemaIntrospectionRepositoryImpl {
    pub fn new(database_url: String) -> Self {
        Self { database_url }
    }
}

#[async_trait]
impl SchemaIntrospectionRepository for SqlxSqliteSchemaIntrospectionRepositoryImpl {
    async fn open_session(
        &self,
    ) -> Result<Box<dyn SchemaIntrospectionSession>, CatalogDomainError> {
        let options = SqliteConnectOptions::from_str(&self.database_url)
            .map_err(|e| CatalogDomainError::ConnectionFailed(e.to_string()))?
            .read_only(true);

        let connection = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| CatalogDomainError::ConnectionFailed(e.to_string()))?;

        debug!(database_url = %self.database_url, "opened sqlite session");

        Ok(Box::new(SqlxSqliteSchemaIntrospectionSession {
            connection: Some(connection),
        }))
    }
}

pub struct SqlxSqliteSchemaIntrospectionSession {
    connection: Option<SqliteConnection>,
}

impl SqlxSqliteSchemaIntrospectionSession {
    fn connection(&mut self) -> Result<&mut SqliteConnection, CatalogDomainError> {
        self.connection
            .as_mut()
            .ok_or_else(|| CatalogDomainError::InfrastructureError("session is closed".to_string()))
    }

    async fn fetch_count(
        &mut self,
        table: &SqlIdentifier,
        statement: String,
    ) -> Result<u64, CatalogDomainError> {
        let row = sqlx::query(&statement)
            .fetch_one(self.connection()?)
            .await
            .map_err(|e| CatalogDomainError::query(table.value(), e))?;

        let count = row
            .try_get::<i64, _>(0)
            .map_err(|e| CatalogDomainError::query(table.value(), e))?;

        u64::try_from(count).map_err(|e| CatalogDomainError::query(table.value(), e))
    }

    // Storage class of the result decides the JSON shape.
    fn decode_scalar(row: &SqliteRow) -> Result<Option<Value>, sqlx::Error> {
        if let Ok(value) = row.try_get::<Option<i64>, _>(0) {
            return Ok(value.map(Value::from));
        }
        if let Ok(value) = row.try_get::<Option<f64>, _>(0) {
            return Ok(value.map(Value::from));
        }
        if let Ok(value) = row.try_get::<Option<String>, _>(0) {
            return Ok(value.map(Value::String));
        }

        let bytes = row.try_get::<Option<Vec<u8>>, _>(0)?;
        Ok(bytes.map(|b| Value::String(String::from_utf8_lossy(&b).into_owned())))
    }
}

#[async_trait]
impl SchemaIntrospectionSession for SqlxSqliteSchemaIntrospectionSession {
    async fn list_user_tables(&mut self) -> Result<Vec<String>, CatalogDomainError> {
        let statement = r#"
            SELECT name
            FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            ORDER BY name
        "#;

        let rows = sqlx::query(statement)
            .fetch_all(self.connection()?)
            .await
            .map_err(|e| CatalogDomainError::SchemaEnumerationFailed(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                row.try_get::<String, _>("name")
                    .map_err(|e| CatalogDomainError::SchemaEnumerationFailed(e.to_string()))
            })
            .collect()
    }

    async fn introspect_columns(
        &mut self,
        table: &SqlIdentifier,
    ) -> Result<Vec<IntrospectedColumn>, CatalogDomainError> {
        let statement = format!("PRAGMA table_info({})", table.quoted());

        let rows = sqlx::query(&statement)
            .fetch_all(self.connection()?)
            .await
            .map_err(|e| CatalogDomainError::introspection(table.value(), e))?;

        if rows.is_empty() {
            return Err(CatalogDomainError::introspection(
                table.value(),
                "table has no visible columns",
            ));
        }

        rows.into_iter()
            .map(|row| {
                let decode = |e: sqlx::Error| CatalogDomainError::introspection(table.value(), e);
                let primary_key_position = row.try_get::<i64, _>("pk").map_err(decode)?;

                Ok(IntrospectedColumn {
                    column_name: row.try_get::<String, _>("name").map_err(decode)?,
                    data_type: row
                        .try_get::<Option<String>, _>("type")
                        .map_err(decode)?
                        .unwrap_or_default(),
                    not_null: row.try_get::<i64, _>("notnull").map_err(decode)? != 0,
                    default_value: row
                        .try_get::<Option<String>, _>("dflt_value")
                        .map_err(decode)?,
                    primary_key_position: u32::try_from(primary_key_position).unwrap_or(0),
                })
            })
            .collect()
    }

    async fn begin_read_snapshot(
        &mut self,
        table: &SqlIdentifier,
    ) -> Result<(), CatalogDomainError> {
        self.connection()?
            .execute("BEGIN")
            .await
            .map_err(|e| CatalogDomainError::query(table.value(), e))?;
        Ok(())
    }

    async fn end_read_snapshot(&mut self, table: &SqlIdentifier) -> Result<(), CatalogDomainError> {
        self.connection()?
            .execute("COMMIT")
            .await
            .map_err(|e| CatalogDomainError::query(table.value(), e))?;
        Ok(())
    }

    async fn count_rows(&mut self, table: &SqlIdentifier) -> Result<u64, CatalogDomainError> {
        let statement = format!("SELECT COUNT(*) FROM {}", table.quoted());
        self.fetch_count(table, statement).await
    }

    async fn count_non_null(
        &mut self,
        table: &SqlIdentifier,
        column: &SqlIdentifier,
    ) -> Result<u64, CatalogDomainError> {
        let statement = format!(
            "SELECT COUNT({}) FROM {}",
            column.quoted(),
            table.quoted()
        );
        self.fetch_count(table, statement).await
    }

    async fn count_duplicate_values(
        &mut self,
        table: &SqlIdentifier,
        column: &SqlIdentifier,
    ) -> Result<u64, CatalogDomainError> {
        let statement = format!(
            "SELECT COUNT(*) FROM (SELECT {column} FROM {table} GROUP BY {column} HAVING COUNT(*) > 1) AS duplicate_keys",
            column = column.quoted(),
            table = table.quoted()
        );
        self.fetch_count(table, statement).await
    }

    async fn max_value(
        &mut self,
        table: &SqlIdentifier,
        column: &SqlIdentifier,
    ) -> Result<Option<Value>, CatalogDomainError> {
        let statement = format!("SELECT MAX({}) FROM {}", column.quoted(), table.quoted());

        let row = sqlx::query(&statement)
            .fetch_one(self.connection()?)
            .await
            .map_err(|e| CatalogDomainError::query(table.value(), e))?;

        Self::decode_scalar(&row).map_err(|e| CatalogDomainError::query(table.value(), e))
    }

    async fn close(&mut self) -> Result<(), CatalogDomainError> {
        if let Some(connection) = self.connection.take() {
            connection
                .close()
                .await
                .map_err(|e| CatalogDomainError::InfrastructureError(e.to_string()))?;
        }
        Ok(())
    }
}
