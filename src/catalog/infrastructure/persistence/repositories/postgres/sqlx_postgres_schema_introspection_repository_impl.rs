use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Connection, Executor, PgConnection, Row};
use tracing::debug;

use crate::catalog::{
    domain::model::{
        enums::catalog_domain_error::CatalogDomainError,
        value_objects::{schema_name::SchemaName, sql_identifier::SqlIdentifier},
    },
    infrastructure::persistence::repositories::schema_introspection_repository::{
        IntrospectedColumn, SchemaIntrospectionRepository, SchemaIntrospectionSession,
    },
};

pub struct SqlxPostgresSchemaIntrospectionRepositoryImpl {
    database_url: String,
    schema_name: SchemaName,
}

impl SqlxPostgresSchemaIntrospectionRepositoryImpl {
    pub fn new(database_url: String, schema_name: SchemaName) -> Self {
        Self {
            database_url,
            schema_name,
        }
    }
}

#[async_trait]
impl SchemaIntrospectionRepository for SqlxPostgresSchemaIntrospectionRepositoryImpl {
    async fn open_session(
        &self,
    ) -> Result<Box<dyn SchemaIntrospectionSession>, CatalogDomainError> {
        let connection = PgConnection::connect(&self.database_url)
            .await
            .map_err(|e| CatalogDomainError::ConnectionFailed(e.to_string()))?;

        debug!(schema = self.schema_name.value(), "opened postgres session");

        Ok(Box::new(SqlxPostgresSchemaIntrospectionSession {
            connection: Some(connection),
            schema_name: self.schema_name.clone(),
        }))
    }
}

pub struct SqlxPostgresSchemaIntrospectionSession {
    connection: Option<PgConnection>,
    schema_name: SchemaName,
}

impl SqlxPostgresSchemaIntrospectionSession {
    fn connection(&mut self) -> Result<&mut PgConnection, CatalogDomainError> {
        self.connection
            .as_mut()
            .ok_or_else(|| CatalogDomainError::InfrastructureError("session is closed".to_string()))
    }

    fn qualified_table(&self, table: &SqlIdentifier) -> String {
        format!(
            "\"{}\".{}",
            self.schema_name.value().replace('"', "\"\""),
            table.quoted()
        )
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
}

#[async_trait]
impl SchemaIntrospectionSession for SqlxPostgresSchemaIntrospectionSession {
    async fn list_user_tables(&mut self) -> Result<Vec<String>, CatalogDomainError> {
        let statement = r#"
            SELECT t.table_name::text AS table_name
            FROM information_schema.tables t
            WHERE t.table_schema = $1
                AND t.table_type = 'BASE TABLE'
            ORDER BY t.table_name
        "#;

        let schema_name = self.schema_name.value().to_string();
        let rows = sqlx::query(statement)
            .bind(schema_name)
            .fetch_all(self.connection()?)
            .await
            .map_err(|e| CatalogDomainError::SchemaEnumerationFailed(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                row.try_get::<String, _>("table_name")
                    .map_err(|e| CatalogDomainError::SchemaEnumerationFailed(e.to_string()))
            })
            .collect()
    }

    async fn introspect_columns(
        &mut self,
        table: &SqlIdentifier,
    ) -> Result<Vec<IntrospectedColumn>, CatalogDomainError> {
        let statement = r#"
            SELECT
                c.column_name::text AS column_name,
                c.data_type::text AS data_type,
                c.is_nullable::text AS is_nullable,
                c.column_default::text AS column_default,
                COALESCE((
                    SELECT kcu.ordinal_position::int4
                    FROM information_schema.table_constraints tc
                    INNER JOIN information_schema.key_column_usage kcu
                        ON tc.constraint_name = kcu.constraint_name
                        AND tc.table_schema = kcu.table_schema
                        AND tc.table_name = kcu.table_name
                    WHERE tc.table_schema = c.table_schema
                        AND tc.table_name = c.table_name
                        AND tc.constraint_type = 'PRIMARY KEY'
                        AND kcu.column_name = c.column_name
                ), 0) AS primary_key_position
            FROM information_schema.columns c
            WHERE c.table_schema = $1 AND c.table_name = $2
            ORDER BY c.ordinal_position
        "#;

        let schema_name = self.schema_name.value().to_string();
        let rows = sqlx::query(statement)
            .bind(schema_name)
            .bind(table.value())
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
                let primary_key_position = row
                    .try_get::<i32, _>("primary_key_position")
                    .map_err(decode)?;

                Ok(IntrospectedColumn {
                    column_name: row.try_get::<String, _>("column_name").map_err(decode)?,
                    data_type: row.try_get::<String, _>("data_type").map_err(decode)?,
                    not_null: row.try_get::<String, _>("is_nullable").map_err(decode)? == "NO",
                    default_value: row
                        .try_get::<Option<String>, _>("column_default")
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
            .execute("BEGIN TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
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
        let statement = format!("SELECT COUNT(*) FROM {}", self.qualified_table(table));
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
            self.qualified_table(table)
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
            table = self.qualified_table(table)
        );
        self.fetch_count(table, statement).await
    }

    async fn max_value(
        &mut self,
        table: &SqlIdentifier,
        column: &SqlIdentifier,
    ) -> Result<Option<Value>, CatalogDomainError> {
        let statement = format!(
            "SELECT MAX({})::text AS max_value FROM {}",
            column.quoted(),
            self.qualified_table(table)
        );

        let row = sqlx::query(&statement)
            .fetch_one(self.connection()?)
            .await
            .map_err(|e| CatalogDomainError::query(table.value(), e))?;

        let value = row
            .try_get::<Option<String>, _>("max_value")
            .map_err(|e| CatalogDomainError::query(table.value(), e))?;

        Ok(value.map(Value::String))
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
