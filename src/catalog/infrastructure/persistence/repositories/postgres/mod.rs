pub mod sqlx_postgres_schema_introspection_repository_impl;
