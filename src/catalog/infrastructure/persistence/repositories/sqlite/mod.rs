pub mod sqlx_sqlite_schema_introspection_repository_impl;
