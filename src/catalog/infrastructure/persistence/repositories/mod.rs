pub mod catalog_report_repository;
pub mod json;
pub mod postgres;
pub mod schema_introspection_repository;
pub mod sqlite;
