pub mod table_catalog_query;
