pub mod schema_allow_list;
pub mod schema_name;
pub mod sql_identifier;
pub mod table_name;
