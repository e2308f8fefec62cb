pub mod table_metadata;
pub mod table_quality_report;
