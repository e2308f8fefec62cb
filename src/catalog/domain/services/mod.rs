pub mod catalog_query_service;
pub mod metadata_extraction_service;
pub mod quality_analysis_service;
