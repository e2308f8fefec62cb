pub mod metadata_extraction_service_impl;
pub mod quality_analysis_service_impl;
