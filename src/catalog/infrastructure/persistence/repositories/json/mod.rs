pub mod json_file_catalog_report_repository_impl;
