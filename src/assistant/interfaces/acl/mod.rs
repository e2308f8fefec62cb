pub mod catalog_reader_facade;
