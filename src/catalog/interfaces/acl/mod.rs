pub mod catalog_facade;
