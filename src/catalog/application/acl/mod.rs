pub mod catalog_facade_impl;
