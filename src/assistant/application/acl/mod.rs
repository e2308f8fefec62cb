pub mod catalog_reader_facade_real_impl;
