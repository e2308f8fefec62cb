pub mod assistant_answer_service_impl;
