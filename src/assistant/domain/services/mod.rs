pub mod assistant_answer_service;
