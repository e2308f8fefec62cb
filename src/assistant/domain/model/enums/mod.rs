pub mod assistant_domain_error;
pub mod assistant_intent;
pub mod chat_role;
