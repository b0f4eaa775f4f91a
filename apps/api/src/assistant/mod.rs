// Assistant: bracket-tag validation, completion gateway with demo fallback,
// and the chat / feedback handlers.
// All provider calls go through llm_client via the gateway.

pub mod demo;
pub mod gateway;
pub mod handlers;
pub mod prompts;
pub mod validation;
