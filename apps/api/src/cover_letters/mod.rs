// Cover letter generation and per-user CRUD.

pub mod handlers;
pub mod prompts;
