// Industry insight generation, storage, and the scheduled refresh sweep.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod generate;
pub mod handlers;
pub mod prompts;
pub mod store;
pub mod sweep;
