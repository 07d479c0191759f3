// Resume storage and AI-assisted rewriting.

pub mod handlers;
pub mod prompts;
