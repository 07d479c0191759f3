// Quiz generation and stored assessments.

pub mod handlers;
pub mod prompts;
