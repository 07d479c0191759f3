// User resolution and profile management.

pub mod handlers;
pub mod resolver;
