//! Worker thread owning the async runtime and the generation client.

pub mod commands;
pub mod runtime;
