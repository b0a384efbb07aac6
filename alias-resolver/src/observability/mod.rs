//! Structured logging vocabulary shared by the workspace crates.

pub mod events;
pub mod fields;
