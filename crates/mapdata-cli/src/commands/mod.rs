//! CLI command implementations.

pub mod patterns;
pub mod resolve;
