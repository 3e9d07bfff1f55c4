//! CLI command implementations.

pub mod compute;
pub mod validate;
