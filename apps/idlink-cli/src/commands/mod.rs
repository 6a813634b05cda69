//! CLI command implementations

pub mod link;
pub mod provision;
