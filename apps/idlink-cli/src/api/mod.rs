//! Thin transport adapters for the external directories.

pub mod directory;
pub mod iam;
