//! # Directory boundary
//!
//! Types and capability traits for the external systems idlink
//! reconciles against:
//!
//! - [`AccountDirectory`] - the IAM-style account store that owns the
//!   target account population and its credential artifacts
//! - [`UserDirectory`] - the workspace directory holding each user's
//!   custom role attribute
//! - [`RoleRegistry`] - the provider role registry resolving role
//!   names to concrete ARNs
//!
//! All three are consumed, never implemented, by the sync core; the
//! traits exist so a reconciliation run can be handed explicit client
//! objects scoped to that run instead of process-wide handles.
//!
//! ## Crate Organization
//!
//! - [`types`] - boundary types ([`AccountId`], [`CredentialRef`],
//!   [`DirectoryUser`], [`RoleInfo`])
//! - [`error`] - [`ConnectorError`] with transient/permanent
//!   classification
//! - [`traits`] - the three capability traits
//!
//! [`AccountDirectory`]: traits::AccountDirectory
//! [`UserDirectory`]: traits::UserDirectory
//! [`RoleRegistry`]: traits::RoleRegistry
//! [`AccountId`]: types::AccountId
//! [`CredentialRef`]: types::CredentialRef
//! [`DirectoryUser`]: types::DirectoryUser
//! [`RoleInfo`]: types::RoleInfo
//! [`ConnectorError`]: error::ConnectorError

pub mod error;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// ```
/// use idlink_connector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ConnectorError, ConnectorResult};
    pub use crate::traits::{AccountDirectory, RoleRegistry, UserDirectory};
    pub use crate::types::{AccountId, CredentialKind, CredentialRef, DirectoryUser, RoleInfo};
}

// Re-export async_trait for trait implementors
pub use async_trait::async_trait;
