//! # Reconciliation and merge core
//!
//! Two independent pipelines share this crate:
//!
//! - **Account lifecycle**: [`AccountDelta`] computes the multiset
//!   add/delete sets between a desired and an observed account
//!   population; [`lifecycle`] executes them against the account
//!   directory, revoking credentials before account removal.
//! - **Role merge**: [`RoleMergeEngine`] recomputes each user's
//!   serialized role attribute for one identity provider - drop that
//!   provider's prior assignments, append the standard self-service
//!   role, append one role per resolvable group - and [`batch`]
//!   submits the staged updates with per-item outcome collection.
//!
//! [`transpose`] is a pure data-shape utility pivoting a
//! `key -> "v1,v2"` JSON object into its `value -> "k1,k2"` inverse;
//! it shares no data flow with the pipelines but solves the same
//! inversion problem.
//!
//! Everything here is synchronous in effect: strictly sequential per
//! account and per user, in input iteration order. The directories are
//! shared mutable state with no locking discipline; a run assumes it
//! is the sole writer for its provider's role slot (last write wins).
//!
//! [`AccountDelta`]: reconcile::AccountDelta
//! [`RoleMergeEngine`]: merge::RoleMergeEngine

pub mod batch;
pub mod groups;
pub mod lifecycle;
pub mod merge;
pub mod reconcile;
pub mod resolver;
pub mod roles;
pub mod transpose;

pub use batch::{BatchItemResult, BatchItemStatus, BatchReport};
pub use groups::GroupMembershipMap;
pub use merge::{RoleMergeEngine, StagedUpdate};
pub use reconcile::AccountDelta;
pub use resolver::{GroupRoleResolver, RoleLookup};
pub use roles::RoleAssignment;
