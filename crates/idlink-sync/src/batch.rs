//! Batched update submission with per-item outcomes.
//!
//! Staged role updates are submitted one request per user; each item's
//! `(id, outcome)` pair is collected into a [`BatchReport`]. A failed
//! item is logged and recorded, and its siblings continue - the batch
//! as a whole is not transactional.

use serde::Serialize;
use tracing::{info, warn};

use idlink_connector::traits::UserDirectory;
use idlink_connector::types::AccountId;

use crate::merge::StagedUpdate;

/// Status of a single update in a submitted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchItemStatus {
    /// The update was applied.
    Success,
    /// The update failed (directory API error).
    Failed,
}

/// Outcome of one user's role update.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItemResult {
    /// The user the update targeted.
    pub id: AccountId,
    /// Result status.
    pub status: BatchItemStatus,
    /// Error message if failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItemResult {
    /// Create a successful result.
    pub fn success(id: AccountId) -> Self {
        Self {
            id,
            status: BatchItemStatus::Success,
            error: None,
        }
    }

    /// Create a failed result.
    pub fn failed(id: AccountId, error: String) -> Self {
        Self {
            id,
            status: BatchItemStatus::Failed,
            error: Some(error),
        }
    }
}

/// Summary of a completed batch submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Total items attempted.
    pub total: usize,
    /// Number of applied updates.
    pub success_count: usize,
    /// Number of failed updates.
    pub failure_count: usize,
    /// Per-item results, in submission order.
    pub items: Vec<BatchItemResult>,
}

impl BatchReport {
    fn new(total: usize) -> Self {
        Self {
            total,
            success_count: 0,
            failure_count: 0,
            items: Vec::with_capacity(total),
        }
    }

    fn add_success(&mut self, id: AccountId) {
        self.success_count += 1;
        self.items.push(BatchItemResult::success(id));
    }

    fn add_failure(&mut self, id: AccountId, error: String) {
        self.failure_count += 1;
        self.items.push(BatchItemResult::failed(id, error));
    }

    /// Check if all items succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0
    }

    /// Check if any items failed.
    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }

    /// Get only the failed items.
    pub fn failed_items(&self) -> impl Iterator<Item = &BatchItemResult> {
        self.items
            .iter()
            .filter(|item| item.status == BatchItemStatus::Failed)
    }
}

/// Submit staged updates, one request per user.
///
/// Never returns an error: every per-item failure is attributable to
/// its user in the report, and sibling items always run.
pub async fn submit_updates<D: UserDirectory + ?Sized>(
    directory: &D,
    updates: &[StagedUpdate],
) -> BatchReport {
    let mut report = BatchReport::new(updates.len());
    for update in updates {
        match directory.update_user(&update.id, &update.patch).await {
            Ok(()) => {
                info!(user = %update.id, "Role update applied");
                report.add_success(update.id.clone());
            }
            Err(error) => {
                warn!(user = %update.id, error = %error, "Role update failed");
                report.add_failure(update.id.clone(), error.to_string());
            }
        }
    }
    report
}
