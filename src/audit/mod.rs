//! Deletion Audit
//!
//! Records one `DeletionLogEntry` per successfully deleted person.
//! The entry is written after the delete has committed, in its own unit
//! of work; a failed write is logged and does not undo the delete.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::DeletionLogEntry;
use crate::store::{DeletionLogStore, StoreError};

/// Default page size for reading the audit trail
pub const DEFAULT_RECENT_LIMIT: i64 = 100;

/// Post-success hook invoked after a person is deleted
#[async_trait]
pub trait DeletionHook: Send + Sync {
    async fn on_deleted(&self, cpf: &str);
}

/// Audit Log Service
#[derive(Clone)]
pub struct DeletionAuditService {
    store: Arc<dyn DeletionLogStore>,
}

impl DeletionAuditService {
    /// Create a new DeletionAuditService
    pub fn new(store: Arc<dyn DeletionLogStore>) -> Self {
        Self { store }
    }

    /// Write a deletion log entry
    pub async fn record(&self, cpf: &str) -> Result<DeletionLogEntry, StoreError> {
        let entry = self.store.append(cpf).await?;

        tracing::debug!(
            audit_id = %entry.id,
            cpf = %entry.cpf,
            "Deletion log entry created"
        );

        Ok(entry)
    }

    /// Get recent deletion log entries, newest first
    pub async fn get_recent(&self, limit: i64) -> Result<Vec<DeletionLogEntry>, StoreError> {
        self.store.recent(limit.clamp(1, 1000)).await
    }
}

#[async_trait]
impl DeletionHook for DeletionAuditService {
    async fn on_deleted(&self, cpf: &str) {
        if let Err(e) = self.record(cpf).await {
            tracing::error!(cpf = %cpf, error = %e, "Failed to write deletion log entry");
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
