//! Reconciliation run bookkeeping and pagination envelope

use serde::{Deserialize, Serialize};

/// Which upstream collection a reconciliation run walks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncRunType {
    Courses,
    Users,
}

/// Whether a run stops after the first page or walks the full collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncScope {
    Incremental,
    Full,
}

/// Accumulated outcome of one reconciliation pass. Mutated by the sync
/// engine as it processes each page and returned as the final result; the
/// caller decides whether to store it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncRun {
    pub run_type: SyncRunType,
    pub scope: SyncScope,
    pub imported: u32,
    pub updated: u32,
    pub failed: u32,
    pub total: u32,
    /// Ordered trail of per-page and per-item events.
    pub log: Vec<String>,
}

impl SyncRun {
    pub fn new(run_type: SyncRunType, scope: SyncScope) -> Self {
        Self { run_type, scope, imported: 0, updated: 0, failed: 0, total: 0, log: Vec::new() }
    }

    /// Append an entry to the log trail.
    pub fn log_line(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }
}

/// One page of a paginated listing, live or simulated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u32,
}
