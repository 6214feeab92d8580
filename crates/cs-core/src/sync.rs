//! Divergence detection between the local queue and the remote list.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::content::{ContentItem, QueueEntry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncStatus {
    #[default]
    Synced,
    Checking,
    OutOfSync,
}

/// Result of one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub status: SyncStatus,
    pub local_count: usize,
    pub remote_count: usize,
    /// Keys present locally but unknown to the remote.
    pub extra_local: Vec<String>,
    /// Remote ids missing from the local queue.
    pub missing_local: Vec<String>,
    pub checked_at: DateTime<Utc>,
}

impl SyncReport {
    /// Compares `local` against `remote` by key membership in both directions
    /// and by count.
    pub fn compare(local: &[QueueEntry], remote: &[ContentItem], checked_at: DateTime<Utc>) -> Self {
        let local_keys: HashSet<&str> = local.iter().map(QueueEntry::remote_key).collect();
        let remote_keys: HashSet<&str> = remote.iter().map(|item| item.id.as_str()).collect();

        let extra_local: Vec<String> = local
            .iter()
            .map(QueueEntry::remote_key)
            .filter(|key| !remote_keys.contains(key))
            .map(str::to_string)
            .collect();
        let missing_local: Vec<String> = remote
            .iter()
            .map(|item| item.id.as_str())
            .filter(|key| !local_keys.contains(key))
            .map(str::to_string)
            .collect();

        let diverged =
            !extra_local.is_empty() || !missing_local.is_empty() || local.len() != remote.len();

        Self {
            status: if diverged {
                SyncStatus::OutOfSync
            } else {
                SyncStatus::Synced
            },
            local_count: local.len(),
            remote_count: remote.len(),
            extra_local,
            missing_local,
            checked_at,
        }
    }

    /// Report used when the remote list could not be fetched.
    pub fn unreachable(local_count: usize, checked_at: DateTime<Utc>) -> Self {
        Self {
            status: SyncStatus::OutOfSync,
            local_count,
            remote_count: 0,
            extra_local: Vec::new(),
            missing_local: Vec::new(),
            checked_at,
        }
    }
}
