use std::sync::Arc;

use chrono::{DateTime, Utc};
use cs_core::ports::{ClockPort, RemoteContentPort};
use cs_core::sync::{SyncReport, SyncStatus};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::queue::{QueueEvent, QueueState};

#[derive(Debug, Clone, Default)]
struct AuditState {
    status: SyncStatus,
    last_checked: Option<DateTime<Utc>>,
    last_report: Option<SyncReport>,
}

/// Compares the local queue against the remote list. Reports only, never repairs.
///
/// Overlapping checks are not serialized; whichever finishes last sets the
/// visible status.
#[derive(Clone)]
pub struct SyncAuditor {
    remote: Arc<dyn RemoteContentPort>,
    clock: Arc<dyn ClockPort>,
    state: QueueState,
    audit: Arc<RwLock<AuditState>>,
}

impl SyncAuditor {
    pub fn new(remote: Arc<dyn RemoteContentPort>, clock: Arc<dyn ClockPort>, state: QueueState) -> Self {
        Self {
            remote,
            clock,
            state,
            audit: Arc::new(RwLock::new(AuditState::default())),
        }
    }

    pub async fn status(&self) -> SyncStatus {
        self.audit.read().await.status
    }

    pub async fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.audit.read().await.last_checked
    }

    pub async fn last_report(&self) -> Option<SyncReport> {
        self.audit.read().await.last_report.clone()
    }

    #[tracing::instrument(name = "usecase.check_sync.execute", skip(self))]
    pub async fn check_sync(&self) -> SyncReport {
        self.audit.write().await.status = SyncStatus::Checking;

        let fetched = self.remote.list_items().await;
        let local = self.state.store.snapshot().await;
        let now = self.clock.now();

        let report = match fetched {
            Ok(remote) => SyncReport::compare(&local, &remote, now),
            Err(err) => {
                warn!(error = %err, "sync check could not reach the remote");
                SyncReport::unreachable(local.len(), now)
            }
        };

        info!(
            status = ?report.status,
            local = report.local_count,
            remote = report.remote_count,
            "sync check finished"
        );

        {
            let mut audit = self.audit.write().await;
            audit.status = report.status;
            audit.last_checked = Some(now);
            audit.last_report = Some(report.clone());
        }
        self.state.events.emit(QueueEvent::SyncChecked {
            status: report.status,
        });
        report
    }
}
