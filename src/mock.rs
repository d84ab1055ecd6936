//! Simulated seal backend: in-memory data with artificial latency.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::api::InstanceChange;
use crate::error::{DashboardError, Result};
use crate::model::{AdminState, Application, OperationalState, Pool, PoolKind, PoolStatus, SealData};

/// Seal ids with this prefix fail the lookup with a 500.
pub const FAILING_SEAL_PREFIX: &str = "FAIL";

struct MockState {
    applications: Vec<Application>,
    pools: HashMap<String, Vec<Pool>>, // keyed by application id
}

/// In-memory backend. Clones share state, so a change made through one clone
/// is visible to the next fetch through another.
#[derive(Clone)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
    latency: Duration,
    fail_actions: bool,
}

impl MockBackend {
    pub fn new(latency: Duration) -> Self {
        let applications = seed_applications();
        // Each application gets its own pool ids: p1.. for the first, q1.. for the next.
        let pools = applications
            .iter()
            .zip(['p', 'q', 'r', 's'])
            .map(|(a, prefix)| (a.id.clone(), seed_pools(prefix)))
            .collect();
        Self {
            state: Arc::new(Mutex::new(MockState { applications, pools })),
            latency,
            fail_actions: false,
        }
    }

    /// Make every instance change fail with a 503.
    pub fn with_failing_actions(mut self) -> Self {
        self.fail_actions = true;
        self
    }

    pub async fn fetch_applications(&self, seal_id: &str) -> Result<SealData> {
        self.simulate_latency().await;
        if seal_id.starts_with(FAILING_SEAL_PREFIX) {
            return Err(DashboardError::http(500, format!("seal {} could not be resolved", seal_id)));
        }
        let state = self.lock()?;
        Ok(SealData {
            seal_id: seal_id.to_string(),
            applications: state.applications.clone(),
        })
    }

    pub async fn fetch_pools(&self, application_id: &str) -> Result<Vec<Pool>> {
        self.simulate_latency().await;
        let state = self.lock()?;
        state
            .pools
            .get(application_id)
            .cloned()
            .ok_or_else(|| DashboardError::http(404, format!("application {} not found", application_id)))
    }

    pub async fn request_instance_change(&self, change: &InstanceChange) -> Result<()> {
        self.simulate_latency().await;
        if self.fail_actions {
            return Err(DashboardError::http(503, "instance controller unavailable"));
        }
        let mut state = self.lock()?;
        let pools = state.pools.get_mut(&change.application_id).ok_or_else(|| {
            DashboardError::http(404, format!("application {} not found", change.application_id))
        })?;
        pools.retain(|p| !change.pool_ids.contains(&p.id));
        let remaining = pools.len();
        debug!(
            application_id = %change.application_id,
            count = change.count,
            removed = change.pool_ids.len(),
            remaining,
            "Simulated instance change"
        );
        Ok(())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MockState>> {
        self.state
            .lock()
            .map_err(|_| DashboardError::transport("simulated backend state poisoned"))
    }
}

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_default()
}

fn seed_applications() -> Vec<Application> {
    vec![
        Application {
            id: "1".into(),
            name: "user-service".into(),
            env: "production".into(),
            instances: 3,
            last_updated: ts("2025-01-02T10:30:00Z"),
            memory_usage: "2.4 GB".into(),
            operationalstate: OperationalState::Running,
            adminstate: AdminState::Enabled,
            glb_routes: vec!["/api/users".into(), "/api/auth".into()],
        },
        Application {
            id: "2".into(),
            name: "payment-service".into(),
            env: "production".into(),
            instances: 2,
            last_updated: ts("2025-01-02T09:15:00Z"),
            memory_usage: "1.8 GB".into(),
            operationalstate: OperationalState::Running,
            adminstate: AdminState::Enabled,
            glb_routes: vec!["/api/payments".into(), "/api/billing".into()],
        },
        Application {
            id: "3".into(),
            name: "notification-service".into(),
            env: "staging".into(),
            instances: 1,
            last_updated: ts("2025-01-01T14:45:00Z"),
            memory_usage: "0.9 GB".into(),
            operationalstate: OperationalState::Pending,
            adminstate: AdminState::Maintenance,
            glb_routes: vec!["/api/notifications".into()],
        },
        Application {
            id: "4".into(),
            name: "analytics-service".into(),
            env: "development".into(),
            instances: 1,
            last_updated: ts("2025-01-02T08:22:00Z"),
            memory_usage: "3.1 GB".into(),
            operationalstate: OperationalState::Error,
            adminstate: AdminState::Disabled,
            glb_routes: vec!["/api/analytics".into(), "/api/reports".into()],
        },
    ]
}

fn seed_pools(prefix: char) -> Vec<Pool> {
    let rows = [
        ("Production Pool", PoolKind::Automatic, PoolStatus::Running, "2.4 GB", "2024-02-01 10:30"),
        ("Staging Pool", PoolKind::Manual, PoolStatus::Running, "1.8 GB", "2024-02-01 09:15"),
        ("Development Pool", PoolKind::Manual, PoolStatus::Stopped, "950 MB", "2024-01-31 16:45"),
        ("Testing Pool", PoolKind::Automatic, PoolStatus::Error, "1.2 GB", "2024-01-31 14:20"),
        ("Backup Pool", PoolKind::Automatic, PoolStatus::Running, "3.1 GB", "2024-02-01 08:00"),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (name, kind, status, size, modified))| Pool {
            id: format!("{}{}", prefix, i + 1),
            name: (*name).to_string(),
            kind: *kind,
            status: *status,
            size: (*size).to_string(),
            last_modified: (*modified).to_string(),
        })
        .collect()
}
