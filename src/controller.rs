//! Dashboard state container: the application list, the pool list of the
//! chosen application, and the pool selection.
//!
//! Every list goes through `Idle -> Loading -> Loaded | Failed`. Each request
//! carries a token; a response is applied only if its token is still the
//! latest one issued for that list.

use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};
use crate::executor::InFlightAction;
use crate::model::{Application, Pool, SealData};
use crate::selection::Selection;

pub type RequestToken = u64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// What happened to a response handed to [`ListScope::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Failed,
    Stale,
}

/// One list and its load state machine.
#[derive(Debug)]
pub struct ListScope<T> {
    items: Vec<T>,
    phase: LoadPhase,
    latest: RequestToken,
}

impl<T> Default for ListScope<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            phase: LoadPhase::Idle,
            latest: 0,
        }
    }
}

impl<T> ListScope<T> {
    /// Start a request: drop the old rows and hand out a fresh token.
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        self.items.clear();
        self.phase = LoadPhase::Loading;
        self.latest
    }

    /// Back to `Idle`. Any request still in flight becomes stale.
    pub fn reset(&mut self) {
        self.latest += 1;
        self.items.clear();
        self.phase = LoadPhase::Idle;
    }

    pub fn resolve(&mut self, token: RequestToken, result: Result<Vec<T>>) -> Resolution {
        if token != self.latest || self.phase != LoadPhase::Loading {
            return Resolution::Stale;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.phase = LoadPhase::Loaded;
                Resolution::Applied
            }
            Err(e) => {
                self.items.clear();
                self.phase = LoadPhase::Failed(e.to_string());
                Resolution::Failed
            }
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token == self.latest
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Request to fetch the applications of a seal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchApplications {
    pub token: RequestToken,
    pub seal_id: String,
}

/// Request to fetch the pools of an application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchPools {
    pub token: RequestToken,
    pub application_id: String,
}

/// A finished background request, delivered back to the UI thread.
#[derive(Debug)]
pub enum Completion {
    Applications {
        token: RequestToken,
        result: Result<SealData>,
    },
    Pools {
        token: RequestToken,
        application_id: String,
        result: Result<Vec<Pool>>,
    },
    Action {
        token: RequestToken,
        result: Result<()>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

/// The whole dashboard state.
#[derive(Debug, Default)]
pub struct Dashboard {
    /// Seal id as typed; trimmed when the lookup starts.
    pub seal_input: String,
    active_seal: Option<String>,
    applications: ListScope<Application>,
    selected_application: Option<Application>,
    pub(crate) pools: ListScope<Pool>,
    pub(crate) selection: Selection,
    pub(crate) action: Option<InFlightAction>,
    pub(crate) action_seq: RequestToken,
    status: Option<StatusMessage>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Lookup ---

    /// Start a seal lookup. Clears applications, the chosen application, its
    /// pools and the selection before anything is sent.
    pub fn begin_lookup(&mut self) -> Result<FetchApplications> {
        let seal_id = self.seal_input.trim().to_string();
        if seal_id.is_empty() {
            let err = DashboardError::validation("Enter a seal ID to fetch applications");
            self.set_error(err.to_string());
            return Err(err);
        }

        let token = self.applications.begin();
        self.selected_application = None;
        self.pools.reset();
        self.selection.clear();
        self.active_seal = Some(seal_id.clone());
        self.status = None;
        info!(seal_id = %seal_id, token, "Looking up seal");

        Ok(FetchApplications { token, seal_id })
    }

    pub fn finish_lookup(&mut self, token: RequestToken, result: Result<SealData>) -> bool {
        let result = result.map(|data| data.applications);
        let failure = result.as_ref().err().map(|e| e.to_string());
        match self.applications.resolve(token, result) {
            Resolution::Applied => {
                info!(token, count = self.applications.len(), "Applications loaded");
                true
            }
            Resolution::Failed => {
                let msg = failure.unwrap_or_default();
                warn!(token, error = %msg, "Seal lookup failed");
                self.set_error(format!("Lookup failed: {}", msg));
                true
            }
            Resolution::Stale => {
                debug!(token, "Discarding stale application response");
                false
            }
        }
    }

    // --- Drill-down ---

    /// Choose an application and start loading its pools.
    /// Returns `None` if the id is not in the displayed list.
    pub fn select_application(&mut self, application_id: &str) -> Option<FetchPools> {
        let app = self
            .applications
            .items()
            .iter()
            .find(|a| a.id == application_id)?
            .clone();

        let token = self.pools.begin();
        self.selection.clear();
        if self.status.as_ref().is_some_and(|s| s.severity == Severity::Error) {
            self.clear_status();
        }
        info!(application = %app.name, token, "Loading pools");
        self.selected_application = Some(app);

        Some(FetchPools {
            token,
            application_id: application_id.to_string(),
        })
    }

    pub fn finish_pools(
        &mut self,
        token: RequestToken,
        application_id: &str,
        result: Result<Vec<Pool>>,
    ) -> bool {
        let chosen = self.selected_application.as_ref().map(|a| a.id.as_str());
        if chosen != Some(application_id) {
            debug!(token, application_id, "Discarding pools for an application no longer selected");
            return false;
        }
        let failure = result.as_ref().err().map(|e| e.to_string());
        match self.pools.resolve(token, result) {
            Resolution::Applied => {
                self.selection.clear();
                debug!(token, count = self.pools.len(), "Pools loaded");
                true
            }
            Resolution::Failed => {
                let msg = failure.unwrap_or_default();
                warn!(token, application_id, error = %msg, "Pool fetch failed");
                self.set_error(format!("Loading pools failed: {}", msg));
                true
            }
            Resolution::Stale => {
                debug!(token, "Discarding stale pool response");
                false
            }
        }
    }

    /// Route a finished background request to its handler.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Applications { token, result } => self.finish_lookup(token, result),
            Completion::Pools {
                token,
                application_id,
                result,
            } => self.finish_pools(token, &application_id, result),
            Completion::Action { token, result } => self.finish_action(token, result),
        }
    }

    // --- Selection over pool rows ---

    /// Toggle a pool's checkbox. Ids not in the displayed list are ignored.
    pub fn toggle_pool(&mut self, pool_id: &str) {
        if self.pools.items().iter().any(|p| p.id == pool_id) {
            self.selection.toggle(pool_id);
        }
    }

    /// Select every displayed pool, or none if all are already selected.
    pub fn select_all_pools(&mut self) {
        let ids = self.pool_ids();
        self.selection.select_all(&ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn all_pools_selected(&self) -> bool {
        self.selection.is_all_selected(&self.pool_ids())
    }

    pub fn pool_ids(&self) -> Vec<String> {
        self.pools.items().iter().map(|p| p.id.clone()).collect()
    }

    /// Selection must be a subset of the displayed pools.
    pub fn check_invariants(&self) -> Result<()> {
        let ids = self.pool_ids();
        match self.selection.first_unknown(&ids) {
            Some(stale) => Err(DashboardError::StateInvariant(format!(
                "pool {} is selected but not displayed",
                stale
            ))),
            None => Ok(()),
        }
    }

    // --- Accessors ---

    pub fn applications(&self) -> &ListScope<Application> {
        &self.applications
    }

    pub fn pools(&self) -> &ListScope<Pool> {
        &self.pools
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_application(&self) -> Option<&Application> {
        self.selected_application.as_ref()
    }

    pub fn active_seal(&self) -> Option<&str> {
        self.active_seal.as_deref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            severity: Severity::Info,
            text: text.into(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            severity: Severity::Error,
            text: text.into(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{AdminState, OperationalState, PoolKind, PoolStatus};

    pub(crate) fn app(id: &str, name: &str) -> Application {
        Application {
            id: id.into(),
            name: name.into(),
            env: "production".into(),
            instances: 1,
            last_updated: chrono::DateTime::parse_from_rfc3339("2025-01-02T10:30:00Z")
                .unwrap()
                .with_timezone(&chrono::Utc),
            memory_usage: "1 GB".into(),
            operationalstate: OperationalState::Running,
            adminstate: AdminState::Enabled,
            glb_routes: vec![],
        }
    }

    pub(crate) fn pool(id: &str) -> Pool {
        Pool {
            id: id.into(),
            name: format!("{} pool", id),
            kind: PoolKind::Manual,
            status: PoolStatus::Running,
            size: "1 GB".into(),
            last_modified: "2024-02-01 10:30".into(),
        }
    }

    pub(crate) fn seal(apps: Vec<Application>) -> SealData {
        SealData {
            seal_id: "SEAL123".into(),
            applications: apps,
        }
    }

    /// Dashboard with SEAL123 loaded and application "1" showing pools p1, p2.
    pub(crate) fn loaded_dashboard() -> Dashboard {
        let mut d = Dashboard::new();
        d.seal_input = "SEAL123".into();
        let req = d.begin_lookup().unwrap();
        d.finish_lookup(req.token, Ok(seal(vec![app("1", "user-service"), app("2", "payment-service")])));
        let req = d.select_application("1").unwrap();
        d.finish_pools(req.token, "1", Ok(vec![pool("p1"), pool("p2")]));
        d
    }

    #[test]
    fn empty_seal_is_rejected_without_request() {
        let mut d = Dashboard::new();
        d.seal_input = "   ".into();
        let err = d.begin_lookup().unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        assert_eq!(d.applications().phase(), &LoadPhase::Idle);
        assert_eq!(d.status().unwrap().severity, Severity::Error);
    }

    #[test]
    fn lookup_trims_and_enters_loading_synchronously() {
        let mut d = Dashboard::new();
        d.seal_input = "  SEAL123 ".into();
        let req = d.begin_lookup().unwrap();
        assert_eq!(req.seal_id, "SEAL123");
        assert!(d.applications().is_loading());
        assert_eq!(d.active_seal(), Some("SEAL123"));
    }

    #[test]
    fn lookup_resolves_exactly_once() {
        let mut d = Dashboard::new();
        d.seal_input = "SEAL123".into();
        let req = d.begin_lookup().unwrap();
        assert!(d.finish_lookup(req.token, Ok(seal(vec![app("1", "a")]))));
        assert_eq!(d.applications().phase(), &LoadPhase::Loaded);
        // A duplicate delivery of the same token changes nothing.
        assert!(!d.finish_lookup(req.token, Err(DashboardError::http(500, "late"))));
        assert_eq!(d.applications().len(), 1);
    }

    #[test]
    fn lookup_failure_is_retained_for_display() {
        let mut d = Dashboard::new();
        d.seal_input = "SEAL123".into();
        let req = d.begin_lookup().unwrap();
        d.finish_lookup(req.token, Err(DashboardError::http(502, "bad gateway")));
        assert_eq!(d.applications().error(), Some("HTTP 502: bad gateway"));
        assert!(d.applications().is_empty());
        let status = d.status().unwrap();
        assert_eq!(status.severity, Severity::Error);
        assert!(status.text.contains("bad gateway"));
    }

    #[test]
    fn pool_error_is_cleared_once_another_application_loads() {
        let mut d = loaded_dashboard();
        let req = d.select_application("2").unwrap();
        d.finish_pools(req.token, "2", Err(DashboardError::http(500, "boom")));
        assert!(matches!(d.pools().phase(), LoadPhase::Failed(_)));
        assert_eq!(d.status().unwrap().severity, Severity::Error);

        let req = d.select_application("1").unwrap();
        d.finish_pools(req.token, "1", Ok(vec![pool("p1")]));
        assert_eq!(d.pools().phase(), &LoadPhase::Loaded);
        assert!(d.status().is_none_or(|s| s.severity != Severity::Error));
    }

    #[test]
    fn new_lookup_clears_previous_drill_down() {
        let mut d = loaded_dashboard();
        d.select_all_pools();
        let req = d.begin_lookup().unwrap();
        assert!(d.applications().is_empty());
        assert!(d.selected_application().is_none());
        assert!(d.pools().is_empty());
        assert_eq!(d.pools().phase(), &LoadPhase::Idle);
        assert!(d.selection().is_empty());
        assert!(d.applications().is_current(req.token));
    }

    #[test]
    fn superseded_lookup_response_is_discarded() {
        let mut d = Dashboard::new();
        d.seal_input = "A".into();
        let first = d.begin_lookup().unwrap();
        d.seal_input = "B".into();
        let second = d.begin_lookup().unwrap();

        assert!(d.finish_lookup(second.token, Ok(seal(vec![app("b", "b-app")]))));
        assert!(!d.finish_lookup(first.token, Ok(seal(vec![app("a", "a-app")]))));
        assert_eq!(d.applications().items()[0].id, "b");
    }

    #[test]
    fn selecting_unknown_application_does_nothing() {
        let mut d = loaded_dashboard();
        assert!(d.select_application("nope").is_none());
        assert_eq!(d.selected_application().unwrap().id, "1");
        assert_eq!(d.pools().len(), 2);
    }

    #[test]
    fn switching_application_mid_flight_keeps_latest_pools() {
        let mut d = loaded_dashboard();
        let a = d.select_application("1").unwrap();
        let b = d.select_application("2").unwrap();

        // B resolves first, then A's late answer arrives.
        assert!(d.finish_pools(b.token, "2", Ok(vec![pool("b1")])));
        assert!(!d.finish_pools(a.token, "1", Ok(vec![pool("a1"), pool("a2")])));
        assert_eq!(d.pool_ids(), ["b1"]);

        // And in the other order.
        let a = d.select_application("1").unwrap();
        let b = d.select_application("2").unwrap();
        assert!(!d.finish_pools(a.token, "1", Ok(vec![pool("a1")])));
        assert!(d.pools().is_loading());
        assert!(d.finish_pools(b.token, "2", Ok(vec![pool("b2")])));
        assert_eq!(d.pool_ids(), ["b2"]);
    }

    #[test]
    fn pool_failure_keeps_application_selected() {
        let mut d = loaded_dashboard();
        let req = d.select_application("2").unwrap();
        d.finish_pools(req.token, "2", Err(DashboardError::transport("timed out")));
        assert_eq!(d.selected_application().unwrap().id, "2");
        assert!(d.pools().error().unwrap().contains("timed out"));
    }

    #[test]
    fn toggle_ignores_ids_not_displayed() {
        let mut d = loaded_dashboard();
        d.toggle_pool("p9");
        assert!(d.selection().is_empty());
        d.toggle_pool("p1");
        assert!(d.selection().contains("p1"));
        assert!(d.check_invariants().is_ok());
    }

    #[test]
    fn example_scenario_selection() {
        let mut d = loaded_dashboard();
        d.toggle_pool("p1");
        d.select_all_pools();
        assert_eq!(d.selection().ids(), ["p1", "p2"]);
        assert!(d.all_pools_selected());
        d.select_all_pools();
        assert!(d.selection().is_empty());
    }

    #[test]
    fn invariant_check_reports_stale_selection() {
        let mut d = loaded_dashboard();
        d.selection.toggle("ghost");
        assert!(matches!(d.check_invariants(), Err(DashboardError::StateInvariant(_))));
    }
}
