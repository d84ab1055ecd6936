//! Bulk actions over the selected pools.
//!
//! An action snapshots the selection, goes out as one instance-change request,
//! and on success removes exactly those rows from the displayed pool list.

use tracing::{info, warn};

use crate::api::InstanceChange;
use crate::controller::{Dashboard, LoadPhase, RequestToken};
use crate::error::Result;

/// What the operator asked for. Both kinds share one state machine; only the
/// requested instance count differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Scale the selected pools to an operator-entered instance count.
    Manual { target: u32 },
    /// Delete the selected pools (scale to zero).
    Automatic,
}

impl ActionKind {
    pub fn count(&self) -> u32 {
        match self {
            ActionKind::Manual { target } => *target,
            ActionKind::Automatic => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Manual { .. } => "Manual",
            ActionKind::Automatic => "Automatic",
        }
    }

    fn verb(&self) -> String {
        match self {
            ActionKind::Manual { target } => format!("Scaling to {}", target),
            ActionKind::Automatic => "Deleting".to_string(),
        }
    }
}

/// Ready-to-send action produced by [`Dashboard::perform_action`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRequest {
    pub token: RequestToken,
    pub kind: ActionKind,
    pub change: InstanceChange,
}

/// The action currently awaiting its response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InFlightAction {
    pub token: RequestToken,
    pub kind: ActionKind,
    pub application_id: String,
    pub pool_ids: Vec<String>,
}

impl Dashboard {
    /// True while an action is awaiting its response; action keys are disabled.
    pub fn is_processing(&self) -> bool {
        self.action.is_some()
    }

    pub fn in_flight_action(&self) -> Option<&InFlightAction> {
        self.action.as_ref()
    }

    /// Start a bulk action on the current selection.
    ///
    /// Returns `None` (and sends nothing) when the selection is empty, no
    /// application is chosen, the pools are not loaded, or another action is
    /// still processing.
    pub fn perform_action(&mut self, kind: ActionKind) -> Option<ActionRequest> {
        if self.action.is_some() {
            self.set_info("An action is already in progress...");
            return None;
        }
        if self.selection.is_empty() || self.pools().phase() != &LoadPhase::Loaded {
            return None;
        }
        let application_id = self.selected_application()?.id.clone();

        let pool_ids = self.selection.ids();
        self.action_seq += 1;
        let token = self.action_seq;

        info!(
            application_id = %application_id,
            action = kind.label(),
            count = kind.count(),
            pools = pool_ids.len(),
            token,
            "Starting bulk action"
        );
        self.set_info(format!("{} {}...", kind.verb(), pool_noun(pool_ids.len())));
        self.action = Some(InFlightAction {
            token,
            kind,
            application_id: application_id.clone(),
            pool_ids: pool_ids.clone(),
        });

        Some(ActionRequest {
            token,
            kind,
            change: InstanceChange {
                application_id,
                pool_ids,
                count: kind.count(),
            },
        })
    }

    /// Reconcile local state with the action's outcome.
    pub fn finish_action(&mut self, token: RequestToken, result: Result<()>) -> bool {
        let Some(action) = self.action.take_if(|a| a.token == token) else {
            return false;
        };

        match result {
            Ok(()) => {
                let still_shown = self
                    .selected_application()
                    .is_some_and(|a| a.id == action.application_id)
                    && self.pools().phase() == &LoadPhase::Loaded;

                if still_shown {
                    self.pools
                        .items_mut()
                        .retain(|p| !action.pool_ids.contains(&p.id));
                    self.selection.clear();
                }
                info!(token, pools = action.pool_ids.len(), still_shown, "Bulk action succeeded");
                let done = match action.kind {
                    ActionKind::Manual { target } => format!("Scaled {} to {}", pool_noun(action.pool_ids.len()), target),
                    ActionKind::Automatic => format!("Deleted {}", pool_noun(action.pool_ids.len())),
                };
                self.set_info(done);
            }
            Err(e) => {
                warn!(token, error = %e, "Bulk action failed");
                self.set_error(format!("{} action failed: {}", action.kind.label(), e));
            }
        }
        true
    }
}

fn pool_noun(n: usize) -> String {
    if n == 1 {
        "1 pool".to_string()
    } else {
        format!("{} pools", n)
    }
}
