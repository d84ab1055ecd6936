use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::Backend;
use crate::controller::{Completion, FetchApplications, FetchPools};
use crate::executor::ActionRequest;

/// Runs backend requests on the tokio runtime and hands their results back to
/// the UI thread, which drains them with [`Dispatcher::poll`].
///
/// Holds one task per scope. Issuing a new fetch aborts the previous one for
/// that scope; the controller's tokens catch anything that finishes anyway.
pub struct Dispatcher {
    rt: Arc<tokio::runtime::Runtime>,
    backend: Backend,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    applications_task: Option<JoinHandle<()>>,
    pools_task: Option<JoinHandle<()>>,
    action_task: Option<JoinHandle<()>>,
}

impl Dispatcher {
    pub fn new(rt: Arc<tokio::runtime::Runtime>, backend: Backend) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            rt,
            backend,
            tx,
            rx,
            applications_task: None,
            pools_task: None,
            action_task: None,
        }
    }

    pub fn fetch_applications(&mut self, req: FetchApplications) {
        abort(&mut self.applications_task);
        // A new lookup invalidates whatever pool fetch was running.
        abort(&mut self.pools_task);

        let backend = self.backend.clone();
        let tx = self.tx.clone();
        self.applications_task = Some(self.rt.spawn(async move {
            let result = backend.fetch_applications(&req.seal_id).await;
            let _ = tx.send(Completion::Applications {
                token: req.token,
                result,
            });
        }));
    }

    pub fn fetch_pools(&mut self, req: FetchPools) {
        abort(&mut self.pools_task);

        let backend = self.backend.clone();
        let tx = self.tx.clone();
        self.pools_task = Some(self.rt.spawn(async move {
            let result = backend.fetch_pools(&req.application_id).await;
            let _ = tx.send(Completion::Pools {
                token: req.token,
                application_id: req.application_id,
                result,
            });
        }));
    }

    /// Actions are never aborted: the remote change may already be underway.
    pub fn perform_action(&mut self, req: ActionRequest) {
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        self.action_task = Some(self.rt.spawn(async move {
            let result = backend.request_instance_change(&req.change).await;
            let _ = tx.send(Completion::Action {
                token: req.token,
                result,
            });
        }));
    }

    /// Drain finished requests without blocking.
    pub fn poll(&mut self) -> Vec<Completion> {
        let mut done = Vec::new();
        while let Ok(c) = self.rx.try_recv() {
            done.push(c);
        }
        done
    }

    /// True if any request is still running.
    pub fn is_busy(&self) -> bool {
        [&self.applications_task, &self.pools_task, &self.action_task]
            .into_iter()
            .flatten()
            .any(|h| !h.is_finished())
    }
}

fn abort(task: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = task.take() {
        if !handle.is_finished() {
            debug!("Aborting superseded request");
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Dashboard;
    use crate::executor::ActionKind;
    use crate::mock::MockBackend;
    use std::time::{Duration, Instant};

    fn runtime() -> Arc<tokio::runtime::Runtime> {
        Arc::new(
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .worker_threads(1)
                .build()
                .unwrap(),
        )
    }

    /// Poll until nothing is running and everything delivered has been applied.
    fn settle(dispatcher: &mut Dispatcher, dashboard: &mut Dashboard) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            for c in dispatcher.poll() {
                dashboard.apply(c);
            }
            if !dispatcher.is_busy() {
                for c in dispatcher.poll() {
                    dashboard.apply(c);
                }
                return;
            }
            assert!(Instant::now() < deadline, "requests did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn lookup_drill_down_and_delete_through_mock() {
        let mut dispatcher = Dispatcher::new(runtime(), Backend::Mock(MockBackend::new(Duration::ZERO)));
        let mut d = Dashboard::new();

        d.seal_input = "SEAL123".into();
        dispatcher.fetch_applications(d.begin_lookup().unwrap());
        settle(&mut dispatcher, &mut d);
        assert_eq!(d.applications().len(), 4);

        dispatcher.fetch_pools(d.select_application("1").unwrap());
        settle(&mut dispatcher, &mut d);
        assert_eq!(d.pools().len(), 5);

        d.toggle_pool("p1");
        d.toggle_pool("p2");
        dispatcher.perform_action(d.perform_action(ActionKind::Automatic).unwrap());
        settle(&mut dispatcher, &mut d);
        assert_eq!(d.pool_ids(), ["p3", "p4", "p5"]);
        assert!(d.selection().is_empty());
        assert!(!d.is_processing());
    }

    #[test]
    fn superseded_pool_fetch_never_lands() {
        let backend = Backend::Mock(MockBackend::new(Duration::from_millis(30)));
        let mut dispatcher = Dispatcher::new(runtime(), backend);
        let mut d = Dashboard::new();

        d.seal_input = "SEAL123".into();
        dispatcher.fetch_applications(d.begin_lookup().unwrap());
        settle(&mut dispatcher, &mut d);

        dispatcher.fetch_pools(d.select_application("1").unwrap());
        dispatcher.fetch_pools(d.select_application("2").unwrap());
        settle(&mut dispatcher, &mut d);

        assert_eq!(d.selected_application().unwrap().id, "2");
        assert_eq!(d.pools().phase(), &crate::controller::LoadPhase::Loaded);
        assert_eq!(d.pool_ids(), ["q1", "q2", "q3", "q4", "q5"]);
    }

    #[test]
    fn failed_action_surfaces_error() {
        let backend = Backend::Mock(MockBackend::new(Duration::ZERO).with_failing_actions());
        let mut dispatcher = Dispatcher::new(runtime(), backend);
        let mut d = Dashboard::new();

        d.seal_input = "SEAL123".into();
        dispatcher.fetch_applications(d.begin_lookup().unwrap());
        settle(&mut dispatcher, &mut d);
        dispatcher.fetch_pools(d.select_application("3").unwrap());
        settle(&mut dispatcher, &mut d);

        d.select_all_pools();
        dispatcher.perform_action(d.perform_action(ActionKind::Manual { target: 3 }).unwrap());
        settle(&mut dispatcher, &mut d);

        assert_eq!(d.pools().len(), 5);
        assert_eq!(d.selection().len(), 5);
        assert!(d.status().unwrap().text.contains("503"));
    }
}
