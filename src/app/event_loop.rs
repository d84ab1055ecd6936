use std::time::Instant;

use super::App;

impl App {
    /// Apply finished background requests. Returns true if anything changed.
    pub fn poll_completions(&mut self) -> bool {
        let mut changed = false;
        for completion in self.dispatcher.poll() {
            if self.dashboard.apply(completion) {
                changed = true;
            }
        }
        if changed {
            self.cursor.clamp(self.dashboard.applications().len(), self.dashboard.pools().len());
            debug_assert!(self.dashboard.check_invariants().is_ok());
        }
        changed
    }

    /// Redraw once per tick so the header clock and loading lines stay fresh.
    pub fn tick_clock(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last_clock) < self.tick_rate {
            return false;
        }
        self.last_clock = now;
        true
    }

    /// Expire pending confirmation if timed out.
    pub fn expire_pending_action(&mut self) -> bool {
        let now = Instant::now();
        if let Some(ref pa) = self.pending_action {
            if now > pa.expires {
                self.pending_action = None;
                return true;
            }
        }
        false
    }
}
