use std::time::{Duration, Instant};

use crate::executor::ActionKind;

/// How long a confirmation prompt stays open before it is dropped.
pub const CONFIRM_TIMEOUT: Duration = Duration::from_secs(10);

/// Pending destructive action awaiting confirmation.
pub struct PendingAction {
    pub description: String,
    pub kind: PendingActionKind,
    pub expires: Instant,
}

pub enum PendingActionKind {
    BulkAction(ActionKind),
}

impl PendingAction {
    pub fn bulk(kind: ActionKind, selected: usize, application: &str) -> Self {
        let noun = if selected == 1 { "pool" } else { "pools" };
        let description = match kind {
            ActionKind::Manual { target } => format!(
                "Scale {} {} of {} to {} instances?",
                selected, noun, application, target
            ),
            ActionKind::Automatic => format!("Delete {} {} of {}?", selected, noun, application),
        };
        Self {
            description,
            kind: PendingActionKind::BulkAction(kind),
            expires: Instant::now() + CONFIRM_TIMEOUT,
        }
    }
}

/// Operator is typing the target instance count for a manual action.
#[derive(Debug, Default)]
pub struct CountPrompt {
    pub value: String,
}

impl CountPrompt {
    /// Digits only, at most 4 of them.
    pub fn push(&mut self, c: char) {
        if c.is_ascii_digit() && self.value.len() < 4 {
            self.value.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn parse(&self) -> Option<u32> {
        self.value.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_description_mentions_target() {
        let pa = PendingAction::bulk(ActionKind::Manual { target: 3 }, 2, "user-service");
        assert_eq!(pa.description, "Scale 2 pools of user-service to 3 instances?");
        assert!(pa.expires > Instant::now());
    }

    #[test]
    fn bulk_description_singular() {
        let pa = PendingAction::bulk(ActionKind::Automatic, 1, "payment-service");
        assert_eq!(pa.description, "Delete 1 pool of payment-service?");
    }

    #[test]
    fn count_prompt_accepts_digits_only() {
        let mut p = CountPrompt::default();
        for c in "1a2-34567".chars() {
            p.push(c);
        }
        assert_eq!(p.value, "1234");
        assert_eq!(p.parse(), Some(1234));
        p.pop();
        assert_eq!(p.parse(), Some(123));
    }

    #[test]
    fn empty_count_prompt_does_not_parse() {
        assert_eq!(CountPrompt::default().parse(), None);
    }
}
