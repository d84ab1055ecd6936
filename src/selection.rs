use std::collections::HashSet;

/// The set of checked row ids in the currently displayed list.
///
/// Only one list is checkable at a time. Callers clear the selection whenever
/// the list is replaced, so it never refers to a row that is gone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Select every id in `all_ids`, or deselect everything if that is
    /// already the case.
    pub fn select_all<S: AsRef<str>>(&mut self, all_ids: &[S]) {
        if self.is_all_selected(all_ids) {
            self.ids.clear();
        } else {
            self.ids = all_ids.iter().map(|s| s.as_ref().to_string()).collect();
        }
    }

    /// True when the selection equals the full, non-empty set of `all_ids`.
    pub fn is_all_selected<S: AsRef<str>>(&self, all_ids: &[S]) -> bool {
        if all_ids.is_empty() || self.ids.is_empty() {
            return false;
        }
        let all: HashSet<&str> = all_ids.iter().map(|s| s.as_ref()).collect();
        all.len() == self.ids.len() && self.ids.iter().all(|id| all.contains(id.as_str()))
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sorted snapshot, stable for requests and log lines.
    pub fn ids(&self) -> Vec<String> {
        let mut v: Vec<String> = self.ids.iter().cloned().collect();
        v.sort();
        v
    }

    /// First id not present in `known`, if any.
    pub fn first_unknown<S: AsRef<str>>(&self, known: &[S]) -> Option<&str> {
        self.ids
            .iter()
            .find(|id| !known.iter().any(|k| k.as_ref() == id.as_str()))
            .map(|id| id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [&str; 2] = ["p1", "p2"];

    #[test]
    fn toggle_adds_then_removes() {
        let mut s = Selection::new();
        s.toggle("p1");
        assert!(s.contains("p1"));
        s.toggle("p1");
        assert!(s.is_empty());
    }

    #[test]
    fn select_all_twice_from_empty_is_empty() {
        let mut s = Selection::new();
        s.select_all(&ALL);
        assert_eq!(s.ids(), vec!["p1", "p2"]);
        s.select_all(&ALL);
        assert!(s.is_empty());
    }

    #[test]
    fn select_all_from_partial_selects_everything() {
        let mut s = Selection::new();
        s.toggle("p1");
        s.select_all(&ALL);
        assert_eq!(s.len(), 2);
        assert!(s.is_all_selected(&ALL));
    }

    #[test]
    fn select_all_on_empty_list_stays_empty() {
        let mut s = Selection::new();
        let none: [&str; 0] = [];
        s.select_all(&none);
        assert!(s.is_empty());
        s.select_all(&none);
        assert!(s.is_empty());
    }

    #[test]
    fn selection_with_stale_id_is_not_all_selected() {
        let mut s = Selection::new();
        s.toggle("p1");
        s.toggle("gone");
        assert!(!s.is_all_selected(&ALL));
        assert_eq!(s.first_unknown(&ALL), Some("gone"));
    }

    #[test]
    fn random_walk_stays_within_displayed_ids() {
        // Deterministic pseudo-random sequence of operations over a shrinking list.
        let mut rows: Vec<String> = (0..8).map(|i| format!("p{}", i)).collect();
        let mut s = Selection::new();
        let mut seed: u32 = 7;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let op = (seed >> 16) % 4;
            match op {
                0 if !rows.is_empty() => {
                    let idx = ((seed >> 3) as usize) % rows.len();
                    let id = rows[idx].clone();
                    s.toggle(&id);
                }
                1 => s.select_all(&rows),
                2 => {
                    rows = (0..(seed % 6)).map(|i| format!("q{}-{}", seed % 3, i)).collect();
                    s.clear();
                }
                _ => {
                    if !rows.is_empty() {
                        let gone = rows.remove(0);
                        if s.contains(&gone) {
                            s.toggle(&gone);
                        }
                    }
                }
            }
            assert!(s.first_unknown(&rows).is_none());
        }
    }
}
