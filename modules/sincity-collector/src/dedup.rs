use std::collections::HashSet;

/// Run-scoped set of external ids already accepted into the dataset.
///
/// Acceptance is global across anchors: the first anchor (and position within
/// that anchor's results) to surface an id keeps it.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `external_id` is offered, false after.
    pub fn accept(&mut self, external_id: &str) -> bool {
        if self.seen.contains(external_id) {
            return false;
        }
        self.seen.insert(external_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sighting_wins() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.accept("x"));
        assert!(!dedup.accept("x"));
        assert!(dedup.accept("y"));
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn replaying_accepted_ids_accepts_nothing() {
        let ids = ["a", "b", "c", "a"];
        let mut dedup = Deduplicator::new();
        let first: usize = ids.iter().filter(|id| dedup.accept(id)).count();
        assert_eq!(first, 3);

        let replay: usize = ids.iter().filter(|id| dedup.accept(id)).count();
        assert_eq!(replay, 0);
        assert_eq!(dedup.len(), 3);
    }
}
