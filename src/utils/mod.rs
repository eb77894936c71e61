use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh record ids. Every id returned is unique for the life of the process.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}

/// Monotonically increasing decimal ids: "1", "2", ...
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl SequentialIds {
    /// Starts numbering after the largest numeric id in `taken`.
    pub fn after<'a>(taken: impl IntoIterator<Item = &'a str>) -> Self {
        let max = taken
            .into_iter()
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            next: AtomicU64::new(max.saturating_add(1)),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn sequential_ids_increase() {
        let ids = SequentialIds::default();
        assert_eq!(ids.next_id(), "1");
        assert_eq!(ids.next_id(), "2");
        assert_eq!(ids.next_id(), "3");
    }

    #[test]
    fn after_skips_taken_numeric_ids() {
        let ids = SequentialIds::after(["3", "abc", "12", "7"]);
        assert_eq!(ids.next_id(), "13");
        assert_eq!(SequentialIds::after([]).next_id(), "1");
    }

    #[test]
    fn sequential_ids_unique_across_threads() {
        let ids = Arc::new(SequentialIds::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();
        let all: HashSet<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(all.len(), 1000);
    }

    #[test]
    fn uuid_ids_are_distinct() {
        let ids = UuidIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
