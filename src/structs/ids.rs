use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/* Identifiers are handed out by the caller, the ledger and the log only check uniqueness. */
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/* Monotonic counter, ids never repeat within one generator even under rapid inserts */
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        Self::starting_at(prefix, 1)
    }

    /* Resume after ids already persisted */
    pub fn starting_at(prefix: &str, start: u64) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
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
    use hashbrown::HashSet;

    use super::*;

    #[test]
    fn test_sequential_ids_are_unique() {
        let ids = SequentialIds::new("sale");
        let generated: HashSet<String> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 1000);
        assert_eq!(SequentialIds::starting_at("div", 7).next_id(), "div-7");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let ids = UuidIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
