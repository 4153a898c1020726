use std::collections::HashSet;

use crate::error::Result;
use crate::store::SeenStore;

/// In-memory seen-release ledger. No I/O, immediate visibility; used in
/// tests and for runs that should not leave state behind.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    seen: HashSet<String>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeenStore for MemoryLedger {
    fn is_new(&self, id: &str) -> bool {
        !self.seen.contains(id)
    }

    fn mark_seen(&mut self, id: &str) -> Result<()> {
        self.seen.insert(id.to_string());
        Ok(())
    }
}
