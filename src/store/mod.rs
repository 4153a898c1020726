pub mod ledger;
pub mod memory;

use crate::error::Result;

pub use ledger::FileLedger;
pub use memory::MemoryLedger;

/// Durable ledger of release ids already successfully notified.
///
/// Invariant: an id is present iff a notification for that release has
/// previously returned success. Ids are append-only; the program never
/// removes one. `mark_seen` must persist the full set before returning so
/// a crash cannot double-deliver without first having delivered.
pub trait SeenStore: Send {
    fn is_new(&self, id: &str) -> bool;
    fn mark_seen(&mut self, id: &str) -> Result<()>;
}
