//! Durable seen-release ledger backed by a JSON file.
//!
//! The file is written atomically (write to `<path>.tmp`, fsync, rename
//! into place, fsync the directory) so a crash mid-write can never leave a
//! truncated ledger. A ledger that fails to load is treated as empty: the
//! worst case is a redundant re-notification, never a lost delivery.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::SeenStore;

/// On-disk shape. Kept human-inspectable so an operator can force a
/// re-notification by deleting an id from the `releases` array.
#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    releases: Vec<String>,
    last_updated: DateTime<Utc>,
}

pub struct FileLedger {
    path: PathBuf,
    releases: HashSet<String>,
}

impl FileLedger {
    /// Loads the ledger, or starts empty if the file is missing or
    /// unreadable. Corruption is a warning, not a fatal error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let releases = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<LedgerFile>(&bytes) {
                Ok(ledger) => ledger.releases.into_iter().collect(),
                Err(e) => {
                    tracing::warn!(
                        "Ledger at {} is unreadable, starting empty: {}",
                        path.display(),
                        e
                    );
                    HashSet::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                tracing::warn!(
                    "Could not read ledger at {}, starting empty: {}",
                    path.display(),
                    e
                );
                HashSet::new()
            }
        };

        Self { path, releases }
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let mut releases: Vec<String> = self.releases.iter().cloned().collect();
        releases.sort();

        let ledger = LedgerFile {
            releases,
            last_updated: Utc::now(),
        };
        let bytes = serde_json::to_vec_pretty(&ledger)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }

        std::fs::rename(&tmp_path, &self.path)?;
        fsync_parent_dir(&self.path)?;

        Ok(())
    }
}

impl SeenStore for FileLedger {
    fn is_new(&self, id: &str) -> bool {
        !self.releases.contains(id)
    }

    fn mark_seen(&mut self, id: &str) -> Result<()> {
        self.releases.insert(id.to_string());
        self.persist()
    }
}

/// Makes the rename durable. Directory fsync is a no-op on platforms
/// where directories cannot be opened for sync.
fn fsync_parent_dir(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    if let Some(parent) = path.parent() {
        let dir = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        File::open(dir)?.sync_all()?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
