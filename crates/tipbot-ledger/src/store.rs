//! File-backed ledger store.
//!
//! The whole document is read and rewritten on every mutating operation.
//! A store-level mutex serializes each read-modify-write cycle so two
//! concurrent commands cannot clobber each other's writes.

use crate::ledger::Ledger;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tipbot_common::Result;
use tokio::sync::Mutex;
use tracing::debug;

/// Serialized access to the ledger document on disk.
pub struct LedgerStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LedgerStore {
    /// Creates a store for the given ledger file path. The file does not
    /// need to exist yet; a missing file reads as the empty document.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the underlying ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads a snapshot of the document for a read-only query.
    pub async fn read(&self) -> Result<Ledger> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Runs one read-modify-write cycle under the store lock.
    ///
    /// The document is loaded, the closure applied, and the full document
    /// written back only if the closure succeeded. A failing closure
    /// leaves the file untouched.
    pub async fn update<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Ledger) -> Result<T>,
    {
        let _guard = self.lock.lock().await;
        let mut ledger = self.load().await?;
        let value = mutate(&mut ledger)?;
        self.save(&ledger).await?;
        Ok(value)
    }

    async fn load(&self) -> Result<Ledger> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "ledger file not found, starting empty");
                Ok(Ledger::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_vec_pretty(ledger)?;
        // Write-then-rename keeps a crash from leaving a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
