use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::codec::{self, CodecError};
use super::data::{self, TodoItem, TodoList};
use crate::shared::storage::{KeyValueStorage, StorageError};

/// Storage slot holding the serialized todo list
pub const STORAGE_KEY: &str = "todos";

/// Which side of the persistence round-trip failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Load,
    Save,
}

/// Persistence failures surfaced to the user
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read saved todos")]
    Read(#[source] StorageError),

    #[error("saved todos are malformed")]
    Decode(#[source] CodecError),

    #[error("could not encode todos")]
    Encode(#[source] CodecError),

    #[error("could not write todos")]
    Write(#[source] StorageError),

    #[error("persistence worker has stopped")]
    WorkerStopped,
}

impl StoreError {
    pub fn kind(&self) -> FailureKind {
        match self {
            StoreError::Read(_) | StoreError::Decode(_) => FailureKind::Load,
            StoreError::Encode(_) | StoreError::Write(_) | StoreError::WorkerStopped => {
                FailureKind::Save
            }
        }
    }
}

/// Read the persisted snapshot, `None` when nothing was ever saved
pub async fn read_snapshot(storage: &dyn KeyValueStorage) -> Result<Option<TodoList>, StoreError> {
    let raw = storage.get(STORAGE_KEY).await.map_err(StoreError::Read)?;

    raw.map(|raw| codec::decode(&raw).map_err(StoreError::Decode))
        .transpose()
}

/// Overwrite the persisted snapshot with the full list
pub async fn write_snapshot(
    storage: &dyn KeyValueStorage,
    list: &TodoList,
) -> Result<(), StoreError> {
    let encoded = codec::encode(list).map_err(StoreError::Encode)?;
    storage
        .set(STORAGE_KEY, &encoded)
        .await
        .map_err(StoreError::Write)
}

struct Snapshot {
    revision: u64,
    list: TodoList,
}

struct PersistReport {
    revision: u64,
    result: Result<(), StoreError>,
}

/// In-memory todo list mirrored to a storage slot.
///
/// Mutations apply to memory immediately. Each one then enqueues a full
/// snapshot for a single background worker, which writes snapshots in the
/// order they were enqueued and reports every outcome back. A failed write
/// never rolls memory back.
pub struct TodoStore {
    list: TodoList,
    storage: Arc<dyn KeyValueStorage>,
    /// Bumped on every mutation and on a failed load
    revision: u64,
    /// Highest revision known to be on disk
    saved_revision: u64,
    /// `None` once shut down
    persist_tx: Option<mpsc::UnboundedSender<Snapshot>>,
    report_rx: mpsc::UnboundedReceiver<PersistReport>,
    worker: Option<JoinHandle<()>>,
    undelivered: Vec<StoreError>,
}

impl TodoStore {
    /// Create an empty store and start its persistence worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let (persist_tx, persist_rx) = mpsc::unbounded_channel::<Snapshot>();
        let (report_tx, report_rx) = mpsc::unbounded_channel::<PersistReport>();

        let worker = tokio::spawn(run_persist_worker(
            Arc::clone(&storage),
            persist_rx,
            report_tx,
        ));

        Self {
            list: TodoList::new(),
            storage,
            revision: 0,
            saved_revision: 0,
            persist_tx: Some(persist_tx),
            report_rx,
            worker: Some(worker),
            undelivered: Vec::new(),
        }
    }

    /// Replace the list with the persisted snapshot.
    ///
    /// On failure the list is left empty and the error is returned for
    /// reporting. The store then counts as unsynced, since the slot no longer
    /// matches memory, until the next successful write.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        match read_snapshot(self.storage.as_ref()).await {
            Ok(Some(list)) => {
                tracing::info!(count = list.len(), "loaded saved todos");
                self.list = list;
                Ok(())
            }
            Ok(None) => {
                tracing::info!("no saved todos, starting empty");
                self.list = TodoList::new();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = ?e, "failed to load saved todos");
                self.list = TodoList::new();
                self.revision = self.saved_revision + 1;
                Err(e)
            }
        }
    }

    /// Add an item from raw input text. Blank input is ignored.
    ///
    /// Returns whether the list changed.
    pub fn add(&mut self, raw_text: &str) -> bool {
        match data::add(&self.list, raw_text, Utc::now()) {
            Some(next) => {
                if let Some(item) = next.get(0) {
                    tracing::debug!(id = %item.id, "added todo");
                }
                self.list = next;
                self.save();
                true
            }
            None => false,
        }
    }

    /// Flip completion of the item with `id`. Unknown ids are ignored.
    ///
    /// Returns whether the list changed.
    pub fn toggle(&mut self, id: &str) -> bool {
        match data::toggle(&self.list, id) {
            Some(next) => {
                tracing::debug!(id, "toggled todo");
                self.list = next;
                self.save();
                true
            }
            None => {
                tracing::debug!(id, "toggle ignored, no such todo");
                false
            }
        }
    }

    /// Enqueue a full snapshot of the current list for writing
    pub fn save(&mut self) {
        self.revision += 1;
        let snapshot = Snapshot {
            revision: self.revision,
            list: self.list.clone(),
        };

        let sent = match &self.persist_tx {
            Some(tx) => tx.send(snapshot).is_ok(),
            None => false,
        };

        if !sent {
            tracing::error!("persistence worker is gone, snapshot dropped");
            self.undelivered.push(StoreError::WorkerStopped);
        }
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn items(&self) -> &[TodoItem] {
        self.list.items()
    }

    /// Whether the latest mutation is known to be on disk
    pub fn is_synced(&self) -> bool {
        self.saved_revision == self.revision
    }

    /// Drain finished writes without waiting, returning the failures
    pub fn poll_reports(&mut self) -> Vec<StoreError> {
        let mut failures = std::mem::take(&mut self.undelivered);

        while let Ok(report) = self.report_rx.try_recv() {
            if let Err(e) = self.apply_report(report) {
                failures.push(e);
            }
        }

        failures
    }

    /// Wait for the next finished write. Pends while nothing is queued.
    #[cfg(test)]
    pub async fn next_report(&mut self) -> Option<Result<(), StoreError>> {
        let report = self.report_rx.recv().await?;
        Some(self.apply_report(report))
    }

    fn apply_report(&mut self, report: PersistReport) -> Result<(), StoreError> {
        if report.result.is_ok() && report.revision > self.saved_revision {
            self.saved_revision = report.revision;
        }
        report.result
    }

    /// Let every queued snapshot reach storage, then stop the worker.
    ///
    /// Returns the failures reported while draining. Later saves are
    /// reported as [`StoreError::WorkerStopped`].
    pub async fn shutdown(&mut self) -> Vec<StoreError> {
        // Closing the queue lets the worker finish what is left, then exit
        self.persist_tx = None;

        let mut failures = std::mem::take(&mut self.undelivered);
        while let Some(report) = self.report_rx.recv().await {
            if let Err(e) = self.apply_report(report) {
                failures.push(e);
            }
        }

        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "persistence worker panicked");
            }
        }

        failures
    }
}

async fn run_persist_worker(
    storage: Arc<dyn KeyValueStorage>,
    mut persist_rx: mpsc::UnboundedReceiver<Snapshot>,
    report_tx: mpsc::UnboundedSender<PersistReport>,
) {
    while let Some(snapshot) = persist_rx.recv().await {
        let result = write_snapshot(storage.as_ref(), &snapshot.list).await;

        match &result {
            Ok(()) => tracing::debug!(
                revision = snapshot.revision,
                count = snapshot.list.len(),
                "saved todos"
            ),
            Err(e) => tracing::warn!(
                revision = snapshot.revision,
                error = ?e,
                "failed to save todos"
            ),
        }

        let report = PersistReport {
            revision: snapshot.revision,
            result,
        };
        if report_tx.send(report).is_err() {
            break;
        }
    }
}
