use std::sync::Arc;

use shared::{
    domain::{EditableField, RecordDraft, RecordId},
    error::AddRecordError,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

mod loader;
pub mod store;

pub use loader::{HttpRecordSource, LoadError, RecordSource};
pub use store::{TableSnapshot, TableState};

/// Single owner of the table state. User events and the initial load
/// all funnel through here: each one computes a successor state under
/// the lock, swaps it in, and broadcasts the new snapshot so the
/// presentation layer can re-render. No await happens while the lock
/// is held, so every transition is atomic to observers.
pub struct RecordTableController {
    source: Arc<dyn RecordSource>,
    state: Mutex<TableState>,
    events: broadcast::Sender<TableSnapshot>,
}

impl RecordTableController {
    pub fn new(endpoint: impl Into<String>) -> Arc<Self> {
        Self::new_with_source(Arc::new(HttpRecordSource::new(endpoint)))
    }

    pub fn new_with_source(source: Arc<dyn RecordSource>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            source,
            state: Mutex::new(TableState::default()),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TableSnapshot> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> TableSnapshot {
        self.state.lock().await.snapshot()
    }

    /// One-shot initial fetch. On success the store's contents are
    /// replaced entirely; on failure the previous state is kept (the
    /// table stays in its loading phase) and the error is surfaced to
    /// the caller after being logged. No retry, no timeout beyond the
    /// HTTP client's defaults.
    pub async fn load(&self) -> Result<(), LoadError> {
        let records = match self.source.fetch_records().await {
            Ok(records) => records,
            Err(err) => {
                warn!("record load failed, table stays in loading phase: {err}");
                return Err(err);
            }
        };

        let mut guard = self.state.lock().await;
        *guard = guard.with_loaded(records);
        info!(record_count = guard.records.len(), "record table loaded");
        let _ = self.events.send(guard.snapshot());
        Ok(())
    }

    pub async fn add_record(&self, draft: &RecordDraft) -> Result<RecordId, AddRecordError> {
        let mut guard = self.state.lock().await;
        let (next, id) = guard.with_record_added(draft)?;
        *guard = next;
        let _ = self.events.send(guard.snapshot());
        Ok(id)
    }

    pub async fn remove_record(&self, id: RecordId) -> TableSnapshot {
        self.apply(|state| state.with_record_removed(id)).await
    }

    pub async fn update_field(
        &self,
        id: RecordId,
        field: EditableField,
        raw_value: Option<&str>,
    ) -> TableSnapshot {
        self.apply(|state| state.with_field_updated(id, field, raw_value))
            .await
    }

    pub async fn toggle_select(&self, id: RecordId) -> TableSnapshot {
        self.apply(|state| state.with_selection_toggled(id)).await
    }

    pub async fn toggle_select_all(&self) -> TableSnapshot {
        self.apply(TableState::with_select_all_toggled).await
    }

    pub async fn remove_selected(&self) -> TableSnapshot {
        self.apply(TableState::with_selected_removed).await
    }

    pub async fn sort_by_age(&self) -> TableSnapshot {
        self.apply(TableState::with_sorted_by_age).await
    }

    async fn apply(&self, transition: impl FnOnce(&TableState) -> TableState) -> TableSnapshot {
        let mut guard = self.state.lock().await;
        *guard = transition(&*guard);
        let snapshot = guard.snapshot();
        let _ = self.events.send(snapshot.clone());
        snapshot
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
