// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory annotation collection and its backend synchronization.
//!
//! The store is the sole owner of the annotation list, kept sorted
//! ascending by time. Backend calls run on short-lived worker threads
//! and report back over an mpsc channel drained by [`AnnotationStore::poll`]
//! once per frame. Deletes and edits are optimistic: they apply
//! locally first, and a failed backend write triggers a full reload so
//! the remote store stays authoritative.

pub mod backend;
pub mod local;
pub mod remote;

use crate::models::annotation::{Annotation, AnnotationDraft, AnnotationPatch};
use backend::{PersistenceBackend, StoreError};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of a backend call, delivered from a worker thread.
enum StoreUpdate {
    Loaded(Result<Vec<Annotation>, StoreError>),
    Inserted(Result<Vec<Annotation>, StoreError>),
    DeleteFinished {
        id: Uuid,
        result: Result<(), StoreError>,
    },
    UpdateFinished {
        id: Uuid,
        result: Result<(), StoreError>,
    },
}

pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    backend: Arc<dyn PersistenceBackend>,
    tx: Sender<StoreUpdate>,
    rx: Receiver<StoreUpdate>,
    last_error: Option<String>,
    loading: bool,
}

impl AnnotationStore {
    pub fn new(backend: Arc<dyn PersistenceBackend>) -> Self {
        let (tx, rx) = channel();
        Self {
            annotations: Vec::new(),
            backend,
            tx,
            rx,
            last_error: None,
            loading: false,
        }
    }

    /// The current collection, ascending by time.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Most recent backend or validation failure, for the UI error line.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn supports_snapshot(&self) -> bool {
        self.backend.supports_snapshot()
    }

    /// Fetch the full collection in the background. On failure the
    /// previously held collection stays untouched.
    pub fn load(&mut self) {
        self.loading = true;
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(StoreUpdate::Loaded(backend.select()));
        });
    }

    /// Validate and persist a draft. Validation failures surface
    /// immediately; the record only enters the collection once the
    /// backend echoes it back (no optimistic insert).
    pub fn add(&mut self, draft: AnnotationDraft) -> Result<(), StoreError> {
        draft.validate().map_err(StoreError::Validation)?;
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(StoreUpdate::Inserted(backend.insert(&draft)));
        });
        Ok(())
    }

    /// Optimistically remove the record, then delete it remotely. If
    /// the remote delete fails, reconcile by reloading; the record is
    /// never re-inserted from the local copy.
    pub fn remove(&mut self, id: Uuid) {
        self.annotations.retain(|a| a.id != id);
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = backend.delete(id);
            let _ = tx.send(StoreUpdate::DeleteFinished { id, result });
        });
    }

    /// Apply a patch locally at once, then persist it. A failed
    /// backend update reconciles the same way as a failed delete.
    pub fn edit(&mut self, id: Uuid, patch: AnnotationPatch) {
        if let Some(record) = self.annotations.iter_mut().find(|a| a.id == id) {
            record.apply(&patch);
        }
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = backend.update(id, &patch);
            let _ = tx.send(StoreUpdate::UpdateFinished { id, result });
        });
    }

    /// Replace the whole collection (marker import). All-or-nothing:
    /// the in-memory collection only changes if the backend accepted
    /// the snapshot.
    pub fn replace_all(&mut self, mut annotations: Vec<Annotation>) -> Result<(), StoreError> {
        annotations.sort_by(|a, b| a.time_seconds.total_cmp(&b.time_seconds));
        self.backend.replace_all(&annotations)?;
        self.annotations = annotations;
        Ok(())
    }

    /// Drain finished backend calls. Call once per frame.
    pub fn poll(&mut self) {
        while let Ok(update) = self.rx.try_recv() {
            self.apply(update);
        }
    }

    fn apply(&mut self, update: StoreUpdate) {
        match update {
            StoreUpdate::Loaded(Ok(mut annotations)) => {
                self.loading = false;
                annotations.sort_by(|a, b| a.time_seconds.total_cmp(&b.time_seconds));
                log::info!("Loaded {} annotations", annotations.len());
                self.annotations = annotations;
            }
            StoreUpdate::Loaded(Err(e)) => {
                self.loading = false;
                log::error!("Failed loading annotations: {}", e);
                self.last_error = Some(e.to_string());
            }
            StoreUpdate::Inserted(Ok(records)) => {
                for record in records {
                    self.insert_sorted(record);
                }
            }
            StoreUpdate::Inserted(Err(e)) => {
                log::error!("Failed saving annotation: {}", e);
                self.last_error = Some(e.to_string());
            }
            StoreUpdate::DeleteFinished { id, result: Err(e) } => {
                // The optimistic removal may have been wrong; the
                // remote store is the source of truth, so re-fetch it.
                log::error!("Failed deleting annotation {}: {}", id, e);
                self.last_error = Some(e.to_string());
                self.load();
            }
            StoreUpdate::UpdateFinished { id, result: Err(e) } => {
                log::error!("Failed updating annotation {}: {}", id, e);
                self.last_error = Some(e.to_string());
                self.load();
            }
            StoreUpdate::DeleteFinished { result: Ok(()), .. }
            | StoreUpdate::UpdateFinished { result: Ok(()), .. } => {}
        }
    }

    /// Insert a record at its time-ascending position. Insertion by
    /// value keeps overlapping add responses commutative, so arrival
    /// order does not matter.
    fn insert_sorted(&mut self, record: Annotation) {
        let idx = self
            .annotations
            .partition_point(|a| a.time_seconds <= record.time_seconds);
        self.annotations.insert(idx, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::Category;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn record(time: f64, event_type: &str) -> Annotation {
        Annotation {
            id: Uuid::new_v4(),
            category: Category::Event,
            time_seconds: time,
            player_name: None,
            action: None,
            event_type: Some(event_type.to_string()),
            note: None,
            created_at: Utc::now(),
        }
    }

    /// In-process backend with injectable failures.
    struct MockBackend {
        annotations: Mutex<Vec<Annotation>>,
        fail_select: AtomicBool,
        fail_insert: AtomicBool,
        fail_delete: AtomicBool,
    }

    impl MockBackend {
        fn new(seed: Vec<Annotation>) -> Self {
            Self {
                annotations: Mutex::new(seed),
                fail_select: AtomicBool::new(false),
                fail_insert: AtomicBool::new(false),
                fail_delete: AtomicBool::new(false),
            }
        }
    }

    impl PersistenceBackend for MockBackend {
        fn select(&self) -> Result<Vec<Annotation>, StoreError> {
            if self.fail_select.load(Ordering::SeqCst) {
                return Err(StoreError::Fetch("select down".to_string()));
            }
            let mut list = self.annotations.lock().unwrap().clone();
            list.sort_by(|a, b| a.time_seconds.total_cmp(&b.time_seconds));
            Ok(list)
        }

        fn insert(&self, draft: &AnnotationDraft) -> Result<Vec<Annotation>, StoreError> {
            if self.fail_insert.load(Ordering::SeqCst) {
                return Err(StoreError::Write("insert down".to_string()));
            }
            let record = Annotation {
                id: Uuid::new_v4(),
                category: draft.category,
                time_seconds: draft.time_seconds,
                player_name: draft.player_name.clone(),
                action: draft.action.clone(),
                event_type: draft.event_type.clone(),
                note: draft.note.clone(),
                created_at: Utc::now(),
            };
            self.annotations.lock().unwrap().push(record.clone());
            Ok(vec![record])
        }

        fn delete(&self, id: Uuid) -> Result<(), StoreError> {
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(StoreError::Write("delete down".to_string()));
            }
            self.annotations.lock().unwrap().retain(|a| a.id != id);
            Ok(())
        }

        fn update(&self, id: Uuid, patch: &AnnotationPatch) -> Result<(), StoreError> {
            let mut list = self.annotations.lock().unwrap();
            match list.iter_mut().find(|a| a.id == id) {
                Some(record) => {
                    record.apply(patch);
                    Ok(())
                }
                None => Err(StoreError::Write("not found".to_string())),
            }
        }

        fn replace_all(&self, annotations: &[Annotation]) -> Result<(), StoreError> {
            *self.annotations.lock().unwrap() = annotations.to_vec();
            Ok(())
        }

        fn supports_snapshot(&self) -> bool {
            true
        }
    }

    fn wait_until(store: &mut AnnotationStore, pred: impl Fn(&AnnotationStore) -> bool) {
        for _ in 0..500 {
            store.poll();
            if pred(store) {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("store never reached expected state");
    }

    #[test]
    fn test_load_failure_keeps_previous_collection() {
        let backend = Arc::new(MockBackend::new(vec![record(5.0, "Foul")]));
        let mut store = AnnotationStore::new(backend.clone());
        store.load();
        wait_until(&mut store, |s| s.annotations().len() == 1);

        backend.fail_select.store(true, Ordering::SeqCst);
        store.load();
        wait_until(&mut store, |s| s.last_error().is_some());
        assert_eq!(store.annotations().len(), 1);
    }

    #[test]
    fn test_add_validation_fails_synchronously() {
        let backend = Arc::new(MockBackend::new(Vec::new()));
        let mut store = AnnotationStore::new(backend);
        let mut draft = AnnotationDraft::event(2.0, "Foul");
        draft.note = Some("stray".to_string());
        assert!(matches!(store.add(draft), Err(StoreError::Validation(_))));
        assert!(store.annotations().is_empty());
    }

    #[test]
    fn test_add_inserts_backend_record() {
        let backend = Arc::new(MockBackend::new(Vec::new()));
        let mut store = AnnotationStore::new(backend);
        store.add(AnnotationDraft::event(20.0, "Foul")).unwrap();
        wait_until(&mut store, |s| s.annotations().len() == 1);
        assert_eq!(store.annotations()[0].event_type.as_deref(), Some("Foul"));
    }

    #[test]
    fn test_add_failure_leaves_collection_unchanged() {
        let backend = Arc::new(MockBackend::new(Vec::new()));
        backend.fail_insert.store(true, Ordering::SeqCst);
        let mut store = AnnotationStore::new(backend);
        store.add(AnnotationDraft::event(20.0, "Foul")).unwrap();
        wait_until(&mut store, |s| s.last_error().is_some());
        assert!(store.annotations().is_empty());
    }

    #[test]
    fn test_out_of_order_insert_responses_stay_time_sorted() {
        let backend = Arc::new(MockBackend::new(Vec::new()));
        let mut store = AnnotationStore::new(backend);
        // Responses for two overlapping adds, arriving late-first.
        store.apply(StoreUpdate::Inserted(Ok(vec![record(30.0, "Foul")])));
        store.apply(StoreUpdate::Inserted(Ok(vec![record(10.0, "Injury")])));
        let times: Vec<f64> = store.annotations().iter().map(|a| a.time_seconds).collect();
        assert_eq!(times, vec![10.0, 30.0]);
    }

    #[test]
    fn test_remove_is_optimistic() {
        let target = record(20.0, "Foul");
        let backend = Arc::new(MockBackend::new(vec![record(5.0, "Injury"), target.clone()]));
        let mut store = AnnotationStore::new(backend);
        store.load();
        wait_until(&mut store, |s| s.annotations().len() == 2);

        store.remove(target.id);
        // Gone locally before the backend has answered.
        assert!(store.annotations().iter().all(|a| a.id != target.id));
        wait_until(&mut store, |s| s.annotations().len() == 1);
    }

    #[test]
    fn test_failed_delete_reconciles_to_remote_truth() {
        let target = record(20.0, "Foul");
        let seed = vec![record(5.0, "Injury"), target.clone(), record(40.0, "Timeout")];
        let backend = Arc::new(MockBackend::new(seed));
        backend.fail_delete.store(true, Ordering::SeqCst);

        let mut store = AnnotationStore::new(backend.clone());
        store.load();
        wait_until(&mut store, |s| s.annotations().len() == 3);

        store.remove(target.id);
        assert_eq!(store.annotations().len(), 2);

        // The delete fails remotely; reconciliation reloads and the
        // "deleted" record comes back, because the remote still has it.
        wait_until(&mut store, |s| s.annotations().len() == 3);
        assert!(store.annotations().iter().any(|a| a.id == target.id));
    }

    #[test]
    fn test_edit_applies_locally_and_persists() {
        let target = record(20.0, "Foul");
        let backend = Arc::new(MockBackend::new(vec![target.clone()]));
        let mut store = AnnotationStore::new(backend.clone());
        store.load();
        wait_until(&mut store, |s| s.annotations().len() == 1);

        let patch = AnnotationPatch {
            event_type: Some("Timeout".to_string()),
            ..Default::default()
        };
        store.edit(target.id, patch);
        assert_eq!(store.annotations()[0].event_type.as_deref(), Some("Timeout"));
        wait_until(&mut store, |_| {
            backend.annotations.lock().unwrap()[0].event_type.as_deref() == Some("Timeout")
        });
    }

    #[test]
    fn test_replace_all_sorts_and_persists() {
        let backend = Arc::new(MockBackend::new(Vec::new()));
        let mut store = AnnotationStore::new(backend.clone());
        store
            .replace_all(vec![record(30.0, "Foul"), record(10.0, "Injury")])
            .unwrap();
        let times: Vec<f64> = store.annotations().iter().map(|a| a.time_seconds).collect();
        assert_eq!(times, vec![10.0, 30.0]);
        assert_eq!(backend.annotations.lock().unwrap().len(), 2);
    }
}
