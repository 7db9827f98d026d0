// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Local file-backed persistence.
//!
//! Stores the whole marker collection as a JSON array in a single
//! file at a fixed configured path, read once at startup and rewritten
//! after every mutation. Identity and creation timestamps are assigned
//! here, since there is no server to do it.

use super::backend::{PersistenceBackend, StoreError};
use crate::models::annotation::{Annotation, AnnotationDraft, AnnotationPatch};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

pub struct LocalBackend {
    path: PathBuf,
    // Serializes read-modify-write cycles from concurrent worker threads.
    lock: Mutex<()>,
}

impl LocalBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read(&self) -> Result<Vec<Annotation>, StoreError> {
        read_collection(&self.path)
    }

    fn write(&self, annotations: &[Annotation]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(annotations)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::Write(e.to_string()))
    }
}

fn read_collection(path: &Path) -> Result<Vec<Annotation>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = std::fs::read_to_string(path).map_err(|e| StoreError::Fetch(e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| StoreError::Fetch(e.to_string()))
}

impl PersistenceBackend for LocalBackend {
    fn select(&self) -> Result<Vec<Annotation>, StoreError> {
        let _guard = self.lock.lock().unwrap();
        let mut annotations = self.read()?;
        annotations.sort_by(|a, b| a.time_seconds.total_cmp(&b.time_seconds));
        Ok(annotations)
    }

    fn insert(&self, draft: &AnnotationDraft) -> Result<Vec<Annotation>, StoreError> {
        let _guard = self.lock.lock().unwrap();
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
        let mut annotations = self.read()?;
        annotations.push(record.clone());
        self.write(&annotations)?;
        Ok(vec![record])
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap();
        let mut annotations = self.read()?;
        let before = annotations.len();
        annotations.retain(|a| a.id != id);
        if annotations.len() == before {
            return Err(StoreError::Write(format!("no annotation with id {id}")));
        }
        self.write(&annotations)
    }

    fn update(&self, id: Uuid, patch: &AnnotationPatch) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap();
        let mut annotations = self.read()?;
        let record = annotations
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::Write(format!("no annotation with id {id}")))?;
        record.apply(patch);
        self.write(&annotations)
    }

    fn replace_all(&self, annotations: &[Annotation]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap();
        self.write(annotations)
    }

    fn supports_snapshot(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_backend(tag: &str) -> LocalBackend {
        let path = std::env::temp_dir().join(format!("courtside-{}-{}.json", tag, Uuid::new_v4()));
        LocalBackend::new(path)
    }

    #[test]
    fn test_select_missing_file_is_empty() {
        let backend = temp_backend("missing");
        assert!(backend.select().unwrap().is_empty());
    }

    #[test]
    fn test_insert_assigns_identity_and_persists() {
        let backend = temp_backend("insert");
        let created = backend.insert(&AnnotationDraft::event(20.0, "Foul")).unwrap();
        assert_eq!(created.len(), 1);

        let stored = backend.select().unwrap();
        assert_eq!(stored, created);
        let _ = std::fs::remove_file(&backend.path);
    }

    #[test]
    fn test_select_sorts_by_time() {
        let backend = temp_backend("sort");
        backend.insert(&AnnotationDraft::event(30.0, "Foul")).unwrap();
        backend.insert(&AnnotationDraft::event(10.0, "Injury")).unwrap();
        let stored = backend.select().unwrap();
        assert_eq!(stored[0].time_seconds, 10.0);
        assert_eq!(stored[1].time_seconds, 30.0);
        let _ = std::fs::remove_file(&backend.path);
    }

    #[test]
    fn test_delete_and_update() {
        let backend = temp_backend("mutate");
        let foul = backend.insert(&AnnotationDraft::event(5.0, "Foul")).unwrap().remove(0);
        let injury = backend.insert(&AnnotationDraft::event(9.0, "Injury")).unwrap().remove(0);

        backend
            .update(
                foul.id,
                &AnnotationPatch {
                    event_type: Some("Timeout".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        backend.delete(injury.id).unwrap();

        let stored = backend.select().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].event_type.as_deref(), Some("Timeout"));

        assert!(backend.delete(injury.id).is_err());
        let _ = std::fs::remove_file(&backend.path);
    }
}
