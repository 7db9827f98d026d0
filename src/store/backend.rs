// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Persistence backend contract.
//!
//! The annotation store talks to its backing data store exclusively
//! through this trait, so the local-file and remote variants are
//! interchangeable. Implementations are called from short-lived
//! worker threads and must be `Send + Sync`.

use crate::models::annotation::{Annotation, AnnotationDraft, AnnotationPatch};
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to load annotations: {0}")]
    Fetch(String),

    #[error("Failed to write annotation: {0}")]
    Write(String),

    #[error("Invalid annotation: {0}")]
    Validation(String),

    #[error("Operation not supported by this backend")]
    Unsupported,
}

/// Read/write collaborator backing the annotation store.
pub trait PersistenceBackend: Send + Sync {
    /// Fetch all annotations, ordered ascending by time.
    fn select(&self) -> Result<Vec<Annotation>, StoreError>;

    /// Persist a draft; returns the created record(s) with identity
    /// and creation timestamp assigned.
    fn insert(&self, draft: &AnnotationDraft) -> Result<Vec<Annotation>, StoreError>;

    /// Delete the record with the given id.
    fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Patch the record with the given id.
    fn update(&self, id: Uuid, patch: &AnnotationPatch) -> Result<(), StoreError>;

    /// Replace the entire collection. Only snapshot-capable backends
    /// (the local file) support this; it backs marker import.
    fn replace_all(&self, annotations: &[Annotation]) -> Result<(), StoreError>;

    /// Whether `replace_all` and whole-collection export make sense here.
    fn supports_snapshot(&self) -> bool {
        false
    }
}
