// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Remote REST persistence.
//!
//! Talks to a PostgREST-style data store holding an `annotations`
//! table. The base URL and API key are injected via configuration;
//! nothing is compiled in. All calls are blocking and run on the
//! store's worker threads.

use super::backend::{PersistenceBackend, StoreError};
use crate::models::annotation::{Annotation, AnnotationDraft, AnnotationPatch};
use reqwest::blocking::{Client, RequestBuilder};
use uuid::Uuid;

pub struct RemoteBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteBackend {
    /// `base_url` is the service root, e.g. `https://project.example.co`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/annotations", self.base_url)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, String> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().unwrap_or_default();
        Err(format!("HTTP {status}: {body}"))
    }
}

impl PersistenceBackend for RemoteBackend {
    fn select(&self) -> Result<Vec<Annotation>, StoreError> {
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*"), ("order", "time_seconds.asc")]);
        let response = self
            .authed(request)
            .send()
            .map_err(|e| StoreError::Fetch(e.to_string()))?;
        check_status(response)
            .map_err(StoreError::Fetch)?
            .json()
            .map_err(|e| StoreError::Fetch(e.to_string()))
    }

    fn insert(&self, draft: &AnnotationDraft) -> Result<Vec<Annotation>, StoreError> {
        let request = self
            .client
            .post(self.table_url())
            // Ask the store to echo the created row back, ids included.
            .header("Prefer", "return=representation")
            .json(draft);
        let response = self
            .authed(request)
            .send()
            .map_err(|e| StoreError::Write(e.to_string()))?;
        check_status(response)
            .map_err(StoreError::Write)?
            .json()
            .map_err(|e| StoreError::Write(e.to_string()))
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.table_url())
            .query(&[("id", format!("eq.{id}"))]);
        let response = self
            .authed(request)
            .send()
            .map_err(|e| StoreError::Write(e.to_string()))?;
        check_status(response).map_err(StoreError::Write)?;
        Ok(())
    }

    fn update(&self, id: Uuid, patch: &AnnotationPatch) -> Result<(), StoreError> {
        let request = self
            .client
            .patch(self.table_url())
            .query(&[("id", format!("eq.{id}"))])
            .json(patch);
        let response = self
            .authed(request)
            .send()
            .map_err(|e| StoreError::Write(e.to_string()))?;
        check_status(response).map_err(StoreError::Write)?;
        Ok(())
    }

    fn replace_all(&self, _annotations: &[Annotation]) -> Result<(), StoreError> {
        // Wholesale replacement of a shared remote table is not offered.
        Err(StoreError::Unsupported)
    }
}
