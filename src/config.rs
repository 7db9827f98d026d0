// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Runtime configuration.
//!
//! Everything variable is injected from the environment: the
//! persistence backend choice (remote URL + API key, or a local
//! marker file), the clip duration for the playback clock, and the
//! tagging taxonomy. Credentials are never compiled in.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

const ENV_REMOTE_URL: &str = "COURTSIDE_REMOTE_URL";
const ENV_REMOTE_KEY: &str = "COURTSIDE_REMOTE_KEY";
const ENV_CACHE_PATH: &str = "COURTSIDE_CACHE";
const ENV_DURATION: &str = "COURTSIDE_DURATION";
const ENV_TAXONOMY: &str = "COURTSIDE_TAXONOMY";

/// Fixed local marker file used when no remote store is configured.
const DEFAULT_CACHE_FILE: &str = "markers.json";
/// Full match clock, in seconds, when none is configured.
const DEFAULT_DURATION_SECONDS: f64 = 3600.0;

/// Which persistence backend to run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Local { path: PathBuf },
    Remote { base_url: String, api_key: String },
}

/// The tag vocabulary offered by the annotation form. Injected rather
/// than hardcoded so the same app serves different squads and sports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Taxonomy {
    pub player_names: Vec<String>,
    pub player_actions: Vec<String>,
    pub event_types: Vec<String>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        Self {
            player_names: strings(&["Nina", "Olivia A.", "Ariane", "Olivia", "Amelle", "Pearl"]),
            player_actions: strings(&[
                "Bad Pass",
                "Contact",
                "Footwork",
                "Feed",
                "Goal",
                "Held Ball",
                "Intercept",
                "Miss",
                "Obstruction",
                "Pickup",
                "Lost Rebound",
                "Rebound",
                "Tip",
                "Opposition Error",
                "Handling Error",
                "General Error",
            ]),
            event_types: strings(&["Foul", "Injury", "Substitution", "Timeout"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub duration_seconds: f64,
    pub taxonomy: Taxonomy,
}

impl AppConfig {
    /// Assemble the configuration from the environment.
    ///
    /// The remote backend is selected only when both the URL and the
    /// API key are present; one without the other is a configuration
    /// error rather than a silent fallback to the local file.
    pub fn from_env() -> Result<Self> {
        let remote_url = std::env::var(ENV_REMOTE_URL).ok();
        let remote_key = std::env::var(ENV_REMOTE_KEY).ok();
        let backend = match (remote_url, remote_key) {
            (Some(base_url), Some(api_key)) => BackendConfig::Remote { base_url, api_key },
            (None, None) => BackendConfig::Local {
                path: std::env::var(ENV_CACHE_PATH)
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_FILE)),
            },
            _ => bail!("{ENV_REMOTE_URL} and {ENV_REMOTE_KEY} must be set together"),
        };

        let duration_seconds = match std::env::var(ENV_DURATION) {
            Ok(raw) => raw
                .parse::<f64>()
                .with_context(|| format!("{ENV_DURATION} must be a number of seconds, got {raw:?}"))?,
            Err(_) => DEFAULT_DURATION_SECONDS,
        };

        let taxonomy = match std::env::var(ENV_TAXONOMY) {
            Ok(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading taxonomy file {path}"))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("parsing taxonomy file {path}"))?
            }
            Err(_) => Taxonomy::default(),
        };

        Ok(Self {
            backend,
            duration_seconds,
            taxonomy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_is_populated() {
        let taxonomy = Taxonomy::default();
        assert!(!taxonomy.player_names.is_empty());
        assert!(!taxonomy.player_actions.is_empty());
        assert_eq!(taxonomy.event_types.len(), 4);
    }

    #[test]
    fn test_taxonomy_parses_from_json() {
        let json = r#"{
            "player_names": ["A"],
            "player_actions": ["Goal"],
            "event_types": ["Foul"]
        }"#;
        let taxonomy: Taxonomy = serde_json::from_str(json).unwrap();
        assert_eq!(taxonomy.player_names, vec!["A".to_string()]);
    }
}
