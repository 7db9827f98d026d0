// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Marker collection export and import.
//!
//! This module serializes the full marker collection to YAML or JSON
//! files and reads it back. Import is all-or-nothing: anything that is
//! not a parseable top-level sequence of annotations is rejected and
//! the caller's collection stays untouched.

use crate::models::annotation::Annotation;
use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// Export markers to YAML format.
pub fn export_yaml(annotations: &[Annotation], path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(annotations)?;
    std::fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Export markers to JSON format.
pub fn export_json(annotations: &[Annotation], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(annotations)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Import markers from a YAML file.
pub fn import_yaml(path: &Path) -> Result<Vec<Annotation>> {
    let yaml = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let annotations = serde_yaml::from_str(&yaml)?;
    Ok(annotations)
}

/// Import markers from a JSON file. The top-level value must be a
/// sequence of annotation records.
pub fn import_json(path: &Path) -> Result<Vec<Annotation>> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    if !value.is_array() {
        return Err(anyhow!("expected a top-level array of annotations"));
    }
    let annotations = serde_json::from_value(value)?;
    Ok(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::{AnnotationDraft, Category};
    use chrono::Utc;
    use uuid::Uuid;

    fn persisted(draft: AnnotationDraft) -> Annotation {
        Annotation {
            id: Uuid::new_v4(),
            category: draft.category,
            time_seconds: draft.time_seconds,
            player_name: draft.player_name,
            action: draft.action,
            event_type: draft.event_type,
            note: draft.note,
            created_at: Utc::now(),
        }
    }

    fn temp_path(tag: &str, ext: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("courtside-io-{}-{}.{}", tag, Uuid::new_v4(), ext))
    }

    #[test]
    fn test_json_export_import_roundtrip() {
        let markers = vec![
            persisted(AnnotationDraft::player(5.0, "Nina", "Goal")),
            persisted(AnnotationDraft::event(20.0, "Foul")),
            persisted(AnnotationDraft::note(40.0, "tired legs")),
        ];
        let path = temp_path("roundtrip", "json");
        export_json(&markers, &path).unwrap();
        let restored = import_json(&path).unwrap();
        assert_eq!(restored, markers);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_yaml_export_import_roundtrip() {
        let markers = vec![persisted(AnnotationDraft::event(20.0, "Foul"))];
        let path = temp_path("yaml", "yaml");
        export_yaml(&markers, &path).unwrap();
        let restored = import_yaml(&path).unwrap();
        assert_eq!(restored, markers);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_import_rejects_non_sequence() {
        let path = temp_path("nonseq", "json");
        std::fs::write(&path, r#"{"category": "Note"}"#).unwrap();
        assert!(import_json(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        let path = temp_path("garbage", "json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(import_json(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_category_serializes_as_capitalized_label() {
        let json = serde_json::to_string(&Category::Player).unwrap();
        assert_eq!(json, r#""Player""#);
    }
}
