// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the annotation record persisted by the store,
//! the draft submitted on creation, and the patch applied by in-place
//! edits. Exactly one category-conditional field group is populated
//! per record; the write path enforces this.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a free-text note, in characters.
pub const NOTE_MAX_CHARS: usize = 255;

/// Top-level classification of an annotation.
///
/// The category determines which conditional fields are meaningful:
/// `Player` owns `player_name` + `action`, `Event` owns `event_type`,
/// `Note` owns `note`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Player,
    Event,
    Note,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 3] = [Category::Player, Category::Event, Category::Note];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Player => "Player",
            Category::Event => "Event",
            Category::Note => "Note",
        }
    }
}

/// A single timestamped tag attached to a point in the footage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: Uuid,
    pub category: Category,
    pub time_seconds: f64,
    pub player_name: Option<String>,
    pub action: Option<String>,
    pub event_type: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Annotation {
    /// One-line summary of the conditional payload, for lists and tooltips.
    pub fn summary(&self) -> String {
        match self.category {
            Category::Player => format!(
                "{} - {}",
                self.player_name.as_deref().unwrap_or(""),
                self.action.as_deref().unwrap_or("")
            ),
            Category::Event => format!("Type: {}", self.event_type.as_deref().unwrap_or("")),
            Category::Note => self.note.clone().unwrap_or_default(),
        }
    }

    /// Apply an edit patch in place. Only fields set in the patch change.
    pub fn apply(&mut self, patch: &AnnotationPatch) {
        if let Some(ref name) = patch.player_name {
            self.player_name = Some(name.clone());
        }
        if let Some(ref action) = patch.action {
            self.action = Some(action.clone());
        }
        if let Some(ref event_type) = patch.event_type {
            self.event_type = Some(event_type.clone());
        }
        if let Some(ref note) = patch.note {
            self.note = Some(truncate_note(note));
        }
    }
}

/// A not-yet-persisted annotation, submitted to the backend on add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDraft {
    pub category: Category,
    pub time_seconds: f64,
    pub player_name: Option<String>,
    pub action: Option<String>,
    pub event_type: Option<String>,
    pub note: Option<String>,
}

impl AnnotationDraft {
    /// Draft tagging a player action at the given time.
    pub fn player(time_seconds: f64, name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            category: Category::Player,
            time_seconds,
            player_name: Some(name.into()),
            action: Some(action.into()),
            event_type: None,
            note: None,
        }
    }

    /// Draft tagging a game event at the given time.
    pub fn event(time_seconds: f64, event_type: impl Into<String>) -> Self {
        Self {
            category: Category::Event,
            time_seconds,
            player_name: None,
            action: None,
            event_type: Some(event_type.into()),
            note: None,
        }
    }

    /// Draft attaching a free-text note, truncated to [`NOTE_MAX_CHARS`].
    pub fn note(time_seconds: f64, text: &str) -> Self {
        Self {
            category: Category::Note,
            time_seconds,
            player_name: None,
            action: None,
            event_type: None,
            note: Some(truncate_note(text)),
        }
    }

    /// Check the exactly-one-conditional-group invariant and the time range.
    ///
    /// Returns a human-readable description of the first violation.
    pub fn validate(&self) -> Result<(), String> {
        if !self.time_seconds.is_finite() || self.time_seconds < 0.0 {
            return Err(format!("invalid annotation time {}", self.time_seconds));
        }
        let player_group = self.player_name.is_some() && self.action.is_some();
        let partial_player = (self.player_name.is_some() || self.action.is_some()) && !player_group;
        if partial_player {
            return Err("player annotations need both a name and an action".to_string());
        }
        let groups = [player_group, self.event_type.is_some(), self.note.is_some()];
        if groups.iter().filter(|g| **g).count() != 1 {
            return Err("exactly one of player/event/note payloads must be set".to_string());
        }
        let expected = match self.category {
            Category::Player => player_group,
            Category::Event => self.event_type.is_some(),
            Category::Note => self.note.is_some(),
        };
        if !expected {
            return Err(format!(
                "payload does not match category {}",
                self.category.label()
            ));
        }
        Ok(())
    }
}

/// Fields editable on a persisted annotation. Unset fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn truncate_note(text: &str) -> String {
    text.chars().take(NOTE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_draft_truncates_to_255_chars() {
        let long = "x".repeat(400);
        let draft = AnnotationDraft::note(3.0, &long);
        assert_eq!(draft.note.as_ref().unwrap().chars().count(), NOTE_MAX_CHARS);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_each_category() {
        assert!(AnnotationDraft::player(1.0, "Nina", "Goal").validate().is_ok());
        assert!(AnnotationDraft::event(2.0, "Foul").validate().is_ok());
        assert!(AnnotationDraft::note(3.0, "great intercept").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_mixed_payload() {
        let mut draft = AnnotationDraft::event(2.0, "Foul");
        draft.note = Some("stray".to_string());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_partial_player_group() {
        let mut draft = AnnotationDraft::player(2.0, "Nina", "Goal");
        draft.action = None;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_mismatched_category() {
        let mut draft = AnnotationDraft::event(2.0, "Foul");
        draft.category = Category::Note;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_time() {
        assert!(AnnotationDraft::event(-1.0, "Foul").validate().is_err());
        assert!(AnnotationDraft::event(f64::NAN, "Foul").validate().is_err());
    }

    #[test]
    fn test_patch_leaves_unset_fields() {
        let mut ann = Annotation {
            id: Uuid::new_v4(),
            category: Category::Player,
            time_seconds: 5.0,
            player_name: Some("Nina".to_string()),
            action: Some("Goal".to_string()),
            event_type: None,
            note: None,
            created_at: Utc::now(),
        };
        let patch = AnnotationPatch {
            action: Some("Miss".to_string()),
            ..Default::default()
        };
        ann.apply(&patch);
        assert_eq!(ann.player_name.as_deref(), Some("Nina"));
        assert_eq!(ann.action.as_deref(), Some("Miss"));
    }
}
