// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Marker visibility filtering.
//!
//! Derives the visible subset of the annotation collection from the
//! active category filters and the single-value event-type filter.

use super::annotation::{Annotation, Category};
use std::collections::BTreeSet;

/// Sentinel event-type filter value matching every event type.
pub const ALL_EVENT_TYPES: &str = "All";

/// Active filter selections. Ephemeral UI state, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Categories currently shown. An empty set hides everything,
    /// it does not mean "show all".
    pub category_filters: BTreeSet<Category>,
    /// Event-type filter; [`ALL_EVENT_TYPES`] or one concrete type.
    /// Only annotations in the Event category are affected by it.
    pub event_type_filter: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category_filters: Category::ALL.iter().copied().collect(),
            event_type_filter: ALL_EVENT_TYPES.to_string(),
        }
    }
}

impl FilterState {
    /// The visible subset of `annotations`, preserving input order.
    ///
    /// An annotation passes if its category is active and, when an
    /// event-type filter is set, it is either not an Event or its
    /// `event_type` matches. The predicates are independent.
    pub fn visible<'a>(&self, annotations: &'a [Annotation]) -> Vec<&'a Annotation> {
        annotations
            .iter()
            .filter(|ann| {
                if !self.category_filters.contains(&ann.category) {
                    return false;
                }
                if self.event_type_filter != ALL_EVENT_TYPES
                    && ann.category == Category::Event
                    && ann.event_type.as_deref() != Some(self.event_type_filter.as_str())
                {
                    return false;
                }
                true
            })
            .collect()
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.category_filters.remove(&category) {
            self.category_filters.insert(category);
        }
    }
}

/// Tally annotations per event type, for filter-selector labels.
///
/// Counts every annotation carrying the type, regardless of the
/// active filters.
pub fn count_by_event_type(annotations: &[Annotation], event_types: &[String]) -> Vec<(String, usize)> {
    event_types
        .iter()
        .map(|ty| {
            let count = annotations
                .iter()
                .filter(|a| a.event_type.as_deref() == Some(ty.as_str()))
                .count();
            (ty.clone(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::AnnotationDraft;
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

    fn sample() -> Vec<Annotation> {
        vec![
            persisted(AnnotationDraft::player(5.0, "Nina", "Goal")),
            persisted(AnnotationDraft::event(20.0, "Foul")),
            persisted(AnnotationDraft::event(25.0, "Injury")),
            persisted(AnnotationDraft::note(40.0, "pressure building")),
        ]
    }

    #[test]
    fn test_default_shows_everything_in_order() {
        let anns = sample();
        let visible = FilterState::default().visible(&anns);
        assert_eq!(visible.len(), anns.len());
        for (v, a) in visible.iter().zip(anns.iter()) {
            assert_eq!(v.id, a.id);
        }
    }

    #[test]
    fn test_empty_category_set_hides_all() {
        let anns = sample();
        let filter = FilterState {
            category_filters: BTreeSet::new(),
            ..Default::default()
        };
        assert!(filter.visible(&anns).is_empty());
    }

    #[test]
    fn test_category_filter_is_subsequence() {
        let anns = sample();
        let mut filter = FilterState::default();
        filter.toggle_category(Category::Player);
        let visible = filter.visible(&anns);
        assert!(visible.iter().all(|a| a.category != Category::Player));
        // Relative order preserved
        let times: Vec<f64> = visible.iter().map(|a| a.time_seconds).collect();
        assert_eq!(times, vec![20.0, 25.0, 40.0]);
    }

    #[test]
    fn test_event_type_filter_spares_other_categories() {
        let anns = sample();
        let filter = FilterState {
            event_type_filter: "Foul".to_string(),
            ..Default::default()
        };
        let visible = filter.visible(&anns);
        // Player and Note pass untouched, only the Injury event drops.
        assert_eq!(visible.len(), 3);
        assert!(visible
            .iter()
            .all(|a| a.category != Category::Event || a.event_type.as_deref() == Some("Foul")));
    }

    #[test]
    fn test_count_by_event_type() {
        let anns = sample();
        let types = vec!["Foul".to_string(), "Injury".to_string(), "Timeout".to_string()];
        let counts = count_by_event_type(&anns, &types);
        assert_eq!(counts[0], ("Foul".to_string(), 1));
        assert_eq!(counts[1], ("Injury".to_string(), 1));
        assert_eq!(counts[2], ("Timeout".to_string(), 0));
    }
}
