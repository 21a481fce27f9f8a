use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::layout::store::{KeyValueStore, StoreError};

pub const SECTION_ORDER_KEY: &str = "dashboard-section-order";
pub const DEFAULT_SECTIONS: [&str; 4] = ["metrics", "map", "charts", "table"];

pub fn default_sections() -> Vec<String> {
    DEFAULT_SECTIONS.iter().map(|section| section.to_string()).collect()
}

/// Array-move: removes `from_id` and reinserts it at the index `to_id` held.
/// `None` when the ids are equal or either is absent.
pub fn move_item(list: &[String], from_id: &str, to_id: &str) -> Option<Vec<String>> {
    if from_id == to_id {
        return None;
    }
    let from = list.iter().position(|item| item == from_id)?;
    let to = list.iter().position(|item| item == to_id)?;

    let mut moved = list.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Some(moved)
}

/// Same length and same membership as `expected`.
pub fn is_permutation_of(candidate: &[String], expected: &[String]) -> bool {
    if candidate.len() != expected.len() {
        return false;
    }
    let candidate_set: BTreeSet<&str> = candidate.iter().map(String::as_str).collect();
    let expected_set: BTreeSet<&str> = expected.iter().map(String::as_str).collect();
    candidate_set.len() == candidate.len() && candidate_set == expected_set
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DragOutcome {
    Ignored,
    Reordered { persisted: bool },
}

/// Ordered dashboard sections, restored from and written back to a key-value store.
pub struct SectionOrderStore<S> {
    store: S,
    expected: Vec<String>,
    order: Vec<String>,
}

impl<S> SectionOrderStore<S>
where
    S: KeyValueStore,
{
    pub fn restore(store: S) -> Self {
        Self::restore_with(store, default_sections())
    }

    /// Any restore failure falls back to `expected` in its given order.
    pub fn restore_with(store: S, expected: Vec<String>) -> Self {
        let order = restore_order(&store, &expected).unwrap_or_else(|| expected.clone());
        Self { store, expected, order }
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn handle_drag_end(&mut self, active_id: &str, over_id: Option<&str>) -> DragOutcome {
        let Some(over_id) = over_id else {
            return DragOutcome::Ignored;
        };
        let Some(next) = move_item(&self.order, active_id, over_id) else {
            return DragOutcome::Ignored;
        };

        self.order = next;
        let persisted = match self.persist() {
            Ok(()) => true,
            Err(error) => {
                warn!(
                    event_name = "layout.persist.failed",
                    key = SECTION_ORDER_KEY,
                    error = %error,
                    "section order kept in memory only"
                );
                false
            }
        };
        debug!(
            event_name = "layout.reordered",
            active = active_id,
            over = over_id,
            persisted,
            "section order changed"
        );
        DragOutcome::Reordered { persisted }
    }

    /// Drops the persisted entry and returns to the expected order.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.order = self.expected.clone();
        self.store.remove(SECTION_ORDER_KEY)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.order)?;
        self.store.set(SECTION_ORDER_KEY, &raw)
    }
}

fn restore_order<S: KeyValueStore>(store: &S, expected: &[String]) -> Option<Vec<String>> {
    let raw = match store.get(SECTION_ORDER_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(event_name = "layout.restore.missing", "no persisted section order");
            return None;
        }
        Err(error) => {
            warn!(
                event_name = "layout.restore.store_failed",
                error = %error,
                "using default section order"
            );
            return None;
        }
    };

    let candidate: Vec<String> = match serde_json::from_str(&raw) {
        Ok(candidate) => candidate,
        Err(error) => {
            warn!(
                event_name = "layout.restore.corrupt",
                error = %error,
                "using default section order"
            );
            return None;
        }
    };

    if !is_permutation_of(&candidate, expected) {
        debug!(
            event_name = "layout.restore.mismatch",
            persisted = ?candidate,
            "persisted sections differ from the expected set"
        );
        return None;
    }
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::{
        default_sections, move_item, DragOutcome, SectionOrderStore, SECTION_ORDER_KEY,
    };
    use crate::layout::store::{InMemoryStore, KeyValueStore, StoreError};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io {
                path: "/unavailable".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
            self.get(key).map(|_| ())
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.get(key).map(|_| ())
        }
    }

    #[test]
    fn move_item_uses_array_move_semantics() {
        let list = default_sections();
        assert_eq!(
            move_item(&list, "metrics", "charts"),
            Some(ids(&["map", "charts", "metrics", "table"]))
        );
        assert_eq!(
            move_item(&list, "table", "map"),
            Some(ids(&["metrics", "table", "map", "charts"]))
        );
        assert_eq!(move_item(&list, "map", "map"), None);
        assert_eq!(move_item(&list, "map", "footer"), None);
    }

    #[test]
    fn drag_end_without_target_or_onto_itself_changes_nothing() -> Result<(), StoreError> {
        let mut sections = SectionOrderStore::restore(InMemoryStore::default());

        assert_eq!(sections.handle_drag_end("map", None), DragOutcome::Ignored);
        assert_eq!(sections.handle_drag_end("map", Some("map")), DragOutcome::Ignored);
        assert_eq!(sections.handle_drag_end("ghost", Some("map")), DragOutcome::Ignored);
        assert_eq!(sections.order(), default_sections().as_slice());
        assert_eq!(sections.store().get(SECTION_ORDER_KEY)?, None);
        Ok(())
    }

    #[test]
    fn reorder_is_persisted_and_restored() -> Result<(), StoreError> {
        let store = InMemoryStore::default();
        let mut sections = SectionOrderStore::restore(store.clone());

        let outcome = sections.handle_drag_end("table", Some("metrics"));
        assert_eq!(outcome, DragOutcome::Reordered { persisted: true });
        assert_eq!(
            store.get(SECTION_ORDER_KEY)?.as_deref(),
            Some(r#"["table","metrics","map","charts"]"#)
        );

        let restored = SectionOrderStore::restore(store);
        assert_eq!(restored.order(), ids(&["table", "metrics", "map", "charts"]).as_slice());
        Ok(())
    }

    #[test]
    fn restore_falls_back_on_missing_id_duplicates_or_corrupt_json() {
        for raw in [
            r#"["metrics","map","charts"]"#,
            r#"["metrics","map","charts","charts"]"#,
            r#"["metrics","map","charts","footer"]"#,
            r#"{"order":["metrics"]}"#,
            "not json",
        ] {
            let sections =
                SectionOrderStore::restore(InMemoryStore::with_entry(SECTION_ORDER_KEY, raw));
            assert_eq!(sections.order(), default_sections().as_slice(), "input {raw}");
        }
    }

    #[test]
    fn store_failures_fall_back_and_keep_memory_order() {
        let mut sections = SectionOrderStore::restore(FailingStore);
        assert_eq!(sections.order(), default_sections().as_slice());

        let outcome = sections.handle_drag_end("map", Some("metrics"));
        assert_eq!(outcome, DragOutcome::Reordered { persisted: false });
        assert_eq!(sections.order(), ids(&["map", "metrics", "charts", "table"]).as_slice());
        assert!(sections.reset().is_err());
    }

    #[test]
    fn reset_restores_defaults_and_clears_entry() -> Result<(), StoreError> {
        let store =
            InMemoryStore::with_entry(SECTION_ORDER_KEY, r#"["table","charts","map","metrics"]"#);
        let mut sections = SectionOrderStore::restore(store.clone());
        assert_eq!(sections.order()[0], "table");

        sections.reset()?;
        assert_eq!(sections.order(), default_sections().as_slice());
        assert_eq!(store.get(SECTION_ORDER_KEY)?, None);
        Ok(())
    }
}
