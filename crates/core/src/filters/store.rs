use tracing::debug;

use crate::filters::state::FilterState;

/// Result of a full filter replacement, consumed by the selection reducer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterUpdate {
    pub previous: FilterState,
    pub changed: bool,
    pub state_changed: bool,
}

/// Single source of truth for the filter panel. The only writer is [`FilterStore::set`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterStore {
    current: FilterState,
}

impl FilterStore {
    pub fn new(initial: FilterState) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> &FilterState {
        &self.current
    }

    pub fn set(&mut self, next: FilterState) -> FilterUpdate {
        let previous = std::mem::replace(&mut self.current, next);
        let update = FilterUpdate {
            changed: previous != self.current,
            state_changed: previous.state != self.current.state,
            previous,
        };
        debug!(
            event_name = "filters.set",
            changed = update.changed,
            state_changed = update.state_changed,
            period = self.current.period.key(),
            state = self.current.state.as_ref().map(|state| state.as_str()).unwrap_or("-"),
            "filter state replaced"
        );
        update
    }
}
