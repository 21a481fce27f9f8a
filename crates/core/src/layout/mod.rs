pub mod order;
pub mod store;

pub use order::{
    default_sections, is_permutation_of, move_item, DragOutcome, SectionOrderStore,
    DEFAULT_SECTIONS, SECTION_ORDER_KEY,
};
pub use store::{InMemoryStore, JsonFileStore, KeyValueStore, StoreError};
