pub mod state;
pub mod store;

pub use state::{ActiveFilter, FilterKey, FilterState, Period};
pub use store::{FilterStore, FilterUpdate};
