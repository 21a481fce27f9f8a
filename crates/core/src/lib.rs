pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod derivation;
pub mod domain;
pub mod drilldown;
pub mod errors;
pub mod filters;
pub mod fixtures;
pub mod layout;
pub mod products;
pub mod selection;
pub mod table;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use dashboard::DashboardStore;
pub use dataset::Dataset;
pub use derivation::{derive, Derivation, GlobalMetrics, ResponseBreakdown};
pub use domain::client::{Client, ClientId, NpsCategory, ResponseType, StateCode};
pub use domain::product::{Product, ProductId, ProductMetrics, TierShare};
pub use domain::region::{ColorTier, MacroRegion, RegionalAggregate};
pub use drilldown::{DrillDownContext, DrillDownKind, DrillDownSlot};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use filters::{ActiveFilter, FilterKey, FilterState, FilterStore, FilterUpdate, Period};
pub use layout::{
    DragOutcome, InMemoryStore, JsonFileStore, KeyValueStore, SectionOrderStore, StoreError,
};
pub use selection::{BreadcrumbItem, DashboardState, SelectionIntent, SelectionState};
pub use table::{query_clients, ClientPage, ClientRow, SortDirection, SortField, TableQuery};
