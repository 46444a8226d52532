//! Универсальный контроллер списков с фильтрами, пагинацией и CRUD
//!
//! Every front-desk list page (reservations, deposits, cancellations,
//! check-ins, reports) binds to one [`ListController`] configured with a
//! [`ListConfig`]; the page itself only supplies the row type, filter layout
//! and columns.

pub mod config;
pub mod controller;
pub mod filter;
pub mod kpi;
pub mod page;
#[cfg(target_arch = "wasm32")]
pub mod reactive;
pub mod reconcile;
pub mod row;
pub mod search;
pub mod unwrap;

pub use config::ListConfig;
pub use controller::{FetchPhase, FetchTask, ListController, ListSnapshot};
pub use filter::{FilterRule, FilterSchema, FilterSet, FilterValue};
pub use kpi::{Kpi, KpiSpec};
pub use row::ListRow;
