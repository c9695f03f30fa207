//! Buses owned by a single depot.
//!
//! Every operation takes the owning [`TenantUuid`](crate::domain::tenants::records::TenantUuid)
//! first and runs in a transaction scoped to it.

pub mod data;
pub mod errors;
pub mod pagination;
pub mod records;
pub mod service;

mod repository;

pub use errors::BusesServiceError;
pub use service::{BusesService, MockBusesService, PgBusesService};
