//! Depots (tenants) and the credentials they sign in with.

pub mod data;
pub mod errors;
pub mod records;
pub mod service;

mod repository;

pub use errors::TenantsServiceError;
pub use service::{MockTenantsService, PgTenantsService, TenantsService};
