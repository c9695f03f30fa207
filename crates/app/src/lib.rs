//! Fleet registry core: depots (tenants), their buses, credentials and
//! bearer tokens, persisted in PostgreSQL with row-level tenant isolation.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod validation;

mod uuids;

#[cfg(test)]
mod test;
