//! Fleet Domain Concerns

pub mod buses;
pub mod tenants;
