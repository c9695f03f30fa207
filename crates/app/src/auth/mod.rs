//! Authentication

mod errors;
pub mod passwords;
mod service;
pub mod token;

pub use errors::*;
pub use service::*;
