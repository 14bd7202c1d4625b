//! Managed-backend boundary: record types, service traits, and the
//! in-process implementation.

mod error;
mod memory;
mod models;
mod service;

pub use error::*;
pub use memory::*;
pub use models::*;
pub use service::*;
