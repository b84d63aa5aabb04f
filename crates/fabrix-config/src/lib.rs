//! Fabrix Config
//!
//! This crate contains the serializable endpoint registry for fabrix: the
//! addresses and credentials of every infrastructure endpoint to verify,
//! grouped by site label. The registry is loaded once at process start
//! and passed into probe construction as an explicit value; nothing in
//! the engine reads process-wide mutable state.

mod error;
mod registry;

pub use error::ConfigError;
pub use registry::{ApiKeyEndpoints, CredentialEndpoints, RegistryDef};
