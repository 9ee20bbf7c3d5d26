// pgscribe
//
// PostgreSQL schema introspection with CREATE TABLE and INSERT synthesis.

pub mod api;
pub mod catalog;
pub mod common;
pub mod config;
pub mod engine;
pub mod introspect;
pub mod logging;
pub mod service;
pub mod session;
pub mod synth;

// Re-export key items for convenient access
pub use catalog::TableMetadata;
pub use common::{Scope, ScribeError, ScribeResult};
pub use engine::{CatalogSource, Connector, Credentials, PgConnector};
pub use service::{DmlOutput, SchemaService, ServiceOptions};
pub use session::Session;
