//! Server configuration.
//!
//! Every option is a command line flag with an environment fallback, so the
//! server can be configured either way in containers.

use std::time::Duration;

use clap::Parser;

use crate::service::ServiceOptions;
use crate::synth::{DdlOptions, ForeignKeyStyle};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "pgscribe - PostgreSQL schema introspection and DDL/DML synthesis over HTTP")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "SCRIBE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "SCRIBE_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Worker threads (0 = one per core)
    #[arg(long, env = "SCRIBE_WORKERS", default_value_t = 0)]
    pub workers: usize,

    /// Per-query timeout in seconds
    #[arg(long, env = "SCRIBE_QUERY_TIMEOUT_SECS", default_value_t = 30,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub query_timeout_secs: u64,

    /// Rows fetched for DML when the request names no limit
    #[arg(long, env = "SCRIBE_DEFAULT_ROW_LIMIT", default_value_t = 100)]
    pub default_row_limit: u32,

    /// Fold multi-column foreign keys into one clause
    #[arg(long, env = "SCRIBE_COMPOSITE_FOREIGN_KEYS")]
    pub composite_foreign_keys: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "SCRIBE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn service_options(&self) -> ServiceOptions {
        let foreign_keys = if self.composite_foreign_keys {
            ForeignKeyStyle::Composite
        } else {
            ForeignKeyStyle::PerColumn
        };
        ServiceOptions {
            query_timeout: Duration::from_secs(self.query_timeout_secs),
            default_row_limit: self.default_row_limit,
            ddl: DdlOptions { foreign_keys },
        }
    }
}
