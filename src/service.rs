//! Service facade.
//!
//! `SchemaService` owns the session and exposes one method per transport
//! operation. Both the HTTP handlers and the shell drive it.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use serde::Serialize;

use crate::common::types::{DEFAULT_QUERY_TIMEOUT, DEFAULT_ROW_LIMIT};
use crate::common::{SchemaName, ScribeError, ScribeResult, TableName};
use crate::engine::source::{Connector, Credentials};
use crate::introspect::{
    collect_table_metadata, describe_columns, fetch_table_rows, list_tables, resolve_visible_schemas,
    ColumnSummary,
};
use crate::session::Session;
use crate::synth::{render_create_table, render_inserts, DdlOptions};

/// Runtime knobs for the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    pub query_timeout: Duration,
    /// Row limit applied when a DML request does not name one
    pub default_row_limit: u32,
    pub ddl: DdlOptions,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        ServiceOptions {
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            default_row_limit: DEFAULT_ROW_LIMIT,
            ddl: DdlOptions::default(),
        }
    }
}

/// Generated INSERT batch and the number of rows it covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DmlOutput {
    pub dml: String,
    #[serde(rename = "rowCount")]
    pub row_count: usize,
}

pub struct SchemaService {
    session: Session,
    connector: Arc<dyn Connector>,
    options: ServiceOptions,
}

impl SchemaService {
    pub fn new(connector: Arc<dyn Connector>, options: ServiceOptions) -> Self {
        SchemaService {
            session: Session::new(options.query_timeout),
            connector,
            options,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Open a new connection, replacing any existing one
    pub async fn connect(&self, credentials: &Credentials) -> ScribeResult<()> {
        if credentials.host.trim().is_empty() || credentials.database.trim().is_empty() {
            return Err(ScribeError::InvalidRequest(
                "host and database are required".to_string(),
            ));
        }
        self.session.connect(self.connector.as_ref(), credentials).await
    }

    pub async fn disconnect(&self) {
        self.session.disconnect().await;
    }

    /// Resolve the visible schemas and adopt them as the scope
    pub async fn resolve_schemas(&self) -> ScribeResult<Vec<SchemaName>> {
        let schemas = resolve_visible_schemas(&self.session).await?;
        info!("Schema scope resolved: {}", self.session.scope());
        Ok(schemas)
    }

    pub async fn list_tables(&self, search: Option<&str>) -> ScribeResult<Vec<TableName>> {
        let snapshot = self.session.snapshot()?;
        list_tables(&snapshot, search).await
    }

    pub async fn columns(&self, table: &str) -> ScribeResult<Vec<ColumnSummary>> {
        let snapshot = self.session.snapshot()?;
        let table = checked_table_name(table)?;
        let metadata = collect_table_metadata(&snapshot, table).await?;
        Ok(describe_columns(&metadata))
    }

    /// CREATE TABLE text for one table
    pub async fn ddl(&self, table: &str) -> ScribeResult<String> {
        let snapshot = self.session.snapshot()?;
        let table = checked_table_name(table)?;
        let metadata = collect_table_metadata(&snapshot, table).await?;
        Ok(render_create_table(&metadata, &self.options.ddl))
    }

    /// INSERT statements for up to `limit` rows (the configured default when `None`)
    pub async fn dml(&self, table: &str, limit: Option<u32>) -> ScribeResult<DmlOutput> {
        let snapshot = self.session.snapshot()?;
        let table = checked_table_name(table)?;
        let limit = limit.unwrap_or(self.options.default_row_limit);

        let fetched = fetch_table_rows(&snapshot, table, limit).await?;
        let dml = render_inserts(&fetched.table, &fetched.columns, &fetched.rows);
        debug!("Rendered {} INSERT statements for {}", fetched.rows.row_count(), table);

        Ok(DmlOutput {
            dml,
            row_count: fetched.rows.row_count(),
        })
    }
}

fn checked_table_name(table: &str) -> ScribeResult<&str> {
    let table = table.trim();
    if table.is_empty() {
        return Err(ScribeError::InvalidRequest("table name is required".to_string()));
    }
    Ok(table)
}
