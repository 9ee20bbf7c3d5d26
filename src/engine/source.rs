//! Catalog source traits.
//!
//! `Connector` opens a pooled handle, `CatalogSource` answers the scoped
//! catalog queries and the bounded row fetch. Row structs mirror the columns
//! the catalog queries select, one field per column.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::{Scope, SchemaName, ScribeResult, TableName};
use crate::engine::result::RowSet;
use crate::introspect::SearchPattern;

/// Connection parameters for one database
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// `user@host:port/database`, safe to log
    pub fn describe(&self) -> String {
        format!("{}@{}:{}/{}", self.username, self.host, self.port, self.database)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// One row of the columns query
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ColumnRow {
    pub table_schema: String,
    pub column_name: String,
    pub data_type: String,
    /// Underlying type name, used to decode fetched values
    pub udt_name: String,
    pub character_maximum_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    /// `YES` or `NO`
    pub is_nullable: String,
    pub column_default: Option<String>,
    pub comment: Option<String>,
    pub ordinal_position: i32,
}

/// One key column of a primary key or unique constraint
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct KeyColumnRow {
    pub table_schema: String,
    pub constraint_name: String,
    pub column_name: String,
}

/// One referencing column of a foreign key
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ForeignKeyRow {
    pub table_schema: String,
    pub constraint_name: String,
    pub column_name: String,
    pub foreign_table_name: String,
    pub foreign_column_name: String,
}

/// Which base tables a table listing returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableFilter {
    All,
    Matching(SearchPattern),
}

/// Column selected by a row fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchColumn {
    pub name: String,
    pub udt_name: String,
}

impl From<&ColumnRow> for FetchColumn {
    fn from(row: &ColumnRow) -> Self {
        FetchColumn {
            name: row.column_name.clone(),
            udt_name: row.udt_name.clone(),
        }
    }
}

/// Bounded row fetch from one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub schema: SchemaName,
    pub table: TableName,
    /// Columns in output order
    pub columns: Vec<FetchColumn>,
    /// Columns to sort by, ascending; empty leaves order to the engine
    pub order_by: Vec<String>,
    pub limit: u32,
}

/// A live handle able to answer catalog queries.
///
/// Every query method is scoped: it only sees objects in the given schemas.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All schema names except the reserved ones, in catalog order
    async fn schemas(&self) -> ScribeResult<Vec<SchemaName>>;

    /// Base tables in scope, sorted by name and deduplicated
    async fn tables(&self, scope: &Scope, filter: &TableFilter) -> ScribeResult<Vec<TableName>>;

    /// Scoped schemas holding a base table named `table`, whether or not it has columns
    async fn table_schemas(&self, scope: &Scope, table: &str) -> ScribeResult<Vec<SchemaName>>;

    /// Columns of a table, ordered by ordinal position
    async fn columns(&self, scope: &Scope, table: &str) -> ScribeResult<Vec<ColumnRow>>;

    /// Primary key columns in key order
    async fn primary_key(&self, scope: &Scope, table: &str) -> ScribeResult<Vec<KeyColumnRow>>;

    /// Unique constraint columns ordered by constraint name, then key order
    async fn unique_columns(&self, scope: &Scope, table: &str) -> ScribeResult<Vec<KeyColumnRow>>;

    /// Foreign key rows, one per referencing column
    async fn foreign_keys(&self, scope: &Scope, table: &str) -> ScribeResult<Vec<ForeignKeyRow>>;

    /// Fetch at most `request.limit` rows
    async fn fetch_rows(&self, request: &FetchRequest) -> ScribeResult<RowSet>;

    /// Release the handle; errors are swallowed by implementations
    async fn close(&self);
}

/// Opens catalog sources; `connect` must fail if the liveness check fails
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, credentials: &Credentials) -> ScribeResult<Arc<dyn CatalogSource>>;
}
