//! PostgreSQL catalog source built on a `sqlx` connection pool.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use log::debug;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow};
use sqlx::Row as _;

use crate::common::types::{POOL_ACQUIRE_TIMEOUT, POOL_IDLE_TIMEOUT, POOL_MAX_CONNECTIONS};
use crate::common::{Scope, SchemaName, ScribeError, ScribeResult, TableName};
use crate::engine::queries;
use crate::engine::result::{DataValue, Row, RowSet};
use crate::engine::source::{
    CatalogSource, ColumnRow, Connector, Credentials, FetchColumn, FetchRequest, ForeignKeyRow,
    KeyColumnRow, TableFilter,
};
use crate::synth::ident::{quote_ident, quote_qualified};

fn query_error(err: sqlx::Error) -> ScribeError {
    ScribeError::MetadataQuery(err.to_string())
}

/// How a fetched column is selected and decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Boolean,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    /// Selected as text, rendered unquoted
    Numeric,
    Text,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Json,
    Bytea,
    /// Anything else is selected as text and rendered quoted
    Other,
}

impl ValueKind {
    fn from_udt(udt_name: &str) -> Self {
        match udt_name {
            "bool" => ValueKind::Boolean,
            "int2" => ValueKind::Int2,
            "int4" => ValueKind::Int4,
            "int8" => ValueKind::Int8,
            "float4" => ValueKind::Float4,
            "float8" => ValueKind::Float8,
            "numeric" => ValueKind::Numeric,
            "text" | "varchar" | "bpchar" | "name" => ValueKind::Text,
            "date" => ValueKind::Date,
            "time" => ValueKind::Time,
            "timestamp" => ValueKind::Timestamp,
            "timestamptz" => ValueKind::TimestampTz,
            "json" | "jsonb" => ValueKind::Json,
            "bytea" => ValueKind::Bytea,
            _ => ValueKind::Other,
        }
    }

    fn selected_as_text(&self) -> bool {
        matches!(self, ValueKind::Numeric | ValueKind::Other)
    }
}

/// Build the row fetch statement; the limit is bound as `$1`
fn fetch_sql(request: &FetchRequest) -> String {
    let select_list = request
        .columns
        .iter()
        .map(|c| {
            let ident = quote_ident(&c.name);
            if ValueKind::from_udt(&c.udt_name).selected_as_text() {
                format!("{}::text AS {}", ident, ident)
            } else {
                ident.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    // An empty select list is valid and still yields one row per table row
    let mut sql = if select_list.is_empty() {
        format!("SELECT FROM {}", quote_qualified(&request.schema, &request.table))
    } else {
        format!(
            "SELECT {} FROM {}",
            select_list,
            quote_qualified(&request.schema, &request.table)
        )
    };
    if !request.order_by.is_empty() {
        let order = request
            .order_by
            .iter()
            .map(|c| quote_ident(c).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(" ORDER BY ");
        sql.push_str(&order);
    }
    sql.push_str(" LIMIT $1");
    sql
}

fn decode_value(row: &PgRow, idx: usize, kind: ValueKind) -> Result<DataValue, sqlx::Error> {
    let value: DataValue = match kind {
        ValueKind::Boolean => row.try_get::<Option<bool>, _>(idx)?.into(),
        ValueKind::Int2 => row.try_get::<Option<i16>, _>(idx)?.map(i64::from).into(),
        ValueKind::Int4 => row.try_get::<Option<i32>, _>(idx)?.map(i64::from).into(),
        ValueKind::Int8 => row.try_get::<Option<i64>, _>(idx)?.into(),
        ValueKind::Float4 => row.try_get::<Option<f32>, _>(idx)?.into(),
        ValueKind::Float8 => row.try_get::<Option<f64>, _>(idx)?.into(),
        ValueKind::Numeric => row
            .try_get::<Option<String>, _>(idx)?
            .map_or(DataValue::Null, DataValue::Numeric),
        ValueKind::Text | ValueKind::Other => row.try_get::<Option<String>, _>(idx)?.into(),
        ValueKind::Date => row
            .try_get::<Option<NaiveDate>, _>(idx)?
            .map_or(DataValue::Null, DataValue::Date),
        ValueKind::Time => row
            .try_get::<Option<NaiveTime>, _>(idx)?
            .map_or(DataValue::Null, DataValue::Time),
        ValueKind::Timestamp => row
            .try_get::<Option<NaiveDateTime>, _>(idx)?
            .map_or(DataValue::Null, DataValue::Timestamp),
        ValueKind::TimestampTz => row
            .try_get::<Option<DateTime<Utc>>, _>(idx)?
            .map_or(DataValue::Null, DataValue::TimestampTz),
        ValueKind::Json => row
            .try_get::<Option<serde_json::Value>, _>(idx)?
            .map_or(DataValue::Null, DataValue::Json),
        ValueKind::Bytea => row
            .try_get::<Option<Vec<u8>>, _>(idx)?
            .map_or(DataValue::Null, DataValue::Blob),
    };
    Ok(value)
}

fn decode_row(pg_row: &PgRow, columns: &[FetchColumn]) -> ScribeResult<Row> {
    let mut row = Row::new();
    for (idx, column) in columns.iter().enumerate() {
        let kind = ValueKind::from_udt(&column.udt_name);
        let value = decode_value(pg_row, idx, kind).map_err(|e| {
            ScribeError::MetadataQuery(format!("cannot decode column {}: {}", column.name, e))
        })?;
        row.set(column.name.clone(), value);
    }
    Ok(row)
}

/// Catalog source backed by a PostgreSQL pool
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        PgCatalog { pool }
    }
}

#[async_trait]
impl CatalogSource for PgCatalog {
    async fn schemas(&self) -> ScribeResult<Vec<SchemaName>> {
        sqlx::query_scalar::<_, String>(queries::SCHEMAS)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)
    }

    async fn tables(&self, scope: &Scope, filter: &TableFilter) -> ScribeResult<Vec<TableName>> {
        let query = match filter {
            TableFilter::All => sqlx::query_scalar::<_, String>(queries::TABLES).bind(scope.to_vec()),
            TableFilter::Matching(pattern) => sqlx::query_scalar::<_, String>(queries::TABLES_MATCHING)
                .bind(scope.to_vec())
                .bind(pattern.like_pattern()),
        };
        query.fetch_all(&self.pool).await.map_err(query_error)
    }

    async fn table_schemas(&self, scope: &Scope, table: &str) -> ScribeResult<Vec<SchemaName>> {
        sqlx::query_scalar::<_, String>(queries::TABLE_SCHEMAS)
            .bind(table)
            .bind(scope.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)
    }

    async fn columns(&self, scope: &Scope, table: &str) -> ScribeResult<Vec<ColumnRow>> {
        sqlx::query_as::<_, ColumnRow>(queries::COLUMNS)
            .bind(table)
            .bind(scope.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)
    }

    async fn primary_key(&self, scope: &Scope, table: &str) -> ScribeResult<Vec<KeyColumnRow>> {
        sqlx::query_as::<_, KeyColumnRow>(queries::PRIMARY_KEY)
            .bind(table)
            .bind(scope.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)
    }

    async fn unique_columns(&self, scope: &Scope, table: &str) -> ScribeResult<Vec<KeyColumnRow>> {
        sqlx::query_as::<_, KeyColumnRow>(queries::UNIQUE_COLUMNS)
            .bind(table)
            .bind(scope.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)
    }

    async fn foreign_keys(&self, scope: &Scope, table: &str) -> ScribeResult<Vec<ForeignKeyRow>> {
        sqlx::query_as::<_, ForeignKeyRow>(queries::FOREIGN_KEYS)
            .bind(table)
            .bind(scope.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)
    }

    async fn fetch_rows(&self, request: &FetchRequest) -> ScribeResult<RowSet> {
        let sql = fetch_sql(request);
        debug!("Row fetch: {}", sql);

        let pg_rows = sqlx::query(&sql)
            .bind(i64::from(request.limit))
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        let mut rows = RowSet::new(request.columns.iter().map(|c| c.name.clone()).collect());
        for pg_row in &pg_rows {
            rows.add_row(decode_row(pg_row, &request.columns)?);
        }
        Ok(rows)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Opens pooled PostgreSQL handles and checks them before handing them out
#[derive(Debug, Clone)]
pub struct PgConnector {
    pub max_connections: u32,
    pub idle_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl Default for PgConnector {
    fn default() -> Self {
        PgConnector {
            max_connections: POOL_MAX_CONNECTIONS,
            idle_timeout: POOL_IDLE_TIMEOUT,
            acquire_timeout: POOL_ACQUIRE_TIMEOUT,
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn connect(&self, credentials: &Credentials) -> ScribeResult<Arc<dyn CatalogSource>> {
        let options = PgConnectOptions::new()
            .host(&credentials.host)
            .port(credentials.port)
            .database(&credentials.database)
            .username(&credentials.username)
            .password(&credentials.password);

        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .idle_timeout(Some(self.idle_timeout))
            .acquire_timeout(self.acquire_timeout)
            .connect_lazy_with(options);

        // Liveness check: one connection acquired and released
        match pool.acquire().await {
            Ok(conn) => drop(conn),
            Err(err) => {
                pool.close().await;
                return Err(ScribeError::Connection(err.to_string()));
            }
        }

        Ok(Arc::new(PgCatalog::new(pool)))
    }
}
