use log::debug;

use crate::catalog::owning_schema;
use crate::common::{ScribeError, ScribeResult, TableName};
use crate::engine::result::RowSet;
use crate::engine::source::{FetchColumn, FetchRequest};
use crate::session::SessionSnapshot;

/// Rows fetched for DML synthesis, with the column order to render them in
#[derive(Debug, Clone)]
pub struct TableRows {
    pub table: TableName,
    pub columns: Vec<String>,
    pub rows: RowSet,
}

/// Fetch at most `limit` rows of `table`.
///
/// Columns come back in ordinal order. When the table has a primary key the
/// rows are ordered by it, so repeated calls return the same rows.
pub async fn fetch_table_rows(snapshot: &SessionSnapshot, table: &str, limit: u32) -> ScribeResult<TableRows> {
    let source = snapshot.source();
    let scope = snapshot.scope();

    let (holders, columns, primary_key) = tokio::try_join!(
        snapshot.bounded(source.table_schemas(scope, table)),
        snapshot.bounded(source.columns(scope, table)),
        snapshot.bounded(source.primary_key(scope, table)),
    )?;

    let schema = owning_schema(scope, &holders).ok_or_else(|| ScribeError::TableNotFound {
        table: table.to_string(),
        scope: scope.to_string(),
    })?;

    let mut fetch_columns: Vec<(i32, FetchColumn)> = columns
        .iter()
        .filter(|c| c.table_schema == schema)
        .map(|c| (c.ordinal_position, FetchColumn::from(c)))
        .collect();
    fetch_columns.sort_by_key(|(ordinal, _)| *ordinal);
    let fetch_columns: Vec<FetchColumn> = fetch_columns.into_iter().map(|(_, c)| c).collect();

    let order_by = primary_key
        .into_iter()
        .filter(|k| k.table_schema == schema)
        .map(|k| k.column_name)
        .collect();

    let request = FetchRequest {
        schema,
        table: table.to_string(),
        columns: fetch_columns,
        order_by,
        limit,
    };
    let mut rows = snapshot.bounded(source.fetch_rows(&request)).await?;
    rows.truncate(limit as usize);

    debug!("Fetched {} rows from {}.{}", rows.row_count(), request.schema, table);
    Ok(TableRows {
        table: table.to_string(),
        columns: request.columns.into_iter().map(|c| c.name).collect(),
        rows,
    })
}
