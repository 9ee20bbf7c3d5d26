// Table Metadata Collection
//
// Runs the per-table catalog queries against one scope snapshot and merges
// them into `TableMetadata`. A table that exists without columns yields
// metadata with an empty column list.

use log::debug;
use serde::Serialize;

use crate::catalog::{assemble, owning_schema, CatalogRows, TableMetadata};
use crate::common::{ScribeError, ScribeResult};
use crate::session::SessionSnapshot;

/// Collect the full structural description of `table`.
///
/// Any failing query aborts the whole collection.
pub async fn collect_table_metadata(snapshot: &SessionSnapshot, table: &str) -> ScribeResult<TableMetadata> {
    let source = snapshot.source();
    let scope = snapshot.scope();

    let (holders, columns, primary_key, unique, foreign_keys) = tokio::try_join!(
        snapshot.bounded(source.table_schemas(scope, table)),
        snapshot.bounded(source.columns(scope, table)),
        snapshot.bounded(source.primary_key(scope, table)),
        snapshot.bounded(source.unique_columns(scope, table)),
        snapshot.bounded(source.foreign_keys(scope, table)),
    )?;

    let schema = owning_schema(scope, &holders).ok_or_else(|| ScribeError::TableNotFound {
        table: table.to_string(),
        scope: scope.to_string(),
    })?;

    let metadata = assemble(
        table,
        &schema,
        CatalogRows {
            columns,
            primary_key,
            unique,
            foreign_keys,
        },
    )?;

    debug!(
        "Collected metadata for {}.{}: {} columns, {} unique constraints, {} foreign key rows",
        schema,
        table,
        metadata.columns().len(),
        metadata.unique_constraints().len(),
        metadata.foreign_keys().len()
    );
    Ok(metadata)
}

/// Column listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    /// `PRI`, `UNI` or empty
    pub key: String,
    /// `YES` or `NO`
    pub null: String,
    pub default: Option<String>,
    pub comment: Option<String>,
    pub extra: String,
}

/// Summarise columns for listing, in ordinal order
pub fn describe_columns(metadata: &TableMetadata) -> Vec<ColumnSummary> {
    metadata
        .columns()
        .iter()
        .map(|col| ColumnSummary {
            name: col.name().to_string(),
            data_type: col.display_type(),
            key: col.key_class().as_code().to_string(),
            null: if col.is_nullable() { "YES" } else { "NO" }.to_string(),
            default: col.default_expression().map(str::to_string),
            comment: col.comment().map(str::to_string),
            extra: String::new(),
        })
        .collect()
}
