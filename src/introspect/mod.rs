// Catalog Introspection
//
// Scoped catalog operations: schema resolution, table listing, per-table
// metadata collection and the bounded row fetch feeding DML synthesis.

pub mod metadata;
pub mod rows;
pub mod schemas;
pub mod tables;

pub use self::metadata::{collect_table_metadata, describe_columns, ColumnSummary};
pub use self::rows::{fetch_table_rows, TableRows};
pub use self::schemas::resolve_visible_schemas;
pub use self::tables::{list_tables, SearchPattern};
