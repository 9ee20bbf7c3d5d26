// Catalog Row Conversion
//
// Merges the raw rows of the columns, primary key, unique and foreign key
// queries into one `TableMetadata`.

use linked_hash_map::LinkedHashMap;

use crate::catalog::column::{ColumnMetadata, TypeModifier};
use crate::catalog::constraint::{ConstraintGroup, ForeignKeyReference};
use crate::catalog::table::TableMetadata;
use crate::common::{Scope, SchemaName, ScribeError, ScribeResult};
use crate::engine::source::{ColumnRow, ForeignKeyRow, KeyColumnRow};

/// Raw result of the four per-table catalog queries
#[derive(Debug, Clone, Default)]
pub struct CatalogRows {
    pub columns: Vec<ColumnRow>,
    pub primary_key: Vec<KeyColumnRow>,
    pub unique: Vec<KeyColumnRow>,
    pub foreign_keys: Vec<ForeignKeyRow>,
}

/// Pick the schema that owns `table`: the first scope entry among the
/// schemas found to hold a base table of that name
pub fn owning_schema(scope: &Scope, holders: &[SchemaName]) -> Option<SchemaName> {
    scope
        .schemas()
        .iter()
        .find(|schema| holders.contains(schema))
        .cloned()
}

/// Build table metadata from raw rows that belong to `schema`.
///
/// Rows from other schemas are ignored, so a table name shadowed in a later
/// scope entry never leaks columns or keys into the result.
pub fn assemble(table: &str, schema: &str, rows: CatalogRows) -> ScribeResult<TableMetadata> {
    let columns = rows
        .columns
        .iter()
        .filter(|row| row.table_schema == schema)
        .map(convert_column)
        .collect::<ScribeResult<Vec<_>>>()?;

    let mut metadata = TableMetadata::new(table, schema, columns);

    let primary_key: Vec<&KeyColumnRow> = rows
        .primary_key
        .iter()
        .filter(|row| row.table_schema == schema)
        .collect();
    if let Some(first) = primary_key.first() {
        let pk_columns = primary_key.iter().map(|row| row.column_name.clone()).collect();
        metadata = metadata.with_primary_key(ConstraintGroup::primary_key(
            first.constraint_name.clone(),
            pk_columns,
        ));
    }

    // Grouped by constraint name, in the order names first appear
    let mut unique_groups: LinkedHashMap<String, Vec<String>> = LinkedHashMap::new();
    for row in rows.unique.iter().filter(|row| row.table_schema == schema) {
        unique_groups
            .entry(row.constraint_name.clone())
            .or_insert_with(Vec::new)
            .push(row.column_name.clone());
    }
    for (name, columns) in unique_groups {
        metadata = metadata.with_unique(ConstraintGroup::unique(name, columns));
    }

    for row in rows.foreign_keys.iter().filter(|row| row.table_schema == schema) {
        metadata = metadata.with_foreign_key(ForeignKeyReference::new(
            row.constraint_name.clone(),
            row.column_name.clone(),
            row.foreign_table_name.clone(),
            row.foreign_column_name.clone(),
        ));
    }

    Ok(metadata)
}

fn convert_column(row: &ColumnRow) -> ScribeResult<ColumnMetadata> {
    let nullable = match row.is_nullable.to_uppercase().as_str() {
        "YES" => true,
        "NO" => false,
        other => {
            return Err(ScribeError::MetadataQuery(format!(
                "unexpected is_nullable value '{}' for column {}",
                other, row.column_name
            )))
        }
    };

    let ordinal = to_unsigned(row.ordinal_position, "ordinal_position", &row.column_name)?;
    let mut column = ColumnMetadata::new(row.column_name.clone(), row.data_type.clone(), nullable, ordinal);

    if let Some(length) = row.character_maximum_length {
        let length = to_unsigned(length, "character_maximum_length", &row.column_name)?;
        column = column.with_modifier(TypeModifier::Length(length));
    } else if let Some(precision) = row.numeric_precision {
        let precision = to_unsigned(precision, "numeric_precision", &row.column_name)?;
        let scale = row
            .numeric_scale
            .map(|s| to_unsigned(s, "numeric_scale", &row.column_name))
            .transpose()?;
        column = column.with_modifier(TypeModifier::Precision { precision, scale });
    }

    if let Some(default) = row.column_default.as_deref().filter(|d| !d.is_empty()) {
        column = column.with_default(default);
    }
    if let Some(comment) = row.comment.as_deref().filter(|c| !c.is_empty()) {
        column = column.with_comment(comment);
    }

    Ok(column)
}

fn to_unsigned(value: i32, field: &str, column: &str) -> ScribeResult<u32> {
    u32::try_from(value).map_err(|_| {
        ScribeError::MetadataQuery(format!("negative {} ({}) for column {}", field, value, column))
    })
}
