//! Table Metadata Module
//!
//! This module defines the normalized description of one table: its columns in
//! ordinal order plus primary key, unique and foreign key constraints.

use std::collections::HashMap;
use serde::Serialize;

use super::column::{ColumnMetadata, KeyClass};
use super::constraint::{ConstraintGroup, ForeignKeyReference};

/// Represents the structure of a table as reconstructed from the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableMetadata {
    /// Table name
    table_name: String,
    /// Schema the table was found in
    schema: String,
    /// Columns in ordinal order
    columns: Vec<ColumnMetadata>,
    /// Column name to index lookup
    #[serde(skip)]
    column_map: HashMap<String, usize>,
    primary_key: Option<ConstraintGroup>,
    /// Unique constraints in first-appearance order
    unique_constraints: Vec<ConstraintGroup>,
    /// Foreign key rows in catalog order, one per referencing column
    foreign_keys: Vec<ForeignKeyReference>,
}

impl TableMetadata {
    /// Create table metadata; columns are sorted by ordinal position
    pub fn new(
        table_name: impl Into<String>,
        schema: impl Into<String>,
        mut columns: Vec<ColumnMetadata>,
    ) -> Self {
        columns.sort_by_key(|c| c.ordinal_position());
        let column_map = columns
            .iter()
            .enumerate()
            .map(|(i, col)| (col.name().to_string(), i))
            .collect();

        TableMetadata {
            table_name: table_name.into(),
            schema: schema.into(),
            columns,
            column_map,
            primary_key: None,
            unique_constraints: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Attach the primary key and mark its columns `PRIMARY`
    pub fn with_primary_key(mut self, primary_key: ConstraintGroup) -> Self {
        self.primary_key = Some(primary_key);
        self.reclassify_keys();
        self
    }

    /// Append a unique constraint and mark its columns `UNIQUE` unless already primary
    pub fn with_unique(mut self, unique: ConstraintGroup) -> Self {
        self.unique_constraints.push(unique);
        self.reclassify_keys();
        self
    }

    pub fn with_foreign_key(mut self, reference: ForeignKeyReference) -> Self {
        self.foreign_keys.push(reference);
        self
    }

    /// Get the table name
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Get all columns in ordinal order
    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.column_map.get(name).map(|&idx| &self.columns[idx])
    }

    /// Column names in ordinal order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn primary_key(&self) -> Option<&ConstraintGroup> {
        self.primary_key.as_ref()
    }

    pub fn unique_constraints(&self) -> &[ConstraintGroup] {
        &self.unique_constraints
    }

    pub fn foreign_keys(&self) -> &[ForeignKeyReference] {
        &self.foreign_keys
    }

    /// Columns carrying a comment, in ordinal order
    pub fn commented_columns(&self) -> impl Iterator<Item = &ColumnMetadata> {
        self.columns.iter().filter(|c| c.comment().is_some())
    }

    fn reclassify_keys(&mut self) {
        for col in self.columns.iter_mut() {
            let key_class = self
                .primary_key
                .iter()
                .chain(self.unique_constraints.iter())
                .filter(|group| group.contains(col.name()))
                .map(|group| group.kind().key_class())
                .max()
                .unwrap_or(KeyClass::None);
            col.set_key_class(key_class);
        }
    }
}
