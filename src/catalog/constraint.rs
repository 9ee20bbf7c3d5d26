// Constraint Metadata Module
//
// Primary key, unique and foreign key descriptions gathered for one table.

use serde::{Serialize, Deserialize};

use super::column::KeyClass;

/// Kind of a named key constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
}

impl ConstraintKind {
    /// Key classification contributed to each member column
    pub fn key_class(self) -> KeyClass {
        match self {
            ConstraintKind::PrimaryKey => KeyClass::Primary,
            ConstraintKind::Unique => KeyClass::Unique,
        }
    }
}

/// A named set of columns participating together in one key constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintGroup {
    name: String,
    kind: ConstraintKind,
    /// Columns in key order
    columns: Vec<String>,
}

impl ConstraintGroup {
    fn new(name: impl Into<String>, kind: ConstraintKind, columns: Vec<String>) -> Self {
        ConstraintGroup {
            name: name.into(),
            kind,
            columns,
        }
    }

    pub fn primary_key(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self::new(name, ConstraintKind::PrimaryKey, columns)
    }

    pub fn unique(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self::new(name, ConstraintKind::Unique, columns)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// One referencing column of a foreign key, as the catalog reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyReference {
    /// Name of the foreign key constraint
    pub constraint: String,
    /// Referencing column in this table
    pub column: String,
    /// Referenced table
    pub referenced_table: String,
    /// Referenced column
    pub referenced_column: String,
}

impl ForeignKeyReference {
    pub fn new(
        constraint: impl Into<String>,
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        ForeignKeyReference {
            constraint: constraint.into(),
            column: column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
        }
    }
}
