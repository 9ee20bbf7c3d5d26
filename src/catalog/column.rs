// Column Metadata Module
//
// This module defines the column description assembled from catalog rows.

use serde::{Serialize, Deserialize};

/// Key participation of a column; primary key membership dominates unique
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyClass {
    None,
    Unique,
    Primary,
}

impl KeyClass {
    /// Short code used in column listings (`PRI`, `UNI` or empty)
    pub fn as_code(&self) -> &'static str {
        match self {
            KeyClass::None => "",
            KeyClass::Unique => "UNI",
            KeyClass::Primary => "PRI",
        }
    }
}

/// Length or numeric precision attached to a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeModifier {
    /// Character length, e.g. `varchar(255)`
    Length(u32),
    /// Numeric precision with optional scale, e.g. `numeric(10,2)`
    Precision { precision: u32, scale: Option<u32> },
}

/// Represents one column of a table as described by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name
    name: String,
    /// Declared type as reported by the catalog (lower case, e.g. `character varying`)
    declared_type: String,
    /// Length or precision, if the type carries one
    modifier: Option<TypeModifier>,
    /// Whether this column accepts NULL
    nullable: bool,
    /// Default expression, kept verbatim
    default_expression: Option<String>,
    /// Column comment from the catalog description
    comment: Option<String>,
    /// Key participation
    key_class: KeyClass,
    /// 1-based position within the table
    ordinal_position: u32,
}

impl ColumnMetadata {
    /// Create a column with no modifier, default, comment or key
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        nullable: bool,
        ordinal_position: u32,
    ) -> Self {
        ColumnMetadata {
            name: name.into(),
            declared_type: declared_type.into(),
            modifier: None,
            nullable,
            default_expression: None,
            comment: None,
            key_class: KeyClass::None,
            ordinal_position,
        }
    }

    pub fn with_modifier(mut self, modifier: TypeModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn with_default(mut self, expression: impl Into<String>) -> Self {
        self.default_expression = Some(expression.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared type
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    pub fn modifier(&self) -> Option<TypeModifier> {
        self.modifier
    }

    /// Check if the column can contain NULL values
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_expression(&self) -> Option<&str> {
        self.default_expression.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn key_class(&self) -> KeyClass {
        self.key_class
    }

    pub fn ordinal_position(&self) -> u32 {
        self.ordinal_position
    }

    /// Type as shown in column listings: the declared type plus its length, if any.
    /// Numeric precision is deliberately not shown here.
    pub fn display_type(&self) -> String {
        match self.modifier {
            Some(TypeModifier::Length(len)) => format!("{}({})", self.declared_type, len),
            _ => self.declared_type.clone(),
        }
    }

    pub(crate) fn set_key_class(&mut self, key_class: KeyClass) {
        self.key_class = key_class;
    }
}
