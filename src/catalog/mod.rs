//! Catalog Metadata Module
//!
//! The normalized description of a table (columns, keys, comments) and the
//! conversion from raw catalog rows into it.

pub mod column;
pub mod constraint;
pub mod convert;
pub mod table;

// Re-export key types
pub use self::column::{ColumnMetadata, KeyClass, TypeModifier};
pub use self::constraint::{ConstraintGroup, ConstraintKind, ForeignKeyReference};
pub use self::convert::{assemble, owning_schema, CatalogRows};
pub use self::table::TableMetadata;
