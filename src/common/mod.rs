// Common Definitions
//
// Shared identifiers, constants and the error taxonomy used across pgscribe.

pub mod error;
pub mod types;

pub use self::error::{ScribeError, ScribeResult};
pub use self::types::{Scope, SchemaName, TableName};
