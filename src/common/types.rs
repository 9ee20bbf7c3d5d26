use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Schema identifier as reported by the catalog
pub type SchemaName = String;

/// Table identifier, treated as unique across the whole scope
pub type TableName = String;

/// Schema used when resolution yields nothing
pub const DEFAULT_SCHEMA: &str = "public";

/// Schemas that never appear in resolution results
pub const RESERVED_SCHEMAS: [&str; 3] = ["information_schema", "pg_catalog", "pg_toast"];

/// Row limit applied to DML generation when the caller gives none
pub const DEFAULT_ROW_LIMIT: u32 = 100;

/// Upper bound for a single catalog or data query
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool sizing used for every new connection
pub const POOL_MAX_CONNECTIONS: u32 = 10;
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(30);
pub const POOL_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

/// Prefixes of per-session temporary schemas
const TEMPORARY_SCHEMA_PREFIXES: [&str; 2] = ["pg_temp_", "pg_toast_temp_"];

/// Check whether a schema name belongs to the reserved set
pub fn is_reserved_schema(name: &str) -> bool {
    RESERVED_SCHEMAS.contains(&name)
        || TEMPORARY_SCHEMA_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Ordered, never-empty set of schema names that restricts catalog queries.
///
/// Cloning is cheap, so every operation takes its own snapshot and threads it
/// through all of its queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    schemas: Arc<[SchemaName]>,
}

impl Scope {
    /// Build a scope from resolved schema names, falling back to `public`
    pub fn new(schemas: Vec<SchemaName>) -> Self {
        if schemas.is_empty() {
            return Self::default();
        }
        Scope {
            schemas: schemas.into(),
        }
    }

    /// Schema names in resolution order
    pub fn schemas(&self) -> &[SchemaName] {
        &self.schemas
    }

    /// Owned copy, used as a query bind parameter
    pub fn to_vec(&self) -> Vec<SchemaName> {
        self.schemas.to_vec()
    }

    pub fn contains(&self, schema: &str) -> bool {
        self.schemas.iter().any(|s| s == schema)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope {
            schemas: Arc::from(vec![DEFAULT_SCHEMA.to_string()]),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.schemas.join(", "))
    }
}
