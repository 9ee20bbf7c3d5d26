use log::debug;

use crate::common::types::is_reserved_schema;
use crate::common::{SchemaName, ScribeResult};
use crate::session::Session;

/// Resolve the schemas visible to the session and make them the new scope.
///
/// Returns the schemas exactly as resolved (possibly empty); the stored scope
/// falls back to `public` when nothing is visible.
pub async fn resolve_visible_schemas(session: &Session) -> ScribeResult<Vec<SchemaName>> {
    let snapshot = session.snapshot()?;
    let mut schemas = snapshot.bounded(snapshot.source().schemas()).await?;
    schemas.retain(|s| !is_reserved_schema(s));

    let scope = session.update_scope(&snapshot, schemas.clone());
    debug!("Resolved {} schemas, scope is now {}", schemas.len(), scope);
    Ok(schemas)
}
