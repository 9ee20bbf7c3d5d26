// Table Listing
//
// Base tables within the scope, optionally narrowed by a search term matched
// against table names, column names and column comments.

use log::debug;

use crate::common::{ScribeResult, TableName};
use crate::engine::source::TableFilter;
use crate::session::SessionSnapshot;

/// Case-insensitive substring search term; never blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    term: String,
}

impl SearchPattern {
    /// `None` for a missing, empty or whitespace-only term
    pub fn parse(term: Option<&str>) -> Option<SearchPattern> {
        term.filter(|t| !t.trim().is_empty())
            .map(|t| SearchPattern { term: t.to_string() })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// `ILIKE` pattern matching the term anywhere; LIKE metacharacters in the
    /// term match themselves
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.term.len() + 2);
        pattern.push('%');
        for c in self.term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// Same test as `like_pattern`, evaluated in memory
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.to_lowercase().contains(&self.term.to_lowercase())
    }
}

/// List base tables in scope, sorted by name
pub async fn list_tables(snapshot: &SessionSnapshot, search: Option<&str>) -> ScribeResult<Vec<TableName>> {
    let filter = match SearchPattern::parse(search) {
        Some(pattern) => TableFilter::Matching(pattern),
        None => TableFilter::All,
    };

    let mut tables = snapshot
        .bounded(snapshot.source().tables(snapshot.scope(), &filter))
        .await?;
    tables.sort();
    tables.dedup();

    debug!("Listed {} tables in {} ({:?})", tables.len(), snapshot.scope(), filter);
    Ok(tables)
}
