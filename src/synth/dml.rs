// DML Synthesis
//
// Renders fetched rows as `INSERT` statements, one per row, in fetch order.

use crate::engine::result::{DataValue, Row, RowSet};
use crate::synth::ident::quote_ident;
use crate::synth::literal::sql_literal;

/// Render a single `INSERT` statement (without trailing newline).
/// Columns missing from the row are written as `NULL`; a table without
/// columns gets `DEFAULT VALUES`.
pub fn render_insert(table: &str, columns: &[String], row: &Row) -> String {
    if columns.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES;", quote_ident(table));
    }

    let column_list = columns
        .iter()
        .map(|c| quote_ident(c).into_owned())
        .collect::<Vec<_>>()
        .join(", ");

    let values = columns
        .iter()
        .map(|c| sql_literal(row.get(c).unwrap_or(&DataValue::Null)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("INSERT INTO {} ({}) VALUES ({});", quote_ident(table), column_list, values)
}

/// Render one `INSERT` line per row, each terminated by a newline
pub fn render_inserts(table: &str, columns: &[String], rows: &RowSet) -> String {
    let mut dml = String::new();
    for row in rows.rows() {
        dml.push_str(&render_insert(table, columns, row));
        dml.push('\n');
    }
    dml
}
